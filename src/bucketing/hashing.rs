use sha1::{Digest, Sha1};

/// Leading digest bits used for the fraction: the first 13 hex digits.
pub const FRACTION_BITS: u32 = 52;

/// 2^52 - 1, the largest value 52 bits can hold.
pub const FRACTION_DENOMINATOR: u64 = 0xf_ffff_ffff_ffff;

/// Seed string for one visitor in one experiment.
pub fn seed(experiment_name: &str, anonymous_id: &str) -> String {
    format!("{experiment_name}.{anonymous_id}")
}

/// Map a seed to a fraction in `[0, 1]`.
///
/// The seed is SHA-1 hashed, the first 13 hex digits of the lowercase digest
/// are read as an unsigned integer and divided by `0xfffffffffffff`. The same
/// seed always yields the same fraction.
pub fn seeded_fraction(seed: &str) -> f64 {
    let mut hasher = Sha1::new();
    hasher.update(seed.as_bytes());

    let digest = hasher.finalize();

    // first 7 bytes are 56 bits; drop the trailing nibble to keep 52
    let mut buf = [0u8; 8];
    buf[1..].copy_from_slice(&digest[..7]);
    let value = u64::from_be_bytes(buf) >> (56 - FRACTION_BITS);

    let fraction = value as f64 / FRACTION_DENOMINATOR as f64;
    debug_assert!((0.0..=1.0).contains(&fraction), "fraction {fraction} out of range [0.0, 1.0]");
    fraction
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_joins_with_dot() {
        assert_eq!(seed("hero-copy", "abc-123"), "hero-copy.abc-123");
    }

    #[test]
    fn fraction_uses_first_thirteen_hex_digits() {
        // sha1("checkout-button-color.abc-123") = 56e9e0095ad1e2960c131a1dbcef36620f67e9db
        let expected = 0x56e9e0095ad1e_u64 as f64 / FRACTION_DENOMINATOR as f64;
        assert_eq!(seeded_fraction("checkout-button-color.abc-123"), expected);
    }

    #[test]
    fn digest_prefix_with_high_bits_set() {
        // sha1("checkout-button-color.visitor-1") = f798eb5e3b1bf90552e70079a4d9d6f2771d130f
        let expected = 0xf798eb5e3b1bf_u64 as f64 / FRACTION_DENOMINATOR as f64;
        assert_eq!(seeded_fraction("checkout-button-color.visitor-1"), expected);
        assert!(expected < 1.0);
    }

    #[test]
    fn different_seeds_give_different_fractions() {
        assert_ne!(
            seeded_fraction("checkout-button-color.abc-123"),
            seeded_fraction("new-pricing.abc-123")
        );
    }
}
