/// Pick a choice index by inverse-CDF sampling over `weights`.
///
/// `target = ceil(fraction * sum(weights))`; weights are subtracted in
/// declared order and the first index where the target drops to zero or
/// below wins. A fraction of `0.0` always picks index 0.
///
/// The target is an integer, so weights must be whole numbers for the walk
/// to honour them: `[0.3, 0.3]` never crosses a boundary (`None`) and
/// `[0.5, 0.5]` always lands on the last choice. For a non-empty list of
/// positive whole-number weights a boundary is always crossed.
pub fn select_index(weights: &[f64], fraction: f64) -> Option<usize> {
    let sum_weights: f64 = weights.iter().sum();
    let mut target = (fraction * sum_weights).ceil();

    for (index, weight) in weights.iter().enumerate() {
        target -= weight;
        if target <= 0.0 {
            return Some(index);
        }
    }

    None
}
