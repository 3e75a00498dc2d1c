use std::sync::Arc;

use site_experiments::bucketing::{seed, seeded_fraction, FRACTION_DENOMINATOR};
use site_experiments::storage::{KeyValueStore, MemoryStore};
use site_experiments::{BrowserContext, ExecutionContext, Experiment, ExperimentOptions};

fn visitor(anonymous_id: &str) -> BrowserContext {
    BrowserContext::in_memory()
        .with_cookies(Arc::new(MemoryStore::new().with_entry("anonId", anonymous_id)))
}

fn checkout_experiment(context: impl Into<ExecutionContext>) -> Experiment<&'static str> {
    Experiment::new(
        "checkout-button-color",
        ExperimentOptions::new(vec!["blue", "green"]).with_weights(vec![1.0, 1.0]),
        context,
    )
    .unwrap()
}

#[test]
fn golden_checkout_button_assignment() {
    // sha1("checkout-button-color.abc-123")
    //   = 56e9e0095ad1e2960c131a1dbcef36620f67e9db
    // 0x56e9e0095ad1e / 0xfffffffffffff ~= 0.33951
    // ceil(0.3395 * 2) = 1 -> first choice
    let experiment = checkout_experiment(visitor("abc-123"));

    let expected_fraction = 0x56e9e0095ad1e_u64 as f64 / FRACTION_DENOMINATOR as f64;
    assert_eq!(experiment.deterministic_random_number(), expected_fraction);
    assert!((expected_fraction - 0.339_506_151_470_068_2).abs() < 1e-12);

    for _ in 0..10 {
        assert_eq!(experiment.variant(), "blue");
    }
}

#[test]
fn golden_fractions_for_known_seeds() {
    let cases = [
        ("new-pricing.abc-123", 0x901095bd8d759_u64),
        ("checkout-button-color.visitor-1", 0xf798eb5e3b1bf_u64),
        ("hero-copy.abc-123", 0x67058063dfd94_u64),
    ];

    for (seed, prefix) in cases {
        let expected = prefix as f64 / FRACTION_DENOMINATOR as f64;
        assert_eq!(seeded_fraction(seed), expected, "seed {seed}");
    }
}

#[test]
fn same_visitor_same_variant_across_fresh_contexts() {
    // A new context per load models a fresh page with the same cookie.
    let first = checkout_experiment(visitor("visitor-1")).variant();
    for _ in 0..5 {
        assert_eq!(checkout_experiment(visitor("visitor-1")).variant(), first);
    }
    // 0.967 of the way through [1, 1] weights
    assert_eq!(first, "green");
}

#[test]
fn seed_is_experiment_name_dot_anonymous_id() {
    let experiment = checkout_experiment(visitor("abc-123"));
    assert_eq!(
        experiment.deterministic_random_number(),
        seeded_fraction(&seed("checkout-button-color", "abc-123"))
    );
}

#[test]
fn experiment_name_changes_assignment_input() {
    let context = visitor("abc-123");
    let pricing = Experiment::new(
        "new-pricing",
        ExperimentOptions::new(vec!["A", "B"]),
        context.clone(),
    )
    .unwrap();
    let checkout = checkout_experiment(context);

    assert_ne!(
        pricing.deterministic_random_number(),
        checkout.deterministic_random_number()
    );
    // 0.5627 with [1, 1] -> second choice
    assert_eq!(pricing.variant(), "B");
}

#[test]
fn server_context_always_gets_control() {
    for name in ["checkout-button-color", "new-pricing", "hero-copy", "x"] {
        let experiment = Experiment::new(
            name,
            ExperimentOptions::new(vec!["control", "treatment"]).with_weights(vec![1.0, 1000.0]),
            ExecutionContext::Server,
        )
        .unwrap();

        assert!(experiment.anonymous_id().is_none());
        assert_eq!(experiment.deterministic_random_number(), 0.0);
        assert_eq!(experiment.variant(), "control");
    }
}

#[test]
fn anonymous_id_created_once_and_reused() {
    let cookies = Arc::new(MemoryStore::new());
    let context = BrowserContext::in_memory().with_cookies(cookies.clone());
    let experiment = checkout_experiment(context);

    let first = experiment.anonymous_id().unwrap();
    let second = experiment.anonymous_id().unwrap();

    assert_eq!(first, second);
    assert_eq!(cookies.get("anonId").unwrap().as_deref(), Some(first.as_str()));
    assert_eq!(cookies.len(), 1);
}

#[test]
fn anonymous_id_honors_custom_cookie_name() {
    let cookies = Arc::new(MemoryStore::new().with_entry("visitorId", "abc-123"));
    let experiment = Experiment::new(
        "checkout-button-color",
        ExperimentOptions::new(vec!["blue", "green"]).with_cookie_name("visitorId"),
        BrowserContext::in_memory().with_cookies(cookies.clone()),
    )
    .unwrap();

    assert_eq!(experiment.anonymous_id().unwrap().as_str(), "abc-123");
    assert_eq!(experiment.variant(), "blue");
    assert_eq!(cookies.get("anonId").unwrap(), None);
}

#[test]
fn empty_cookie_value_is_replaced() {
    let cookies = Arc::new(MemoryStore::new().with_entry("anonId", ""));
    let experiment = checkout_experiment(BrowserContext::in_memory().with_cookies(cookies.clone()));

    let id = experiment.anonymous_id().unwrap();
    assert_eq!(id.as_str().len(), 36);
    assert_eq!(cookies.get("anonId").unwrap().as_deref(), Some(id.as_str()));
}

#[test]
fn unwritable_cookie_yields_fresh_id_each_call() {
    let context = BrowserContext::in_memory().with_cookies(Arc::new(MemoryStore::read_only()));
    let experiment = checkout_experiment(context);

    let first = experiment.anonymous_id().unwrap();
    let second = experiment.anonymous_id().unwrap();
    assert_ne!(first, second);

    // still assigns a real choice
    assert!(["blue", "green"].contains(&experiment.variant()));
}
