use std::sync::Arc;

use corsgate::policy::{Allowed, CorsPolicy};
use corsgate::registry::PolicyRegistry;

fn policy_for(origins: &str) -> Arc<CorsPolicy> {
    let mut policy = CorsPolicy::new();
    policy.set_allowed_origins(origins);
    Arc::new(policy)
}

#[test]
fn test_add_registers_under_every_origin_key() {
    let mut registry = PolicyRegistry::new();
    registry.add(policy_for("https://php.net, https://laravel.com, https://symfony.com"));

    assert_eq!(registry.len(), 3);
    assert!(registry.has("https://php.net"));
    assert!(registry.has("https://laravel.com"));
    assert!(registry.without("https://example.com"));
}

#[test]
fn test_wildcard_policy_registers_under_the_wildcard_key() {
    let mut registry = PolicyRegistry::new();
    registry.add(policy_for("*"));

    assert_eq!(registry.len(), 1);
    assert!(registry.get("*").is_some());
}

#[test]
fn test_re_registering_a_key_replaces_not_merges() {
    let mut registry = PolicyRegistry::new();

    let first = {
        let mut p = CorsPolicy::new();
        p.set_allowed_origins("https://php.net").set_max_age(100);
        Arc::new(p)
    };
    let second = {
        let mut p = CorsPolicy::new();
        p.set_allowed_origins("https://php.net").set_max_age(200);
        Arc::new(p)
    };

    registry.add(first);
    registry.add(second);

    assert_eq!(registry.len(), 1);
    let resolved = registry.get("https://php.net").expect("key registered");
    assert_eq!(resolved.max_age(), 200);
}

#[test]
fn test_overlapping_registrations_share_keys_without_double_counting() {
    let mut registry = PolicyRegistry::new();
    registry.add(policy_for("https://php.net, https://laravel.com, https://symfony.com"));
    registry.add(policy_for("https://php.net, https://phpunit.de, https://example.com"));

    assert_eq!(registry.len(), 5);
    let resolved = registry.get("https://php.net").expect("key registered");
    assert_eq!(
        resolved.allowed_origins(),
        &Allowed::List(vec![
            "https://php.net".into(),
            "https://phpunit.de".into(),
            "https://example.com".into(),
        ])
    );
}

#[test]
fn test_get_falls_back_to_pattern_scan_in_insertion_order() {
    let mut registry = PolicyRegistry::new();

    let wide = {
        let mut p = CorsPolicy::new();
        p.set_allowed_origins("*.example.com").set_max_age(10);
        Arc::new(p)
    };
    let narrow = {
        let mut p = CorsPolicy::new();
        p.set_allowed_origins("*.api.example.com").set_max_age(20);
        Arc::new(p)
    };

    registry.add(wide);
    registry.add(narrow);

    // Both patterns cover this origin; the first registered wins.
    let resolved = registry
        .get("https://v2.api.example.com")
        .expect("pattern match");
    assert_eq!(resolved.max_age(), 10);

    // Exact keys beat the scan.
    assert_eq!(
        registry
            .get("*.api.example.com")
            .expect("exact key")
            .max_age(),
        20
    );
}

#[test]
fn test_pattern_lookup_covers_apex_and_subdomains() {
    let mut registry = PolicyRegistry::new();
    registry.add(policy_for("*.example.com"));

    assert!(registry.has("https://example.com"));
    assert!(registry.has("https://api.example.com"));
    assert!(registry.without("https://api.example.com.vn"));
}

#[test]
fn test_last_and_flush() {
    let mut registry = PolicyRegistry::new();
    assert!(registry.is_empty());
    assert!(registry.last().is_none());

    registry.add(policy_for("https://a.com"));
    let late = {
        let mut p = CorsPolicy::new();
        p.set_allowed_origins("https://b.com").set_max_age(5);
        Arc::new(p)
    };
    registry.add(late);

    assert_eq!(registry.last().expect("not empty").max_age(), 5);

    registry.flush();
    assert!(registry.is_empty());
    assert_eq!(registry.len(), 0);
}

#[test]
fn test_remove_drops_a_single_key() {
    let mut registry = PolicyRegistry::new();
    registry.add(policy_for("https://a.com, https://b.com"));

    registry.remove("https://a.com");

    assert_eq!(registry.len(), 1);
    assert!(registry.without("https://a.com"));
    assert!(registry.has("https://b.com"));
}
