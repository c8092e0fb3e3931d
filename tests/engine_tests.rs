// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Engine-level tests: global rollup, idempotence, concurrency and caching.

use pacefund::config::Config;
use pacefund::{evaluate_concurrently, Engine};
use rust_decimal_macros::dec;
use std::sync::Arc;

mod common;

#[test]
fn test_global_rollup_sums_across_campaigns() {
    let engine = Engine::default();
    let report = engine.evaluate(&common::load_snapshot()).unwrap();

    let ids: Vec<u64> = report.campaigns.iter().map(|c| c.campaign_id).collect();
    assert_eq!(ids, vec![1, 2]);

    let global = &report.global;
    assert_eq!(global.summary.total_value, dec!(18.00));
    assert_eq!(global.summary.total_distance_m, 75_000.0);
    assert_eq!(global.summary.athlete_count, 3);
    assert_eq!(global.summary.avg_km_per_athlete, 25.0);

    let top: Vec<&str> = global
        .top_athletes
        .iter()
        .map(|a| a.athlete_id.as_str())
        .collect();
    assert_eq!(top, vec!["ana", "bruno", "diego"]);
    assert_eq!(global.top_athletes[0].total_value, dec!(12.00));
    assert_eq!(global.top_athletes[0].total_distance_m, 45_000.0);

    let daily: Vec<(String, f64)> = global
        .daily
        .iter()
        .map(|p| (p.day.to_string(), p.km))
        .collect();
    assert_eq!(
        daily,
        vec![
            ("2025-01-01".to_string(), 15.0),
            ("2025-01-02".to_string(), 50.0),
            ("2025-01-03".to_string(), 10.0),
        ]
    );
}

#[test]
fn test_rerun_is_bit_identical() {
    let snapshot = common::load_snapshot();
    let first = Engine::default().evaluate(&snapshot).unwrap();
    let second = Engine::default().evaluate(&snapshot).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.digest, second.digest);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_digest_tracks_inputs() {
    let mut snapshot = common::load_snapshot();
    let before = Engine::default().evaluate(&snapshot).unwrap();
    snapshot.activities[0].distance_m += 1000.0;
    let after = Engine::default().evaluate(&snapshot).unwrap();
    assert_ne!(before.digest, after.digest);
}

#[tokio::test]
async fn test_concurrent_matches_sequential() {
    let snapshot = common::load_snapshot();
    let sequential = Engine::default().evaluate(&snapshot).unwrap();
    let concurrent = evaluate_concurrently(Arc::new(Engine::default()), &snapshot)
        .await
        .unwrap();
    assert_eq!(sequential, concurrent);
}

#[tokio::test]
async fn test_concurrent_surfaces_validation_errors() {
    let mut snapshot = common::load_snapshot();
    snapshot.ngos.retain(|n| n.ngo_id != 30);

    let err = evaluate_concurrently(Arc::new(Engine::default()), &snapshot)
        .await
        .unwrap_err();
    let body = err.to_response();
    assert_eq!(body.error, "allocation_sum");
    assert_eq!(
        body.details.as_deref(),
        Some("allocation percentages sum to 90, expected 100")
    );
    assert_eq!(err.exit_code(), 2);
}

#[test]
fn test_cache_serves_and_invalidates() {
    let engine = Engine::default();
    let mut snapshot = common::load_snapshot();

    let first = engine.evaluate(&snapshot).unwrap();
    assert_eq!(engine.cache.len(), 2);

    let inputs = snapshot.partition();
    let a = engine.evaluate_campaign(&inputs[0]).unwrap();
    let b = engine.evaluate_campaign(&inputs[0]).unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    // Changing an input changes the fingerprint and forces recomputation
    snapshot.rules.retain(|r| !(r.campaign_id == 1 && r.version == 2));
    let changed = engine.evaluate(&snapshot).unwrap();
    assert_ne!(first.campaigns[0], changed.campaigns[0]);
    assert_eq!(changed.campaigns[0].rule_version, 1);
    assert_eq!(first.campaigns[1], changed.campaigns[1]);

    engine.cache.invalidate(1);
    assert_eq!(engine.cache.len(), 1);
}

#[test]
fn test_cache_disabled_recomputes() {
    let engine = Engine::new(Config {
        cache_enabled: false,
        ..Config::default()
    });
    let snapshot = common::load_snapshot();
    let cached = Engine::default().evaluate(&snapshot).unwrap();
    let uncached = engine.evaluate(&snapshot).unwrap();
    assert_eq!(cached, uncached);
    assert!(engine.cache.is_empty());
}

#[test]
fn test_top_athletes_config_bounds_leaderboards() {
    let engine = Engine::new(Config {
        top_athletes: 1,
        ..Config::default()
    });
    let report = engine.evaluate(&common::load_snapshot()).unwrap();
    assert_eq!(report.global.top_athletes.len(), 1);
    assert!(report.campaigns.iter().all(|c| c.top_athletes.len() == 1));
}
