//! End-to-end pricing through the engine and the dashboard router.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tower::ServiceExt;

use parlay_explorer::config::AppConfig;
use parlay_explorer::dashboard::{build_router, ExplorerDefaults, ExplorerState};
use parlay_explorer::data::{self, BetSource, StaticBetSource};
use parlay_explorer::odds;
use parlay_explorer::parlay::{self, QuoteRequest};
use parlay_explorer::types::ParlayMode;

use crate::mock_source::MockSource;

fn router_for(source: Box<dyn BetSource>, defaults: ExplorerDefaults) -> Router {
    build_router(Arc::new(ExplorerState::new(source, defaults)))
}

async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let resp = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 100_000).await.unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_reference_slate_end_to_end() {
    let source = StaticBetSource::new();
    let pool = source.fetch_candidate_bets().await.unwrap();

    let legs = parlay::select_top_legs(&pool, 3);
    let odds: Vec<i32> = legs.iter().map(|b| b.american_odds.value()).collect();
    assert_eq!(odds, vec![140, 105, 100]);

    let combined = parlay::combined_odds(&legs);
    assert!((combined - 9.84).abs() < 1e-9);
    assert_eq!(odds::decimal_to_american(combined).unwrap(), "+884");
    assert!((parlay::potential_winnings(10.0, combined) - 88.40).abs() < 1e-9);
}

#[tokio::test]
async fn test_leg_count_grows_odds() {
    let source = MockSource::with_odds(&[140, -115, 105, -130, 100]);
    let mut previous = 1.0;
    for legs in 3..=5 {
        let app = router_for(Box::new(source.clone()), ExplorerDefaults::default());
        let (status, json) = get_json(app, &format!("/api/parlay?legs={legs}&stake=10")).await;
        assert_eq!(status, StatusCode::OK);
        let combined = json["combined_decimal"].as_f64().unwrap();
        assert!(combined > previous);
        previous = combined;
    }
}

#[tokio::test]
async fn test_pool_changes_are_picked_up_per_request() {
    let source = MockSource::with_odds(&[100, 100, 100]);
    let app = router_for(Box::new(source.clone()), ExplorerDefaults::default());

    let (_, before) = get_json(app.clone(), "/api/parlay?legs=3").await;
    assert_eq!(before["combined_american"], "+700");

    source.replace_bets(MockSource::bets_from_odds(&[300, 100, 100, -200]));
    let (_, after) = get_json(app, "/api/parlay?legs=3").await;
    assert_eq!(after["combined_american"], "+1500");
    assert_eq!(source.fetch_count(), 2);
}

#[tokio::test]
async fn test_source_error_then_recovery() {
    let source = MockSource::with_odds(&[150, -110]);
    let app = router_for(Box::new(source.clone()), ExplorerDefaults::default());

    source.set_error("upstream down");
    let (status, json) = get_json(app.clone(), "/api/bets").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(json["error"].as_str().unwrap().contains("upstream down"));

    source.clear_error();
    let (status, json) = get_json(app, "/api/bets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_empty_pool_is_unprocessable() {
    let source = MockSource::with_odds(&[]);
    let (status, json) = get_json(
        router_for(Box::new(source), ExplorerDefaults::default()),
        "/api/parlay",
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(json["error"].as_str().unwrap().contains("empty"));
}

#[tokio::test]
async fn test_config_defaults_flow_into_quotes() {
    let cfg = AppConfig::from_toml(
        r#"
        [explorer]
        leg_count = 4
        parlay_mode = "same"
        default_stake = "1,000"
        "#,
    )
    .unwrap();
    let source = data::from_config(&cfg.source).unwrap();
    let app = router_for(source, ExplorerDefaults::from(&cfg.explorer));

    let (status, json) = get_json(app, "/api/parlay").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["legs"].as_array().unwrap().len(), 4);
    assert_eq!(json["mode"], "same");
    assert_eq!(json["stake"].as_f64().unwrap(), 1000.0);

    let expected = parlay::quote(
        &StaticBetSource::new().fetch_candidate_bets().await.unwrap(),
        &QuoteRequest { leg_count: 4, mode: ParlayMode::SameGame, stake: 1000.0 },
    )
    .unwrap();
    assert_eq!(json["winnings_display"], expected.winnings_display.as_str());
}

#[tokio::test]
async fn test_file_source_through_router() {
    let mut path = std::env::temp_dir();
    path.push(format!("parlay_it_bets_{}.json", uuid::Uuid::new_v4()));
    let bets = MockSource::bets_from_odds(&[200, -150, 120]);
    std::fs::write(&path, serde_json::to_string(&bets).unwrap()).unwrap();

    let source = data::JsonFileSource::new(&path);
    let app = router_for(Box::new(source), ExplorerDefaults::default());
    let (status, json) = get_json(app, "/api/parlay?legs=2&stake=5").await;
    assert_eq!(status, StatusCode::OK);
    // 3.0 * 2.2 = 6.6 → +560, winnings 5 * 5.6 = 28.00
    assert_eq!(json["combined_american"], "+560");
    assert_eq!(json["winnings_display"], "28.00");

    std::fs::remove_file(&path).unwrap();
}
