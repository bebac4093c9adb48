//! Session flow tests
//!
//! These run without a live backend: they exercise the local short-circuits
//! (missing token, missing amusement, phase guards) and the development-mode
//! lookup fallback against an endpoint nothing listens on.

use paneer::{
    GameClientError, GamePhase, GameSession, MessageOutcome, RewardChoice, TransactionClient,
    TransactionRequest,
};

use crate::mocks::{
    offline_dev_config, offline_prod_config, serve_json_once, token_message, visitor_token,
    TRUSTED_ORIGIN,
};
use paneer::PaneerConfig;

#[tokio::test]
async fn submit_without_token_fails_locally() {
    let config = offline_dev_config();
    let client = TransactionClient::new(&config.api).unwrap();

    let request = TransactionRequest::Payment {
        amusement_id: 11,
        stake_amount: 2.0,
    };

    // No token: the client must fail before any network I/O. The endpoint
    // is unroutable, so a network attempt would error differently.
    let result = client.submit(None, &request).await;

    assert!(!result.success);
    assert_eq!(result.error.as_deref(), Some("No bearer token available"));
}

#[tokio::test]
async fn development_lookup_failure_falls_back() {
    let mut session = GameSession::new(offline_dev_config()).unwrap();

    let amusement = session.resolve_amusement().await.unwrap().clone();

    assert_eq!(amusement.id, 11);
    assert_eq!(amusement.name, "Enter Paneer");
}

#[tokio::test]
async fn development_lookup_failure_keeps_previously_resolved_amusement() {
    let body = r#"{"id":42,"name":"Enter Paneer","group_id":8}"#.to_string();
    let addr = serve_json_once(body).await;

    let mut config = PaneerConfig::development();
    config.api.base_url = format!("http://{}/api", addr);
    config.api.request_timeout = 2;
    let mut session = GameSession::new(config).unwrap();

    // Live backend: the real id wins over the fallback
    assert_eq!(session.resolve_amusement().await.unwrap().id, 42);

    // Backend gone: the retry fails and must not clobber the resolved id
    // with the development fallback
    let retry = session.resolve_amusement().await;
    assert!(retry.is_err());
    assert_eq!(session.amusement().map(|a| a.id), Some(42));
    assert!(session.lookup_error().is_some());
}

#[tokio::test]
async fn production_lookup_failure_propagates_and_never_caches() {
    let mut session = GameSession::new(offline_prod_config()).unwrap();

    for _ in 0..3 {
        assert!(session.resolve_amusement().await.is_err());
        assert!(session.amusement().is_none());
    }
    assert!(session.lookup_error().is_some());
}

#[tokio::test]
async fn stake_requires_resolved_amusement() {
    let mut session = GameSession::new(offline_prod_config()).unwrap();
    session.handle_frame_message(TRUSTED_ORIGIN, &token_message(&visitor_token()));

    let err = session.pay_stake().await.unwrap_err();
    assert!(matches!(err, GameClientError::AmusementNotFound(_)));
    assert_eq!(session.phase(), GamePhase::Unpaid);
}

#[tokio::test]
async fn reward_claim_requires_a_win() {
    let mut session = GameSession::new(offline_dev_config()).unwrap();

    let err = session.claim_reward(RewardChoice::Cash).await.unwrap_err();
    assert!(matches!(err, GameClientError::InvalidTransition { .. }));
}

#[tokio::test]
async fn frame_message_feeds_session_token() {
    let mut session = GameSession::new(offline_dev_config()).unwrap();
    assert!(!session.has_token());

    let outcome = session.handle_frame_message(TRUSTED_ORIGIN, &token_message(&visitor_token()));

    assert_eq!(outcome, MessageOutcome::Accepted { claims_decoded: true });
    assert!(session.has_token());
    assert_eq!(
        session.token_claims().and_then(|c| c.sub.as_deref()),
        Some("visitor-7")
    );
}

#[tokio::test]
async fn failed_stake_leaves_round_unpaid() {
    let mut session = GameSession::new(offline_dev_config()).unwrap();
    session.handle_frame_message(TRUSTED_ORIGIN, &token_message(&visitor_token()));
    session.resolve_amusement().await.unwrap();

    // Backend unreachable: submission folds into a failed result
    let result = session.pay_stake().await.unwrap();
    assert!(!result.success);
    assert_eq!(session.phase(), GamePhase::Unpaid);

    // Guessing stays gated until a stake succeeds
    assert!(session.submit_guess("paneer").is_err());
}

#[tokio::test]
async fn reset_clears_round_but_keeps_token_and_amusement() {
    let mut session = GameSession::new(offline_dev_config()).unwrap();
    session.handle_frame_message(TRUSTED_ORIGIN, &token_message(&visitor_token()));
    session.resolve_amusement().await.unwrap();

    session.reset();

    assert_eq!(session.phase(), GamePhase::Unpaid);
    assert_eq!(session.attempts(), 0);
    assert!(session.has_token());
    assert!(session.amusement().is_some());
}
