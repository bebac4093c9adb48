//! Complete session flow demonstration
//!
//! Walks one round end to end: handshake, amusement resolution, stake,
//! guesses and reward claim. Runs in development mode so a missing backend
//! falls back to the configured amusement; transactions against a dead
//! endpoint simply report failure.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use paneer::{GameSession, GuessOutcome, PaneerConfig, RewardChoice};

fn demo_token() -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"demo-visitor","iss":"tivoli"}"#);
    format!("{}.{}.unsigned", header, payload)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    paneer::error::logging::init_from_env()
        .map_err(|e| anyhow::anyhow!("logging init failed: {e}"))?;

    let config = PaneerConfig::development().apply_env();
    let mut session = GameSession::new(config)?;

    println!("posting to parent frame: {}", session.ready_announcement());

    let message = serde_json::json!({"type": "JWT_TOKEN", "token": demo_token()}).to_string();
    let outcome = session.handle_frame_message("http://localhost:3000", &message);
    println!("handshake outcome: {:?}", outcome);
    if let Some(claims) = session.token_claims() {
        println!("visitor: {}", claims.sub.as_deref().unwrap_or("<unknown>"));
    }

    let amusement = session.resolve_amusement().await?.clone();
    println!("amusement resolved: {} (id {})", amusement.name, amusement.id);

    let stake = session.pay_stake().await?;
    println!("stake result: {:?}", stake);
    if !stake.success {
        println!("no live backend; stopping after the offline part of the flow");
        return Ok(());
    }

    for guess in ["halloumi", "gouda", "paneer"] {
        match session.submit_guess(guess)? {
            GuessOutcome::Won => {
                println!("\"{}\" wins!", guess);
                break;
            }
            GuessOutcome::Miss { encouragement, .. } => println!("{}", encouragement),
        }
    }

    let reward = session.claim_reward(RewardChoice::Cash).await?;
    println!("reward result: {:?}", reward);

    Ok(())
}
