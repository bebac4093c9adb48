//! Property-based tests for transaction payload shapes

use proptest::prelude::*;

use paneer::TransactionRequest;

fn keys_of(value: &serde_json::Value) -> Vec<String> {
    let mut keys: Vec<String> = value
        .as_object()
        .expect("payload must serialize to an object")
        .keys()
        .cloned()
        .collect();
    keys.sort();
    keys
}

proptest! {
    /// A payment carries exactly the stake fields, never reward fields.
    #[test]
    fn payment_shape_is_exact(amusement_id in 0u64..100_000, stake in 0.01f64..1000.0) {
        let wire = serde_json::to_value(TransactionRequest::Payment {
            amusement_id,
            stake_amount: stake,
        }).unwrap();

        prop_assert_eq!(keys_of(&wire), vec!["amusement_id".to_string(), "stake_amount".to_string()]);
        prop_assert_eq!(wire["amusement_id"].as_u64(), Some(amusement_id));
    }

    /// A cash reward carries exactly the payout fields.
    #[test]
    fn cash_reward_shape_is_exact(amusement_id in 0u64..100_000, payout in 0.01f64..1000.0) {
        let wire = serde_json::to_value(TransactionRequest::CashReward {
            amusement_id,
            payout_amount: payout,
        }).unwrap();

        prop_assert_eq!(keys_of(&wire), vec!["amusement_id".to_string(), "payout_amount".to_string()]);
    }

    /// A stamp reward carries the payout fields plus the stamp id.
    #[test]
    fn stamp_reward_shape_is_exact(
        amusement_id in 0u64..100_000,
        payout in 0.0f64..10.0,
        stamp_id in 0u64..1000,
    ) {
        let wire = serde_json::to_value(TransactionRequest::StampReward {
            amusement_id,
            payout_amount: payout,
            stamp_id,
        }).unwrap();

        prop_assert_eq!(keys_of(&wire), vec![
            "amusement_id".to_string(),
            "payout_amount".to_string(),
            "stamp_id".to_string(),
        ]);
        prop_assert_eq!(wire["stamp_id"].as_u64(), Some(stamp_id));
    }
}
