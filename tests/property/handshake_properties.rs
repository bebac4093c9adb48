//! Property-based tests for origin filtering

use proptest::prelude::*;

use paneer::{MessageOutcome, OriginAllowList, TokenReceiver};

use crate::mocks::{token_message, TRUSTED_ORIGIN};

fn allow_list() -> OriginAllowList {
    OriginAllowList::new(vec![
        "http://localhost:3000".to_string(),
        TRUSTED_ORIGIN.to_string(),
    ])
}

proptest! {
    /// Any origin that is not on the allow-list leaves the receiver untouched,
    /// whatever the message carries.
    #[test]
    fn arbitrary_origins_are_rejected(origin in "[a-z]{1,12}://[a-z0-9.]{1,20}(:[0-9]{1,5})?") {
        prop_assume!(!allow_list().is_allowed(&origin));

        let mut rx = TokenReceiver::new(allow_list());
        let outcome = rx.handle_message(&origin, &token_message("a.b.c"));

        prop_assert_eq!(outcome, MessageOutcome::UnauthorizedOrigin);
        prop_assert!(!rx.has_token());
    }

    /// Any token string delivered from a trusted origin is stored verbatim,
    /// decodable payload or not.
    #[test]
    fn trusted_origin_tokens_are_stored_verbatim(token in "[A-Za-z0-9._-]{1,64}") {
        let mut rx = TokenReceiver::new(allow_list());
        rx.handle_message(TRUSTED_ORIGIN, &token_message(&token));

        prop_assert_eq!(rx.token().map(|t| t.as_str().to_string()), Some(token));
    }

    /// Garbage message bodies never store a token, even from trusted origins.
    #[test]
    fn malformed_bodies_never_store_a_token(raw in "[^{\"]{0,40}") {
        let mut rx = TokenReceiver::new(allow_list());
        let outcome = rx.handle_message(TRUSTED_ORIGIN, &raw);

        // Bare scalars ("123") parse as JSON but are still not token messages
        prop_assert!(matches!(
            outcome,
            MessageOutcome::MalformedPayload | MessageOutcome::NotATokenMessage
        ));
        prop_assert!(!rx.has_token());
    }
}
