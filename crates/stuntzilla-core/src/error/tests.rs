use uuid::Uuid;

use super::*;

#[test]
fn recoverable_classification() {
    assert!(StuntzillaError::Token(TokenError::Unavailable("x".into())).is_recoverable());
    assert!(StuntzillaError::Upstream(UpstreamError::Status(503)).is_recoverable());
    assert!(
        StuntzillaError::Identity(IdentityError::ProviderUnavailable("dns".into()))
            .is_recoverable()
    );
    assert!(StuntzillaError::Store(StoreError::Unavailable("pool".into())).is_recoverable());

    assert!(!StuntzillaError::validation("empty name").is_recoverable());
    assert!(!StuntzillaError::Identity(IdentityError::ExpiredAssertion).is_recoverable());
    assert!(
        !StuntzillaError::Store(StoreError::DependentNotFound(Uuid::new_v4())).is_recoverable()
    );
}

#[test]
fn not_found_classification() {
    assert!(StuntzillaError::Store(StoreError::GuardianNotFound("g1".into())).is_not_found());
    assert!(StuntzillaError::Store(StoreError::DependentNotFound(Uuid::new_v4())).is_not_found());
    assert!(!StuntzillaError::Store(StoreError::Unavailable("down".into())).is_not_found());
    assert!(!StuntzillaError::validation("x").is_not_found());
}

#[test]
fn display_includes_context() {
    let err = StuntzillaError::Store(StoreError::Serialization {
        collection: "guardians".into(),
        id: "g1".into(),
        reason: "missing field `full_name`".into(),
    });
    let msg = err.to_string();
    assert!(msg.contains("guardians/g1"));
    assert!(msg.contains("full_name"));
}

#[test]
fn from_conversions() {
    fn takes_unified(e: impl Into<StuntzillaError>) -> StuntzillaError {
        e.into()
    }
    assert!(matches!(
        takes_unified(IdentityError::ExpiredAssertion),
        StuntzillaError::Identity(IdentityError::ExpiredAssertion)
    ));
    assert!(matches!(
        takes_unified(UpstreamError::Transport("refused".into())),
        StuntzillaError::Upstream(UpstreamError::Transport(_))
    ));
}
