//! End-to-end flows through the application facade.

use std::sync::Arc;

use chrono::NaiveDate;

use stuntzilla_core::config::Config;
use stuntzilla_core::error::{IdentityError, StoreError, StuntzillaError};
use stuntzilla_core::stubs::{
    StubCredentialProvider, StubIdentityProvider, StubPredictionEndpoint,
};
use stuntzilla_core::types::{AssessmentInput, RiskCategory};
use stuntzilla_service::App;
use stuntzilla_storage::MemoryDocumentStore;

struct Harness {
    app: App,
    identity: Arc<StubIdentityProvider>,
    endpoint: Arc<StubPredictionEndpoint>,
}

fn harness() -> Harness {
    let identity = Arc::new(StubIdentityProvider::new());
    let endpoint = Arc::new(StubPredictionEndpoint::with_score(1.0));
    let app = App::new(
        identity.clone(),
        Arc::new(MemoryDocumentStore::new()),
        Arc::new(StubCredentialProvider::new()),
        endpoint.clone(),
        &Config::default(),
    );
    Harness {
        app,
        identity,
        endpoint,
    }
}

fn birth_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn complete_input() -> AssessmentInput {
    AssessmentInput {
        sex: Some(1.0),
        age: Some(24.0),
        birth_weight: Some(3.2),
        birth_length: Some(49.0),
        body_weight: Some(11.0),
        body_length: Some(85.0),
    }
}

#[tokio::test]
async fn register_create_fetch_scenario() {
    let h = harness();
    h.identity.register("token-g1", "g1");

    let guardian = h
        .app
        .register_guardian("token-g1", "Guardian One", "G")
        .await
        .unwrap();
    assert_eq!(guardian.id.as_str(), "g1");
    assert_eq!(guardian.full_name, "Guardian One");

    let created = h
        .app
        .create_dependent("token-g1", "Budi", birth_date("2020-01-01"))
        .await
        .unwrap();
    assert_eq!(created.owner.as_str(), "g1");

    let fetched = h.app.get_dependent("token-g1", created.id).await.unwrap();
    assert_eq!(fetched.full_name, "Budi");
    assert_eq!(fetched.birth_date, birth_date("2020-01-01"));
    assert_eq!(fetched.owner.as_str(), "g1");
}

#[tokio::test]
async fn writes_require_a_valid_assertion() {
    let h = harness();

    let err = h
        .app
        .register_guardian("not-a-token", "X", "x")
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        StuntzillaError::Identity(IdentityError::InvalidAssertion(_))
    ));

    let err = h
        .app
        .create_dependent("not-a-token", "Budi", birth_date("2020-01-01"))
        .await
        .unwrap_err();
    assert!(matches!(err, StuntzillaError::Identity(_)));
}

#[tokio::test]
async fn foreign_dependent_reads_report_not_found() {
    let h = harness();
    h.identity.register("token-g1", "g1");
    h.identity.register("token-g2", "g2");

    let created = h
        .app
        .create_dependent("token-g1", "Budi", birth_date("2020-01-01"))
        .await
        .unwrap();

    // Another verified guardian knowing the identifier learns nothing.
    let err = h.app.get_dependent("token-g2", created.id).await.unwrap_err();
    assert!(matches!(
        err,
        StuntzillaError::Store(StoreError::DependentNotFound(_))
    ));

    // The owner still reads it fine.
    assert!(h.app.get_dependent("token-g1", created.id).await.is_ok());
}

#[tokio::test]
async fn assessment_translates_scores_through_the_facade() {
    let h = harness();

    h.endpoint.push_score(3.4);
    let result = h.app.assess(&complete_input()).await.unwrap();
    assert_eq!(result.category, RiskCategory::Normal);

    h.endpoint.push_score(-0.2);
    let result = h.app.assess(&complete_input()).await.unwrap();
    assert_eq!(result.category, RiskCategory::Stunting);
    assert!(!result.advisory.is_empty());
}

#[tokio::test]
async fn operations_run_as_independent_spawned_tasks() {
    let h = harness();
    let app = Arc::new(h.app);

    // A routing layer dispatches each request on its own task, so every
    // facade operation must yield a Send future.
    let handle = {
        let app = Arc::clone(&app);
        tokio::spawn(async move { app.assess(&complete_input()).await })
    };
    let result = handle.await.unwrap().unwrap();
    assert_eq!(result.category, RiskCategory::Normal);
}

#[tokio::test]
async fn assessment_validation_precedes_every_network_call() {
    let h = harness();

    let err = h.app.assess(&AssessmentInput::default()).await.unwrap_err();
    assert!(matches!(err, StuntzillaError::Validation(_)));
    assert_eq!(h.endpoint.call_count(), 0);
}
