//! Domain types for the child-growth assessment core.
//!
//! Two related entity kinds — [`Guardian`] and [`Dependent`] — form the
//! hierarchical record model: a Dependent is only creatable via its owning
//! Guardian's verified identity. [`AssessmentInput`] and
//! [`AssessmentResult`] carry the prediction proxy's inputs and outputs, and
//! [`AccessToken`] is the short-lived machine credential held by the token
//! cache.

mod assessment;
mod dependent;
mod guardian;
mod ids;
mod token;

pub use assessment::{AssessmentInput, AssessmentResult, FeatureVector, RiskCategory};
pub use dependent::Dependent;
pub use guardian::Guardian;
pub use ids::{DependentId, SubjectId};
pub use token::{AccessToken, VerifiedIdentity};
