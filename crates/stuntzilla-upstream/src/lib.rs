//! HTTP-backed collaborator implementations.
//!
//! Production counterparts of the traits in `stuntzilla_core::traits`:
//!
//! - [`HttpIdentityProvider`]: identity-assertion verification
//! - [`HttpCredentialProvider`]: machine-credential fetch
//! - [`HttpPredictionEndpoint`]: the remote `:predict` endpoint
//!
//! Outbound calls use a blocking `ureq::Agent` bridged onto the async
//! runtime with `tokio::task::spawn_blocking`; the agent is cheap to clone
//! into the worker closure. Timeouts are set on the agent, so a hung
//! upstream surfaces as a transport error instead of a stuck task.

mod credential;
mod http;
mod identity;
mod prediction;

pub use credential::HttpCredentialProvider;
pub use http::build_agent;
pub use identity::HttpIdentityProvider;
pub use prediction::HttpPredictionEndpoint;
