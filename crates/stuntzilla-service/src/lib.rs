//! Stuntzilla service components.
//!
//! The identity-verified hierarchical record store combined with the
//! access-token-mediated prediction proxy:
//!
//! - [`IdentityVerifier`]: gates every mutating or ownership-checked request
//! - [`RecordService`]: Guardian/Dependent reads and writes over the
//!   document store
//! - [`TokenCache`]: process-wide, expiry-aware, single-flight cache of the
//!   machine credential
//! - [`PredictionProxy`]: feature validation, authenticated prediction call,
//!   score-to-category translation
//! - [`App`]: the four upward operations the routing layer dispatches to
//!
//! Each inbound request runs as an independent task; the only mutable state
//! shared between tasks is the token cache's single entry. Within one
//! request, identity verification strictly precedes the write it authorizes.

mod app;
mod proxy;
mod records;
mod token_cache;
mod verifier;

pub use app::App;
pub use proxy::PredictionProxy;
pub use records::RecordService;
pub use token_cache::TokenCache;
pub use verifier::IdentityVerifier;
