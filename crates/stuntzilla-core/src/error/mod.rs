//! Error types for stuntzilla-core.
//!
//! This module defines the error taxonomy shared by every component:
//!
//! - [`StuntzillaError`]: Top-level unified error for all crate errors
//! - Sub-error types: [`IdentityError`], [`StoreError`], [`TokenError`],
//!   [`UpstreamError`]
//!
//! None of these are recovered silently inside the core. Each failure is
//! returned to the caller as a typed outcome; the routing layer above maps
//! them to transport-level responses. Library code never panics; errors
//! propagate with the `?` operator.

mod sub_errors;
mod unified;

#[cfg(test)]
mod tests;

pub use sub_errors::{IdentityError, StoreError, TokenError, UpstreamError};
pub use unified::StuntzillaError;

// Re-export Result type alias
pub use unified::Result;
