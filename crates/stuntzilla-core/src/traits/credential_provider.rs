//! Credential provider trait.

use async_trait::async_trait;

use crate::error::TokenError;
use crate::types::AccessToken;

/// External provider of the machine credential used to call the prediction
/// service.
///
/// Invoked only through the token cache's single-flight refresh: under N
/// concurrent cache misses this is called exactly once. Implementations do
/// not need to deduplicate calls themselves.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    /// Fetch a fresh access token for the given scope.
    ///
    /// # Errors
    /// - `TokenError::Unavailable` - The credential could not be obtained
    async fn fetch_access_token(&self, scope: &str) -> Result<AccessToken, TokenError>;
}
