//! Shared HTTP agent construction.

use std::time::Duration;

const USER_AGENT: &str = concat!("stuntzilla/", env!("CARGO_PKG_VERSION"));

/// Build a `ureq` agent with connect/read/write timeouts applied.
///
/// One agent per collaborator; cloning shares the underlying connection
/// pool, so the blocking worker closures clone freely.
pub fn build_agent(timeout: Duration) -> ureq::Agent {
    ureq::AgentBuilder::new()
        .timeout_connect(timeout)
        .timeout_read(timeout)
        .timeout_write(timeout)
        .user_agent(USER_AGENT)
        .build()
}
