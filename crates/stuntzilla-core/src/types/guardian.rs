//! Guardian entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::SubjectId;

/// Account representing the registering adult, keyed by verified identity.
///
/// Created on the first successful registration call for a given verified
/// identity. Never deleted; mutation is limited to re-registration overwrite
/// (idempotent upsert by identifier). The `created_at` timestamp is
/// server-assigned on every write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guardian {
    /// Subject id from identity verification. Globally unique, immutable.
    pub id: SubjectId,
    pub full_name: String,
    pub nickname: String,
    /// Server-assigned write timestamp, monotonic per write.
    pub created_at: DateTime<Utc>,
}
