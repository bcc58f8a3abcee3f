//! Dependent entity.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::ids::{DependentId, SubjectId};

/// Record representing a child under a Guardian's care.
///
/// Invariant: `owner` always corresponds to the verified identity that
/// created the record. It is written once from the authorization context and
/// never assignable from raw caller input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dependent {
    /// System-generated unique identifier.
    pub id: DependentId,
    /// Owning guardian's subject id. Required, immutable.
    pub owner: SubjectId,
    pub full_name: String,
    pub birth_date: NaiveDate,
    /// Server-assigned write timestamp.
    pub created_at: DateTime<Utc>,
}
