//! Identifier newtypes.
//!
//! Entity identifiers are wrapped in newtypes so a guardian's subject id and
//! a dependent's generated id cannot be swapped at a call site.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable subject identifier bound into a verified identity assertion.
///
/// Issued by the external identity provider, globally unique, immutable.
/// Guardians are keyed by this value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SubjectId(String);

impl SubjectId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SubjectId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// System-generated unique identifier for a [`Dependent`](super::Dependent).
///
/// Generated once at creation; never supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DependentId(Uuid);

impl DependentId {
    /// Generate a fresh random identifier.
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }

    /// Parse from the string form handed back to API callers.
    pub fn parse(s: &str) -> Result<Self, uuid::Error> {
        Uuid::parse_str(s).map(Self)
    }
}

impl fmt::Display for DependentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<Uuid> for DependentId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}
