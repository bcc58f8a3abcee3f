//! Guardian and Dependent record operations over the document store.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use stuntzilla_core::error::{Result, StoreError, StuntzillaError};
use stuntzilla_core::traits::{Document, DocumentStore};
use stuntzilla_core::types::{Dependent, DependentId, Guardian, SubjectId};

pub const GUARDIAN_COLLECTION: &str = "guardians";
pub const DEPENDENT_COLLECTION: &str = "dependents";

/// Record service for the two entity kinds.
///
/// Ownership enforcement is a cross-cutting policy applied by the caller
/// (see [`App`](crate::App)): a request handler verifies the assertion
/// first and passes the resulting subject id in as the authorization
/// context. This service guarantees only that a Dependent's `owner` always
/// reflects the id it was given at creation, and that reads return the
/// stored record or a typed not-found — it does not re-derive ownership.
pub struct RecordService {
    store: Arc<dyn DocumentStore>,
}

#[derive(Serialize, Deserialize)]
struct GuardianFields {
    full_name: String,
    nickname: String,
}

#[derive(Serialize, Deserialize)]
struct DependentFields {
    owner: SubjectId,
    full_name: String,
    birth_date: NaiveDate,
}

impl RecordService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Idempotent guardian write keyed by the verified subject id.
    ///
    /// Re-registration overwrites name and nickname and refreshes the
    /// server timestamp; there is no separate update path.
    ///
    /// # Errors
    ///
    /// `StoreError::Unavailable` when the underlying store fails.
    pub async fn upsert_guardian(
        &self,
        subject: &SubjectId,
        full_name: &str,
        nickname: &str,
    ) -> Result<Guardian> {
        let fields = encode(
            GUARDIAN_COLLECTION,
            subject.as_str(),
            &GuardianFields {
                full_name: full_name.to_string(),
                nickname: nickname.to_string(),
            },
        )?;
        let written = self
            .store
            .set(GUARDIAN_COLLECTION, subject.as_str(), fields)
            .await?;
        info!(guardian = %subject, "guardian registered");
        Ok(Guardian {
            id: subject.clone(),
            full_name: full_name.to_string(),
            nickname: nickname.to_string(),
            created_at: written.created_at,
        })
    }

    /// Fetch a guardian by identifier.
    pub async fn get_guardian(&self, guardian_id: &SubjectId) -> Result<Guardian> {
        let document = self
            .store
            .get(GUARDIAN_COLLECTION, guardian_id.as_str())
            .await?
            .ok_or_else(|| StoreError::GuardianNotFound(guardian_id.as_str().to_string()))?;
        let fields: GuardianFields =
            decode(GUARDIAN_COLLECTION, guardian_id.as_str(), &document)?;
        Ok(Guardian {
            id: guardian_id.clone(),
            full_name: fields.full_name,
            nickname: fields.nickname,
            created_at: document.created_at,
        })
    }

    /// Create a dependent under the verified owner.
    ///
    /// The identifier is generated here; `owner` is written from the
    /// authorization context and is never part of the raw input.
    ///
    /// # Errors
    ///
    /// - `StuntzillaError::Validation` when the full name is empty
    /// - `StoreError::Unavailable` when the underlying store fails
    pub async fn create_dependent(
        &self,
        owner: &SubjectId,
        full_name: &str,
        birth_date: NaiveDate,
    ) -> Result<Dependent> {
        if full_name.trim().is_empty() {
            return Err(StuntzillaError::validation(
                "dependent full name must not be empty",
            ));
        }
        let id = DependentId::generate();
        let fields = encode(
            DEPENDENT_COLLECTION,
            &id.to_string(),
            &DependentFields {
                owner: owner.clone(),
                full_name: full_name.to_string(),
                birth_date,
            },
        )?;
        let written = self
            .store
            .set(DEPENDENT_COLLECTION, &id.to_string(), fields)
            .await?;
        info!(dependent = %id, owner = %owner, "dependent created");
        Ok(Dependent {
            id,
            owner: owner.clone(),
            full_name: full_name.to_string(),
            birth_date,
            created_at: written.created_at,
        })
    }

    /// Fetch a dependent by identifier.
    ///
    /// Intentionally permissive: any caller who knows the opaque identifier
    /// may read through this method. The ownership-checked read lives on the
    /// [`App`](crate::App) facade; routing layers must not expose this one
    /// directly.
    pub async fn get_dependent(&self, dependent_id: DependentId) -> Result<Dependent> {
        let id_str = dependent_id.to_string();
        let document = self
            .store
            .get(DEPENDENT_COLLECTION, &id_str)
            .await?
            .ok_or_else(|| StoreError::DependentNotFound(dependent_id.as_uuid()))?;
        let fields: DependentFields = decode(DEPENDENT_COLLECTION, &id_str, &document)?;
        debug!(dependent = %dependent_id, "dependent read");
        Ok(Dependent {
            id: dependent_id,
            owner: fields.owner,
            full_name: fields.full_name,
            birth_date: fields.birth_date,
            created_at: document.created_at,
        })
    }
}

fn encode<T: Serialize>(collection: &str, id: &str, fields: &T) -> Result<serde_json::Value> {
    serde_json::to_value(fields).map_err(|e| {
        StoreError::Serialization {
            collection: collection.to_string(),
            id: id.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

fn decode<T: DeserializeOwned>(collection: &str, id: &str, document: &Document) -> Result<T> {
    serde_json::from_value(document.fields.clone()).map_err(|e| {
        StoreError::Serialization {
            collection: collection.to_string(),
            id: id.to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}
