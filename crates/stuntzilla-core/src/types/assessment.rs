//! Assessment input, feature vector, and result types.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StuntzillaError};

/// Number of features the prediction endpoint expects, in order:
/// sex code, age, birth weight, birth length, current weight, current length.
pub const FEATURE_COUNT: usize = 6;

/// Raw assessment input as handed over by the routing layer.
///
/// All six fields are required. There is no missing-value policy: absence is
/// a validation failure in [`AssessmentInput::to_features`], never a silent
/// default, and it is detected before any network call is made.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AssessmentInput {
    /// Sex code (e.g. 0 female, 1 male, per the trained model's encoding).
    pub sex: Option<f64>,
    /// Age in months.
    pub age: Option<f64>,
    pub birth_weight: Option<f64>,
    pub birth_length: Option<f64>,
    pub body_weight: Option<f64>,
    pub body_length: Option<f64>,
}

impl AssessmentInput {
    /// Validate and assemble the ordered feature vector.
    ///
    /// # Errors
    ///
    /// `StuntzillaError::Validation` naming the first field that is absent
    /// or non-finite.
    pub fn to_features(&self) -> Result<FeatureVector> {
        let fields = [
            ("sex", self.sex),
            ("age", self.age),
            ("birth_weight", self.birth_weight),
            ("birth_length", self.birth_length),
            ("body_weight", self.body_weight),
            ("body_length", self.body_length),
        ];
        let mut values = [0.0; FEATURE_COUNT];
        for (slot, (name, value)) in values.iter_mut().zip(fields) {
            let value = value.ok_or_else(|| {
                StuntzillaError::validation(format!("missing required feature '{name}'"))
            })?;
            if !value.is_finite() {
                return Err(StuntzillaError::validation(format!(
                    "feature '{name}' must be a finite number, got {value}"
                )));
            }
            *slot = value;
        }
        Ok(FeatureVector(values))
    }
}

/// Validated, ordered numeric inputs submitted to the prediction service.
///
/// Only constructible through [`AssessmentInput::to_features`], so a value of
/// this type always carries six finite numbers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.0
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

/// Risk category derived from the prediction score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskCategory {
    Normal,
    Stunting,
}

impl RiskCategory {
    /// Map a raw prediction score to a category.
    ///
    /// The score is rounded to the nearest integer using
    /// round-half-away-from-zero (`f64::round`); a rounded score strictly
    /// greater than zero is `Normal`, anything else — zero included — is
    /// `Stunting`.
    pub fn from_score(score: f64) -> Self {
        if score.round() > 0.0 {
            Self::Normal
        } else {
            Self::Stunting
        }
    }

    /// Fixed advisory copy for this category.
    ///
    /// Domain copy, not derived data; may be localized without affecting
    /// category logic.
    pub fn advisory(&self) -> &'static str {
        match self {
            Self::Normal => {
                "Your child's growth is within the normal range. \
                 Keep up regular checkups and a balanced diet."
            }
            Self::Stunting => {
                "Your child shows an indication of stunting. \
                 Please consult a pediatrician or the nearest health facility."
            }
        }
    }
}

/// Result of a stunting-risk assessment.
///
/// Produced and returned, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentResult {
    pub category: RiskCategory,
    pub advisory: String,
}

impl AssessmentResult {
    /// Derive the result from the scalar score returned by the prediction
    /// endpoint.
    pub fn from_score(score: f64) -> Self {
        let category = RiskCategory::from_score(score);
        Self {
            category,
            advisory: category.advisory().to_string(),
        }
    }
}
