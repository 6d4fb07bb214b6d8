//! Tactic domain model.
//!
//! # Invariants
//! - Every tactic belongs to exactly one principle for its whole lifetime.
//! - `title` is never blank; a blank `description` is stored as absent.

use crate::model::principle::PrincipleId;
use crate::model::validation::{optional_text, required_text, ValidationErrors};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a tactic.
pub type TacticId = Uuid;

/// Application of a principle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tactic {
    pub id: TacticId,
    pub principle_id: PrincipleId,
    pub title: String,
    pub description: Option<String>,
    pub is_effective: bool,
    pub order: i32,
}

impl Tactic {
    pub fn create(input: NewTactic) -> Self {
        Self {
            id: Uuid::new_v4(),
            principle_id: input.principle_id,
            title: input.title,
            description: input.description,
            is_effective: input.is_effective,
            order: input.order,
        }
    }
}

/// Validated tactic creation input.
///
/// Parent existence is checked by the repository at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTactic {
    pub principle_id: PrincipleId,
    pub title: String,
    pub description: Option<String>,
    pub is_effective: bool,
    pub order: i32,
}

impl NewTactic {
    pub fn new(principle_id: PrincipleId, title: impl Into<String>) -> Self {
        Self {
            principle_id,
            title: title.into(),
            description: None,
            is_effective: true,
            order: 0,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

/// Unvalidated tactic creation request as received over the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TacticDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub principle_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_effective: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl TacticDraft {
    /// Applies the creation contract, collecting every violation.
    ///
    /// # Contract
    /// - `principleId`: required, must parse as a UUID.
    /// - `title`: required, non-blank.
    /// - `isEffective` defaults to `true`, `order` to `0`.
    pub fn validate(self) -> Result<NewTactic, ValidationErrors> {
        let mut errors = ValidationErrors::new();

        let principle_id = match self.principle_id.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push("principleId", "Required");
                None
            }
            Some(raw) => match Uuid::parse_str(raw) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.push("principleId", "Must be a valid principle id");
                    None
                }
            },
        };
        let title = required_text(&mut errors, "title", self.title, None);

        errors.finish(|| NewTactic {
            principle_id: principle_id.unwrap_or_default(),
            title: title.unwrap_or_default(),
            description: optional_text(self.description),
            is_effective: self.is_effective.unwrap_or(true),
            order: self.order.unwrap_or(0),
        })
    }
}
