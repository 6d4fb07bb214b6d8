//! Principle domain model.
//!
//! # Responsibility
//! - Define the stored principle record and its creation input.
//! - Own the hand-written creation contract (presence, bounds, defaults).
//! - Define the `PrincipleWithTactics` read projection.
//!
//! # Invariants
//! - `id` is generated once at creation and never reused.
//! - `title` and `description` are never blank.
//! - Principles are never updated in place.

use crate::model::tactic::Tactic;
use crate::model::validation::{optional_text, required_text, ValidationErrors};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier of a principle.
pub type PrincipleId = Uuid;

pub const DEFAULT_CATEGORY: &str = "general";
pub const TITLE_MAX_CHARS: usize = 200;
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Display color tag from the fixed palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipleColor {
    Orange,
    #[default]
    Blue,
    Green,
    Purple,
    Red,
    Teal,
}

impl PrincipleColor {
    pub const ALL: [PrincipleColor; 6] = [
        Self::Orange,
        Self::Blue,
        Self::Green,
        Self::Purple,
        Self::Red,
        Self::Teal,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Orange => "orange",
            Self::Blue => "blue",
            Self::Green => "green",
            Self::Purple => "purple",
            Self::Red => "red",
            Self::Teal => "teal",
        }
    }

    /// Parses a palette name; case-insensitive, surrounding whitespace ignored.
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|color| color.as_str() == normalized)
    }
}

/// Stored core-truth record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principle {
    pub id: PrincipleId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub color: PrincipleColor,
    /// Display ordering only; ascending.
    pub order: i32,
}

impl Principle {
    /// Materializes a validated input under a freshly generated id.
    pub fn create(input: NewPrinciple) -> Self {
        Self::with_id(Uuid::new_v4(), input)
    }

    pub fn with_id(id: PrincipleId, input: NewPrinciple) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            category: input.category,
            color: input.color,
            order: input.order,
        }
    }
}

/// Validated principle creation input with defaults applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPrinciple {
    pub title: String,
    pub description: String,
    pub category: String,
    pub color: PrincipleColor,
    pub order: i32,
}

impl NewPrinciple {
    /// Builds an input with default category, color and order.
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            category: DEFAULT_CATEGORY.to_string(),
            color: PrincipleColor::default(),
            order: 0,
        }
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn color(mut self, color: PrincipleColor) -> Self {
        self.color = color;
        self
    }

    pub fn order(mut self, order: i32) -> Self {
        self.order = order;
        self
    }
}

/// Unvalidated principle creation request as received over the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrincipleDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,
}

impl PrincipleDraft {
    /// Applies the creation contract, collecting every violation.
    ///
    /// # Contract
    /// - `title`: required, non-blank, at most 200 characters.
    /// - `description`: required, non-blank, at most 1000 characters.
    /// - `category`: absent or blank falls back to `general`.
    /// - `color`: absent falls back to `blue`; unknown names are rejected.
    /// - `order`: absent falls back to `0`.
    pub fn validate(self) -> Result<NewPrinciple, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let title = required_text(&mut errors, "title", self.title, Some(TITLE_MAX_CHARS));
        let description = required_text(
            &mut errors,
            "description",
            self.description,
            Some(DESCRIPTION_MAX_CHARS),
        );
        let category =
            optional_text(self.category).unwrap_or_else(|| DEFAULT_CATEGORY.to_string());

        let color = match self.color.as_deref() {
            None => PrincipleColor::default(),
            Some(raw) => PrincipleColor::parse(raw).unwrap_or_else(|| {
                let palette = PrincipleColor::ALL.map(PrincipleColor::as_str).join(", ");
                errors.push("color", format!("Must be one of: {palette}"));
                PrincipleColor::default()
            }),
        };

        errors.finish(|| NewPrinciple {
            title: title.unwrap_or_default(),
            description: description.unwrap_or_default(),
            category,
            color,
            order: self.order.unwrap_or(0),
        })
    }
}

/// Read-time projection of one principle and its tactics ordered by `order`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrincipleWithTactics {
    #[serde(flatten)]
    pub principle: Principle,
    pub tactics: Vec<Tactic>,
}
