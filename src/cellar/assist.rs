//! # Assistant Collaborators
//!
//! Understanding is delegated: reading a label photo, turning a spoken-style
//! storage description into zones and positions, and suggesting pairings are
//! all done by an external assistant. This module only fixes the contracts.
//!
//! Implementations report failure as [`CellarError::Collaborator`]. The core
//! never retries; callers may.
//!
//! Two local implementations ship with the crate, for the command line and
//! tests:
//! - [`JsonLabelReader`]: the "image" is already a JSON `{name, description}`.
//! - [`JsonLayoutInterpreter`]: the description is passed through unchanged,
//!   so a JSON layout parses and anything else falls back to the default grid.

use crate::error::{CellarError, Result};
use crate::model::{NewWine, Wine};
use serde::Serialize;

/// Extracts a wine name and description from a label image.
pub trait LabelReader {
    fn read_label(&self, image: &[u8]) -> Result<NewWine>;
}

/// Turns a free-text storage description into a layout document.
///
/// The output is raw text and is not trusted to be well formed; see
/// [`crate::layout::parse_layout`].
pub trait LayoutInterpreter {
    fn interpret(&self, description: &str) -> Result<String>;
}

/// Recommends wines from the collection for a dish.
pub trait PairingAdvisor {
    fn recommend(&self, food: &FoodInput, wines: &[WineSummary]) -> Result<String>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoodInput {
    Text(String),
    Image(Vec<u8>),
}

/// The flattened view of a wine handed to the pairing advisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WineSummary {
    pub name: String,
    pub description: String,
}

impl From<&Wine> for WineSummary {
    fn from(wine: &Wine) -> Self {
        Self {
            name: wine.name.clone(),
            description: wine.description.to_string(),
        }
    }
}

/// One `N. name: description` line per wine, numbered from 1.
pub fn format_collection(wines: &[WineSummary]) -> String {
    wines
        .iter()
        .enumerate()
        .map(|(i, w)| format!("{}. {}: {}", i + 1, w.name, w.description))
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLabelReader;

impl LabelReader for JsonLabelReader {
    fn read_label(&self, image: &[u8]) -> Result<NewWine> {
        let draft: NewWine = serde_json::from_slice(image)
            .map_err(|e| CellarError::Collaborator(format!("label could not be read: {}", e)))?;
        if draft.name.trim().is_empty() {
            return Err(CellarError::Collaborator(
                "label has no wine name".to_string(),
            ));
        }
        Ok(draft)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonLayoutInterpreter;

impl LayoutInterpreter for JsonLayoutInterpreter {
    fn interpret(&self, description: &str) -> Result<String> {
        Ok(description.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::WineDescription;

    #[test]
    fn collection_is_numbered_from_one() {
        let wines = vec![
            WineSummary {
                name: "Chablis".to_string(),
                description: "crisp white".to_string(),
            },
            WineSummary {
                name: "Malbec".to_string(),
                description: "bold red".to_string(),
            },
        ];
        assert_eq!(
            format_collection(&wines),
            "1. Chablis: crisp white\n2. Malbec: bold red"
        );
    }

    #[test]
    fn json_label_reader_accepts_structured_description() {
        let raw = br#"{"name": "Sancerre", "description": {"wine_type": "White"}}"#;
        let draft = JsonLabelReader.read_label(raw).unwrap();
        assert_eq!(draft.name, "Sancerre");
        assert_eq!(draft.description.wine_type(), Some("White"));
    }

    #[test]
    fn json_label_reader_rejects_garbage() {
        assert!(matches!(
            JsonLabelReader.read_label(&[0xff, 0xd8, 0xff]),
            Err(CellarError::Collaborator(_))
        ));
        assert!(matches!(
            JsonLabelReader.read_label(br#"{"name": "  "}"#),
            Err(CellarError::Collaborator(_))
        ));
    }

    #[test]
    fn summary_flattens_structured_description() {
        let mut wine = Wine::new(NewWine::new("Rioja", ""));
        wine.description =
            serde_json::from_str::<WineDescription>(r#"{"wine_type": "Red"}"#).unwrap();
        assert_eq!(WineSummary::from(&wine).description, "wine_type: Red");
    }
}
