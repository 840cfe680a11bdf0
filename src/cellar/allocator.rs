//! # Position Allocation
//!
//! Picks a default position for a new wine. A [`WineClassifier`] decides
//! whether the wine leans white or red; the [`PositionAllocator`] then prefers
//! free positions whose zone name contains the matching keyword (`White` or
//! `Red`, case-sensitive substring), falling back to every free position when
//! no zone matches.
//!
//! The first candidate wins. Candidates keep the order they were given in, so
//! callers wanting a stable choice pass positions sorted by zone and layout
//! order (as the store returns them).

use crate::config::AllocationConfig;
use crate::model::{Position, WineDescription};
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorPreference {
    White,
    Red,
}

impl std::fmt::Display for ColorPreference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColorPreference::White => write!(f, "white"),
            ColorPreference::Red => write!(f, "red"),
        }
    }
}

/// Anything that can tell which zone color a wine belongs in.
pub trait WineClassifier {
    fn classify(&self, description: &WineDescription) -> ColorPreference;
}

impl<F> WineClassifier for F
where
    F: Fn(&WineDescription) -> ColorPreference,
{
    fn classify(&self, description: &WineDescription) -> ColorPreference {
        self(description)
    }
}

/// Case-insensitive keyword match; red unless a white keyword is found.
///
/// A structured description is judged by its `wine_type` field only, a text
/// description by its whole text.
#[derive(Debug, Clone)]
pub struct KeywordClassifier {
    white_keywords: Vec<String>,
}

impl Default for KeywordClassifier {
    fn default() -> Self {
        Self::new(vec!["white".to_string(), "blanc".to_string()])
    }
}

impl KeywordClassifier {
    pub fn new(white_keywords: Vec<String>) -> Self {
        Self {
            white_keywords: white_keywords
                .into_iter()
                .map(|k| k.to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
        }
    }
}

impl WineClassifier for KeywordClassifier {
    fn classify(&self, description: &WineDescription) -> ColorPreference {
        let haystack = match description {
            WineDescription::Structured(_) => description.wine_type().unwrap_or("").to_lowercase(),
            WineDescription::Text(text) => text.to_lowercase(),
        };

        if self
            .white_keywords
            .iter()
            .any(|k| haystack.contains(k.as_str()))
        {
            ColorPreference::White
        } else {
            ColorPreference::Red
        }
    }
}

/// A proposed position together with the reasoning behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub position: Position,
    pub preference: ColorPreference,
    /// False when no zone matched the preference and any free position was taken.
    pub zone_matched: bool,
}

pub struct PositionAllocator<C = KeywordClassifier> {
    classifier: C,
    white_zone_keyword: String,
    red_zone_keyword: String,
}

impl Default for PositionAllocator<KeywordClassifier> {
    fn default() -> Self {
        Self::new(KeywordClassifier::default())
    }
}

impl PositionAllocator<KeywordClassifier> {
    pub fn from_config(config: &AllocationConfig) -> Self {
        Self::new(KeywordClassifier::new(config.white_keywords.clone())).with_zone_keywords(
            &config.white_zone_keyword,
            &config.red_zone_keyword,
        )
    }
}

impl<C: WineClassifier> PositionAllocator<C> {
    pub fn new(classifier: C) -> Self {
        Self {
            classifier,
            white_zone_keyword: "White".to_string(),
            red_zone_keyword: "Red".to_string(),
        }
    }

    pub fn with_zone_keywords(mut self, white: &str, red: &str) -> Self {
        self.white_zone_keyword = white.to_string();
        self.red_zone_keyword = red.to_string();
        self
    }

    pub fn classify(&self, description: &WineDescription) -> ColorPreference {
        self.classifier.classify(description)
    }

    /// Pick a free position for a wine, or `None` when nothing is free.
    pub fn suggest(&self, positions: &[Position], description: &WineDescription) -> Option<Position> {
        self.suggest_with_reason(positions, description)
            .map(|s| s.position)
    }

    pub fn suggest_with_reason(
        &self,
        positions: &[Position],
        description: &WineDescription,
    ) -> Option<Suggestion> {
        let available: Vec<&Position> = positions.iter().filter(|p| p.is_available()).collect();
        if available.is_empty() {
            return None;
        }

        let preference = self.classify(description);
        let keyword = match preference {
            ColorPreference::White => &self.white_zone_keyword,
            ColorPreference::Red => &self.red_zone_keyword,
        };

        let matched = available
            .iter()
            .find(|p| p.zone.contains(keyword.as_str()))
            .copied();
        let zone_matched = matched.is_some();
        let position = matched.or_else(|| available.first().copied())?;

        debug!(
            preference = %preference,
            zone = %position.zone,
            identifier = %position.identifier,
            zone_matched,
            "suggested position"
        );

        Some(Suggestion {
            position: position.clone(),
            preference,
            zone_matched,
        })
    }
}
