use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// A named group of positions as declared by a storage layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// One storage setup (a fridge, a rack, a cellar room).
///
/// There is no update operation: a new configuration only adds its positions
/// to the pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub id: Uuid,
    pub description: String,
    pub zones: Vec<ZoneDefinition>,
    /// Declared by the caller, not recomputed from the listed positions.
    pub total_positions: usize,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub id: Uuid,
    pub storage_id: Uuid,
    /// Zone name; zone metadata lives on the owning [`StorageConfig`].
    pub zone: String,
    /// User-facing label such as `W1` or `Top-3`.
    pub identifier: String,
    #[serde(default)]
    pub description: String,
    /// Order in which the position appeared in its layout.
    #[serde(default)]
    pub ordinal: usize,
    pub is_occupied: bool,
    pub wine_id: Option<Uuid>,
}

impl Position {
    pub fn new(storage_id: Uuid, zone: &str, identifier: &str, ordinal: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            storage_id,
            zone: zone.to_string(),
            identifier: identifier.to_string(),
            description: String::new(),
            ordinal,
            is_occupied: false,
            wine_id: None,
        }
    }

    pub fn is_available(&self) -> bool {
        !self.is_occupied
    }

    pub(crate) fn occupy(&mut self, wine_id: Uuid) {
        self.is_occupied = true;
        self.wine_id = Some(wine_id);
    }

    pub(crate) fn release(&mut self) {
        self.is_occupied = false;
        self.wine_id = None;
    }

    /// Label used in messages, e.g. `W1 (White Wine Zone)`.
    pub fn label(&self) -> String {
        format!("{} ({})", self.identifier, self.zone)
    }
}

/// A wine description as produced by the label reader: either prose or a
/// structured record (which may carry a `wine_type` field).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WineDescription {
    Text(String),
    Structured(BTreeMap<String, serde_json::Value>),
}

impl WineDescription {
    /// The explicit `wine_type` field of a structured description.
    pub fn wine_type(&self) -> Option<&str> {
        match self {
            WineDescription::Text(_) => None,
            WineDescription::Structured(fields) => fields.get("wine_type").and_then(|v| v.as_str()),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, WineDescription::Structured(_))
    }
}

impl Default for WineDescription {
    fn default() -> Self {
        WineDescription::Text(String::new())
    }
}

impl From<&str> for WineDescription {
    fn from(text: &str) -> Self {
        WineDescription::Text(text.to_string())
    }
}

impl From<String> for WineDescription {
    fn from(text: String) -> Self {
        WineDescription::Text(text)
    }
}

impl std::fmt::Display for WineDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WineDescription::Text(text) => write!(f, "{}", text),
            WineDescription::Structured(fields) => {
                let parts: Vec<String> = fields
                    .iter()
                    .map(|(key, value)| match value {
                        serde_json::Value::String(s) => format!("{}: {}", key, s),
                        other => format!("{}: {}", key, other),
                    })
                    .collect();
                write!(f, "{}", parts.join("; "))
            }
        }
    }
}

/// Attributes of a wine about to be added, typically from a scanned label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewWine {
    pub name: String,
    #[serde(default)]
    pub description: WineDescription,
}

impl NewWine {
    pub fn new(name: impl Into<String>, description: impl Into<WineDescription>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wine {
    pub id: Uuid,
    pub name: String,
    pub description: WineDescription,
    pub position_id: Option<Uuid>,
    pub added_at: DateTime<Utc>,
    pub consumed: bool,
    pub consumed_at: Option<DateTime<Utc>>,
}

impl Wine {
    pub fn new(attrs: NewWine) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: attrs.name,
            description: attrs.description,
            position_id: None,
            added_at: Utc::now(),
            consumed: false,
            consumed_at: None,
        }
    }

    pub fn is_active(&self) -> bool {
        !self.consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_description_has_no_wine_type() {
        let desc = WineDescription::from("A crisp white from Burgundy");
        assert_eq!(desc.wine_type(), None);
        assert!(!desc.is_structured());
    }

    #[test]
    fn structured_description_exposes_wine_type() {
        let desc: WineDescription =
            serde_json::from_str(r#"{"wine_type": "White", "region": "Chablis"}"#).unwrap();
        assert_eq!(desc.wine_type(), Some("White"));
        assert_eq!(desc.to_string(), "region: Chablis; wine_type: White");
    }

    #[test]
    fn plain_string_deserializes_as_text() {
        let desc: WineDescription = serde_json::from_str(r#""Bold Malbec""#).unwrap();
        assert_eq!(desc, WineDescription::Text("Bold Malbec".to_string()));
    }

    #[test]
    fn new_wine_starts_active_and_unpositioned() {
        let wine = Wine::new(NewWine::new("Chablis", "white"));
        assert!(wine.is_active());
        assert!(wine.position_id.is_none());
        assert!(wine.consumed_at.is_none());
    }

    #[test]
    fn position_occupy_and_release() {
        let mut pos = Position::new(Uuid::new_v4(), "Red Wine Zone", "R1", 0);
        let wine_id = Uuid::new_v4();
        pos.occupy(wine_id);
        assert!(!pos.is_available());
        assert_eq!(pos.wine_id, Some(wine_id));
        pos.release();
        assert!(pos.is_available());
        assert_eq!(pos.wine_id, None);
        assert_eq!(pos.label(), "R1 (Red Wine Zone)");
    }
}
