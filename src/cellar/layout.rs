//! # Storage Layouts
//!
//! A [`StorageLayout`] is the structured description of a storage setup:
//! zones, each with its positions, plus a declared position count. It is what
//! the layout interpreter produces from a free-text description, and what
//! [`build`] turns into one [`StorageConfig`] and its [`Position`] rows.
//!
//! ## Validation
//!
//! Rejected (`ValidationFailed`):
//! - no zones, or a zone without a name
//! - a position without an identifier
//! - the same identifier twice in one zone (the zone table could not tell them apart)
//!
//! Advisory (warnings, logged and returned with the result):
//! - a declared `total_positions` differing from the number of listed positions
//! - an identifier reused across zones (lookups by identifier are not zone-scoped)
//! - a zone with no positions

use crate::error::{CellarError, Result};
use crate::model::{Position, StorageConfig, ZoneDefinition};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::warn;
use uuid::Uuid;

const DEFAULT_ZONE_SIZE: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionLayout {
    pub identifier: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneLayout {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub positions: Vec<PositionLayout>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageLayout {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub zones: Vec<ZoneLayout>,
    #[serde(default)]
    pub total_positions: usize,
}

impl StorageLayout {
    /// The small fixed grid used when a description cannot be interpreted:
    /// a white zone `W1..W6` and a red zone `R1..R6`.
    pub fn default_grid() -> Self {
        let zone = |name: &str, description: &str, prefix: &str| ZoneLayout {
            name: name.to_string(),
            description: description.to_string(),
            positions: (1..=DEFAULT_ZONE_SIZE)
                .map(|n| PositionLayout {
                    identifier: format!("{}{}", prefix, n),
                    description: String::new(),
                })
                .collect(),
        };

        Self {
            description: "Default wine storage".to_string(),
            zones: vec![
                zone("White Wine Zone", "Chilled storage for white wines", "W"),
                zone("Red Wine Zone", "Storage for red wines", "R"),
            ],
            total_positions: DEFAULT_ZONE_SIZE * 2,
        }
    }

    /// Number of positions actually listed across all zones.
    pub fn listed_positions(&self) -> usize {
        self.zones.iter().map(|z| z.positions.len()).sum()
    }
}

/// Parse a layout from interpreter output.
///
/// Tolerates a surrounding markdown code fence. Anything that is not a JSON
/// layout object is a `ValidationFailed`.
pub fn parse_layout(raw: &str) -> Result<StorageLayout> {
    let body = strip_code_fence(raw.trim());
    serde_json::from_str(body)
        .map_err(|e| CellarError::ValidationFailed(format!("malformed storage layout: {}", e)))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string (e.g. "json") up to the first newline.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// A layout turned into rows, ready to be inserted.
#[derive(Debug, Clone)]
pub struct BuiltLayout {
    pub storage: StorageConfig,
    pub positions: Vec<Position>,
    pub warnings: Vec<String>,
}

/// Convert a layout into a storage configuration and its unoccupied positions.
pub fn build(layout: &StorageLayout) -> Result<BuiltLayout> {
    if layout.zones.is_empty() {
        return Err(CellarError::ValidationFailed(
            "storage layout has no zones".to_string(),
        ));
    }

    let mut warnings = Vec::new();
    let mut seen_zones = HashSet::new();
    // identifier -> zones it appears in
    let mut identifier_zones: HashMap<&str, Vec<&str>> = HashMap::new();

    for zone in &layout.zones {
        let zone_name = zone.name.trim();
        if zone_name.is_empty() {
            return Err(CellarError::ValidationFailed(
                "storage layout has a zone without a name".to_string(),
            ));
        }
        if !seen_zones.insert(zone_name) {
            warnings.push(format!(
                "Zone '{}' is declared more than once; its positions are merged",
                zone_name
            ));
        }
        if zone.positions.is_empty() {
            warnings.push(format!("Zone '{}' has no positions", zone_name));
        }

        let mut in_zone = HashSet::new();
        for position in &zone.positions {
            let identifier = position.identifier.trim();
            if identifier.is_empty() {
                return Err(CellarError::ValidationFailed(format!(
                    "zone '{}' has a position without an identifier",
                    zone_name
                )));
            }
            if !in_zone.insert(identifier) {
                return Err(CellarError::ValidationFailed(format!(
                    "position '{}' appears twice in zone '{}'",
                    identifier, zone_name
                )));
            }
            identifier_zones
                .entry(identifier)
                .or_default()
                .push(zone_name);
        }
    }

    let mut shared: Vec<(&str, &Vec<&str>)> = identifier_zones
        .iter()
        .filter(|(_, zones)| zones.len() > 1)
        .map(|(ident, zones)| (*ident, zones))
        .collect();
    shared.sort();
    for (identifier, zones) in shared {
        warnings.push(format!(
            "Position '{}' is used in several zones ({}); refer to it by id",
            identifier,
            zones.join(", ")
        ));
    }

    let listed = layout.listed_positions();
    if layout.total_positions != 0 && layout.total_positions != listed {
        warnings.push(format!(
            "Layout declares {} positions but lists {}",
            layout.total_positions, listed
        ));
    }

    for warning in &warnings {
        warn!(warning = %warning, "storage layout accepted with warning");
    }

    let storage = StorageConfig {
        id: Uuid::new_v4(),
        description: layout.description.clone(),
        zones: layout
            .zones
            .iter()
            .map(|z| ZoneDefinition {
                name: z.name.trim().to_string(),
                description: z.description.clone(),
            })
            .collect(),
        total_positions: layout.total_positions,
        created_at: Utc::now(),
    };

    let positions = layout
        .zones
        .iter()
        .flat_map(|zone| zone.positions.iter().map(move |p| (zone, p)))
        .enumerate()
        .map(|(ordinal, (zone, p))| {
            let mut position =
                Position::new(storage.id, zone.name.trim(), p.identifier.trim(), ordinal);
            position.description = p.description.clone();
            position
        })
        .collect();

    Ok(BuiltLayout {
        storage,
        positions,
        warnings,
    })
}
