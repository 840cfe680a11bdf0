//! # Wine and Position References
//!
//! Users never type UUIDs if they can help it. Wines are shown as a numbered
//! list (1..n in the order they were added) and positions by their identifier
//! (`W1`, `Top-3`), so the API accepts those forms and resolves them to ids.
//!
//! - [`WineSelector`]: `3` (list number), a UUID, or any other text as a
//!   case-insensitive name fragment.
//! - [`PositionSelector`]: a UUID or a position identifier (exact match).
//!
//! Numbers always refer to the active listing; consumed wines are only
//! reachable by UUID or name.

use crate::model::{Position, Wine};
use serde::Serialize;
use std::str::FromStr;
use uuid::Uuid;

/// A wine paired with its list number and where it currently sits.
#[derive(Debug, Clone, Serialize)]
pub struct DisplayWine {
    /// 1-based position in the listing; `None` for consumed wines.
    pub index: Option<usize>,
    pub wine: Wine,
    pub position: Option<Position>,
}

impl DisplayWine {
    /// `W1 (White Wine Zone)`, or a dash when the wine has no position.
    pub fn location(&self) -> String {
        self.position
            .as_ref()
            .map(|p| p.label())
            .unwrap_or_else(|| "-".to_string())
    }
}

/// Number active wines 1..n in the given order. Consumed wines keep no number.
pub fn index_wines(wines: Vec<Wine>, positions: &[Position]) -> Vec<DisplayWine> {
    let mut next = 1;
    wines
        .into_iter()
        .map(|wine| {
            let index = if wine.is_active() {
                next += 1;
                Some(next - 1)
            } else {
                None
            };
            let position = wine
                .position_id
                .and_then(|pid| positions.iter().find(|p| p.id == pid).cloned());
            DisplayWine {
                index,
                wine,
                position,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WineSelector {
    Number(usize),
    Id(Uuid),
    Name(String),
}

impl FromStr for WineSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty wine reference".to_string());
        }
        if let Ok(n) = s.parse::<usize>() {
            if n == 0 {
                return Err("Wine numbers start at 1".to_string());
            }
            return Ok(WineSelector::Number(n));
        }
        if let Ok(id) = Uuid::parse_str(s) {
            return Ok(WineSelector::Id(id));
        }
        Ok(WineSelector::Name(s.to_string()))
    }
}

impl std::fmt::Display for WineSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WineSelector::Number(n) => write!(f, "#{}", n),
            WineSelector::Id(id) => write!(f, "{}", id),
            WineSelector::Name(name) => write!(f, "\"{}\"", name),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PositionSelector {
    Id(Uuid),
    Identifier(String),
}

impl FromStr for PositionSelector {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("Empty position reference".to_string());
        }
        match Uuid::parse_str(s) {
            Ok(id) => Ok(PositionSelector::Id(id)),
            Err(_) => Ok(PositionSelector::Identifier(s.to_string())),
        }
    }
}

impl std::fmt::Display for PositionSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PositionSelector::Id(id) => write!(f, "{}", id),
            PositionSelector::Identifier(ident) => write!(f, "{}", ident),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NewWine;

    #[test]
    fn parses_wine_selectors() {
        assert_eq!("3".parse(), Ok(WineSelector::Number(3)));
        assert_eq!(
            " chablis ".parse(),
            Ok(WineSelector::Name("chablis".to_string()))
        );
        let id = Uuid::new_v4();
        assert_eq!(id.to_string().parse(), Ok(WineSelector::Id(id)));
        assert!("0".parse::<WineSelector>().is_err());
        assert!("".parse::<WineSelector>().is_err());
    }

    #[test]
    fn parses_position_selectors() {
        assert_eq!(
            "W1".parse(),
            Ok(PositionSelector::Identifier("W1".to_string()))
        );
        let id = Uuid::new_v4();
        assert_eq!(id.to_string().parse(), Ok(PositionSelector::Id(id)));
        assert!("  ".parse::<PositionSelector>().is_err());
    }

    #[test]
    fn numbering_skips_consumed_wines() {
        let a = Wine::new(NewWine::new("A", ""));
        let mut b = Wine::new(NewWine::new("B", ""));
        b.consumed = true;
        let c = Wine::new(NewWine::new("C", ""));

        let listed = index_wines(vec![a, b, c], &[]);
        let numbers: Vec<Option<usize>> = listed.iter().map(|d| d.index).collect();
        assert_eq!(numbers, vec![Some(1), None, Some(2)]);
        assert_eq!(listed[0].location(), "-");
    }

    #[test]
    fn display_wine_carries_location() {
        let position = Position::new(Uuid::new_v4(), "Red Wine Zone", "R2", 0);
        let mut wine = Wine::new(NewWine::new("Barolo", ""));
        wine.position_id = Some(position.id);

        let listed = index_wines(vec![wine], &[position]);
        assert_eq!(listed[0].location(), "R2 (Red Wine Zone)");
    }
}
