use thiserror::Error;
use uuid::Uuid;

/// What kind of record a failed lookup was looking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Storage,
    Position,
    Wine,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Storage => write!(f, "Storage"),
            EntityKind::Position => write!(f, "Position"),
            EntityKind::Wine => write!(f, "Wine"),
        }
    }
}

#[derive(Error, Debug)]
pub enum CellarError {
    #[error("{kind} not found: {reference}")]
    NotFound { kind: EntityKind, reference: String },

    #[error("Wine already consumed: {0}")]
    AlreadyConsumed(Uuid),

    #[error("Position {position} is already occupied by wine {occupant}")]
    PositionUnavailable { position: String, occupant: String },

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Assistant call failed: {0}")]
    Collaborator(String),
}

impl CellarError {
    pub fn wine_not_found(reference: impl ToString) -> Self {
        CellarError::NotFound {
            kind: EntityKind::Wine,
            reference: reference.to_string(),
        }
    }

    pub fn position_not_found(reference: impl ToString) -> Self {
        CellarError::NotFound {
            kind: EntityKind::Position,
            reference: reference.to_string(),
        }
    }
}

impl From<std::io::Error> for CellarError {
    fn from(err: std::io::Error) -> Self {
        CellarError::StoreUnavailable(err.to_string())
    }
}

impl From<serde_json::Error> for CellarError {
    fn from(err: serde_json::Error) -> Self {
        CellarError::StoreUnavailable(format!("catalog data could not be decoded: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, CellarError>;
