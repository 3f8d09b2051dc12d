use thiserror::Error;

/// Famille d'erreur, pour la traduction côté frontière (CLI, HTTP...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidArgument,
    NotFound,
    PermissionDenied,
    Conflict,
    Internal,
}

#[derive(Error, Debug)]
pub enum SchedError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("invalid time range: end must be after start")]
    InvalidTimeRange,
    #[error("shift already assigned: {0}")]
    AlreadyAssigned(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SchedError {
    pub(crate) fn not_found(kind: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            id: id.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) | Self::InvalidTimeRange => ErrorKind::InvalidArgument,
            Self::NotFound { .. } => ErrorKind::NotFound,
            Self::PermissionDenied(_) => ErrorKind::PermissionDenied,
            Self::AlreadyAssigned(_) => ErrorKind::Conflict,
            Self::Other(_) => ErrorKind::Internal,
        }
    }
}
