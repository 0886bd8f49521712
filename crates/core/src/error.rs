use thiserror::Error;

/// Why a coordinate pair failed validation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoordinateError {
    #[error("latitude {0} outside [-90, 90]")]
    Latitude(f64),

    #[error("longitude {0} outside [-180, 180]")]
    Longitude(f64),
}

/// Proximity matching error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatchError {
    #[error("no candidates available")]
    NoCandidates,

    #[error("invalid location for {subject}: {source}")]
    InvalidLocation {
        subject: String,
        #[source]
        source: CoordinateError,
    },
}

impl MatchError {
    pub fn invalid(subject: impl Into<String>, source: CoordinateError) -> Self {
        MatchError::InvalidLocation {
            subject: subject.into(),
            source,
        }
    }
}
