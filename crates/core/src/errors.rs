use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpsError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid date/time format")]
    InvalidDateTime,

    #[error("{0}")]
    Validation(String),

    /// A transactional write failed and was rolled back. The cause is kept
    /// for logging but never rendered.
    #[error("Failed to {action} {entity}")]
    Persistence {
        action: &'static str,
        entity: &'static str,
        #[source]
        source: eyre::Report,
    },

    #[error("Database error")]
    Database(#[from] eyre::Report),
}

impl OpsError {
    pub fn persistence(action: &'static str, entity: &'static str) -> impl FnOnce(eyre::Report) -> Self {
        move |source| OpsError::Persistence {
            action,
            entity,
            source,
        }
    }

    pub fn null_field(field: &'static str) -> Self {
        OpsError::Validation(format!("Field {} cannot be null", field))
    }

    pub fn invalid_value(field: &'static str) -> Self {
        OpsError::Validation(format!("Invalid value for field: {}", field))
    }
}

pub type OpsResult<T> = Result<T, OpsError>;
