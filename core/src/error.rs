use thiserror::Error;

/// Feil som kan stoppe en analyse før den starter.
///
/// Manglende høyde, udefinert kurs/stigning osv. er IKKE feil – de bæres
/// som `None` gjennom hele pipelinen.
#[derive(Debug, Error)]
pub enum HazardError {
    #[error("input shape error at {path}: {message}")]
    InputShape { path: String, message: String },

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HazardError {
    pub(crate) fn input_shape(path: impl Into<String>, message: impl Into<String>) -> Self {
        HazardError::InputShape {
            path: path.into(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, HazardError>;
