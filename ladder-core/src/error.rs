use thiserror::Error;

#[derive(Debug, Error)]
pub enum LadderError {
    #[error("Configuration error: {0}")]
    ConfigInvalid(String),

    #[error("too many industries: {0} (max {max})", max = crate::simulation::builder::MAX_INDUSTRIES)]
    TooManyIndustries(usize),

    #[error("need at least 1 {worker}")]
    InsufficientOwnership { worker: String },

    #[error("{worker} already running")]
    AlreadyRunning { worker: String },

    #[error("cannot afford {worker}")]
    CannotAfford { worker: String },

    #[error("Corrupt save: {0}")]
    CorruptSave(String),

    #[error("Save does not match the loaded configuration: {0}")]
    StructureMismatch(String),

    #[error("Unsupported save version {0}")]
    UnsupportedSaveVersion(u32),

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to encode JSON: {0}")]
    JsonEncoding(#[from] serde_json::Error),

    #[error("Failed to write CSV file '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}

impl LadderError {
    /// True for the kinds a player can cause and recover from (status-line errors).
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LadderError::InsufficientOwnership { .. }
                | LadderError::AlreadyRunning { .. }
                | LadderError::CannotAfford { .. }
                | LadderError::CorruptSave(_)
                | LadderError::StructureMismatch(_)
                | LadderError::UnsupportedSaveVersion(_)
        )
    }
}
