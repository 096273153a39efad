// Construction-time configuration errors
//
// Nothing on the per-tick path fails; these only surface while building a
// simulation from configuration or level data.

/// Configuration errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Unknown zombie kind: {0}")]
    UnknownZombieKind(String),

    #[error("Unknown player kind: {0}")]
    UnknownPlayerKind(String),

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: f32 },
}
