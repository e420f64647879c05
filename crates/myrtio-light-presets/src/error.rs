//! Error types for preset compilation

use core::fmt;

/// Error compiling a preset against its targets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompileError {
    /// The preset has no target devices
    NoTargets { preset_id: String },
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::NoTargets { preset_id } => {
                write!(f, "Preset {preset_id} has no target devices")
            }
        }
    }
}

impl std::error::Error for CompileError {}

/// Error encoding a command payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireError {
    /// Buffer too small
    BufferTooSmall,
    /// JSON serialization error
    Serialization,
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::BufferTooSmall => write!(f, "Buffer too small"),
            WireError::Serialization => write!(f, "JSON serialization error"),
        }
    }
}

impl std::error::Error for WireError {}

impl From<serde_json_core::ser::Error> for WireError {
    fn from(e: serde_json_core::ser::Error) -> Self {
        match e {
            serde_json_core::ser::Error::BufferFull => WireError::BufferTooSmall,
            #[allow(unreachable_patterns)]
            _ => WireError::Serialization,
        }
    }
}

/// Error loading compiler configuration
#[derive(Debug)]
pub enum ConfigError {
    /// JSON deserialization error
    Deserialization(serde_json_core::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Deserialization(e) => write!(f, "JSON deserialization error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<serde_json_core::de::Error> for ConfigError {
    fn from(e: serde_json_core::de::Error) -> Self {
        ConfigError::Deserialization(e)
    }
}
