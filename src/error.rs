//! Error type shared by the ports and the controller.
//!
//! DESIGN
//! ======
//! Ports report failures as [`ThemeError`]; the resolver and applier catch
//! them where they occur, log a warning, and degrade to "not remembered" or
//! "not updated". Only configuration parsing and string-typed `set` calls
//! hand an error back to the caller.

/// Failure reported by a storage, DOM, or configuration access.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// The persistence medium does not exist or access was denied.
    #[error("preference storage unavailable")]
    StorageUnavailable,
    /// Reading the stored preference failed.
    #[error("failed to read stored preference: {0}")]
    StorageRead(String),
    /// Writing the stored preference failed (quota, private mode, ...).
    #[error("failed to write stored preference: {0}")]
    StorageWrite(String),
    /// A string did not name a known theme.
    #[error("invalid theme: {0:?}")]
    InvalidTheme(String),
    /// A document mutation was rejected.
    #[error("document update failed: {0}")]
    Dom(String),
    /// Configuration values failed validation.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// Configuration JSON could not be parsed.
    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_json::Error),
}
