//! Error types for the few fallible entry points.
//!
//! The dialog itself has no fatal error paths: malformed input is
//! clamped or defaulted. Only the blocking runner (which owns a native
//! viewport) and the explicit theme-override parser can fail.

use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The blocking runner failed to create or run its viewport.
    #[error("window system error: {0}")]
    Window(#[from] eframe::Error),

    /// Theme overrides were requested explicitly but are not valid JSON.
    /// Applying parsed overrides never fails; this only comes out of
    /// `ThemeOverrides::from_json`.
    #[error("invalid theme overrides: {0}")]
    ThemeOverrides(#[from] serde_json::Error),
}
