//! Structured error types for virtgrid.
//!
//! The layout, table and select cores never fail; degenerate input degrades to
//! an empty or unsorted view. Errors only come from the outer surfaces that
//! parse host-supplied JSON or read files.

/// All errors that can occur when feeding host data into virtgrid.
#[derive(Debug, thiserror::Error)]
pub enum VirtgridError {
    /// Malformed JSON for rows, columns, options or a configuration record.
    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A configuration record that parsed but cannot be used.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// I/O error (CLI only).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Catch-all for host-side string errors.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, VirtgridError>;

impl From<String> for VirtgridError {
    fn from(s: String) -> Self {
        Self::Other(s)
    }
}

impl From<&str> for VirtgridError {
    fn from(s: &str) -> Self {
        Self::Other(s.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<VirtgridError> for wasm_bindgen::JsValue {
    fn from(e: VirtgridError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

#[cfg(target_arch = "wasm32")]
impl From<serde_wasm_bindgen::Error> for VirtgridError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        Self::Other(e.to_string())
    }
}
