//! Structured error types for flexlayout.
//!
//! Configuration errors abort a pass; missing data is reported per element
//! and never aborts a pass.

/// All errors that can occur while resolving or running a layout pass.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    /// Fixed-width columns need more room than the section offers.
    #[error("section {section}: fixed column widths {fixed} exceed usable width {usable}")]
    FixedWidthOverflow {
        section: usize,
        fixed: f32,
        usable: f32,
    },

    /// Ratio columns ask for more than what fixed columns leave over.
    #[error("section {section}: column ratios {ratio} exceed available fraction {available}")]
    RatioOverflow {
        section: usize,
        ratio: f32,
        available: f32,
    },

    /// A single column width spec is malformed.
    #[error("section {section}, column {column}: {reason}")]
    InvalidColumnWidth {
        section: usize,
        column: usize,
        reason: String,
    },

    /// A collaborator returned an out-of-range index or an unusable size.
    #[error("Missing data: {0}")]
    MissingData(String),

    /// Configuration document could not be parsed.
    #[error("Configuration: {0}")]
    Json(#[from] serde_json::Error),
}

impl LayoutError {
    /// True for errors that mean the spec provider broke its contract.
    #[must_use]
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            LayoutError::FixedWidthOverflow { .. }
                | LayoutError::RatioOverflow { .. }
                | LayoutError::InvalidColumnWidth { .. }
        )
    }
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, LayoutError>;
