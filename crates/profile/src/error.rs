// ABOUTME: Error types for profile extraction including ErrorCode enum and ExtractError struct.
// ABOUTME: Provides categorized errors with convenience constructors and boolean helpers.

use std::fmt;

/// Error codes representing different categories of extraction failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// A required locator matched nothing, or the matched node lacks the attribute.
    NotFound,
    /// A CSS part of a locator failed to compile.
    InvalidSelector,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::NotFound => "not found",
            ErrorCode::InvalidSelector => "invalid selector",
        };
        write!(f, "{}", s)
    }
}

/// The main error type for extraction operations.
#[derive(Debug, thiserror::Error)]
pub struct ExtractError {
    pub code: ErrorCode,
    pub op: String,
    pub locator: String,
    pub field: Option<String>,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "profile: {}", self.op)?;
        if let Some(ref field) = self.field {
            write!(f, " [{}]", field)?;
        }
        write!(f, " {}: {}", self.locator, self.code)?;
        if let Some(ref src) = self.source {
            write!(f, ": {}", src)?;
        }
        Ok(())
    }
}

/// Result alias used throughout the extraction layer.
pub type Result<T> = std::result::Result<T, ExtractError>;

impl ExtractError {
    /// Create a NotFound error.
    pub fn not_found(
        op: impl Into<String>,
        locator: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::NotFound,
            op: op.into(),
            locator: locator.into(),
            field: None,
            source,
        }
    }

    /// Create an InvalidSelector error.
    pub fn invalid_selector(
        op: impl Into<String>,
        locator: impl Into<String>,
        source: Option<anyhow::Error>,
    ) -> Self {
        Self {
            code: ErrorCode::InvalidSelector,
            op: op.into(),
            locator: locator.into(),
            field: None,
            source,
        }
    }

    /// Attach the name of the profile field whose rule failed.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Returns true if this is a NotFound error.
    pub fn is_not_found(&self) -> bool {
        self.code == ErrorCode::NotFound
    }

    /// Returns true if this is an InvalidSelector error.
    pub fn is_invalid_selector(&self) -> bool {
        self.code == ErrorCode::InvalidSelector
    }
}
