//! Custom error types for casa-split
//!
//! This module defines the error hierarchy for the application using thiserror.
//! The allocation and planning core is total and never produces these errors;
//! they come from storage, configuration, and input validation.

use thiserror::Error;

/// The main error type for casa-split operations
#[derive(Error, Debug)]
pub enum CasaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for data models and user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Debt-related errors (paying a settled debt, etc.)
    #[error("Debt error: {0}")]
    Debt(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CasaError {
    /// Create a "not found" error for monthly periods
    pub fn period_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Period",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for household expenses
    pub fn expense_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Expense",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for debts
    pub fn debt_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Debt",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for work logs
    pub fn work_log_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Work log",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for maintenance records
    pub fn maintenance_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Maintenance record",
            identifier: identifier.into(),
        }
    }

    pub fn savings_goal_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Savings goal",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for CasaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CasaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for casa-split operations
pub type CasaResult<T> = Result<T, CasaError>;
