//! # Error Types
//!
//! Error types for cart-pricing-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  cart-pricing-core errors (this file)                                  │
//! │  ├── InputError       - Cart document rejected at the boundary         │
//! │  └── ValidationError  - Field-level rule failures                      │
//! │                                                                         │
//! │  cart-pricing-run errors (separate crate)                              │
//! │  └── RunError         - Config, file and stdout failures               │
//! │                                                                         │
//! │  Pricing itself has no error type: a line that cannot be priced       │
//! │  is skipped, never failed.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Input Error
// =============================================================================

/// The cart document could not be turned into a validated [`Cart`].
///
/// The function entry point maps every variant to an empty operation list,
/// so these never reach the checkout host as failures.
///
/// [`Cart`]: crate::types::Cart
#[derive(Debug, Error)]
pub enum InputError {
    /// The document is not JSON or does not match the input schema.
    #[error("Malformed cart input: {0}")]
    Malformed(#[from] serde_json::Error),

    /// A line failed a structural rule (e.g. empty id).
    #[error("Invalid cart line at index {index}: {source}")]
    InvalidLine {
        index: usize,
        #[source]
        source: ValidationError,
    },

    /// Two lines share an id.
    ///
    /// ## When This Occurs
    /// Only with hand-written or corrupted documents; the platform never
    /// sends duplicate line ids. Rejected because each line may receive at
    /// most one price operation.
    #[error("Duplicate cart line id: {0}")]
    DuplicateLine(String),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Field-level validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with InputError.
pub type InputResult<T> = Result<T, InputError>;
