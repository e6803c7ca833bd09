#![deny(missing_docs)]

//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the crate.

use derive_more::{Display, From};

/// The Global Error Enum.
///
/// We use `derive_more` for boilerplate.
/// Note: String errors default to `General`.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// A property's declared type could not be determined at all: neither a
    /// concrete type nor a deferred resolver function was supplied.
    /// We ignore this for `From<String>` to avoid conflict with General.
    #[from(ignore)]
    #[display(
        "Unresolvable type reference on property '{_0}': circular model \
         relationships must declare a deferred (thunk) type on at least one side"
    )]
    UnresolvableReference(String),

    /// Generic errors.
    #[display("General Error: {_0}")]
    General(String),
}

/// Manual implementation of the standard Error trait.
impl std::error::Error for AppError {}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
