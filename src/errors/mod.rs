//! Centralized error handling module
//!
//! All public operations return [`BarkResult`], a tagged result whose error side
//! is one of the four [`BarkError`] kinds, so callers can match exhaustively.

pub mod types;

pub use types::{
    BarkError, BarkResult, ConfigurationError, ServerError, ServerErrorKind, ValidationError,
};
