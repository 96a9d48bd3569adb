//! Error types and error handling for the front end.
//!
//! This module defines the error types used throughout the pipeline:
//!
//! - Error structures with source position information
//! - Specific error variants for each phase, classified by [`errors::ErrorKind`]
//!   into lexical, syntax, resolution and type errors
//! - Helpful error messages and suggestions

pub mod errors;
