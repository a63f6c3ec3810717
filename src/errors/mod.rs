//! Error types for lexical analysis.
//!
//! Every lexical failure is fatal to the scan that raised it. This module
//! defines:
//!
//! - A positioned `Error` carrying the line and column of the failure
//! - The `ErrorImpl` variants (unrecognised characters, unterminated literals)
//! - Short suggestions shown alongside formatted diagnostics

pub mod errors;
