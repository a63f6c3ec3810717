//! Lexical analysis module.
//!
//! This module contains the lexer (tokenizer) that converts source text
//! into a stream of tokens. It handles:
//!
//! - A single forward, character-level scan with no backtracking
//! - Recognition of keywords, identifiers, numbers, literals and operators
//! - Line and column tracking for every token and every error
//! - Comments (kept as tokens) and whitespace (skipped)

pub mod lexer;
pub mod tokens;
