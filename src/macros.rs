//! Utility macros for the lexer.
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_SINGLE_HANDLER!` - Creates a handler for single-character tokens

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's string value
/// * `$position` - Line and column of the token's first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Integer, "42".to_string(), Position::new(1, 1));
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $position:expr) => {
        Token {
            kind: $kind,
            value: $value,
            position: $position,
        }
    };
}

/// Creates a lexer handler that emits the current character as a single
/// token of the given kind and advances past it.
///
/// # Example
///
/// ```ignore
/// ScanRule {
///     matches: |lexer| is_operator(lexer.at()),
///     handler: MK_SINGLE_HANDLER!(TokenKind::Operator),
/// }
/// ```
#[macro_export]
macro_rules! MK_SINGLE_HANDLER {
    ($kind:expr) => {
        |lexer: &mut Lexer| -> Result<(), Error> {
            let position = lexer.position();
            let value = lexer.at().to_string();
            lexer.advance();
            lexer.push(MK_TOKEN!($kind, value, position));
            Ok(())
        }
    };
}
