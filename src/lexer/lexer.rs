use tracing::{debug, trace, warn};

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_SINGLE_HANDLER, MK_TOKEN,
};

use super::tokens::{is_keyword, is_operator, Token, TokenKind};

/// Fractional digits kept when a decimal literal is re-rendered.
const DECIMAL_PLACES: i32 = 5;

pub type ScanMatcher = fn(&Lexer) -> bool;
pub type ScanHandler = fn(&mut Lexer) -> Result<(), Error>;

/// One entry of the scan table: the first rule whose `matches` accepts the
/// current character owns it.
#[derive(Clone, Copy)]
pub struct ScanRule {
    matches: ScanMatcher,
    handler: ScanHandler,
}

/// The scan cursor. A fresh one is built for every call to [`tokenize`].
#[derive(Clone)]
pub struct Lexer {
    rules: Vec<ScanRule>,
    tokens: Vec<Token>,
    source: Vec<char>,
    pos: usize,
    line: u32,
    column: u32,
}

impl Lexer {
    pub fn new(source: &str) -> Lexer {
        Lexer {
            rules: vec![
                ScanRule { matches: |lexer: &Lexer| lexer.at().is_whitespace(), handler: skip_handler },
                ScanRule { matches: |lexer: &Lexer| lexer.at() == '/' && lexer.peek(1) == Some('/'), handler: line_comment_handler },
                ScanRule { matches: |lexer: &Lexer| lexer.at() == '/' && lexer.peek(1) == Some('*'), handler: block_comment_handler },
                ScanRule { matches: |lexer: &Lexer| lexer.at().is_ascii_lowercase(), handler: symbol_handler },
                ScanRule { matches: |lexer: &Lexer| lexer.at().is_ascii_digit() || lexer.at() == '.', handler: number_handler },
                ScanRule { matches: |lexer: &Lexer| is_operator(lexer.at()), handler: MK_SINGLE_HANDLER!(TokenKind::Operator) },
                ScanRule { matches: |lexer: &Lexer| lexer.at() == '"', handler: string_handler },
                ScanRule { matches: |lexer: &Lexer| lexer.at() == '\'' && lexer.remaining() > 2, handler: character_handler },
            ],
            tokens: vec![],
            source: source.chars().collect(),
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Consumes the current character, keeping line and column in step.
    pub fn advance(&mut self) {
        if self.at() == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        self.pos += 1;
    }

    pub fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    pub fn push(&mut self, token: Token) {
        trace!(kind = %token.kind, value = %token.value, line = token.position.line, column = token.position.column, "token");
        self.tokens.push(token);
    }

    pub fn at(&self) -> char {
        self.source[self.pos]
    }

    pub fn peek(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    pub fn remaining(&self) -> usize {
        self.source.len() - self.pos
    }

    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }
}

fn skip_handler(lexer: &mut Lexer) -> Result<(), Error> {
    while !lexer.at_eof() && lexer.at().is_whitespace() {
        lexer.advance();
    }

    Ok(())
}

fn line_comment_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let position = lexer.position();
    let mut comment = String::from("//");
    lexer.advance_n(2);

    while !lexer.at_eof() && lexer.at() != '\n' {
        comment.push(lexer.at());
        lexer.advance();
    }

    lexer.push(MK_TOKEN!(TokenKind::Comment, comment, position));

    if !lexer.at_eof() {
        lexer.advance();
    }

    Ok(())
}

fn block_comment_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let position = lexer.position();
    let mut comment = String::from("/*");
    lexer.advance_n(2);

    let mut terminated = false;
    while !lexer.at_eof() {
        if lexer.at() == '*' && lexer.peek(1) == Some('/') {
            comment.push_str("*/");
            lexer.advance_n(2);
            terminated = true;
            break;
        }

        comment.push(lexer.at());
        lexer.advance();
    }

    // Not an error: the comment simply ends with the input.
    if !terminated {
        warn!(line = position.line, column = position.column, "block comment is not terminated");
    }

    lexer.push(MK_TOKEN!(TokenKind::Comment, comment, position));
    Ok(())
}

fn symbol_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let position = lexer.position();
    let mut value = String::new();

    while !lexer.at_eof() {
        let ch = lexer.at();
        if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '_') {
            break;
        }
        value.push(ch);
        lexer.advance();
    }

    let kind = if is_keyword(&value) {
        TokenKind::Keyword
    } else {
        TokenKind::Identifier
    };

    lexer.push(MK_TOKEN!(kind, value, position));
    Ok(())
}

fn number_handler(lexer: &mut Lexer) -> Result<(), Error> {
    let position = lexer.position();
    let mut number = String::new();
    let mut is_decimal = false;
    let mut decimal_places = 0;

    while !lexer.at_eof() {
        let ch = lexer.at();
        if ch.is_ascii_digit() {
            if is_decimal {
                decimal_places += 1;
            }
        } else if ch == '.' && !is_decimal {
            is_decimal = true;
        } else {
            break;
        }
        number.push(ch);
        lexer.advance();
    }

    if !is_decimal {
        lexer.push(MK_TOKEN!(TokenKind::Integer, number, position));
        return Ok(());
    }

    // The scanned text is always a valid f64, so the error arm never fires.
    if decimal_places > DECIMAL_PLACES {
        number = round_decimal(&number).ok_or_else(|| {
            Error::new(ErrorImpl::NumberParseError { token: number.clone() }, position)
        })?;
    }

    lexer.push(MK_TOKEN!(TokenKind::Decimal, number, position));
    Ok(())
}

/// Rounds to [`DECIMAL_PLACES`] fractional digits, ties to even, and renders
/// the result in fixed notation with at least one fractional digit
/// (`3.12346`, `1.0`, `0.00001`).
fn round_decimal(number: &str) -> Option<String> {
    let value = number.parse::<f64>().ok()?;
    let scale = 10f64.powi(DECIMAL_PLACES);

    // Past 2^53 the scaled value has no fractional bits left to round.
    let rounded = if value.abs() * scale >= 2f64.powi(f64::MANTISSA_DIGITS as i32) {
        value
    } else {
        (value * scale).round_ties_even() / scale
    };

    let mut rendered = rounded.to_string();
    if !rendered.contains('.') {
        rendered.push_str(".0");
    }

    Some(rendered)
}

fn string_handler(lexer: &mut Lexer) -> Result<(), Error> {
    quoted_handler(lexer, '"', TokenKind::Literal, ErrorImpl::UnterminatedStringLiteral)
}

fn character_handler(lexer: &mut Lexer) -> Result<(), Error> {
    quoted_handler(lexer, '\'', TokenKind::Character, ErrorImpl::UnterminatedCharacterLiteral)
}

/// Scans from the opening `quote` through the next `quote`, both included.
/// Running out of input reports the position of the opening quote.
fn quoted_handler(
    lexer: &mut Lexer,
    quote: char,
    kind: TokenKind,
    unterminated: ErrorImpl,
) -> Result<(), Error> {
    let position = lexer.position();
    let mut literal = String::from(quote);
    lexer.advance();

    while !lexer.at_eof() && lexer.at() != quote {
        literal.push(lexer.at());
        lexer.advance();
    }

    if lexer.at_eof() {
        return Err(Error::new(unterminated, position));
    }

    literal.push(quote);
    lexer.advance();

    lexer.push(MK_TOKEN!(kind, literal, position));
    Ok(())
}

/// Splits `source` into tokens, ending with a single [`TokenKind::EOF`].
///
/// The scan stops at the first lexical error and returns only that error.
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn tokenize(source: &str) -> Result<Vec<Token>, Error> {
    let mut lex = Lexer::new(source);
    let rules = lex.rules.clone();

    while !lex.at_eof() {
        let mut matched = false;

        for rule in rules.iter() {
            if (rule.matches)(&lex) {
                (rule.handler)(&mut lex)
                    .inspect_err(|error| debug!(%error, "lexical analysis failed"))?;
                matched = true;
                break;
            }
        }

        if !matched {
            let error = Error::new(
                ErrorImpl::UnrecognisedCharacter { character: lex.at() },
                lex.position(),
            );
            debug!(%error, "lexical analysis failed");
            return Err(error);
        }
    }

    let position = lex.position();
    lex.push(MK_TOKEN!(TokenKind::EOF, String::new(), position));

    debug!(tokens = lex.tokens.len(), "tokenized");
    Ok(lex.tokens)
}
