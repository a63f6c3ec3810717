use lazy_static::lazy_static;
use std::{collections::HashSet, fmt::Display};

use crate::Position;

lazy_static! {
    pub static ref RESERVED_LOOKUP: HashSet<&'static str> = {
        let mut set = HashSet::new();
        set.insert("int");
        set.insert("if");
        set.insert("else");
        set.insert("while");
        set.insert("for");
        set.insert("return");
        set.insert("true");
        set.insert("false");
        set.insert("string");
        set.insert("char");
        set.insert("float");
        set.insert("double");
        set.insert("bool");
        set.insert("const");
        set.insert("switch");
        set.insert("case");
        set.insert("break");
        set.insert("continue");
        set.insert("default");
        set.insert("void");
        set.insert("printf");
        set
    };
    pub static ref OPERATOR_LOOKUP: HashSet<char> =
        ['+', '-', '*', '/', '%', '^', '=', '>', '<', '!', '&', '|']
            .into_iter()
            .collect();
}

/// Punctuation is reported under [`TokenKind::Operator`] too.
pub const PUNCTUATION: [char; 8] = [';', '{', '}', '(', ')', ',', '[', ']'];

pub fn is_keyword(word: &str) -> bool {
    RESERVED_LOOKUP.contains(word)
}

pub fn is_operator(ch: char) -> bool {
    OPERATOR_LOOKUP.contains(&ch) || PUNCTUATION.contains(&ch)
}

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub enum TokenKind {
    Keyword,
    Identifier,
    Operator,
    Literal, // "..."
    Character, // '...'
    Integer,
    Decimal,
    Comment,
    EOF,
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TokenKind::Keyword => "KEYWORD",
            TokenKind::Identifier => "IDENTIFIER",
            TokenKind::Operator => "OPERATOR",
            TokenKind::Literal => "LITERAL",
            TokenKind::Character => "CHARACTER",
            TokenKind::Integer => "INTEGER",
            TokenKind::Decimal => "DECIMAL",
            TokenKind::Comment => "COMMENT",
            TokenKind::EOF => "END_OF_INPUT",
        };

        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Token [type={}, value='{}', line={}, column={}]",
            self.kind, self.value, self.position.line, self.position.column
        )
    }
}

impl Token {
    pub fn is_one_of_many(&self, tokens: &[TokenKind]) -> bool {
        tokens.iter().any(|kind| *kind == self.kind)
    }

    pub fn line(&self) -> u32 {
        self.position.line
    }

    pub fn column(&self) -> u32 {
        self.position.column
    }

    pub fn debug(&self) {
        if self.is_one_of_many(&[TokenKind::EOF]) {
            println!("{} ({}:{})", self.kind, self.line(), self.column());
        } else {
            println!(
                "{} {} {}:{}",
                self.kind,
                self.value,
                self.line(),
                self.column()
            );
        }
    }
}
