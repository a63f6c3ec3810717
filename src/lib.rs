#![allow(clippy::module_inception)]

use crate::errors::errors::{Error, ErrorTip};

pub mod errors;
pub mod lexer;
pub mod macros;

/// 1-based line and column of a character in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Position { line, column }
    }

    pub fn start() -> Self {
        Position { line: 1, column: 1 }
    }
}

/// Returns the text of the given 1-based line, without its trailing newline.
pub fn get_line_at_position(source: &str, line: u32) -> Option<&str> {
    source
        .split('\n')
        .nth(line.checked_sub(1)? as usize)
        .map(|text| text.strip_suffix('\r').unwrap_or(text))
}


pub fn format_error(error: &Error, source: &str, file: &str) -> String {
    /*
        Error: message
        -> input.c
          |
        2 | x = "abc
          | ----^
    */

    let position = error.get_position();
    let line_text = get_line_at_position(source, position.line).unwrap_or("");

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    let header = if let ErrorTip::None = error.get_tip() {
        format!("Error: {}", error.get_error_name())
    } else {
        format!("Error: {} ({})", error.get_error_name(), error.get_tip())
    };

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(line_text);

    let arrows = (position.column as usize)
        .saturating_sub(removed_whitespace)
        .max(1);

    let mut out = String::new();
    out.push_str(&format!("{}\n", header));
    out.push_str(&format!("-> {}\n", file));
    out.push_str(&format!("{:>padding$}\n", "|"));
    out.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));
    out.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    out
}

fn remove_starting_whitespace(string: &str) -> (&str, usize) {
    let start = string.chars().take_while(|c| *c == ' ' || *c == '\t').count();

    (&string[start..], start)
}
