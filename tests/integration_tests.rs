//! Integration tests for end-to-end tokenization.
//!
//! These tests run whole programs through the lexer and check the
//! properties every token stream must hold: ordering, a single trailing
//! end-of-input token, positions that point back into the source, and
//! repeatable results.

use clex::{
    errors::errors::ErrorImpl,
    format_error,
    lexer::{
        lexer::tokenize,
        tokens::{is_keyword, Token, TokenKind},
    },
    Position,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

const PROGRAM: &str = r#"/* sum the first n values */
int sum(int n) {
    int total = 0;
    for (int i = 0; i < n; i = i + 1) {
        total = total + i; // accumulate
    }
    return total;
}

void main() {
    float ratio = 0.333333333;
    char c = 'x';
    printf("%d", sum(10));
}
"#;

fn summary(tokens: &[Token]) -> Vec<(TokenKind, &str, u32, u32)> {
    tokens
        .iter()
        .map(|t| (t.kind, t.value.as_str(), t.line(), t.column()))
        .collect()
}

#[test]
fn test_tokenize_program() {
    let tokens = tokenize(PROGRAM).unwrap();

    use TokenKind::*;
    let expected = vec![
        (Comment, "/* sum the first n values */", 1, 1),
        (Keyword, "int", 2, 1),
        (Identifier, "sum", 2, 5),
        (Operator, "(", 2, 8),
        (Keyword, "int", 2, 9),
        (Identifier, "n", 2, 13),
        (Operator, ")", 2, 14),
        (Operator, "{", 2, 16),
        (Keyword, "int", 3, 5),
        (Identifier, "total", 3, 9),
        (Operator, "=", 3, 15),
        (Integer, "0", 3, 17),
        (Operator, ";", 3, 18),
        (Keyword, "for", 4, 5),
        (Operator, "(", 4, 9),
        (Keyword, "int", 4, 10),
        (Identifier, "i", 4, 14),
        (Operator, "=", 4, 16),
        (Integer, "0", 4, 18),
        (Operator, ";", 4, 19),
        (Identifier, "i", 4, 21),
        (Operator, "<", 4, 23),
        (Identifier, "n", 4, 25),
        (Operator, ";", 4, 26),
        (Identifier, "i", 4, 28),
        (Operator, "=", 4, 30),
        (Identifier, "i", 4, 32),
        (Operator, "+", 4, 34),
        (Integer, "1", 4, 36),
        (Operator, ")", 4, 37),
        (Operator, "{", 4, 39),
        (Identifier, "total", 5, 9),
        (Operator, "=", 5, 15),
        (Identifier, "total", 5, 17),
        (Operator, "+", 5, 23),
        (Identifier, "i", 5, 25),
        (Operator, ";", 5, 26),
        (Comment, "// accumulate", 5, 28),
        (Operator, "}", 6, 5),
        (Keyword, "return", 7, 5),
        (Identifier, "total", 7, 12),
        (Operator, ";", 7, 17),
        (Operator, "}", 8, 1),
        (Keyword, "void", 10, 1),
        (Identifier, "main", 10, 6),
        (Operator, "(", 10, 10),
        (Operator, ")", 10, 11),
        (Operator, "{", 10, 13),
        (Keyword, "float", 11, 5),
        (Identifier, "ratio", 11, 11),
        (Operator, "=", 11, 17),
        (Decimal, "0.33333", 11, 19),
        (Operator, ";", 11, 30),
        (Keyword, "char", 12, 5),
        (Identifier, "c", 12, 10),
        (Operator, "=", 12, 12),
        (Character, "'x'", 12, 14),
        (Operator, ";", 12, 17),
        (Keyword, "printf", 13, 5),
        (Operator, "(", 13, 11),
        (Literal, "\"%d\"", 13, 12),
        (Operator, ",", 13, 16),
        (Identifier, "sum", 13, 18),
        (Operator, "(", 13, 21),
        (Integer, "10", 13, 22),
        (Operator, ")", 13, 24),
        (Operator, ")", 13, 25),
        (Operator, ";", 13, 26),
        (Operator, "}", 14, 1),
        (EOF, "", 15, 1),
    ];

    assert_eq!(summary(&tokens), expected);
}

#[test]
fn test_error_discards_tokens() {
    let result = tokenize("int x = 1;\nint y = 2 $ 3;");

    let error = result.unwrap_err();
    assert_eq!(error.get_kind(), &ErrorImpl::UnrecognisedCharacter { character: '$' });
    assert_eq!(*error.get_position(), Position::new(2, 11));
}

#[test]
fn test_first_error_wins() {
    let error = tokenize("a @ \"unterminated").unwrap_err();

    assert_eq!(error.to_string(), "Unrecognized character '@' at line 1, column 3");
}

#[test]
fn test_format_unrecognised_character() {
    let source = "int main() {\n    int a = #;\n}\n";
    let error = tokenize(source).unwrap_err();

    assert_eq!(
        format_error(&error, source, "main.c"),
        "Error: UnrecognisedCharacter\n-> main.c\n  |\n2 | int a = #;\n  | --------^\n"
    );
}

#[test]
fn test_parallel_scans_are_independent() {
    let expected = tokenize(PROGRAM).unwrap();

    std::thread::scope(|scope| {
        let handles = (0..4)
            .map(|_| scope.spawn(|| tokenize(PROGRAM).unwrap()))
            .collect::<Vec<_>>();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

/// A lexical atom with the kind it must be classified as.
fn atom_strategy() -> impl Strategy<Value = (String, TokenKind)> {
    prop_oneof![
        "[a-z][a-z0-9_]{0,6}".prop_map(|word| {
            let kind = if is_keyword(&word) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            (word, kind)
        }),
        "[0-9]{1,6}".prop_map(|n| (n, TokenKind::Integer)),
        "[0-9]{0,3}\\.[0-9]{0,5}".prop_map(|n| (n, TokenKind::Decimal)),
        prop::sample::select(vec![
            '+', '-', '*', '/', '%', '^', '=', '>', '<', '!', '&', '|', ';', '{', '}', '(', ')',
            ',', '[', ']',
        ])
        .prop_map(|c| (c.to_string(), TokenKind::Operator)),
        "\"[a-zA-Z0-9 @#']{0,8}\"".prop_map(|s| (s, TokenKind::Literal)),
        "'[a-z\"]{1,2}'".prop_map(|s| (s, TokenKind::Character)),
        "//[a-z @\"]{0,8}".prop_map(|s| (s, TokenKind::Comment)),
        "/\\*[a-z \n@]{0,8}\\*/".prop_map(|s| (s, TokenKind::Comment)),
    ]
}

fn separator_strategy() -> impl Strategy<Value = &'static str> {
    prop::sample::select(vec![" ", "  ", "\t", "\n", " \n\t"])
}

/// Joins atoms with whitespace, recording where each atom starts.
fn build_source(atoms: &[((String, TokenKind), &str)]) -> (String, Vec<(TokenKind, String, Position)>) {
    let mut source = String::new();
    let mut expected = vec![];
    let (mut line, mut column) = (1, 1);

    for ((text, kind), separator) in atoms {
        expected.push((*kind, text.clone(), Position::new(line, column)));

        // A line comment runs to the end of its line.
        let separator = if text.starts_with("//") { "\n" } else { *separator };

        for ch in text.chars().chain(separator.chars()) {
            if ch == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        source.push_str(text);
        source.push_str(separator);
    }

    expected.push((TokenKind::EOF, String::new(), Position::new(line, column)));
    (source, expected)
}

/// Char offset of a 1-based position.
fn char_offset(source: &str, position: Position) -> usize {
    let mut line_starts = vec![0];
    for (i, ch) in source.chars().enumerate() {
        if ch == '\n' {
            line_starts.push(i + 1);
        }
    }

    line_starts[position.line as usize - 1] + position.column as usize - 1
}

proptest! {
    #[test]
    fn test_whitespace_only_yields_single_eof(source in "[ \t\r\n]{0,24}") {
        let tokens = tokenize(&source).unwrap();

        prop_assert_eq!(tokens.len(), 1);
        prop_assert_eq!(tokens[0].kind, TokenKind::EOF);
    }

    #[test]
    fn test_atoms_are_tokenized_in_order(
        atoms in prop::collection::vec((atom_strategy(), separator_strategy()), 0..24)
    ) {
        let (source, expected) = build_source(&atoms);
        let tokens = tokenize(&source).unwrap();

        let actual = tokens
            .iter()
            .map(|t| (t.kind, t.value.clone(), t.position))
            .collect::<Vec<_>>();

        prop_assert_eq!(tokens.len(), atoms.len() + 1);
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn test_tokenize_is_deterministic(source in "\\PC{0,48}") {
        prop_assert_eq!(tokenize(&source), tokenize(&source));
    }

    #[test]
    fn test_stream_shape(source in "[a-z0-9 \n\t+;(){}/*\"'@]{0,64}") {
        if let Ok(tokens) = tokenize(&source) {
            let last = tokens.last().unwrap();
            prop_assert_eq!(last.kind, TokenKind::EOF);
            prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::EOF).count(), 1);

            for pair in tokens.windows(2) {
                prop_assert!(pair[0].position <= pair[1].position);
            }
        }
    }

    #[test]
    fn test_positions_point_into_source(source in "[a-z0-9 \n\t+;(){}/*\"']{0,64}") {
        if let Ok(tokens) = tokenize(&source) {
            let chars = source.chars().collect::<Vec<_>>();

            for token in tokens.iter().filter(|t| t.kind != TokenKind::EOF) {
                let start = char_offset(&source, token.position);
                let text = chars[start..].iter().take(token.value.chars().count()).collect::<String>();
                prop_assert_eq!(&text, &token.value);
            }
        }
    }
}
