use proptest::prelude::*;

use siever::diagnostic::{CollectingReporter, Diagnostic};
use siever::lexer::{
    formatter::{BasicFormatter, ToFormatter, TokenFormatter},
    scan, Lexer, LexicalErrorKind, Literal, Token, TokenKind, KEYWORD_HASHMAP,
};

fn check(input: &str, expected: &str, test_name: &str) {
    let mut scanner = Lexer::new(input);
    let formatter: BasicFormatter = scanner.create_formatter();
    let mut lines = Vec::new();
    loop {
        match scanner.next_token() {
            Ok(token) => {
                lines.push(formatter.format(&token));
                if matches!(token.kind, TokenKind::Eof) {
                    break;
                }
            }
            Err(error) => {
                lines.push(formatter.format_lexical_error(&error));
            }
        }
    }

    assert_eq!(lines.join("\n"), expected, "Failed the test {test_name}");
}

fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
    tokens.iter().map(|t| t.kind).collect()
}

#[test]
fn smoke_test() {
    check("", "EOF  null", "smoke");
}

#[test]
fn test_single_character_tokens() {
    check(
        "(){};,+-*.",
        "LEFT_PAREN ( null\n\
         RIGHT_PAREN ) null\n\
         LEFT_BRACE { null\n\
         RIGHT_BRACE } null\n\
         SEMICOLON ; null\n\
         COMMA , null\n\
         PLUS + null\n\
         MINUS - null\n\
         STAR * null\n\
         DOT . null\n\
         EOF  null",
        "single_character",
    );
}

#[test]
fn test_one_or_two_character_tokens() {
    check(
        "! != = == < <= > >= /",
        "BANG ! null\n\
         BANG_EQUAL != null\n\
         EQUAL = null\n\
         EQUAL_EQUAL == null\n\
         LESS < null\n\
         LESS_EQUAL <= null\n\
         GREATER > null\n\
         GREATER_EQUAL >= null\n\
         SLASH / null\n\
         EOF  null",
        "one_or_two_character",
    );
}

#[test]
fn test_two_character_operators_are_greedy() {
    check(
        "!===<=>",
        "BANG_EQUAL != null\n\
         EQUAL_EQUAL == null\n\
         LESS_EQUAL <= null\n\
         GREATER > null\n\
         EOF  null",
        "greedy_operators",
    );
}

#[test]
fn test_ternary_punctuation() {
    check(
        "a ? b : c",
        "IDENTIFIER a null\n\
         QUESTION ? null\n\
         IDENTIFIER b null\n\
         COLON : null\n\
         IDENTIFIER c null\n\
         EOF  null",
        "ternary",
    );
}

#[test]
fn test_numbers() {
    check(
        "123 45.67 8. .5",
        "NUMBER 123 123.0\n\
         NUMBER 45.67 45.67\n\
         NUMBER 8 8.0\n\
         DOT . null\n\
         DOT . null\n\
         NUMBER 5 5.0\n\
         EOF  null",
        "numbers",
    );
}

#[test]
fn test_strings() {
    check(
        "\"hello world\" \"\"",
        "STRING \"hello world\" hello world\n\
         STRING \"\" \n\
         EOF  null",
        "strings",
    );
}

#[test]
fn test_unterminated_string() {
    check(
        "+ \"abc",
        "PLUS + null\n\
         [line 1] Error: Unterminated string.\n\
         EOF  null",
        "unterminated_string",
    );
}

#[test]
fn test_identifiers_and_keywords() {
    check(
        "and class else false for fun if nil or print return super this true var while",
        "AND and null\n\
         CLASS class null\n\
         ELSE else null\n\
         FALSE false null\n\
         FOR for null\n\
         FUN fun null\n\
         IF if null\n\
         NIL nil null\n\
         OR or null\n\
         PRINT print null\n\
         RETURN return null\n\
         SUPER super null\n\
         THIS this null\n\
         TRUE true null\n\
         VAR var null\n\
         WHILE while null\n\
         EOF  null",
        "keywords",
    );
    check(
        "_foo bar1 And orchid",
        "IDENTIFIER _foo null\n\
         IDENTIFIER bar1 null\n\
         IDENTIFIER And null\n\
         IDENTIFIER orchid null\n\
         EOF  null",
        "identifiers",
    );
}

#[test]
fn test_unrecognized_characters_do_not_stop_scanning() {
    check(
        "a @ b #",
        "IDENTIFIER a null\n\
         [line 1] Error: Unexpected character '@'.\n\
         IDENTIFIER b null\n\
         [line 1] Error: Unexpected character '#'.\n\
         EOF  null",
        "unrecognized",
    );
}

#[test]
fn test_comments() {
    check(
        "// line comment\n+ /* block\n comment */ -",
        "PLUS + null\n\
         MINUS - null\n\
         EOF  null",
        "comments",
    );
    // The first `*/` closes the comment.
    check(
        "/* a /* b */ c */",
        "IDENTIFIER c null\n\
         STAR * null\n\
         SLASH / null\n\
         EOF  null",
        "non_nesting_comments",
    );
}

#[test]
fn test_unterminated_block_comment() {
    check(
        "1 /* never closed\n",
        "NUMBER 1 1.0\n\
         [line 2] Error: Unterminated multiline comment.\n\
         EOF  null",
        "unterminated_comment",
    );
}

#[test]
fn test_line_numbers() {
    let mut reporter = CollectingReporter::new();
    let tokens = scan(
        "a\n// comment\n/* one\ntwo */ b\n\"multi\nline\" c",
        &mut reporter,
    );
    assert!(reporter.diagnostics().is_empty());

    let lines: Vec<u32> = tokens.iter().map(|t| t.line).collect();
    assert_eq!(lines, vec![1, 4, 6, 6, 6]);
    assert_eq!(
        tokens[2].literal,
        Some(Literal::String("multi\nline".into()))
    );
}

#[test]
fn test_scan_reports_every_error() {
    let mut reporter = CollectingReporter::new();
    let tokens = scan("@\n1 #\n\"open", &mut reporter);

    assert_eq!(
        kinds(&tokens),
        vec![TokenKind::NumericLiteral, TokenKind::Eof]
    );
    assert_eq!(
        reporter.diagnostics(),
        &[
            Diagnostic::Lexical {
                line: 1,
                message: "Unexpected character '@'.".into()
            },
            Diagnostic::Lexical {
                line: 2,
                message: "Unexpected character '#'.".into()
            },
            Diagnostic::Lexical {
                line: 3,
                message: "Unterminated string.".into()
            },
        ]
    );
    assert!(reporter.had_lexical_error());
    assert!(!reporter.had_runtime_error());
}

#[test]
fn test_scan_all_separates_errors() {
    let output = Lexer::new("1 $ 2").scan_all();
    assert_eq!(output.tokens.len(), 3);
    assert_eq!(output.errors.len(), 1);
    assert_eq!(output.errors[0].kind, LexicalErrorKind::Unrecognized('$'));
    assert_eq!(output.errors[0].span.range(), 2..3);
}

#[test]
fn test_eof_token_shape() {
    let tokens = Lexer::new("x\n\n").scan_all().tokens;
    let eof = tokens.last().expect("There is always an EOF token.");
    assert_eq!(eof.kind, TokenKind::Eof);
    assert_eq!(eof.lexeme, "");
    assert_eq!(eof.literal, None);
    assert_eq!(eof.line, 3);
}

#[test]
fn test_lexer_keeps_yielding_eof() {
    let mut scanner = Lexer::new("");
    for _ in 0..3 {
        let token = scanner.next_token().expect("EOF is not an error.");
        assert_eq!(token.kind, TokenKind::Eof);
    }
}

#[test]
fn test_lexemes_and_spans() {
    let scanner = Lexer::new("foo >= \"s\"");
    let tokens = scanner.clone().scan_all().tokens;
    assert_eq!(tokens[0].lexeme, "foo");
    assert_eq!(tokens[1].lexeme, ">=");
    assert_eq!(tokens[2].lexeme, "\"s\"");
    assert_eq!(scanner.get_lexeme(&tokens[1].span), Some(">="));
}

// Property-based tests

fn symbol_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("(".to_string()),
        Just(")".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just(",".to_string()),
        Just(".".to_string()),
        Just("-".to_string()),
        Just("+".to_string()),
        Just(";".to_string()),
        Just("*".to_string()),
        Just("?".to_string()),
        Just(":".to_string()),
        Just("!".to_string()),
        Just("!=".to_string()),
        Just("=".to_string()),
        Just("==".to_string()),
        Just("<".to_string()),
        Just("<=".to_string()),
        Just(">".to_string()),
        Just(">=".to_string()),
        Just("/".to_string()),
    ]
}

fn numeric_literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[0-9]{1,12}".prop_map(|s| s),              // Integer literals
        "[0-9]{1,12}\\.[0-9]{1,12}".prop_map(|s| s)  // Decimal literals
    ]
}

fn string_literal_strategy() -> impl Strategy<Value = String> {
    "[^\"]*".prop_map(|s: String| format!("\"{}\"", s))
}

fn identifier_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z_][a-zA-Z0-9_]*"
        .prop_filter("Keywords are not identifiers", |s| {
            !KEYWORD_HASHMAP.contains_key(s.as_str())
        })
        .prop_map(|s: String| s)
}

fn keyword_strategy() -> impl Strategy<Value = String> {
    prop::sample::select(KEYWORD_HASHMAP.keys().map(|k| k.to_string()).collect::<Vec<_>>())
}

fn comment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[^\n]*".prop_map(|s: String| format!("//{}\n", s)),
        "[^*]*".prop_map(|s: String| format!("/*{}*/", s)),
    ]
}

fn token_sequence_with_comments_strategy() -> impl Strategy<Value = String> {
    const MIN_TOKEN_COUNT: usize = 1;
    const MAX_TOKEN_COUNT: usize = 100;
    prop::collection::vec(
        prop_oneof![
            symbol_strategy(),
            numeric_literal_strategy(),
            string_literal_strategy(),
            identifier_strategy(),
            keyword_strategy(),
            comment_strategy(),
        ],
        MIN_TOKEN_COUNT..MAX_TOKEN_COUNT,
    )
    .prop_map(|tokens| tokens.join(" "))
}

fn token_sequence_without_comments_strategy() -> impl Strategy<Value = Vec<String>> {
    const MIN_TOKEN_COUNT: usize = 1;
    const MAX_TOKEN_COUNT: usize = 100;
    prop::collection::vec(
        prop_oneof![
            symbol_strategy(),
            numeric_literal_strategy(),
            string_literal_strategy(),
            identifier_strategy(),
            keyword_strategy(),
        ],
        MIN_TOKEN_COUNT..MAX_TOKEN_COUNT,
    )
}

proptest! {
    #[test]
    fn lexer_handles_valid_tokens_without_comments(input in token_sequence_without_comments_strategy()) {
        // Add 1 to include EOF token
        let expected_num_tokens = input.len() + 1;
        let input = input.join(" ");
        let output = Lexer::new(&input).scan_all();
        prop_assert!(output.errors.is_empty());
        prop_assert_eq!(output.tokens.len(), expected_num_tokens);
    }

    #[test]
    fn lexer_handles_valid_tokens_with_comments(input in token_sequence_with_comments_strategy()) {
        let output = Lexer::new(&input).scan_all();
        prop_assert!(output.errors.is_empty());
    }

    #[test]
    fn scan_always_ends_with_a_single_eof(input in any::<String>()) {
        let mut reporter = CollectingReporter::new();
        let tokens = scan(&input, &mut reporter);
        prop_assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
        prop_assert_eq!(tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(), 1);
    }

    #[test]
    fn number_literals_decode_to_their_value(input in numeric_literal_strategy()) {
        let tokens = Lexer::new(&input).scan_all().tokens;
        prop_assert_eq!(kinds(&tokens), vec![TokenKind::NumericLiteral, TokenKind::Eof]);
        let expected: f64 = input.parse().expect("Strategy only produces valid numbers.");
        prop_assert_eq!(&tokens[0].literal, &Some(Literal::Number(expected)));
        prop_assert_eq!(tokens[0].lexeme.as_str(), input.as_str());
    }

    #[test]
    fn trailing_dot_is_not_part_of_a_number(digits in "[0-9]{1,12}") {
        let input = format!("{digits}.");
        let tokens = Lexer::new(&input).scan_all().tokens;
        prop_assert_eq!(
            kinds(&tokens),
            vec![TokenKind::NumericLiteral, TokenKind::Dot, TokenKind::Eof]
        );
        prop_assert_eq!(tokens[0].lexeme.as_str(), digits.as_str());
    }

    #[test]
    fn keywords_are_never_identifiers(keyword in keyword_strategy()) {
        let tokens = Lexer::new(&keyword).scan_all().tokens;
        prop_assert_eq!(tokens.len(), 2);
        prop_assert_ne!(tokens[0].kind, TokenKind::Ident);
        prop_assert_eq!(Some(&tokens[0].kind), KEYWORD_HASHMAP.get(keyword.as_str()));
    }

    #[test]
    fn identifiers_are_not_keywords(ident in identifier_strategy()) {
        let tokens = Lexer::new(&ident).scan_all().tokens;
        prop_assert_eq!(kinds(&tokens), vec![TokenKind::Ident, TokenKind::Eof]);
    }
}
