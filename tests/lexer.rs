use ocr_erl::{
    ast::Property,
    error::{ParseError, Position},
    interpreter::lexer::{Token, tokenize, tokenize_line},
};

fn tokens(text: &str) -> Vec<Token> {
    tokenize_line(text, 0).unwrap_or_else(|e| panic!("Failed to tokenize {text:?}: {e}"))
                          .into_iter()
                          .map(|spanned| spanned.token)
                          .collect()
}

fn lexical_error(text: &str) -> ParseError {
    match tokenize_line(text, 0) {
        Ok(tokens) => panic!("Expected a lexical error for {text:?}, got {tokens:?}"),
        Err(error) => error,
    }
}

fn identifier(name: &str) -> Token {
    Token::Identifier(name.to_string())
}

#[test]
fn assignment_tokens_carry_columns() {
    let line = tokenize_line("total = 3.5 + count", 4).unwrap();
    let found: Vec<(Token, usize)> =
        line.into_iter()
            .map(|spanned| {
                assert_eq!(spanned.position.line, 4);
                (spanned.token, spanned.position.column)
            })
            .collect();

    assert_eq!(found,
               [(identifier("total"), 0),
                (Token::Equals, 6),
                (Token::Float(3.5), 8),
                (Token::Plus, 12),
                (identifier("count"), 14)]);
}

#[test]
fn keywords_win_over_identifiers_of_the_same_length() {
    assert_eq!(tokens("if then ifx endif"),
               [Token::If, Token::Then, identifier("ifx"), Token::EndIf]);
    assert_eq!(tokens("True False Truth"),
               [Token::Boolean(true), Token::Boolean(false), identifier("Truth")]);
    assert_eq!(tokens("a MOD b DIV c"),
               [identifier("a"), Token::Mod, identifier("b"), Token::Div, identifier("c")]);
    assert_eq!(tokens("NOT x AND y OR z"),
               [Token::Not,
                identifier("x"),
                Token::And,
                identifier("y"),
                Token::Or,
                identifier("z")]);
}

#[test]
fn comparison_operators_take_the_longest_match() {
    assert_eq!(tokens("a == b != c <= d >= e < f > g = h"),
               [identifier("a"),
                Token::EqualEqual,
                identifier("b"),
                Token::BangEqual,
                identifier("c"),
                Token::LessEqual,
                identifier("d"),
                Token::GreaterEqual,
                identifier("e"),
                Token::Less,
                identifier("f"),
                Token::Greater,
                identifier("g"),
                Token::Equals,
                identifier("h")]);
}

#[test]
fn strings_use_either_quote_without_escapes() {
    assert_eq!(tokens(r#"print("it's", 'say "hi"', "a\nb")"#),
               [identifier("print"),
                Token::LParen,
                Token::Str("it's".to_string()),
                Token::Comma,
                Token::Str("say \"hi\"".to_string()),
                Token::Comma,
                Token::Str("a\\nb".to_string()),
                Token::RParen]);
}

#[test]
fn properties_follow_values() {
    assert_eq!(tokens("name.length"),
               [identifier("name"), Token::Property(Property::Length)]);
    assert_eq!(tokens("f.readLine()"),
               [identifier("f"),
                Token::Property(Property::ReadLine),
                Token::LParen,
                Token::RParen]);
}

#[test]
fn comments_run_to_the_end_of_the_line() {
    assert_eq!(tokens("x = 1 // set x = 2"), [identifier("x"), Token::Equals, Token::Integer(1)]);
    assert!(tokens("   // only a comment").is_empty());
}

#[test]
fn tokenize_skips_empty_lines_but_keeps_line_numbers() {
    let lines = tokenize("x = 1\n\n   \n// note\nprint(x)\n").unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0][0].position, Position::new(0, 0));
    assert_eq!(lines[1][0].position, Position::new(4, 0));
    assert_eq!(lines[1][2].position, Position::new(4, 6));
}

#[test]
fn columns_count_characters() {
    let line = tokenize_line("s = \"héllo\" + t", 0).unwrap();
    assert_eq!(line[3].token, Token::Plus);
    assert_eq!(line[3].position.column, 12);
}

#[test]
fn lexical_errors() {
    let cases = [("x = \"open", "Unclosed string"),
                 ("x = 1.2.3", "Only expected one '.' to create Float"),
                 ("x = 5.", "Expected rest of Float to follow '.'"),
                 ("x = name.size", "No property called '.size' exists"),
                 ("x = 99999999999999999999", "Integer literal is too large"),
                 ("x = 1 # 2", "Unexpected character '#'")];

    for (text, description) in cases {
        let error = lexical_error(text);
        assert_eq!(error.to_string(), format!("Lexical Error: {description}"), "{text}");
    }
}

#[test]
fn lexical_errors_point_at_the_offending_characters() {
    assert_eq!(lexical_error("x = \"open").position(), Position::new(0, 4));
    assert_eq!(lexical_error("y = 1 # 2").position(), Position::new(0, 6));

    match tokenize("x = 1\ny = 2 $") {
        Err(error) => assert_eq!(error.position(), Position::new(1, 6)),
        Ok(lines) => panic!("Expected a lexical error, got {lines:?}"),
    }
}
