use std::ops::Range;

use logos::Logos;
use tracing::debug;

use crate::{
    ast::Property,
    error::{ParseError, Position},
};

/// Why a slice of a line could not become a token.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LexErrorKind {
    /// No token starts with this character.
    #[default]
    UnexpectedCharacter,
    /// A string literal reached the end of its line.
    UnclosedString,
    /// `.` followed by a name that is not a property.
    UnknownProperty(String),
    /// An integer literal that does not fit in 64 bits.
    IntegerTooLarge,
}

/// A lexical token of the language.
///
/// Tokens never span lines: the lexer runs over one source line at a time.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(error = LexErrorKind)]
pub enum Token {
    /// Floating-point literals, such as `3.14`. Both sides of the `.` need
    /// digits.
    #[regex(r"[0-9]+\.[0-9]+", parse_float)]
    Float(f64),
    /// Integer literals, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// `True` and `False`.
    #[token("True", |_| true)]
    #[token("False", |_| false)]
    Boolean(bool),
    /// String literals delimited by `"` or `'`. There are no escapes.
    #[token("\"", |lex| parse_string(lex, '"'))]
    #[token("'", |lex| parse_string(lex, '\''))]
    Str(String),
    /// Names of variables and subroutines: a letter, then letters and digits.
    #[regex(r"[a-zA-Z][a-zA-Z0-9]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `.name` property access.
    #[regex(r"\.[a-zA-Z0-9]*", parse_property)]
    Property(Property),

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("^")]
    Caret,
    #[token("MOD")]
    Mod,
    #[token("DIV")]
    Div,
    #[token("AND")]
    And,
    #[token("OR")]
    Or,
    #[token("NOT")]
    Not,
    #[token("=")]
    Equals,
    #[token("==")]
    EqualEqual,
    #[token("!=")]
    BangEqual,
    #[token("<")]
    Less,
    #[token("<=")]
    LessEqual,
    #[token(">")]
    Greater,
    #[token(">=")]
    GreaterEqual,

    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token(",")]
    Comma,
    #[token(":")]
    Colon,

    #[token("if")]
    If,
    #[token("then")]
    Then,
    #[token("elseif")]
    ElseIf,
    #[token("else")]
    Else,
    #[token("endif")]
    EndIf,
    #[token("switch")]
    Switch,
    #[token("case")]
    Case,
    #[token("default")]
    Default,
    #[token("endswitch")]
    EndSwitch,
    #[token("while")]
    While,
    #[token("endwhile")]
    EndWhile,
    #[token("do")]
    Do,
    #[token("until")]
    Until,
    #[token("for")]
    For,
    #[token("to")]
    To,
    #[token("step")]
    Step,
    #[token("next")]
    Next,
    #[token("procedure")]
    Procedure,
    #[token("endprocedure")]
    EndProcedure,
    #[token("function")]
    Function,
    #[token("endfunction")]
    EndFunction,
    #[token("return")]
    Return,
    #[token("const")]
    Const,
    #[token("global")]
    Global,
    #[token("array")]
    Array,

    /// `// comment` up to the end of the line.
    #[token("//", skip_comment)]
    Comment,
    /// Spaces and tabs.
    #[regex(r"[ \t]+", logos::skip)]
    Ignored,
}

/// A token with the position of its first character.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token:    Token,
    pub position: Position,
}

/// Splits a program into lines of tokens.
///
/// Lines that hold no tokens (blank or comment-only) produce no entry, so the
/// outer index is not the source line number; each token carries its own.
///
/// # Example
/// ```
/// use ocr_erl::interpreter::lexer::{Token, tokenize};
///
/// let lines = tokenize("x = 1\n\n// note\nprint(x)").unwrap();
/// assert_eq!(lines.len(), 2);
/// assert_eq!(lines[1][0].token, Token::Identifier("print".to_string()));
/// assert_eq!(lines[1][0].position.line, 3);
/// ```
pub fn tokenize(source: &str) -> Result<Vec<Vec<Spanned>>, ParseError> {
    let mut lines = Vec::new();
    for (index, text) in source.lines().enumerate() {
        let tokens = tokenize_line(text, index)?;
        if !tokens.is_empty() {
            lines.push(tokens);
        }
    }
    debug!(source_lines = source.lines().count(),
           token_lines = lines.len(),
           "tokenized program");
    Ok(lines)
}

/// Tokenizes a single source line.
pub fn tokenize_line(text: &str, line: usize) -> Result<Vec<Spanned>, ParseError> {
    let mut tokens = Vec::new();
    let mut previous_number_end = None;
    let mut lexer = Token::lexer(text);

    while let Some(result) = lexer.next() {
        let span = lexer.span();
        match result {
            Ok(token) => {
                previous_number_end =
                    matches!(token, Token::Integer(_) | Token::Float(_)).then_some(span.end);
                tokens.push(Spanned { token,
                                      position: Position::new(line, column_of(text, span.start)) });
            },
            Err(kind) => return Err(lexical_error(kind, text, line, span, previous_number_end)),
        }
    }

    Ok(tokens)
}

/// Builds the diagnostic for a failed token, using the preceding number to
/// recognise malformed floats such as `1.2.3` and `5.`.
fn lexical_error(kind: LexErrorKind,
                 text: &str,
                 line: usize,
                 span: Range<usize>,
                 previous_number_end: Option<usize>)
                 -> ParseError {
    let position = Position::new(line, column_of(text, span.start));
    let follows_number = previous_number_end == Some(span.start);

    let description = match kind {
        LexErrorKind::UnknownProperty(name)
            if follows_number && name.starts_with(|c: char| c.is_ascii_digit()) =>
        {
            "Only expected one '.' to create Float".to_string()
        },
        LexErrorKind::UnknownProperty(name)
            if follows_number && name.is_empty() && text[span.end..].trim().is_empty() =>
        {
            "Expected rest of Float to follow '.'".to_string()
        },
        LexErrorKind::UnknownProperty(name) => format!("No property called '.{name}' exists"),
        LexErrorKind::UnclosedString => "Unclosed string".to_string(),
        LexErrorKind::IntegerTooLarge => "Integer literal is too large".to_string(),
        LexErrorKind::UnexpectedCharacter => {
            let character = text[span].chars().next().unwrap_or(' ');
            format!("Unexpected character '{character}'")
        },
    };

    ParseError::lexical(description, position)
}

fn column_of(text: &str, byte: usize) -> usize {
    text[..byte].chars().count()
}

fn parse_float(lex: &logos::Lexer<Token>) -> Result<f64, LexErrorKind> {
    lex.slice().parse().map_err(|_| LexErrorKind::UnexpectedCharacter)
}

fn parse_integer(lex: &logos::Lexer<Token>) -> Result<i64, LexErrorKind> {
    lex.slice().parse().map_err(|_| LexErrorKind::IntegerTooLarge)
}

/// Consumes the rest of a string literal after its opening quote.
fn parse_string(lex: &mut logos::Lexer<Token>, quote: char) -> Result<String, LexErrorKind> {
    let rest = lex.remainder();
    if let Some(end) = rest.find(quote) {
        let text = rest[..end].to_string();
        lex.bump(end + quote.len_utf8());
        Ok(text)
    } else {
        lex.bump(rest.len());
        Err(LexErrorKind::UnclosedString)
    }
}

fn parse_property(lex: &logos::Lexer<Token>) -> Result<Property, LexErrorKind> {
    let name = &lex.slice()[1..];
    Property::from_name(name).ok_or_else(|| LexErrorKind::UnknownProperty(name.to_string()))
}

fn skip_comment(lex: &mut logos::Lexer<Token>) -> logos::Skip {
    lex.bump(lex.remainder().len());
    logos::Skip
}
