//! Tokenizer for label expressions.

use super::LabelExpressionParseError;
use std::fmt;

/// Upper bound on accepted expression length, in bytes.
pub const MAX_EXPRESSION_LENGTH: usize = 1000;

/// Closed set of tokens accepted by the label grammar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Token {
    And,
    Or,
    Not,
    Equals,
    NotEquals,
    OpenParen,
    CloseParen,
    Identifier(String),
}

impl fmt::Display for Token {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::And => formatter.write_str("&"),
            Self::Or => formatter.write_str("|"),
            Self::Not => formatter.write_str("!"),
            Self::Equals => formatter.write_str("="),
            Self::NotEquals => formatter.write_str("!="),
            Self::OpenParen => formatter.write_str("("),
            Self::CloseParen => formatter.write_str(")"),
            Self::Identifier(value) => formatter.write_str(value),
        }
    }
}

/// A token together with the byte offset where it starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct SpannedToken {
    pub(super) token: Token,
    pub(super) position: usize,
}

/// Splits an expression into tokens.
///
/// Rejects input longer than [`MAX_EXPRESSION_LENGTH`] and any character
/// outside the closed label alphabet.
pub(super) fn tokenize(input: &str) -> Result<Vec<SpannedToken>, LabelExpressionParseError> {
    if input.len() > MAX_EXPRESSION_LENGTH {
        return Err(LabelExpressionParseError::new(
            0,
            format!("expression exceeds {MAX_EXPRESSION_LENGTH} characters"),
        ));
    }

    let mut tokens = Vec::new();
    let mut characters = input.char_indices().peekable();

    while let Some((position, character)) = characters.next() {
        let token = match character {
            _ if character.is_whitespace() => continue,
            '&' => Token::And,
            '|' => Token::Or,
            '=' => Token::Equals,
            '(' => Token::OpenParen,
            ')' => Token::CloseParen,
            '!' => {
                if characters.next_if(|&(_, next)| next == '=').is_some() {
                    Token::NotEquals
                } else {
                    Token::Not
                }
            }
            _ if starts_identifier(character) => {
                let mut identifier = String::from(character);
                while let Some((_, next)) = characters.next_if(|&(_, next)| continues_identifier(next))
                {
                    identifier.push(next);
                }
                Token::Identifier(identifier)
            }
            _ => {
                return Err(LabelExpressionParseError::new(
                    position,
                    format!("unexpected character '{character}'"),
                ));
            }
        };
        tokens.push(SpannedToken { token, position });
    }

    Ok(tokens)
}

fn starts_identifier(character: char) -> bool {
    character.is_ascii_alphanumeric() || matches!(character, '_' | '-' | '.')
}

fn continues_identifier(character: char) -> bool {
    starts_identifier(character) || character == '/'
}
