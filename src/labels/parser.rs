//! Recursive-descent parser for label expressions.
//!
//! ```text
//! expr       := or_expr
//! or_expr    := and_expr ( '|' and_expr )*
//! and_expr   := unary ( '&' unary )*
//! unary      := '!' unary | atom
//! atom       := '(' expr ')' | comparison
//! comparison := IDENT ( '=' | '!=' ) IDENT
//! ```

use super::{
    LabelExpression, LabelExpressionParseError,
    lexer::{SpannedToken, Token, tokenize},
};

/// Parses a non-blank expression, requiring every token to be consumed.
pub(super) fn parse(input: &str) -> Result<LabelExpression, LabelExpressionParseError> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        tokens,
        cursor: 0,
        end: input.len(),
    };

    let expression = parser.or_expression()?;
    if let Some(trailing) = parser.peek() {
        return Err(LabelExpressionParseError::new(
            trailing.position,
            format!("unexpected token '{}' after expression", trailing.token),
        ));
    }
    Ok(expression)
}

struct Parser {
    tokens: Vec<SpannedToken>,
    cursor: usize,
    end: usize,
}

impl Parser {
    fn or_expression(&mut self) -> Result<LabelExpression, LabelExpressionParseError> {
        let mut left = self.and_expression()?;
        while self.eat(&Token::Or) {
            let right = self.and_expression()?;
            left = LabelExpression::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and_expression(&mut self) -> Result<LabelExpression, LabelExpressionParseError> {
        let mut left = self.unary()?;
        while self.eat(&Token::And) {
            let right = self.unary()?;
            left = LabelExpression::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn unary(&mut self) -> Result<LabelExpression, LabelExpressionParseError> {
        if self.eat(&Token::Not) {
            let operand = self.unary()?;
            return Ok(LabelExpression::Not(Box::new(operand)));
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<LabelExpression, LabelExpressionParseError> {
        let Some(open_position) = self.peek().map(|spanned| spanned.position) else {
            return Err(self.error_here("expected a comparison or '('"));
        };

        if self.eat(&Token::OpenParen) {
            let inner = self.or_expression()?;
            if !self.eat(&Token::CloseParen) {
                return Err(self.error_here(format!(
                    "expected ')' to close '(' opened at position {open_position}"
                )));
            }
            return Ok(inner);
        }

        self.comparison()
    }

    fn comparison(&mut self) -> Result<LabelExpression, LabelExpressionParseError> {
        let key = self.identifier("label key")?;

        let negated = if self.eat(&Token::Equals) {
            false
        } else if self.eat(&Token::NotEquals) {
            true
        } else {
            return Err(self.error_here(format!("expected '=' or '!=' after label key '{key}'")));
        };

        let value = self.identifier("label value")?;
        Ok(if negated {
            LabelExpression::NotEquals { key, value }
        } else {
            LabelExpression::Equals { key, value }
        })
    }

    fn identifier(&mut self, expected: &str) -> Result<String, LabelExpressionParseError> {
        match self.peek() {
            Some(SpannedToken {
                token: Token::Identifier(name),
                ..
            }) => {
                let owned = name.clone();
                self.cursor += 1;
                Ok(owned)
            }
            _ => Err(self.error_here(format!("expected {expected}"))),
        }
    }

    fn peek(&self) -> Option<&SpannedToken> {
        self.tokens.get(self.cursor)
    }

    fn eat(&mut self, expected: &Token) -> bool {
        let matched = self
            .peek()
            .is_some_and(|spanned| &spanned.token == expected);
        if matched {
            self.cursor += 1;
        }
        matched
    }

    /// Builds an error pointing at the current token, or at end of input.
    fn error_here(&self, reason: impl Into<String>) -> LabelExpressionParseError {
        let message = reason.into();
        match self.peek() {
            Some(spanned) => LabelExpressionParseError::new(
                spanned.position,
                format!("{message}, found '{}'", spanned.token),
            ),
            None => LabelExpressionParseError::new(self.end, format!("{message}, found end of input")),
        }
    }
}
