//! Shared parser primitives for the script grammar.

use chumsky::extra;
use chumsky::prelude::*;
use chumsky::span::SimpleSpan;

use crate::ast::Expr;

/// Extra type for parsers - uses Rich errors for better messages
pub type Extra<'src> = extra::Err<Rich<'src, char>>;

/// Parser for identifiers: a letter or underscore, then letters, digits,
/// or underscores. Leading digits are rejected so numbers stay numbers.
pub fn ident<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_alphabetic() || *c == '_')
        .then(
            any()
                .filter(|c: &char| c.is_ascii_alphanumeric() || *c == '_')
                .repeated(),
        )
        .to_slice()
        .map(|s: &str| s.to_string())
        .labelled("identifier")
}

/// Parser for single-quoted string literals: 'value'
pub fn single_quoted_string<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    just('\'')
        .ignore_then(
            none_of("'")
                .repeated()
                .to_slice()
                .map(|s: &str| s.to_string()),
        )
        .then_ignore(just('\''))
        .labelled("single-quoted string")
}

/// Parser for double-quoted string literals: "value"
pub fn double_quoted_string<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    just('"')
        .ignore_then(
            none_of("\"")
                .repeated()
                .to_slice()
                .map(|s: &str| s.to_string()),
        )
        .then_ignore(just('"'))
        .labelled("double-quoted string")
}

/// Parser for string literals (single or double quoted).
///
/// The content is taken verbatim between the quotes; escape sequences are
/// not interpreted, matching how the renderer emits them.
pub fn string_literal<'src>() -> impl Parser<'src, &'src str, String, Extra<'src>> + Clone {
    single_quoted_string()
        .or(double_quoted_string())
        .labelled("string literal")
}

/// Parser for numeric literals.
///
/// Integers stay integers; a decimal point makes a float. The subset has
/// no unary minus, so signs are not accepted here.
pub fn number<'src>() -> impl Parser<'src, &'src str, Expr, Extra<'src>> + Clone {
    any()
        .filter(|c: &char| c.is_ascii_digit())
        .repeated()
        .at_least(1)
        .then(
            just('.')
                .then(any().filter(|c: &char| c.is_ascii_digit()).repeated())
                .or_not(),
        )
        .to_slice()
        .try_map(|s: &str, span: SimpleSpan| {
            if s.contains('.') {
                s.parse::<f64>()
                    .map(Expr::Float)
                    .map_err(|_| Rich::custom(span, "invalid float literal"))
            } else {
                s.parse::<i64>()
                    .map(Expr::Int)
                    .map_err(|_| Rich::custom(span, "integer literal overflow"))
            }
        })
        .labelled("number")
}

/// Format chumsky errors for a single script line.
pub fn format_errors(errs: &[Rich<'_, char>], line_no: usize) -> String {
    errs.iter()
        .map(|e| {
            let col = e.span().start + 1;
            let found = e
                .found()
                .map_or("end of line".to_string(), |c| format!("'{}'", c));
            format!("line {}, column {}: {} (found {})", line_no, col, e.reason(), found)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Identifier tests
    // =========================================================================

    #[test]
    fn test_ident_simple() {
        let result = ident().parse("cafes").into_result();
        assert_eq!(result.unwrap(), "cafes");
    }

    #[test]
    fn test_ident_with_underscore_and_digits() {
        let result = ident().parse("way_set_2").into_result();
        assert_eq!(result.unwrap(), "way_set_2");
    }

    #[test]
    fn test_ident_rejects_leading_digit() {
        assert!(ident().parse("2fast").into_result().is_err());
    }

    // =========================================================================
    // String literal tests
    // =========================================================================

    #[test]
    fn test_string_single_quoted() {
        let result = string_literal().parse("'cafe'").into_result();
        assert_eq!(result.unwrap(), "cafe");
    }

    #[test]
    fn test_string_double_quoted() {
        let result = string_literal().parse("\"cafe\"").into_result();
        assert_eq!(result.unwrap(), "cafe");
    }

    #[test]
    fn test_string_keeps_backslashes_verbatim() {
        let result = string_literal().parse(r#""a\nb""#).into_result();
        assert_eq!(result.unwrap(), "a\\nb");
    }

    #[test]
    fn test_string_unterminated() {
        assert!(string_literal().parse("'cafe").into_result().is_err());
    }

    // =========================================================================
    // Number tests
    // =========================================================================

    #[test]
    fn test_number_integer() {
        let result = number().parse("4807817929").into_result();
        assert_eq!(result.unwrap(), Expr::Int(4807817929));
    }

    #[test]
    fn test_number_float() {
        let result = number().parse("51.5").into_result();
        assert_eq!(result.unwrap(), Expr::Float(51.5));
    }

    #[test]
    fn test_number_integer_overflow() {
        let result = number().parse("9223372036854775808").into_result();
        assert!(result.is_err());
    }

    #[test]
    fn test_number_rejects_sign() {
        assert!(number().parse("-5").into_result().is_err());
    }
}
