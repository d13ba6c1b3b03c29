//! Statement parser for the query script subset.
//!
//! A script is either a bare sequence of statements or a whole
//! `def name():` block, in which case the definition body is what gets
//! compiled (these scripts are usually written as host-language
//! functions). Each statement fits on one physical line; `#` starts a
//! comment.

use chumsky::prelude::*;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::ast::{BinaryOperator, Expr, Keyword, Program, Statement};
use crate::error::ParseError;
use crate::syntax::common::{format_errors, ident, number, string_literal, Extra};

/// Matches a `def name(...):` header line
static DEF_HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[ \t]*def\s+[A-Za-z_]\w*\s*\([^)]*\)\s*:\s*(#.*)?$").unwrap());

/// Parse script source into a [`Program`].
///
/// Statements are parsed line by line in written order; blank lines and
/// comment lines are skipped. Errors carry the 1-based source line.
pub fn parse_program(source: &str) -> Result<Program, ParseError> {
    let mut statements = Vec::new();
    for (line_no, line) in body_lines(source) {
        let stripped = strip_comment(line);
        if stripped.trim().is_empty() {
            continue;
        }
        let parsed = statement()
            .parse(stripped)
            .into_result()
            .map_err(|errs| ParseError::Script {
                errors: format_errors(&errs, line_no),
            })?;
        statements.push(parsed);
    }
    debug!(statements = statements.len(), "parsed script");
    Ok(Program { statements })
}

/// Select the lines that make up the program body.
///
/// When the first meaningful line is a `def` header, the body is every
/// following line that is blank or indented, up to the first line back at
/// column zero; anything after that is outside the definition and is not
/// compiled. Otherwise the whole source is the body. Line numbers are
/// 1-based positions in the input source.
fn body_lines(source: &str) -> Vec<(usize, &str)> {
    let lines: Vec<&str> = source.lines().collect();
    let first = lines
        .iter()
        .position(|line| !strip_comment(line).trim().is_empty());
    let Some(header_idx) = first else {
        return Vec::new();
    };

    if !DEF_HEADER_RE.is_match(lines[header_idx]) {
        return lines.iter().enumerate().map(|(i, l)| (i + 1, *l)).collect();
    }

    let mut body = Vec::new();
    for (i, line) in lines.iter().enumerate().skip(header_idx + 1) {
        let blank = strip_comment(line).trim().is_empty();
        let indented = line.starts_with(' ') || line.starts_with('\t');
        if !blank && !indented {
            break;
        }
        body.push((i + 1, *line));
    }
    body
}

/// Strip a trailing `#` comment, leaving string literals intact.
fn strip_comment(line: &str) -> &str {
    let mut quote: Option<char> = None;
    for (idx, c) in line.char_indices() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => {}
            None if c == '\'' || c == '"' => quote = Some(c),
            None if c == '#' => return &line[..idx],
            None => {}
        }
    }
    line
}

// ============================================================================
// Statement grammar
// ============================================================================

fn statement<'src>() -> impl Parser<'src, &'src str, Statement, Extra<'src>> {
    let assign = ident()
        .padded()
        .then_ignore(just('='))
        .then(expression())
        .map(|(target, value)| Statement::Assign { target, value })
        .labelled("assignment like cafes = Node(...)");

    let expr_stmt = expression().map(Statement::Expr);

    choice((assign, expr_stmt)).padded().then_ignore(end())
}

// ============================================================================
// Expression grammar
// ============================================================================

/// A single call argument, before splitting into positional and keyword
/// lists.
enum Arg {
    Positional(Expr),
    Keyword(Keyword),
}

/// A postfix applied to a primary: `.name` or `(args)`.
enum Postfix {
    Attr(String),
    Call {
        args: Vec<Expr>,
        keywords: Vec<Keyword>,
    },
}

fn expression<'src>() -> impl Parser<'src, &'src str, Expr, Extra<'src>> {
    recursive(|expr| {
        let literal = choice((number(), string_literal().map(Expr::Str)));

        let name = ident().map(Expr::Identifier);

        let group = expr
            .clone()
            .delimited_by(just('(').padded(), just(')').padded());

        let primary = choice((literal, name, group)).padded();

        // Keyword arguments look like `name=value`; anything else is
        // positional. Written order is preserved within each list.
        let kwarg = ident()
            .padded()
            .then_ignore(just('='))
            .then(expr.clone())
            .map(|(name, value)| Arg::Keyword(Keyword { name, value }))
            .labelled("keyword argument like amenity=\"cafe\"");

        let arg = choice((kwarg, expr.clone().map(Arg::Positional)));

        let call = arg
            .separated_by(just(',').padded())
            .allow_trailing()
            .collect::<Vec<_>>()
            .delimited_by(just('(').padded(), just(')').padded())
            .map(|parsed| {
                let mut args = Vec::new();
                let mut keywords = Vec::new();
                for arg in parsed {
                    match arg {
                        Arg::Positional(value) => args.push(value),
                        Arg::Keyword(keyword) => keywords.push(keyword),
                    }
                }
                Postfix::Call { args, keywords }
            });

        let attr = just('.')
            .padded()
            .ignore_then(ident())
            .map(Postfix::Attr)
            .labelled("attribute like .intersect");

        let term = primary
            .then(choice((attr, call)).repeated().collect::<Vec<_>>())
            .map(|(base, postfixes)| {
                postfixes.into_iter().fold(base, |acc, postfix| match postfix {
                    Postfix::Attr(name) => Expr::Attribute {
                        base: Box::new(acc),
                        name,
                    },
                    Postfix::Call { args, keywords } => Expr::Call {
                        callee: Box::new(acc),
                        args,
                        keywords,
                    },
                })
            });

        let op = choice((
            just('+').to(BinaryOperator::Add),
            just('-').to(BinaryOperator::Sub),
        ))
        .padded();

        term.clone()
            .then(op.then(term).repeated().collect::<Vec<_>>())
            .map(|(first, rest)| {
                rest.into_iter().fold(first, |left, (op, right)| Expr::BinaryOp {
                    op,
                    left: Box::new(left),
                    right: Box::new(right),
                })
            })
    })
}
