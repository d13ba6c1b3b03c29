//! Overpass QL renderer.
//!
//! Translates the statement tree bottom-up into Overpass QL text:
//! - assignments become `(...;) -> .name;` bindings to named sets
//! - `+` unions the two operand statements into one parenthesized block
//! - `-` takes the difference of the two operand statements
//! - calls resolve to locator, filter/intersect, grouping, or output forms
//!
//! String literals pass through between quotes with no escaping; a quote
//! inside a literal will produce a malformed query.

use tracing::debug;

use crate::ast::{BinaryOperator, Expr, Keyword, Program, Statement};
use crate::error::RenderError;
use crate::render::QueryRenderer;

/// The element-type locator keywords, matched case-sensitively. The
/// suffix forms (`.intersect`, `.filter`) are derived from variable text
/// instead and fold case; that asymmetry is part of the language.
const LOCATORS: [&str; 3] = ["Node", "Way", "Area"];

/// Renderer emitting Overpass QL.
///
/// Rendering is a pure fold over the tree; nothing survives a call, so
/// one renderer can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverpassRenderer;

impl QueryRenderer for OverpassRenderer {
    fn name(&self) -> &str {
        "overpass"
    }

    /// One line per top-level statement, joined in written order. The
    /// first untranslatable node aborts the whole render.
    fn render(&self, program: &Program) -> Result<String, RenderError> {
        debug!(statements = program.statements.len(), "rendering program");
        let lines = program
            .statements
            .iter()
            .map(|statement| self.render_statement(statement))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(lines.join("\n"))
    }
}

impl OverpassRenderer {
    fn render_statement(&self, statement: &Statement) -> Result<String, RenderError> {
        match statement {
            Statement::Assign { target, value } => {
                Ok(format!("({};) -> .{};", self.render_expr(value)?, target))
            }
            Statement::Expr(value) => self.render_expr(value),
        }
    }

    fn render_expr(&self, expr: &Expr) -> Result<String, RenderError> {
        match expr {
            Expr::Identifier(name) => Ok(format!(".{name}")),
            Expr::Str(value) => Ok(format!("\"{value}\"")),
            Expr::Int(value) => Ok(value.to_string()),
            Expr::Float(value) => Ok(value.to_string()),
            Expr::BinaryOp { op, left, right } => {
                let left = self.render_expr(left)?;
                let right = self.render_expr(right)?;
                Ok(match op {
                    BinaryOperator::Add => format!("({left}; {right})"),
                    BinaryOperator::Sub => format!("({left} - {right};)"),
                })
            }
            Expr::Attribute { base, name } => {
                Ok(format!("{}.{}", self.render_expr(base)?, name))
            }
            Expr::Call {
                callee,
                args,
                keywords,
            } => self.render_call(callee, args, keywords),
        }
    }

    // =========================================================================
    // Call forms
    // =========================================================================

    fn render_call(
        &self,
        callee: &Expr,
        args: &[Expr],
        keywords: &[Keyword],
    ) -> Result<String, RenderError> {
        let name = resolve_call_target(callee)?;

        // Suffix forms first: they chain clauses onto an element type
        // named by the leading segment of the target.
        if name.ends_with(".intersect") {
            let element_type = leading_segment(&name).replace("set", "").to_lowercase();
            let mut rendered = element_type;
            for arg in args {
                rendered.push_str(&self.render_expr(arg)?);
            }
            return Ok(rendered);
        }
        if name.ends_with(".filter") {
            if args.len() != 1 {
                return Err(RenderError::FilterArity {
                    target: name,
                    count: args.len(),
                });
            }
            let element_type = leading_segment(&name).to_lowercase();
            return Ok(format!("{element_type}{}", self.render_expr(&args[0])?));
        }

        match name.as_str() {
            "out" => return self.render_out(args, keywords),
            "Set" => return self.render_set(args),
            keyword if LOCATORS.contains(&keyword) => {
                return self.render_locator(keyword, args, keywords)
            }
            _ => {}
        }
        Err(RenderError::UnknownCallTarget { name })
    }

    /// `out(...)` - emit selected elements on the named output channels.
    ///
    /// Channel names come from the keyword-argument names (values are
    /// never rendered) and deduplicate in first-written order. `count` is
    /// special: it always goes first, as its own statement.
    fn render_out(&self, args: &[Expr], keywords: &[Keyword]) -> Result<String, RenderError> {
        let element = match args.first() {
            Some(arg) => self.render_expr(arg)?,
            None => "._".to_string(),
        };

        let mut channels: Vec<&str> = Vec::new();
        for keyword in keywords {
            if !channels.contains(&keyword.name.as_str()) {
                channels.push(&keyword.name);
            }
        }

        let mut rendered = String::new();
        if let Some(idx) = channels.iter().position(|channel| *channel == "count") {
            channels.remove(idx);
            rendered.push_str(&element);
            rendered.push_str(" out count;\n");
        }
        rendered.push_str(&element);
        rendered.push_str(" out ");
        rendered.push_str(&channels.join(" "));
        rendered.push(';');
        Ok(rendered)
    }

    /// `Set(...)` - an anonymous grouped block combining the arguments
    /// into one set expression. No trailing terminator here; statement
    /// position supplies it.
    fn render_set(&self, args: &[Expr]) -> Result<String, RenderError> {
        let parts = args
            .iter()
            .map(|arg| self.render_expr(arg))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(format!("({})", parts.join("; ")))
    }

    /// `Node(...)` / `Way(...)` / `Area(...)` - select elements of one
    /// type, optionally filtered by `[key=value]` clauses in keyword
    /// order, optionally narrowed to a numeric id or an area reference.
    fn render_locator(
        &self,
        keyword: &str,
        args: &[Expr],
        keywords: &[Keyword],
    ) -> Result<String, RenderError> {
        let element_type = keyword.to_lowercase();

        let mut filters = String::new();
        for Keyword { name, value } in keywords {
            filters.push('[');
            filters.push_str(name);
            filters.push('=');
            filters.push_str(&self.render_expr(value)?);
            filters.push(']');
        }

        match args {
            [] => Ok(format!("{element_type}{filters}")),
            [arg] => {
                let text = self.render_expr(arg)?;
                // An argument that renders as an integer selects by
                // element id; anything else is an area reference.
                if text.parse::<i64>().is_ok() {
                    Ok(format!("{element_type}{filters}({text})"))
                } else {
                    Ok(format!("{element_type}{filters}(area{text})"))
                }
            }
            _ => Err(RenderError::TooManyPositionalArguments {
                target: keyword.to_string(),
                count: args.len(),
            }),
        }
    }
}

// ============================================================================
// Call-target resolution
// ============================================================================

/// Resolve a callee to its dotted-name text.
///
/// Only identifiers and attribute chains name a call target; any other
/// node kind in callee position has no translation.
fn resolve_call_target(callee: &Expr) -> Result<String, RenderError> {
    match callee {
        Expr::Identifier(name) => Ok(name.clone()),
        Expr::Attribute { base, name } => Ok(format!("{}.{}", resolve_call_target(base)?, name)),
        other => Err(RenderError::UnsupportedNode {
            kind: node_kind(other),
        }),
    }
}

/// First dotted-name segment of a call target.
fn leading_segment(name: &str) -> &str {
    name.split('.').next().unwrap_or(name)
}

/// Human-readable node kind for diagnostics.
fn node_kind(expr: &Expr) -> &'static str {
    match expr {
        Expr::Identifier(_) => "identifier",
        Expr::Str(_) => "string literal",
        Expr::Int(_) | Expr::Float(_) => "number literal",
        Expr::BinaryOp { .. } => "binary operation",
        Expr::Attribute { .. } => "attribute access",
        Expr::Call { .. } => "call",
    }
}
