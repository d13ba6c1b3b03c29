//! Script-to-Overpass-QL query compiler.
//!
//! Queries are written as a restricted Python-like script: assignments
//! bind intermediate sets, `Node`/`Way`/`Area` locate elements, `+` and
//! `-` combine sets, and `out(...)` selects what to return. Compiling
//! produces the equivalent Overpass QL program as text; nothing here
//! talks to a backend.
//!
//! ```
//! let query = meridian_query::compile(r#"out(Node(4807817929), body=True)"#).unwrap();
//! assert_eq!(query, "node(4807817929) out body;");
//! ```
//!
//! Or with intermediate sets, the way longer scripts read:
//!
//! ```
//! let source = r#"
//! def cafes():
//!     search = Area(3600134503)
//!     cafes = Node(search, amenity="cafe")
//!     out(cafes, geom=True)
//! "#;
//! let query = meridian_query::compile(source).unwrap();
//! assert_eq!(
//!     query,
//!     "(area(3600134503);) -> .search;\n(node[amenity=\"cafe\"](area.search);) -> .cafes;\n.cafes out geom;"
//! );
//! ```

pub mod ast;
pub mod error;
pub mod render;
pub mod syntax;

// Re-export main types for convenience
pub use ast::{BinaryOperator, Expr, Keyword, Program, Statement};
pub use error::{CompileError, ParseError, RenderError};
pub use render::{OverpassRenderer, QueryRenderer};
pub use syntax::parse_program;

/// Compile script source to an Overpass QL program.
///
/// Parses the source into a [`Program`] and renders it with
/// [`OverpassRenderer`]. All-or-nothing: any unparseable statement or
/// untranslatable node fails the whole compilation.
pub fn compile(source: &str) -> Result<String, CompileError> {
    let program = parse_program(source)?;
    let query = OverpassRenderer.render(&program)?;
    Ok(query)
}
