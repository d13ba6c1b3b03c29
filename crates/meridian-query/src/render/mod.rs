//! Target renderers for parsed query programs.
//!
//! Renderers convert the parsed [`Program`] into target-specific query
//! text. Overpass QL is the only target today.

mod overpass;

pub use overpass::OverpassRenderer;

use crate::ast::Program;
use crate::error::RenderError;

/// Trait for rendering a program to a target query language.
pub trait QueryRenderer: Send + Sync {
    /// Unique name for this renderer
    fn name(&self) -> &str;

    /// Render the program to query text
    fn render(&self, program: &Program) -> Result<String, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct MockRenderer;

    impl QueryRenderer for MockRenderer {
        fn name(&self) -> &str {
            "mock"
        }

        fn render(&self, _program: &Program) -> Result<String, RenderError> {
            Ok("out;".to_string())
        }
    }

    #[test]
    fn test_mock_renderer() {
        let renderer = MockRenderer;
        let program = Program::default();
        let result = renderer.render(&program).unwrap();

        assert_eq!(result, "out;");
    }
}
