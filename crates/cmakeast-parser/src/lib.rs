//! cmakeast Parser - Recursive descent parser
//!
//! Parses CMake-style scripts into a tree rooted at a `ToplevelBody`.
//! Every command invocation becomes a `FunctionCall`, except that:
//! - `if`/`while`/`foreach`/`function`/`macro` open blocks, whose opening
//!   and closing invocations become the block's `header` and `footer`
//! - `include(...)` becomes an `Include` node

mod error;
mod parser;

pub use error::*;
pub use parser::*;

use cmakeast_ast::Node;
use cmakeast_lexer::tokenize;

/// Parse a source string into a tree
pub fn parse(source: &str) -> Result<Node, ParseError> {
    let tokens = tokenize(source);
    let mut parser = Parser::new(source, tokens);
    parser.parse_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cmakeast_ast::{Field, Kind, NodeKind, WordType};
    use pretty_assertions::assert_eq;

    fn statements(node: &Node) -> &[Node] {
        node.children(Field::Statements)
    }

    #[test]
    fn test_parse_function_call() {
        let root = parse("set(ProjDirPath \"/repo\")\n").unwrap();
        let call = statements(&root)[0].as_function_call().unwrap();

        assert_eq!(call.name, "set");
        assert_eq!(call.arguments.len(), 2);
        let key = call.arguments[0].as_word().unwrap();
        let value = call.arguments[1].as_word().unwrap();
        assert_eq!(key.word_type, WordType::Unquoted);
        assert_eq!(key.contents, "ProjDirPath");
        assert_eq!(value.word_type, WordType::Quoted);
        assert_eq!(value.contents, "/repo");
    }

    #[test]
    fn test_parse_include() {
        let root = parse("include(\"${ProjDirPath}/flags.cmake\" OPTIONAL)").unwrap();
        let include = statements(&root)[0].as_include().unwrap();

        assert_eq!(include.filename, "${ProjDirPath}/flags.cmake");
        assert_eq!(include.options, vec!["OPTIONAL".to_string()]);
    }

    #[test]
    fn test_include_is_case_insensitive() {
        let root = parse("INCLUDE(a.cmake)").unwrap();
        assert_eq!(statements(&root)[0].known_kind(), Some(Kind::Include));
    }

    #[test]
    fn test_parse_if_block() {
        let source = r#"
if(WIN32)
  set(A 1)
elseif(APPLE)
  set(A 2)
elseif(UNIX)
else()
  set(A 3)
endif()
"#;
        let root = parse(source).unwrap();
        let block = &statements(&root)[0];

        assert_eq!(block.known_kind(), Some(Kind::IfBlock));
        let if_statement = block.child(Field::IfStatement).unwrap();
        assert_eq!(if_statement.children(Field::Body).len(), 1);
        assert_eq!(block.children(Field::ElseIfStatements).len(), 2);
        let else_statement = block.child(Field::ElseStatement).unwrap();
        assert_eq!(else_statement.known_kind(), Some(Kind::ElseStatement));
        let footer = block.child(Field::Footer).unwrap();
        assert_eq!(footer.as_function_call().unwrap().name, "endif");
    }

    #[test]
    fn test_parse_nested_blocks() {
        let source = r#"
function(configure target)
  foreach(src ${SOURCES})
    while(busy)
      message(STATUS "${src}")
    endwhile()
  endforeach()
endfunction()
macro(noop)
endmacro()
"#;
        let root = parse(source).unwrap();
        let function = &statements(&root)[0];
        assert_eq!(function.known_kind(), Some(Kind::FunctionDefinition));
        assert_eq!(statements(&root)[1].known_kind(), Some(Kind::MacroDefinition));

        let foreach = &function.children(Field::Body)[0];
        assert_eq!(foreach.known_kind(), Some(Kind::ForeachStatement));
        let loop_node = &foreach.children(Field::Body)[0];
        assert_eq!(loop_node.known_kind(), Some(Kind::WhileStatement));
        assert!(matches!(
            loop_node.children(Field::Body)[0].kind,
            NodeKind::FunctionCall(_)
        ));
    }

    #[test]
    fn test_nested_parentheses_are_arguments() {
        let root = parse("if((A OR B) AND C)\nendif()").unwrap();
        let block = &statements(&root)[0];
        let header = block
            .child(Field::IfStatement)
            .and_then(|clause| clause.child(Field::Header))
            .unwrap();
        let words: Vec<_> = header
            .children(Field::Arguments)
            .iter()
            .map(|n| n.as_word().unwrap().contents.as_str())
            .collect();
        assert_eq!(words, vec!["(", "A", "OR", "B", ")", "AND", "C"]);
    }

    #[test]
    fn test_positions() {
        let root = parse("\n  message(hi)").unwrap();
        let call = &statements(&root)[0];
        assert_eq!((call.line, call.col), (2, 3));
    }

    #[test]
    fn test_unclosed_block() {
        let err = parse("while(TRUE)\n  message(x)\n").unwrap_err();
        assert!(matches!(
            err,
            ParseError::UnclosedBlock { terminator: "endwhile", .. }
        ));
    }

    #[test]
    fn test_unmatched_terminator() {
        let err = parse("endif()").unwrap_err();
        assert!(matches!(err, ParseError::UnmatchedTerminator { .. }));

        let err = parse("foreach(x a b)\nendwhile()").unwrap_err();
        assert!(matches!(err, ParseError::UnmatchedTerminator { name, .. } if name == "endwhile"));
    }

    #[test]
    fn test_empty_include() {
        assert!(matches!(
            parse("include()").unwrap_err(),
            ParseError::EmptyInclude { .. }
        ));
    }

    #[test]
    fn test_missing_paren() {
        let err = parse("message hi").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_unexpected_eof_in_arguments() {
        let err = parse("message(hi").unwrap_err();
        assert!(matches!(err, ParseError::UnexpectedEof { .. }));
    }
}
