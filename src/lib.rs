#![allow(clippy::module_inception)]

use crate::{
    cst::tree::Tree,
    errors::errors::{Error, ErrorTip},
    lexer::{lexer::Lexer, trivia::attach_trivia},
};

pub mod cst;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// Byte offset into the parsed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span {
            start: Position(start as u32),
            end: Position(end as u32),
        }
    }

    pub fn len(&self) -> usize {
        (self.end.0 - self.start.0) as usize
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Parses `source` into a concrete syntax tree. Never fails: malformed
/// regions become `ERROR` nodes inside the returned tree.
pub fn parse(source: &str) -> Tree {
    let tokens = attach_trivia(Lexer::new(source));
    let root = parser::parser::parse(tokens);
    Tree::new(source.to_string(), root)
}

/// Returns the 1-based line number, the line text and the column of byte
/// `position` in `content`. Positions past the end land on the last line.
pub fn get_line_at_position(content: &str, position: u32) -> (usize, String, usize) {
    let pos = (position as usize).min(content.len());

    let mut start = 0;
    let mut line_number = 1;

    for line in content.split_inclusive('\n') {
        let end = start + line.len();

        if (start..end).contains(&pos) {
            return (line_number, line.to_string(), pos - start);
        }

        if end == content.len() && !line.ends_with('\n') {
            return (line_number, line.to_string(), pos - start);
        }

        start = end;
        line_number += 1;
    }

    (line_number, String::new(), 0)
}

pub fn render_error(source: &str, error: &Error) -> String {
    /*
        Error: UnexpectedToken (Unexpected token: `}`, did you miss a semicolon?)
           |
        20 | x := foo(};
           | ---------^
    */

    let position = error.get_position();
    let (line, line_text, line_pos) = get_line_at_position(source, position.0);

    let line_string = line.to_string();
    let padding = line_string.len() + 2;

    let mut rendered = String::new();
    if let ErrorTip::None = error.get_tip() {
        rendered.push_str(&format!("Error: {}\n", error.get_error_name()));
    } else {
        rendered.push_str(&format!(
            "Error: {} ({})\n",
            error.get_error_name(),
            error.get_tip()
        ));
    }
    rendered.push_str(&format!("{:>padding$}\n", "|"));

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    rendered.push_str(&format!("{} | {}\n", line_string, line_text_removed.trim_end()));

    let arrows = line_pos.saturating_sub(removed_whitespace) + 1;
    rendered.push_str(&format!("{:>padding$} {:->arrows$}\n", "|", "^"));

    rendered
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let start = string.len() - string.trim_start_matches([' ', '\t']).len();

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    use crate::{errors::errors::ErrorImpl, Position};

    use super::errors::errors::Error;

    #[test]
    fn test_get_line_at_position() {
        let content = "Hello, world!\nsecond\n\nTesting { }\n";

        let (line_number, line, line_pos) = super::get_line_at_position(content, 10);
        assert_eq!(line_number, 1);
        assert_eq!(line, "Hello, world!\n");
        assert_eq!(line_pos, 10);

        let (line_number, line, line_pos) = super::get_line_at_position(content, 30);
        assert_eq!(line_number, 4);
        assert_eq!(line, "Testing { }\n");
        assert_eq!(line_pos, 8);
    }

    #[test]
    fn test_get_line_at_end_of_input() {
        let (line_number, line, line_pos) = super::get_line_at_position("a\nbc", 4);

        assert_eq!(line_number, 2);
        assert_eq!(line, "bc");
        assert_eq!(line_pos, 2);
    }

    #[test]
    fn test_render_error() {
        let source = "x := 1;\n    y := foo(};\n";
        let error = Error::new(
            ErrorImpl::UnexpectedToken {
                token: "}".to_string(),
            },
            Position(21),
        );

        let rendered = super::render_error(source, &error);

        assert_eq!(
            rendered,
            "Error: UnexpectedToken (Unexpected token: `}`, did you miss a semicolon?)\n  |\n2 | y := foo(};\n  | ---------^\n"
        );
    }
}
