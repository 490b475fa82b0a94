//! Presentation of fulfillment text in the terminal.

use std::fmt;

/// One line of chat output. The first line of a reply is a heading; every
/// later line is an indented bullet item, mirroring how multi-day replies
/// are composed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayLine {
    Heading(String),
    Bullet(String),
}

impl fmt::Display for DisplayLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayLine::Heading(text) => f.write_str(text),
            DisplayLine::Bullet(text) => write!(f, "  • {text}"),
        }
    }
}

/// Split a fulfillment text into display lines, one per newline-separated
/// line of the reply.
pub fn render(text: &str) -> Vec<DisplayLine> {
    text.split('\n')
        .enumerate()
        .map(|(index, line)| {
            if index == 0 {
                DisplayLine::Heading(line.to_string())
            } else {
                DisplayLine::Bullet(line.to_string())
            }
        })
        .collect()
}
