use std::fmt;

use crate::{error_ext::Link, frame::location_lines};

/// Prefix of the first line of every nested block.
pub const INNER_PREFIX: &str = "Inner: ";

/// One rendered entry of a formatted chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Error {
        type_name: Box<str>,
        message: Box<str>,
        locations: Vec<String>,
    },
    /// The chain was cut; `remaining` errors were not rendered.
    Elided { remaining: usize },
}

impl fmt::Display for Block {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Block::Error {
                type_name,
                message,
                locations,
            } => {
                write!(f, "'{type_name}' Error: {message}")?;

                for location in locations {
                    write!(f, "\n{location}")?;
                }

                Ok(())
            }
            Block::Elided { remaining } => write!(
                f,
                "'{remaining}' additional nested inner exceptions are not shown."
            ),
        }
    }
}

/// A formatted error chain: one block per rendered error, outermost first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorStack(Vec<Block>);

impl ErrorStack {
    pub fn push(&mut self, link: &Link<'_>) {
        self.0.push(Block::Error {
            type_name: link.type_name().into(),
            message: link.message().into_boxed_str(),
            locations: location_lines(link.frames()),
        });
    }

    pub fn push_elided(&mut self, remaining: usize) {
        self.0.push(Block::Elided { remaining });
    }

    pub fn blocks(&self) -> &[Block] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn is_elided(&self) -> bool {
        matches!(self.0.last(), Some(Block::Elided { .. }))
    }

    /// The output lines, with [`INNER_PREFIX`] applied to nested blocks.
    pub fn lines(&self) -> Vec<String> {
        let mut lines = Vec::new();

        for (idx, block) in self.0.iter().enumerate() {
            let rendered = block.to_string();

            for (n, line) in rendered.split('\n').enumerate() {
                if idx > 0 && n == 0 {
                    lines.push(format!("{INNER_PREFIX}{line}"));
                } else {
                    lines.push(line.to_owned());
                }
            }
        }

        lines
    }

    pub fn finish(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ErrorStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, block) in self.0.iter().enumerate() {
            if idx > 0 {
                f.write_str("\n")?;
                f.write_str(INNER_PREFIX)?;
            }

            fmt::Display::fmt(block, f)?;
        }

        Ok(())
    }
}
