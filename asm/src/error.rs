use std::fmt;

use color_print::cprintln;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("duplicate symbol `{0}`")]
    DuplicateSymbol(String),

    #[error("unknown symbol `{0}`")]
    UnknownSymbol(String),

    #[error("invalid operand: expected {expected}")]
    InvalidOperand { expected: &'static str },

    #[error("invalid alignment: {0} is not a power of two")]
    InvalidAlignment(u64),

    #[error("trailing garbage after instruction")]
    TrailingGarbage,

    #[error("position 0x{0:x} overlaps already placed bytes")]
    Overlap(u64),
}

impl Error {
    pub fn at(self, line: usize) -> AsmError {
        AsmError { line: Some(line), error: self }
    }

    pub fn no_line(self) -> AsmError {
        AsmError { line: None, error: self }
    }
}

/// An [`Error`] tied to the 1-based source line it came from. Errors found
/// only after the whole file has been read (unresolved relocations) carry
/// no line and print with a `[--]` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsmError {
    pub line: Option<usize>,
    pub error: Error,
}

impl fmt::Display for AsmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(n) => write!(f, "[L{}]: {}", n, self.error),
            None => write!(f, "[--]: {}", self.error),
        }
    }
}

impl std::error::Error for AsmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl AsmError {
    /// Print the error with the offending source line.
    pub fn print_diag(&self, path: &str, source: &str) {
        cprintln!("<red,bold>error</>: {}", self.error);
        match self.line {
            Some(n) => {
                cprintln!("     <blue>--></> <underline>{}:{}</>", path, n);
                cprintln!("      <blue>|</>");
                let text = source.lines().nth(n - 1).unwrap_or("");
                cprintln!(" <blue>{:>4} |</> {}", n, text);
                cprintln!("      <blue>|</>");
            }
            None => {
                cprintln!("     <blue>--></> <underline>{}</>", path);
            }
        }
    }
}
