use color_print::cprintln;
use thiserror::Error;

use crate::diag::Diagnostics;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot parse `{0}` at line {1}")]
    Syntax(String, usize),

    #[error("Unknown status signal `{0}` at line {1}")]
    UnknownStatus(String, usize),

    #[error("Width check overflow at line {line}: {source}")]
    Overflow {
        line: usize,
        #[source]
        source: arch::Overflow,
    },

    #[error("Missing state name at line {0}")]
    MissingName(usize),

    #[error("Record outside of any state at line {0}")]
    Orphan(usize),

    #[error("Duplicate {0} record in state `{1}` at line {2}")]
    Duplicate(&'static str, String, usize),

    #[error("AGC ram overflow, the usage of ram is {used} of {capacity} words")]
    RamOverflow { used: usize, capacity: usize },

    #[error("{0}")]
    Inconsistent(Diagnostics),

    #[error("Invalid config: {0}")]
    Config(String),

    #[error("Failed to open file: {0}")]
    FileOpen(String, #[source] std::io::Error),

    #[error("Failed to read line")]
    FileRead(#[source] std::io::Error),

    #[error("Failed to create file: {0}")]
    FileCreate(String, #[source] std::io::Error),

    #[error("Failed to write file: {0}")]
    FileWrite(String, #[source] std::io::Error),
}

impl Error {
    pub fn overflow(line: usize) -> impl FnOnce(arch::Overflow) -> Error {
        move |source| Error::Overflow { line, source }
    }

    /// Source line the error points at, if any.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::Syntax(_, line)
            | Error::UnknownStatus(_, line)
            | Error::Overflow { line, .. }
            | Error::MissingName(line)
            | Error::Orphan(line)
            | Error::Duplicate(_, _, line) => Some(*line),
            _ => None,
        }
    }

    /// Print error with diagnostic information showing file location and line content
    pub fn print_diag(&self, file: &str, lines: &[String]) {
        cprintln!("<red,bold>error</>: {}", self);
        let Some(line) = self.line() else {
            return;
        };
        let content = lines
            .get(line.wrapping_sub(1))
            .map(|s| s.as_str())
            .unwrap_or("");
        cprintln!("     <blue>--></> <underline>{}:{}</>", file, line);
        cprintln!("      <blue>|</>");
        cprintln!(" <blue>{:>4} |</> {}", line, content);
        cprintln!("      <blue>|</>");
    }
}
