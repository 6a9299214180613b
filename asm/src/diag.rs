use std::fmt;

use thiserror::Error;

/// Consistency problems found after parsing. They are collected rather than
/// returned one by one.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Issue {
    #[error("no target addr `{0}` at line {1}")]
    UnresolvedTarget(String, usize),

    #[error("target addr of `{0}` ({1}) does not fit the address field at line {2}")]
    TargetOverflow(String, usize, usize),

    #[error("state `{0}` redefined at line {1}, first defined at line {2}")]
    Redefined(String, usize, usize),

    #[error("state `{0}` has no info record at line {1}")]
    MissingInfo(String, usize),

    #[error("unmatch of number_transition in state `{0}` at line {1}")]
    TransCount(String, usize),

    #[error("cmdEn error in state `{0}` at line {1}")]
    CmdEnable(String, usize),

    #[error("timeout value must more than zero in state `{0}` at line {1}")]
    TimeoutValue(String, usize),

    #[error("usage of timeout status error in state `{0}` at line {1}")]
    TimeoutUsage(String, usize),
}

/// Accumulates issues across the resolve and check phases of one compile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Diagnostics(Vec<Issue>);

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, issue: Issue) {
        log::debug!("issue: {}", issue);
        self.0.push(issue);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.0
    }

    /// `Err` with every collected issue, if any.
    pub fn into_result(self) -> Result<(), crate::Error> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(crate::Error::Inconsistent(self))
        }
    }
}

impl fmt::Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, issue) in self.0.iter().enumerate() {
            if idx > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "[ERROR] {}", issue)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_all_messages() {
        let mut diags = Diagnostics::new();
        assert!(diags.clone().into_result().is_ok());
        diags.push(Issue::UnresolvedTarget("a".into(), 3));
        diags.push(Issue::CmdEnable("b".into(), 7));
        assert_eq!(
            diags.to_string(),
            "[ERROR] no target addr `a` at line 3\n\n[ERROR] cmdEn error in state `b` at line 7"
        );
        assert!(matches!(
            diags.into_result(),
            Err(crate::Error::Inconsistent(d)) if d.len() == 2
        ));
    }
}
