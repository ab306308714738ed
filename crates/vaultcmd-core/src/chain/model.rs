//! Chain and step models.

use serde::Serialize;

use crate::error::{Result, VaultCmdError};

const MESSAGE_MARKER: &str = "//";

/// One shell command within a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainStep {
    /// Shell command passed to the launcher
    pub command: String,
    /// Notice text shown after the step succeeds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_message: Option<String>,
}

impl ChainStep {
    /// Creates a step without a success message.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            success_message: None,
        }
    }

    /// Parses a single body line.
    ///
    /// A `//` at the start of the line or preceded by whitespace starts the
    /// success message, so `git push // Pushed` runs `git push` and reports
    /// `Pushed`. URLs such as `https://host/repo` are left intact. The first
    /// marker wins; everything after it is message text. A line that starts
    /// with a marker has an empty command.
    pub fn parse(line: &str) -> Self {
        let marker = line
            .match_indices(MESSAGE_MARKER)
            .map(|(idx, _)| idx)
            .find(|&idx| {
                line[..idx]
                    .chars()
                    .next_back()
                    .is_none_or(char::is_whitespace)
            });

        match marker {
            Some(idx) => {
                let message = line[idx + MESSAGE_MARKER.len()..].trim();
                Self {
                    command: line[..idx].trim_end().to_string(),
                    success_message: (!message.is_empty()).then(|| message.to_string()),
                }
            }
            None => Self::new(line.trim_end()),
        }
    }
}

/// An ordered, non-empty sequence of steps built from one command body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandChain {
    steps: Vec<ChainStep>,
}

impl CommandChain {
    /// Splits a command body on newlines into a chain.
    ///
    /// Blank and message-only lines are dropped. A body with no runnable line is
    /// [`VaultCmdError::UndefinedCommand`].
    pub fn parse(body: &str) -> Result<Self> {
        let steps: Vec<ChainStep> = body
            .split('\n')
            .map(|line| line.trim_end_matches('\r'))
            .filter(|line| !line.trim().is_empty())
            .map(ChainStep::parse)
            .filter(|step| !step.command.trim().is_empty())
            .collect();

        Self::from_steps(steps)
    }

    /// Builds a chain from already parsed steps.
    pub fn from_steps(steps: Vec<ChainStep>) -> Result<Self> {
        if steps.is_empty() {
            return Err(VaultCmdError::UndefinedCommand);
        }
        Ok(Self { steps })
    }

    pub fn steps(&self) -> &[ChainStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Always false: a chain holds at least one step.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commands(chain: &CommandChain) -> Vec<&str> {
        chain.steps().iter().map(|s| s.command.as_str()).collect()
    }

    #[test]
    fn test_single_line_body() {
        let chain = CommandChain::parse("echo A").unwrap();
        assert_eq!(commands(&chain), vec!["echo A"]);
    }

    #[test]
    fn test_multi_line_body_keeps_order() {
        let chain = CommandChain::parse("echo A\nfalse\necho C").unwrap();
        assert_eq!(commands(&chain), vec!["echo A", "false", "echo C"]);
    }

    #[test]
    fn test_blank_and_crlf_lines() {
        let chain = CommandChain::parse("git add -A\r\n\r\n   \ngit push\n").unwrap();
        assert_eq!(commands(&chain), vec!["git add -A", "git push"]);
    }

    #[test]
    fn test_empty_body_is_undefined() {
        assert!(CommandChain::parse("").unwrap_err().is_undefined_command());
        assert!(CommandChain::parse("\n \n").unwrap_err().is_undefined_command());
        assert!(CommandChain::from_steps(vec![]).is_err());
    }

    #[test]
    fn test_success_message_marker() {
        let step = ChainStep::parse("git push // Pushed to origin");
        assert_eq!(step.command, "git push");
        assert_eq!(step.success_message.as_deref(), Some("Pushed to origin"));
    }

    #[test]
    fn test_url_is_not_a_marker() {
        let step = ChainStep::parse("git clone https://example.com/repo.git");
        assert_eq!(step.command, "git clone https://example.com/repo.git");
        assert!(step.success_message.is_none());

        let step = ChainStep::parse("git pull https://example.com/r.git // Pulled");
        assert_eq!(step.command, "git pull https://example.com/r.git");
        assert_eq!(step.success_message.as_deref(), Some("Pulled"));
    }

    #[test]
    fn test_empty_message_is_ignored() {
        let step = ChainStep::parse("git fetch //   ");
        assert_eq!(step.command, "git fetch");
        assert!(step.success_message.is_none());
    }

    #[test]
    fn test_message_only_line_is_dropped() {
        let chain = CommandChain::parse("  // nothing to run\necho ok").unwrap();
        assert_eq!(commands(&chain), vec!["echo ok"]);

        let chain = CommandChain::parse("// nothing to run\necho ok").unwrap();
        assert_eq!(commands(&chain), vec!["echo ok"]);

        assert!(
            CommandChain::parse("// only a note")
                .unwrap_err()
                .is_undefined_command()
        );
    }

    #[test]
    fn test_first_marker_wins() {
        let step = ChainStep::parse("git push // Pushed // done");
        assert_eq!(step.command, "git push");
        assert_eq!(step.success_message.as_deref(), Some("Pushed // done"));
    }
}
