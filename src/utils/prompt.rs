//! Console prompts
//!
//! Deciding *whether* to ask lives in the resolver and the overwrite guard;
//! this module only performs the asking. Implementations return `None` when
//! the question went unanswered, and callers fall back to their default.

use dialoguer::{Input, theme::SimpleTheme};
use std::{cell::RefCell, collections::VecDeque, io};
use tracing::{debug, instrument};

/// Something that can ask the user a free-form question
pub trait Prompter {
    /// Ask `question` and return the trimmed reply, `None` if nothing was entered
    fn ask(&self, question: &str) -> io::Result<Option<String>>;
}

/// Interactive prompter reading from the terminal
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsolePrompter;

impl Prompter for ConsolePrompter {
    #[instrument(skip(self))]
    fn ask(&self, question: &str) -> io::Result<Option<String>> {
        let reply: String = Input::with_theme(&SimpleTheme)
            .with_prompt(question)
            .allow_empty(true)
            .interact_text()
            .map_err(io::Error::other)?;

        Ok(non_empty(reply))
    }
}

/// Prompter that never blocks and always takes the default answer
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeDefaults;

impl Prompter for AssumeDefaults {
    fn ask(&self, question: &str) -> io::Result<Option<String>> {
        debug!("Not prompting, assuming default for: {}", question);
        Ok(None)
    }
}

/// Prompter answering from a fixed list of replies, in order
///
/// Once the replies run out every further question is left unanswered.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    replies: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    /// Create a prompter that hands out `replies` one per question
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: RefCell::new(replies.into_iter().map(Into::into).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Questions asked so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompter for ScriptedPrompter {
    fn ask(&self, question: &str) -> io::Result<Option<String>> {
        self.asked.borrow_mut().push(question.to_string());
        let reply = self.replies.borrow_mut().pop_front();
        Ok(reply.and_then(non_empty))
    }
}

fn non_empty(reply: String) -> Option<String> {
    let trimmed = reply.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_assume_defaults_never_answers() {
        let prompter = AssumeDefaults;
        assert_eq!(prompter.ask("Output file?").unwrap(), None);
    }

    #[test]
    fn test_scripted_replies_are_trimmed_and_consumed_in_order() {
        let prompter = ScriptedPrompter::new(["  report.html ", "", "n"]);

        assert_eq!(
            prompter.ask("first").unwrap().as_deref(),
            Some("report.html")
        );
        assert_eq!(prompter.ask("second").unwrap(), None);
        assert_eq!(prompter.ask("third").unwrap().as_deref(), Some("n"));
        assert_eq!(prompter.ask("fourth").unwrap(), None);

        assert_eq!(prompter.asked(), vec!["first", "second", "third", "fourth"]);
    }
}
