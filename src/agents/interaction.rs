use crate::error::Result;
use colored::Colorize;
use std::io::{self, BufRead, Write};

/// Label of the action that rewrites the constraint in pubspec.yaml.
pub const UPDATE_LABEL: &str = "Update";

/// Presents a warning with a set of choices.
pub trait Prompt {
    /// Show `message` with `options` and return the picked label, `None` when dismissed.
    fn choose(&mut self, message: &str, options: &[&str]) -> Result<Option<String>>;
}

/// Interactive prompt on a terminal.
///
/// Accepts an option number or label. An empty answer dismisses the advisory and `a`
/// picks "Update" for this and every following advisory.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
    update_all: bool,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    pub fn stdio(update_all: bool) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), update_all)
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W, update_all: bool) -> Self {
        Self {
            input,
            output,
            update_all,
        }
    }

    fn resolve_answer(answer: &str, options: &[&str]) -> Answer {
        let answer = answer.trim();
        if answer.is_empty() || answer.eq_ignore_ascii_case("d") {
            return Answer::Dismiss;
        }
        if answer.eq_ignore_ascii_case("a") && options.contains(&UPDATE_LABEL) {
            return Answer::UpdateAll;
        }
        if let Ok(index) = answer.parse::<usize>() {
            return match index.checked_sub(1).and_then(|i| options.get(i)) {
                Some(label) => Answer::Pick(label.to_string()),
                None => Answer::Invalid,
            };
        }
        options
            .iter()
            .find(|label| label.eq_ignore_ascii_case(answer))
            .map(|label| Answer::Pick(label.to_string()))
            .unwrap_or(Answer::Invalid)
    }
}

enum Answer {
    Pick(String),
    UpdateAll,
    Dismiss,
    Invalid,
}

impl<R: BufRead, W: Write> Prompt for TerminalPrompt<R, W> {
    fn choose(&mut self, message: &str, options: &[&str]) -> Result<Option<String>> {
        writeln!(self.output, "\n{} {}", "⚠".yellow().bold(), message.yellow())?;

        if self.update_all && options.contains(&UPDATE_LABEL) {
            writeln!(self.output, "{}", "Auto-applying update.".dimmed())?;
            return Ok(Some(UPDATE_LABEL.to_string()));
        }

        for (index, label) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {}", index + 1, label.cyan())?;
        }

        loop {
            write!(
                self.output,
                "{}",
                format!(
                    "Choose an option [1-{}, a = update all, Enter = dismiss]: ",
                    options.len()
                )
                .bold()
            )?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            match Self::resolve_answer(&line, options) {
                Answer::Pick(label) => return Ok(Some(label)),
                Answer::UpdateAll => {
                    writeln!(
                        self.output,
                        "{}",
                        "Updating this and all remaining packages.".green().bold()
                    )?;
                    self.update_all = true;
                    return Ok(Some(UPDATE_LABEL.to_string()));
                }
                Answer::Dismiss => {
                    writeln!(self.output, "{}", "Dismissed.".dimmed())?;
                    return Ok(None);
                }
                Answer::Invalid => {
                    writeln!(
                        self.output,
                        "{}",
                        "Please answer with an option number or label.".red()
                    )?;
                }
            }
        }
    }
}

/// Prompt that never shows anything and always dismisses.
pub struct SilentPrompt;

impl Prompt for SilentPrompt {
    fn choose(&mut self, _message: &str, _options: &[&str]) -> Result<Option<String>> {
        Ok(None)
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;
    use std::collections::VecDeque;

    /// Replays canned answers and records what was shown.
    #[derive(Default)]
    pub struct ScriptedPrompt {
        answers: VecDeque<Option<String>>,
        pub shown: Vec<(String, Vec<String>)>,
    }

    impl ScriptedPrompt {
        pub fn answering(answers: &[Option<&str>]) -> Self {
            Self {
                answers: answers.iter().map(|a| a.map(String::from)).collect(),
                shown: Vec::new(),
            }
        }
    }

    impl Prompt for ScriptedPrompt {
        fn choose(&mut self, message: &str, options: &[&str]) -> Result<Option<String>> {
            self.shown.push((
                message.to_string(),
                options.iter().map(|o| o.to_string()).collect(),
            ));
            Ok(self.answers.pop_front().flatten())
        }
    }
}
