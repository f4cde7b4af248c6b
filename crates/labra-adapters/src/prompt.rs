//! Line input from the user.

use std::{
    collections::VecDeque,
    io::{self, BufRead, Write},
    sync::{Arc, Mutex},
};

use tracing::debug;

use labra_core::application::ports::Prompt;

/// Reads answers from standard input.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinPrompt;

impl StdinPrompt {
    pub fn new() -> Self {
        Self
    }
}

impl Prompt for StdinPrompt {
    fn read_line(&self, message: &str) -> String {
        let mut stdout = io::stdout().lock();
        let _ = write!(stdout, "{message}");
        let _ = stdout.flush();
        drop(stdout);

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(0) => {
                debug!("stdin closed, using empty answer");
                // Keep the next output off the prompt line.
                println!();
                String::new()
            }
            Ok(_) => answer.trim().to_owned(),
            Err(e) => {
                debug!(error = %e, "stdin read failed, using empty answer");
                String::new()
            }
        }
    }
}

/// Answers prompts from a fixed queue and records the questions.
/// An exhausted queue answers with an empty line.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    inner: Arc<Mutex<ScriptedInner>>,
}

#[derive(Debug, Default)]
struct ScriptedInner {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            inner: Arc::new(Mutex::new(ScriptedInner {
                answers: answers.into_iter().map(Into::into).collect(),
                asked: Vec::new(),
            })),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.inner
            .lock()
            .map(|inner| inner.asked.clone())
            .unwrap_or_default()
    }
}

impl Prompt for ScriptedPrompt {
    fn read_line(&self, message: &str) -> String {
        let Ok(mut inner) = self.inner.lock() else {
            return String::new();
        };
        inner.asked.push(message.to_owned());
        inner
            .answers
            .pop_front()
            .map(|a| a.trim().to_owned())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_answers_run_out_to_empty() {
        let prompt = ScriptedPrompt::new([" npm "]);
        assert_eq!(prompt.read_line("pm? "), "npm");
        assert_eq!(prompt.read_line("install? "), "");
        assert_eq!(prompt.asked(), vec!["pm? ", "install? "]);
    }
}
