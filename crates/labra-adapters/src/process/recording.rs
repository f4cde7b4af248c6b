//! Scripted process runner for tests.

use std::{
    fmt,
    sync::{Arc, Mutex, MutexGuard},
};

use labra_core::{
    application::{ApplicationError, ports::ProcessRunner},
    domain::{CommandOutput, CommandSpec},
    error::LabraResult,
};

type Effect = Arc<dyn Fn(&CommandSpec) + Send + Sync>;

#[derive(Debug, Clone)]
enum Reply {
    Succeed(String),
    Fail(i32, String),
    /// The program could not be started at all.
    Unavailable,
}

#[derive(Clone)]
struct Rule {
    prefix: String,
    reply: Option<Reply>,
    effect: Option<Effect>,
    remaining: Option<usize>,
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("prefix", &self.prefix)
            .field("reply", &self.reply)
            .field("effect", &self.effect.is_some())
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[derive(Debug, Default)]
struct Inner {
    rules: Vec<Rule>,
    calls: Vec<CommandSpec>,
}

/// Records every command and answers from rules matched by command-line
/// prefix. The first live rule wins. Unmatched commands succeed with no
/// output.
#[derive(Debug, Clone, Default)]
pub struct RecordingRunner {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn push(&self, prefix: &str, reply: Option<Reply>, effect: Option<Effect>, times: Option<usize>) {
        self.lock().rules.push(Rule {
            prefix: prefix.to_owned(),
            reply,
            effect,
            remaining: times,
        });
    }

    /// Succeed with `output` captured.
    pub fn respond(self, prefix: &str, output: &str) -> Self {
        self.push(prefix, Some(Reply::Succeed(output.to_owned())), None, None);
        self
    }

    pub fn fail(self, prefix: &str, code: i32, output: &str) -> Self {
        self.push(prefix, Some(Reply::Fail(code, output.to_owned())), None, None);
        self
    }

    /// Fail the next `times` matching calls, then fall through to later rules.
    pub fn fail_times(self, prefix: &str, times: usize, code: i32, output: &str) -> Self {
        self.push(
            prefix,
            Some(Reply::Fail(code, output.to_owned())),
            None,
            Some(times),
        );
        self
    }

    /// Behave as if the program is not installed.
    pub fn unavailable(self, prefix: &str) -> Self {
        self.push(prefix, Some(Reply::Unavailable), None, None);
        self
    }

    /// Run `effect` for matching calls, then succeed.
    pub fn on_call<F>(self, prefix: &str, effect: F) -> Self
    where
        F: Fn(&CommandSpec) + Send + Sync + 'static,
    {
        self.push(prefix, None, Some(Arc::new(effect)), None);
        self
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.lock().calls.clone()
    }

    /// Recorded command lines, in call order.
    pub fn command_lines(&self) -> Vec<String> {
        self.lock().calls.iter().map(CommandSpec::command_line).collect()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.command_lines()
            .iter()
            .filter(|line| line.starts_with(prefix))
            .count()
    }

    fn answer(&self, spec: &CommandSpec) -> Reply {
        let line = spec.command_line();
        let (reply, effect) = {
            let mut inner = self.lock();
            inner.calls.push(spec.clone());
            let rule = inner
                .rules
                .iter_mut()
                .find(|r| line.starts_with(&r.prefix) && r.remaining != Some(0));
            match rule {
                Some(rule) => {
                    if let Some(n) = rule.remaining.as_mut() {
                        *n -= 1;
                    }
                    (rule.reply.clone(), rule.effect.clone())
                }
                None => (None, None),
            }
        };
        if let Some(effect) = effect {
            effect(spec);
        }
        reply.unwrap_or(Reply::Succeed(String::new()))
    }
}

impl ProcessRunner for RecordingRunner {
    fn run(&self, spec: &CommandSpec) -> LabraResult<()> {
        match self.answer(spec) {
            Reply::Succeed(_) => Ok(()),
            Reply::Fail(code, _) => Err(ApplicationError::CommandFailed {
                command: spec.command_line(),
                reason: format!("exited with status {code}"),
            }
            .into()),
            Reply::Unavailable => Err(ApplicationError::CommandFailed {
                command: spec.command_line(),
                reason: "could not be started: program not found".into(),
            }
            .into()),
        }
    }

    fn output(&self, spec: &CommandSpec) -> LabraResult<CommandOutput> {
        match self.answer(spec) {
            Reply::Succeed(out) => Ok(CommandOutput::success(out)),
            Reply::Fail(code, out) => Ok(CommandOutput::failure(code, out)),
            Reply::Unavailable => Err(ApplicationError::CommandFailed {
                command: spec.command_line(),
                reason: "could not be started: program not found".into(),
            }
            .into()),
        }
    }

    fn probe(&self, spec: &CommandSpec) -> bool {
        matches!(self.answer(spec), Reply::Succeed(_))
    }
}
