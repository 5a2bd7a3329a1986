//! Progress reporting for scaffolding steps
//!
//! Every step that can fail reports through a [`Reporter`] instead of
//! returning the failure upward, so a run can carry on past a broken
//! module. The TUI layer provides a spinner-backed implementation.

use colored::Colorize;

/// Receives status notifications for long-running steps
pub trait Reporter {
    /// A step has started
    fn start(&mut self, message: &str);

    /// The current step finished successfully
    fn succeed(&mut self, message: &str);

    /// The current step (or a standalone check) failed
    fn fail(&mut self, message: &str);

    /// Informational line, not tied to a step
    fn info(&mut self, message: &str);

    /// Warning line, not tied to a step
    fn warn(&mut self, message: &str);
}

/// Plain line-oriented reporter for non-interactive terminals
#[derive(Debug, Default)]
pub struct ConsoleReporter;

impl Reporter for ConsoleReporter {
    fn start(&mut self, message: &str) {
        println!("  {} {}", "->".blue(), message);
    }

    fn succeed(&mut self, message: &str) {
        println!("  {} {}", "done".green(), message);
    }

    fn fail(&mut self, message: &str) {
        eprintln!("  {} {}", "failed".red(), message);
    }

    fn info(&mut self, message: &str) {
        println!("{}", message.cyan());
    }

    fn warn(&mut self, message: &str) {
        eprintln!("{} {}", "Warning:".yellow(), message);
    }
}

/// A single recorded notification
#[cfg(test)]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Start(String),
    Succeed(String),
    Fail(String),
    Info(String),
    Warn(String),
}

/// Reporter that keeps every notification in memory
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub events: Vec<Event>,
}

#[cfg(test)]
impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failures(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Fail(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn successes(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                Event::Succeed(m) => Some(m.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
impl Reporter for RecordingReporter {
    fn start(&mut self, message: &str) {
        self.events.push(Event::Start(message.to_string()));
    }

    fn succeed(&mut self, message: &str) {
        self.events.push(Event::Succeed(message.to_string()));
    }

    fn fail(&mut self, message: &str) {
        self.events.push(Event::Fail(message.to_string()));
    }

    fn info(&mut self, message: &str) {
        self.events.push(Event::Info(message.to_string()));
    }

    fn warn(&mut self, message: &str) {
        self.events.push(Event::Warn(message.to_string()));
    }
}
