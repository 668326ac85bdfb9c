use colored::*;

mod raise_error;
pub use raise_error::{fatal, raise_error};

/// Severity of a console message, lowest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Completion = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    Fatal = 5,
}

impl Level {
    /// Maps the numeric `--debug-level` value.
    pub fn from_number(level: i32) -> Option<Level> {
        match level {
            1 => Some(Level::Completion),
            2 => Some(Level::Info),
            3 => Some(Level::Warning),
            4 => Some(Level::Error),
            5 => Some(Level::Fatal),
            _ => None,
        }
    }

    /// Errors and fatal errors end the program.
    pub fn is_error(self) -> bool {
        self >= Level::Error
    }

    pub(crate) fn paint(self, message: &str) -> ColoredString {
        match self {
            Level::Completion => format!("completed: {message}").bright_green(),
            Level::Info => format!("info: {message}").bright_cyan(),
            Level::Warning => format!("warning: {message}").bright_yellow(),
            Level::Error => format!("error: {message}").bright_red(),
            Level::Fatal => format!("fatal error: {message}").red().bold(),
        }
    }
}

/// Console logger for the command-line tool.
///
/// Messages below `threshold` are suppressed, and nothing below an error is printed
/// unless `verbose` is set.
#[derive(Clone, Copy, Debug)]
pub struct Logger {
    threshold: Level,
    verbose: bool,
}

impl Logger {
    pub fn new(verbose: bool, threshold: Level) -> Logger {
        Logger { threshold, verbose }
    }

    fn shows(&self, level: Level) -> bool {
        level.is_error() || (self.verbose && level >= self.threshold)
    }

    pub fn log(&self, level: Level, message: &str) {
        if level.is_error() {
            raise_error(message, level);
        } else if self.shows(level) {
            println!("{}", level.paint(message));
        }
    }

    pub fn info(&self, message: &str) {
        self.log(Level::Info, message);
    }

    pub fn completed(&self, message: &str) {
        self.log(Level::Completion, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(Level::Warning, message);
    }
}
