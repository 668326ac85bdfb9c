use std::process::exit;

use crate::Level;

/// Prints `error` to stderr. Errors and fatal errors exit the program with status 1.
pub fn raise_error(error: &str, level: Level) {
    eprintln!("{}", level.paint(error));
    if level.is_error() {
        exit(1);
    }
}

/// Prints a fatal error and exits.
pub fn fatal(error: &str) -> ! {
    eprintln!("{}", Level::Fatal.paint(error));
    exit(1);
}
