use std::fmt;

use crate::cli::output;

/// Print an informational message via the standard CLI output helpers.
pub fn print_info(message: impl fmt::Display) {
    output::info(message);
}

/// Print a warning message via the standard CLI output helpers.
pub fn print_warning(message: impl fmt::Display) {
    output::warning(message);
}

/// Print an error message via the standard CLI output helpers.
pub fn print_error(message: impl fmt::Display) {
    output::error(message);
}

/// Print a success message via the standard CLI output helpers.
pub fn print_success(message: impl fmt::Display) {
    output::success(message);
}

/// Print a bold heading.
pub fn print_section(title: impl fmt::Display) {
    output::section(title);
}

/// Print each line as-is.
pub fn print_lines(lines: &[String]) {
    for line in lines {
        output::info(line);
    }
}
