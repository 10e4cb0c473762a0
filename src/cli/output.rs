use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    match kind {
        MessageKind::Info => text,
        MessageKind::Success => text.bright_green().to_string(),
        MessageKind::Warning => format!("Warning: {text}").bright_yellow().to_string(),
        MessageKind::Error => format!("Error: {text}").bright_red().to_string(),
        MessageKind::Section => text.bold().to_string(),
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    println!("{}", apply_style(kind, message));
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

/// Turns colored output on or off for the whole process.
pub fn set_colors(enabled: bool) {
    colored::control::set_override(enabled);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_and_warnings_are_labelled() {
        set_colors(false);
        assert_eq!(apply_style(MessageKind::Error, "boom"), "Error: boom");
        assert_eq!(apply_style(MessageKind::Warning, "careful"), "Warning: careful");
        assert_eq!(apply_style(MessageKind::Info, "plain"), "plain");
    }
}
