//! Formatting of the single log record written for a failed request

use std::backtrace::{Backtrace, BacktraceStatus};
use std::collections::BTreeMap;
use std::error::Error;

use super::error::RequestError;

pub const DEFAULT_ERROR_TITLE: &str = "Request failed";

pub(crate) struct FailureReport {
    pub title: String,
    pub info: String,
    pub response_text: Option<String>,
    pub stack_trace: Option<String>,
    pub traceback: String,
}

impl FailureReport {
    pub fn render(&self) -> String {
        let response = self
            .response_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(|text| format!("Request response:\n{text}"));

        let stack = self
            .stack_trace
            .as_deref()
            .filter(|trace| !trace.is_empty())
            .map(|trace| format!("Stack trace (most recent call last):\n{trace}"));

        [
            Some(self.title.clone()),
            Some(self.info.clone()),
            response,
            stack,
            Some(self.traceback.clone()),
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Render a backtrace with the outermost frame first
pub(crate) fn format_stack(backtrace: &Backtrace) -> String {
    if backtrace.status() != BacktraceStatus::Captured {
        return String::new();
    }

    let rendered = backtrace.to_string();
    let mut frames: Vec<Vec<&str>> = Vec::new();
    for line in rendered.lines() {
        if is_frame_header(line) || frames.is_empty() {
            frames.push(vec![line]);
        } else if let Some(frame) = frames.last_mut() {
            frame.push(line);
        }
    }

    frames
        .into_iter()
        .rev()
        .flatten()
        .collect::<Vec<_>>()
        .join("\n")
}

/// Frame headers look like `  12: crate::module::function`
fn is_frame_header(line: &str) -> bool {
    let trimmed = line.trim_start();
    let digits = trimmed.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && trimmed[digits..].starts_with(':')
}

/// The error followed by every cause in its source chain
///
/// A cause whose message repeats the one above it is skipped, as with
/// `Transport`, which displays the wrapped error it also exposes as source.
pub(crate) fn format_chain(error: &RequestError) -> String {
    let mut previous = error.to_string();
    let mut lines = vec![format!("{}: {previous}", error.kind())];
    let mut source = error.source();
    while let Some(cause) = source {
        let message = cause.to_string();
        if message != previous {
            lines.push(format!("Caused by: {message}"));
        }
        previous = message;
        source = cause.source();
    }
    lines.join("\n")
}

/// Substitute `{name}` placeholders from `details`
///
/// `{{` and `}}` are literal braces. Returns `None` when a placeholder has
/// no value or the braces are unbalanced.
pub(crate) fn format_template(template: &str, details: &BTreeMap<String, String>) -> Option<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut field = String::new();
                loop {
                    match chars.next() {
                        Some('}') => break,
                        Some(c) => field.push(c),
                        None => return None,
                    }
                }
                let name = field.split([':', '!']).next().unwrap_or_default().trim();
                out.push_str(details.get(name)?);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return None,
            c => out.push(c),
        }
    }

    Some(out)
}
