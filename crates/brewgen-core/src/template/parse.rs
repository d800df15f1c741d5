//! Template source parsing into text and field segments.

use super::{Segment, TemplateError, TemplateErrorKind};

const OPEN: &str = "{{";
const CLOSE: &str = "}}";

/// Split `source` into literal text and `{{.Field}}` references.
///
/// Line numbers are 1-based and refer to the line an action opens on.
pub(super) fn parse_segments(name: &str, source: &str) -> Result<Vec<Segment>, TemplateError> {
    let err = |line: usize, kind: TemplateErrorKind| TemplateError {
        name: name.to_string(),
        line,
        kind,
    };

    let mut segments = Vec::new();
    let mut rest = source;
    let mut line = 1usize;
    // Set by a ` -}}` marker: strip leading whitespace from the next text.
    let mut trim_leading = false;

    loop {
        let Some(open) = rest.find(OPEN) else {
            push_text(&mut segments, rest, trim_leading, false);
            break;
        };

        let text = &rest[..open];
        let mut action = &rest[open + OPEN.len()..];
        let trim_trailing = has_left_trim_marker(action);
        push_text(&mut segments, text, trim_leading, trim_trailing);
        line += count_newlines(text);
        let action_line = line;

        if trim_trailing {
            // Skip "-" plus the whitespace that must follow it.
            let after_dash = &action[1..];
            action = after_dash.trim_start();
            line += count_newlines(&after_dash[..after_dash.len() - action.len()]);
        }

        if action.starts_with("/*") {
            // The closing "*/" cannot share the "*" of the opening "/*".
            let Some(end) = action[2..].find("*/").map(|i| i + 2) else {
                return Err(err(action_line, TemplateErrorKind::UnclosedComment));
            };
            let after_comment = &action[end + 2..];
            let (rest_after, right_trim) = if let Some(r) = after_comment.strip_prefix(CLOSE) {
                (r, false)
            } else if let Some(r) = strip_right_trim_close(after_comment) {
                (r, true)
            } else {
                return Err(err(action_line, TemplateErrorKind::CommentNotClosed));
            };
            line += count_newlines(&action[..end + 2]);
            trim_leading = right_trim;
            rest = rest_after;
            continue;
        }

        let Some(close) = action.find(CLOSE) else {
            return Err(err(action_line, TemplateErrorKind::UnclosedAction));
        };
        let mut inner = &action[..close];
        let rest_after = &action[close + CLOSE.len()..];
        line += count_newlines(inner);

        trim_leading = false;
        if let Some(stripped) = inner.strip_suffix('-') {
            if stripped.ends_with(|c: char| c.is_ascii_whitespace()) {
                inner = stripped;
                trim_leading = true;
            }
        }

        let inner = inner.trim();
        if inner.is_empty() {
            return Err(err(action_line, TemplateErrorKind::MissingValue));
        }
        match field_name(inner) {
            Some(field) => segments.push(Segment::Field {
                name: field.to_string(),
                line: action_line,
            }),
            None => {
                return Err(err(
                    action_line,
                    TemplateErrorKind::UnsupportedAction(inner.to_string()),
                ))
            }
        }
        rest = rest_after;
    }

    Ok(segments)
}

/// `{{- ` requires whitespace after the dash; `{{-3}}` is not a trim marker.
fn has_left_trim_marker(action: &str) -> bool {
    let mut chars = action.chars();
    chars.next() == Some('-') && chars.next().is_some_and(|c| c.is_ascii_whitespace())
}

/// Match ` -}}` (whitespace, dash, close) and return what follows it.
fn strip_right_trim_close(s: &str) -> Option<&str> {
    let trimmed = s.trim_start_matches(|c: char| c.is_ascii_whitespace());
    if trimmed.len() == s.len() {
        return None;
    }
    trimmed.strip_prefix('-')?.strip_prefix(CLOSE)
}

/// `.Name` where Name is a single identifier.
fn field_name(inner: &str) -> Option<&str> {
    let ident = inner.strip_prefix('.')?;
    let mut chars = ident.chars();
    let first = chars.next()?;
    if !(first.is_alphabetic() || first == '_') {
        return None;
    }
    if chars.all(|c| c.is_alphanumeric() || c == '_') {
        Some(ident)
    } else {
        None
    }
}

fn push_text(segments: &mut Vec<Segment>, text: &str, trim_start: bool, trim_end: bool) {
    let mut text = text;
    if trim_start {
        text = text.trim_start_matches(|c: char| c.is_ascii_whitespace());
    }
    if trim_end {
        text = text.trim_end_matches(|c: char| c.is_ascii_whitespace());
    }
    if !text.is_empty() {
        segments.push(Segment::Text(text.to_string()));
    }
}

fn count_newlines(s: &str) -> usize {
    s.bytes().filter(|&b| b == b'\n').count()
}
