//! Formula template loading and rendering.
//!
//! Templates use Go text/template action syntax restricted to field
//! references on the release arguments: `{{.Version}}`, `{{.URL}}` and
//! `{{.SHA256}}`. Trim markers (`{{- ` / ` -}}`) and comments
//! (`{{/* ... */}}`) are accepted; any other action is a parse error.

mod parse;

use crate::error::FormulaError;
use crate::release::TemplateArgs;
use std::fs;
use std::path::Path;

/// Default template file name, resolved against the current directory.
pub const DEFAULT_TEMPLATE_PATH: &str = "cockroach-tmpl.rb";

/// Error raised while parsing or executing a template, with its location.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("template: {name}:{line}: {kind}")]
pub struct TemplateError {
    pub name: String,
    pub line: usize,
    pub kind: TemplateErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TemplateErrorKind {
    #[error("unclosed action")]
    UnclosedAction,
    #[error("unclosed comment")]
    UnclosedComment,
    #[error("comment ends before closing delimiter")]
    CommentNotClosed,
    #[error("missing value for command")]
    MissingValue,
    #[error("unsupported action {0:?}")]
    UnsupportedAction(String),
    #[error("can't evaluate field {0} in formula arguments")]
    UnknownField(String),
}

/// One piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Segment {
    Text(String),
    Field { name: String, line: usize },
}

/// A parsed formula template, ready to render.
#[derive(Debug, Clone)]
pub struct FormulaTemplate {
    name: String,
    segments: Vec<Segment>,
}

impl FormulaTemplate {
    /// Parse template source. `name` is used in error messages only.
    pub fn parse(name: &str, source: &str) -> Result<Self, FormulaError> {
        let segments = parse::parse_segments(name, source).map_err(FormulaError::TemplateParse)?;
        Ok(Self {
            name: name.to_string(),
            segments,
        })
    }

    /// Read and parse the template at `path`. The file name becomes the template name.
    pub fn from_path(path: &Path) -> Result<Self, FormulaError> {
        let source = fs::read_to_string(path).map_err(|source| FormulaError::TemplateIo {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let template = Self::parse(&name, &source)?;
        tracing::debug!(
            "parsed template {} ({} segments)",
            path.display(),
            template.segments.len()
        );
        Ok(template)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Substitute the release arguments into the template.
    pub fn render(&self, args: &TemplateArgs) -> Result<String, FormulaError> {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Field { name, line } => {
                    let value = args.field(name).ok_or_else(|| {
                        FormulaError::TemplateExecute(TemplateError {
                            name: self.name.clone(),
                            line: *line,
                            kind: TemplateErrorKind::UnknownField(name.clone()),
                        })
                    })?;
                    out.push_str(value);
                }
            }
        }
        Ok(out)
    }
}
