//! Error type for the formula pipeline.
//!
//! Each variant maps to one failing step: download, body read, HTTP status
//! (strict mode only), template parse and template execution. Nothing is
//! retried; the caller aborts on the first error.

use crate::template::TemplateError;
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum FormulaError {
    /// Transfer failed before the server sent a response (DNS, connect, TLS).
    #[error("cannot download {url}")]
    Download {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// Transfer failed after the response started.
    #[error("cannot copy response body from {url}")]
    ReadBody {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// Non-2xx response while `fail_on_http_error` is set.
    #[error("GET {url} returned HTTP {status}")]
    HttpStatus { url: String, status: u32 },

    #[error("failed to parse template: cannot read {}", path.display())]
    TemplateIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse template")]
    TemplateParse(#[source] TemplateError),

    #[error("cannot execute template")]
    TemplateExecute(#[source] TemplateError),
}

impl FormulaError {
    /// True for errors raised while loading or parsing the template.
    pub fn is_template_parse(&self) -> bool {
        matches!(
            self,
            FormulaError::TemplateIo { .. } | FormulaError::TemplateParse(_)
        )
    }
}
