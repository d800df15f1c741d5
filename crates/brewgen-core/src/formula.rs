//! End-to-end formula generation: template, URL, digest, render.

use crate::config::BrewgenConfig;
use crate::error::FormulaError;
use crate::fetch::{self, FetchOptions};
use crate::release::{self, TemplateArgs};
use crate::template::FormulaTemplate;
use std::path::PathBuf;

/// Inputs for [`generate`] other than the version.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    pub template_path: PathBuf,
    pub url_pattern: String,
    pub fetch: FetchOptions,
}

impl From<&BrewgenConfig> for GenerateOptions {
    fn from(cfg: &BrewgenConfig) -> Self {
        Self {
            template_path: cfg.template_path.clone(),
            url_pattern: cfg.url_pattern.clone(),
            fetch: cfg.fetch_options(),
        }
    }
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self::from(&BrewgenConfig::default())
    }
}

/// Produce the formula source for `version`.
///
/// The template is parsed before any network access, so a missing or
/// malformed template fails without downloading anything.
pub fn generate(version: &str, opts: &GenerateOptions) -> Result<String, FormulaError> {
    let template = FormulaTemplate::from_path(&opts.template_path)?;

    let url = release::release_url(&opts.url_pattern, version);
    tracing::info!("fetching {}", url);
    let sha256 = fetch::sha256_from_url(&url, &opts.fetch)?;

    let args = TemplateArgs {
        version: version.to_string(),
        url,
        sha256,
    };
    template.render(&args)
}
