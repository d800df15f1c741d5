//! Release metadata: download URL construction and the template arguments.

/// Download location of the darwin CockroachDB archive; `{version}` is replaced.
pub const DEFAULT_URL_PATTERN: &str =
    "https://binaries.cockroachdb.com/cockroach-v{version}.darwin-10.9-amd64.tgz";

/// Placeholder substituted by [`release_url`].
pub const VERSION_PLACEHOLDER: &str = "{version}";

/// Build the download URL for `version`. The version is used as given.
pub fn release_url(pattern: &str, version: &str) -> String {
    pattern.replace(VERSION_PLACEHOLDER, version)
}

/// Values substituted into the formula template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateArgs {
    pub version: String,
    pub url: String,
    /// Lowercase hex SHA-256 of the archive (64 chars).
    pub sha256: String,
}

impl TemplateArgs {
    /// Look up a field by its template name (`Version`, `URL`, `SHA256`).
    pub fn field(&self, name: &str) -> Option<&str> {
        match name {
            "Version" => Some(&self.version),
            "URL" => Some(&self.url),
            "SHA256" => Some(&self.sha256),
            _ => None,
        }
    }
}
