//! Single-shot HTTP GET of the release archive.
//!
//! Uses the curl crate (libcurl). The whole response body is buffered in
//! memory, then hashed. No retries.

use crate::checksum;
use crate::error::FormulaError;
use std::time::Duration;

/// Transfer settings. All timeouts default to none (libcurl waits indefinitely).
#[derive(Debug, Clone, Default)]
pub struct FetchOptions {
    pub connect_timeout: Option<Duration>,
    pub timeout: Option<Duration>,
    pub user_agent: Option<String>,
    /// Treat a non-2xx status as an error instead of hashing the error body.
    pub fail_on_http_error: bool,
}

/// Response status and full body of a GET.
#[derive(Debug, Clone)]
pub struct FetchedBody {
    pub status: u32,
    pub body: Vec<u8>,
}

impl FetchedBody {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// GET `url`, following redirects, and buffer the response body.
///
/// Any status code is returned as-is; callers decide what a non-2xx means.
pub fn fetch_body(url: &str, opts: &FetchOptions) -> Result<FetchedBody, FormulaError> {
    let download = |source| FormulaError::Download {
        url: url.to_string(),
        source,
    };

    let mut easy = curl::easy::Easy::new();
    configure(&mut easy, url, opts).map_err(download)?;

    let mut body: Vec<u8> = Vec::new();
    let mut got_response = false;
    let performed = {
        let mut transfer = easy.transfer();
        transfer
            .header_function(|line| {
                // A redirect hop's headers don't count; its target may still fail to connect.
                if line.starts_with(b"HTTP/") {
                    got_response = !is_redirect_status_line(line);
                }
                true
            })
            .map_err(download)?;
        transfer
            .write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })
            .map_err(download)?;
        transfer.perform()
    };

    if let Err(source) = performed {
        // Connection-phase failures (including on a redirect hop) are download
        // errors; anything after response headers is a body read failure.
        return Err(if got_response && !is_connect_error(&source) {
            FormulaError::ReadBody {
                url: url.to_string(),
                source,
            }
        } else {
            download(source)
        });
    }

    let status = easy.response_code().map_err(download)?;
    tracing::debug!("GET {} -> HTTP {} ({} bytes)", url, status, body.len());
    Ok(FetchedBody { status, body })
}

fn is_redirect_status_line(line: &[u8]) -> bool {
    if !line.starts_with(b"HTTP/") {
        return false;
    }
    line.split(|&b| b == b' ')
        .nth(1)
        .is_some_and(|code| code.starts_with(b"3"))
}

fn is_connect_error(e: &curl::Error) -> bool {
    e.is_couldnt_connect()
        || e.is_couldnt_resolve_host()
        || e.is_couldnt_resolve_proxy()
        || e.is_ssl_connect_error()
        || e.is_unsupported_protocol()
        || e.is_url_malformed()
        || e.is_too_many_redirects()
}

fn configure(
    easy: &mut curl::easy::Easy,
    url: &str,
    opts: &FetchOptions,
) -> Result<(), curl::Error> {
    easy.url(url)?;
    easy.get(true)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    if let Some(t) = opts.connect_timeout {
        easy.connect_timeout(t)?;
    }
    if let Some(t) = opts.timeout {
        easy.timeout(t)?;
    }
    if let Some(ua) = &opts.user_agent {
        easy.useragent(ua)?;
    }
    Ok(())
}

/// Download `url` and return the lowercase hex SHA-256 of the body.
///
/// A non-2xx response is hashed like any other body unless
/// `opts.fail_on_http_error` is set, so an error page yields a digest of the
/// error page.
pub fn sha256_from_url(url: &str, opts: &FetchOptions) -> Result<String, FormulaError> {
    let fetched = fetch_body(url, opts)?;
    if !fetched.is_success() {
        if opts.fail_on_http_error {
            return Err(FormulaError::HttpStatus {
                url: url.to_string(),
                status: fetched.status,
            });
        }
        tracing::warn!(
            "GET {} returned HTTP {}; hashing the response body anyway",
            url,
            fetched.status
        );
    }
    let digest = checksum::sha256_hex(&fetched.body);
    tracing::info!("sha256 of {} ({} bytes): {}", url, fetched.body.len(), digest);
    Ok(digest)
}
