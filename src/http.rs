/// HTTP transport for the review-hosting API
///
/// This module handles:
/// - The shared blocking HTTP agent
/// - Authenticated GET requests
/// - Turning status and transport failures into readable errors
use log::debug;

const USER_AGENT: &str = concat!("reviewer-matrix/", env!("CARGO_PKG_VERSION"));

lazy_static::lazy_static! {
    static ref AGENT: ureq::Agent = ureq::AgentBuilder::new().user_agent(USER_AGENT).build();
}

/// GET a URL with the bearer token and return the response body
pub fn http_get_string(url: &str, token: &str) -> Result<String, String> {
    debug!("GET {}", url);

    let result = AGENT
        .get(url)
        .set("Authorization", &format!("Bearer {}", token))
        .set("Accept", "application/vnd.github+json")
        .call();

    match result {
        Ok(resp) => resp.into_string().map_err(|e| format!("Failed to read response from {}: {}", url, e)),
        Err(ureq::Error::Status(code, resp)) => {
            let rate_limited = resp.header("x-ratelimit-remaining") == Some("0");
            let body = resp.into_string().unwrap_or_default();
            Err(describe_status_error(url, code, rate_limited, &body))
        }
        Err(ureq::Error::Transport(transport)) => Err(format!("Request to {} failed: {}", url, transport)),
    }
}

/// Build the message for a non-2xx response
fn describe_status_error(url: &str, code: u16, rate_limited: bool, body: &str) -> String {
    let body = body.trim();
    let detail = if body.is_empty() { String::new() } else { format!(": {}", body) };

    if rate_limited && (code == 403 || code == 429) {
        format!("Rate limit exceeded for {} (HTTP {}){}", url, code, detail)
    } else if code == 401 {
        format!("Authentication failed for {} (HTTP 401), check the access token{}", url, detail)
    } else {
        format!("Request to {} returned HTTP {}{}", url, code, detail)
    }
}
