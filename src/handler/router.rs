//! Request routing dispatch module
//!
//! Entry point for HTTP request processing. Validates the method, decodes
//! the path, then takes one of two leaves: the script override path or the
//! delegated static file path.

use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::{Body as _, Bytes};
use hyper::{Method, Request, Response};
use percent_encoding::percent_decode_str;

use crate::config::AppState;
use crate::handler::{script, static_files};
use crate::http;
use crate::logger;

/// Request context encapsulating information needed for request processing
pub struct RequestContext<'a> {
    /// Decoded URL path, always starting with `/`
    pub path: &'a str,
    pub is_head: bool,
}

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let raw_path = req.uri().path().to_string();
    let is_head = method == Method::HEAD;

    logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);

    let response = match check_http_method(&method) {
        Some(resp) => resp,
        None => match decode_path(&raw_path) {
            Some(decoded) => {
                let ctx = RequestContext {
                    path: &decoded,
                    is_head,
                };
                if is_script_path(&decoded, &state.config.script.extension) {
                    script::serve(&ctx, &state).await
                } else {
                    static_files::serve(&ctx, &state).await
                }
            }
            None => {
                logger::log_warning(&format!("Malformed percent-encoding in path: {raw_path}"));
                http::build_400_response()
            }
        },
    };

    if state.config.logging.access_log {
        let body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        logger::log_access(
            &peer_addr.to_string(),
            method.as_str(),
            &raw_path,
            response.status().as_u16(),
            body_bytes,
        );
    }

    Ok(response)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method) -> Option<Response<Full<Bytes>>> {
    match *method {
        Method::GET | Method::HEAD => None,
        Method::OPTIONS => Some(http::build_options_response()),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Decode the percent-encoded path component
///
/// The query string and fragment never reach `uri.path()`, so only the path
/// itself is decoded here. Returns `None` when the decoded bytes are not
/// valid UTF-8.
pub fn decode_path(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}

/// The route decision: does this path take the script override?
pub fn is_script_path(path: &str, extension: &str) -> bool {
    !extension.is_empty() && path.ends_with(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_path_match() {
        assert!(is_script_path("/app.js", ".js"));
        assert!(is_script_path("/nested/dir/bundle.js", ".js"));
        assert!(!is_script_path("/index.html", ".js"));
        assert!(!is_script_path("/", ".js"));
    }

    #[test]
    fn test_extension_mid_path_is_not_a_match() {
        assert!(!is_script_path("/app.js/readme.txt", ".js"));
        assert!(!is_script_path("/app.json", ".js"));
    }

    #[test]
    fn test_match_is_case_sensitive() {
        assert!(!is_script_path("/APP.JS", ".js"));
    }

    #[test]
    fn test_empty_extension_never_matches() {
        assert!(!is_script_path("/anything", ""));
    }

    #[test]
    fn test_decode_path() {
        assert_eq!(decode_path("/app.js").as_deref(), Some("/app.js"));
        assert_eq!(
            decode_path("/with%20space.txt").as_deref(),
            Some("/with space.txt")
        );
        assert_eq!(decode_path("/100%25.txt").as_deref(), Some("/100%.txt"));
        // Stray percent signs pass through undecoded
        assert_eq!(decode_path("/50%off.txt").as_deref(), Some("/50%off.txt"));
    }

    #[test]
    fn test_decode_path_rejects_invalid_utf8() {
        assert_eq!(decode_path("/%FF%FE"), None);
    }

    #[test]
    fn test_decoded_path_drives_the_route() {
        // "%2E" decodes to "." so the encoded form still routes as a script
        let decoded = decode_path("/app%2Ejs").expect("valid encoding");
        assert!(is_script_path(&decoded, ".js"));
    }
}
