//! Static file serving module
//!
//! The generic file path: resolves URLs under the root directory, infers
//! content types, serves index files, and renders directory listings.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use tokio::fs;

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::http::{self, mime, response};
use crate::logger;

/// Characters escaped when emitting hrefs; `/` stays literal
const HREF_ENCODE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'?')
    .add(b'#')
    .add(b'%');

/// Serve a request on the default path
pub async fn serve(ctx: &RequestContext<'_>, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let resolved = match resolve_path(&state.root, ctx.path) {
        Ok(path) => path,
        Err(e) if e.kind() == ErrorKind::NotFound => return http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to resolve '{}': {e}", ctx.path));
            return http::build_500_response();
        }
    };

    if resolved.is_dir() {
        return serve_directory(ctx, state, &resolved).await;
    }

    serve_file(ctx, &resolved).await
}

/// Resolve a decoded URL path to a filesystem path under `root`.
///
/// Strips the leading separator, joins relative to the root, and
/// canonicalizes. Anything resolving outside the root is reported as
/// not found so traversal attempts and missing files are indistinguishable
/// to the client.
pub fn resolve_path(root: &Path, decoded: &str) -> std::io::Result<PathBuf> {
    let relative = decoded.trim_start_matches('/');
    let canonical = root.join(relative).canonicalize()?;

    if !canonical.starts_with(root) {
        logger::log_warning(&format!("Path traversal attempt blocked: {decoded}"));
        return Err(std::io::Error::new(
            ErrorKind::NotFound,
            "path escapes root directory",
        ));
    }

    Ok(canonical)
}

/// Serve a resolved directory: slash redirect, then index files, then listing
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
    dir: &Path,
) -> Response<Full<Bytes>> {
    // Directory URLs are canonical with a trailing slash; relative links in
    // listings and index pages break without it
    if !ctx.path.ends_with('/') {
        let location = format!("{}/", utf8_percent_encode(ctx.path, HREF_ENCODE));
        return response::build_301_response(&location);
    }

    for index in &state.config.files.index_files {
        let candidate = dir.join(index);
        if candidate.is_file() {
            return serve_file(ctx, &candidate).await;
        }
    }

    if !state.config.files.directory_listing {
        return http::build_404_response();
    }

    match read_dir_entries(dir).await {
        Ok(entries) => response::build_html_response(render_listing(ctx.path, &entries), ctx.is_head),
        Err(e) => {
            logger::log_error(&format!("Failed to list '{}': {e}", dir.display()));
            http::build_500_response()
        }
    }
}

/// Serve a resolved file with an inferred content type
async fn serve_file(ctx: &RequestContext<'_>, path: &Path) -> Response<Full<Bytes>> {
    match fs::read(path).await {
        Ok(content) => {
            let content_type = mime::content_type_for(path.extension().and_then(|e| e.to_str()));
            response::build_file_response(content, content_type, ctx.is_head)
        }
        Err(e) if e.kind() == ErrorKind::NotFound => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to read file '{}': {e}", path.display()));
            http::build_500_response()
        }
    }
}

/// Collect directory entries as (name, is_dir), sorted by name
async fn read_dir_entries(dir: &Path) -> std::io::Result<Vec<(String, bool)>> {
    let mut reader = fs::read_dir(dir).await?;
    let mut entries = Vec::new();

    while let Some(entry) = reader.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().await?.is_dir();
        entries.push((name, is_dir));
    }

    entries.sort();
    Ok(entries)
}

/// Render an HTML directory listing
///
/// Directories are shown with a trailing slash. Names are HTML-escaped in
/// the link text and percent-encoded in the href.
fn render_listing(path: &str, entries: &[(String, bool)]) -> String {
    let title = format!("Directory listing for {}", escape_html(path));
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n</head>\n<body>\n"));
    html.push_str(&format!("<h1>{title}</h1>\n<hr>\n<ul>\n"));

    for (name, is_dir) in entries {
        let display = if *is_dir {
            format!("{name}/")
        } else {
            name.clone()
        };
        let href = utf8_percent_encode(&display, HREF_ENCODE).to_string();
        html.push_str(&format!(
            "<li><a href=\"{href}\">{}</a></li>\n",
            escape_html(&display)
        ));
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
