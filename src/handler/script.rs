//! Script override path
//!
//! Answers requests whose path ends in the configured script extension with
//! the configured MIME type instead of the inferred one. The body is the
//! raw file content, written in full.

use std::io::ErrorKind;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use tokio::fs;

use crate::config::AppState;
use crate::handler::router::RequestContext;
use crate::handler::static_files::resolve_path;
use crate::http;
use crate::http::response::build_file_response;
use crate::logger;

/// Serve a script file with the pinned Content-Type
///
/// A missing file is a plain 404, not a handler fault; any other I/O error
/// is a 500. Either way the connection stays usable.
pub async fn serve(
    ctx: &RequestContext<'_>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let file_path = match resolve_path(&state.root, ctx.path) {
        Ok(path) => path,
        Err(e) if e.kind() == ErrorKind::NotFound => return http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!("Failed to resolve '{}': {e}", ctx.path));
            return http::build_500_response();
        }
    };

    // A directory named like a script is still not a script
    if !file_path.is_file() {
        return http::build_404_response();
    }

    match fs::read(&file_path).await {
        Ok(content) => build_file_response(content, &state.config.script.mime_type, ctx.is_head),
        Err(e) if e.kind() == ErrorKind::NotFound => http::build_404_response(),
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read script '{}': {e}",
                file_path.display()
            ));
            http::build_500_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{
        Config, FilesConfig, LoggingConfig, PerformanceConfig, ScriptConfig, ServerConfig,
    };
    use std::path::Path;

    fn test_state(root: &Path) -> Arc<AppState> {
        let config = Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                workers: None,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                access_log: false,
                show_headers: false,
            },
            files: FilesConfig {
                root_dir: root.to_string_lossy().into_owned(),
                index_files: vec!["index.html".to_string()],
                directory_listing: true,
            },
            script: ScriptConfig {
                extension: ".js".to_string(),
                mime_type: "application/javascript".to_string(),
            },
            performance: PerformanceConfig {
                keep_alive_timeout: 5,
                read_timeout: 5,
                write_timeout: 5,
            },
        };
        Arc::new(AppState::new(config).expect("root should exist"))
    }

    fn make_root(name: &str) -> std::path::PathBuf {
        let root = std::env::temp_dir().join(format!("jserve-{}-{}", name, std::process::id()));
        std::fs::create_dir_all(&root).expect("create test root");
        root
    }

    #[tokio::test]
    async fn test_serves_existing_script() {
        let root = make_root("script-ok");
        std::fs::write(root.join("app.js"), b"console.log(1);").expect("write fixture");
        let state = test_state(&root);

        let ctx = RequestContext {
            path: "/app.js",
            is_head: false,
        };
        let resp = serve(&ctx, &state).await;

        assert_eq!(resp.status(), 200);
        assert_eq!(
            resp.headers().get("Content-Type").expect("content type"),
            "application/javascript"
        );
        assert_eq!(resp.headers().get_all("Content-Type").iter().count(), 1);
    }

    #[tokio::test]
    async fn test_missing_script_is_404() {
        let root = make_root("script-missing");
        let state = test_state(&root);

        let ctx = RequestContext {
            path: "/missing.js",
            is_head: false,
        };
        let resp = serve(&ctx, &state).await;

        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_traversal_is_rejected() {
        let root = make_root("script-traversal").join("inner");
        std::fs::create_dir_all(&root).expect("create inner root");
        std::fs::write(root.join("../outside.js"), b"nope").expect("write fixture");
        let state = test_state(&root);

        let ctx = RequestContext {
            path: "/../outside.js",
            is_head: false,
        };
        let resp = serve(&ctx, &state).await;

        assert_eq!(resp.status(), 404);
    }

    #[tokio::test]
    async fn test_directory_named_like_script_is_404() {
        let root = make_root("script-dir");
        std::fs::create_dir_all(root.join("fake.js")).expect("create dir fixture");
        let state = test_state(&root);

        let ctx = RequestContext {
            path: "/fake.js",
            is_head: false,
        };
        let resp = serve(&ctx, &state).await;

        assert_eq!(resp.status(), 404);
    }
}
