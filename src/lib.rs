//! jserve - a small static file server with a pinned script content type
//!
//! Serves files from a configured root directory over HTTP/1.x. Requests
//! whose path ends in the configured script extension are answered with a
//! fixed Content-Type instead of the inferred one; everything else goes
//! through the generic static file path.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
