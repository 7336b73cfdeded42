//! Logger module
//!
//! Startup, access, and error logging. Access lines follow the Common Log
//! Format so standard tooling can parse them.

use std::net::SocketAddr;

use chrono::Local;

use crate::config::Config;

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    println!("======================================");
    println!("Static file server started");
    println!("Serving on: http://{addr}");
    println!("Root directory: {}", config.files.root_dir);
    println!(
        "Script override: {} -> {}",
        config.script.extension, config.script.mime_type
    );
    println!("Log level: {}", config.logging.level);
    if let Some(workers) = config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

/// Common Log Format access line:
/// `remote - - [time] "METHOD /path HTTP/ver" status bytes`
pub fn log_access(remote: &str, method: &str, path: &str, status: u16, body_bytes: usize) {
    println!(
        "{} - - [{}] \"{} {} HTTP/1.1\" {} {}",
        remote,
        Local::now().format("%d/%b/%Y:%H:%M:%S %z"),
        method,
        path,
        status,
        body_bytes,
    );
}

pub fn log_headers_count(count: usize, show: bool) {
    if show {
        println!("[Headers] Count: {count}");
    }
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}
