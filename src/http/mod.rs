//! HTTP protocol layer module
//!
//! MIME inference and response builders, decoupled from routing and file
//! system logic.

pub mod mime;
pub mod response;

// Re-export commonly used builders
pub use response::{
    build_301_response, build_400_response, build_404_response, build_405_response,
    build_500_response, build_options_response,
};
