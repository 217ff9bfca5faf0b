//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the static file handler: MIME lookup,
//! Range parsing, response builders, and the no-cache injection hook.

pub mod mime;
pub mod nocache;
pub mod range;
pub mod response;

// Re-export commonly used items
pub use range::parse_range_header;
pub use response::{
    build_404_response, build_405_response, build_416_response, build_file_response,
    build_html_response, build_partial_response, build_redirect_response,
};
