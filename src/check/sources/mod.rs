//! Source implementations for fetching the monitored page

pub mod http;

pub use http::HttpSource;
