//! Revision check of a published gist list
//!
//! One run fetches the gist page, extracts the revision ID embedded in its
//! raw-file links, compares it with the revision saved by the previous run and
//! reports one Nagios status.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │   Source    │────▶│   Runner    │◀───▶│    Store    │
//! │  (fetch)    │     │  (compare)  │     │ (save file) │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!        │                   │
//!        ▼                   ▼
//! ┌─────────────┐     ┌─────────────┐
//! │   Sources   │     │  Revision   │
//! │   (http)    │     │  (extract)  │
//! └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`source`]: Source trait for fetching the page
//! - [`sources`]: Concrete sources (HTTP)
//! - [`revision`]: Revision ID type and marker-based extraction
//! - [`store`]: Save file trait and file implementation
//! - [`runner`]: The check sequence, mapping every path to a status
//! - [`status`]: Nagios status codes and the reported line
//! - [`error`]: Error types for fetching, storing and checking

pub mod error;
pub mod revision;
pub mod runner;
pub mod source;
pub mod sources;
pub mod status;
pub mod store;

pub use runner::VersionCheck;
pub use status::{CheckOutcome, NagiosStatus};
