//! Web search via the Exa content-search API, plus best-effort contact
//! extraction from result text.

pub mod client;
pub mod contacts;
pub mod error;
pub mod types;

pub use client::{ExaClient, SearchOptions};
pub use contacts::extract_contact_info;
pub use error::ExaError;
pub use types::{ContactInfo, SearchResponse, SearchResult};
