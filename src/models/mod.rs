//! Data models for TMDA register searches.
//!
//! This module defines the data structures used throughout the application:
//!
//! - [`DatabaseType`] / [`SearchCategory`] - The searchable registers and
//!   the record fields a query can match against
//! - [`SearchRequest`] - An immutable search as submitted by the user
//! - [`SearchResultItem`] - One validated entry of a result set
//! - [`Source`] - A web citation backing a search reply
//!
//! The enums carry explicit `encode()`/`decode()` string tokens for session
//! persistence; decoding an unknown token falls back to the default value
//! instead of raising an error.

pub mod request;
pub mod result;

pub use request::{DatabaseType, SearchCategory, SearchRequest};
pub use result::{RegistrationStatus, SearchResultItem, Source};
