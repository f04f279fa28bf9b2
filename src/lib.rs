//! Weighbridge Console Library
//!
//! Thin client for a remote weighbridge (truck scale) data service:
//! querying records, paging and summarizing result sets, bulk import
//! and Excel export. All business logic lives on the backend; this
//! crate does presentation and form handling.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod export;
pub mod import;
pub mod output;
pub mod types;
pub mod view;
