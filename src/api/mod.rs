//! HTTP Client for the Weighbridge Backend
//!
//! The backend is a single web-app endpoint dispatched on an `action`
//! parameter: reads go out as GET with the parameters in the query string,
//! bulk writes as POST with a JSON body. Every response is a
//! `{success, data, error, ...}` envelope.

pub mod client;
pub mod response;

pub use client::ApiClient;
pub use response::{Envelope, ImportReply, QueryReply};
