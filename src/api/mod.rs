//! The adapter between the dashboard and the spreadsheet service.
//!
//! Every call is a form-encoded POST to a single URL with an `action` field.
//! The replies are JSON in a handful of loosely defined shapes which are
//! normalized into the crate's own types here.

mod client;
mod error;
mod normalize;
mod transport;

pub use client::{ApiClient, UploadSummary};
pub use error::ApiError;
pub use transport::{HttpTransport, Transport};

#[cfg(test)]
pub use error::DEFAULT_REJECTION_MESSAGE;
