//! Subscriber API transport
//!
//! Thin asynchronous client for the subscriber-management API: bearer-token
//! authentication, a configurable timeout, and normalized typed errors.

pub mod client;
pub mod error;

pub use client::SubscriberClient;
pub use error::{ApiError, FieldError};
