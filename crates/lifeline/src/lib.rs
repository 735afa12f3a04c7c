//! # Lifeline
//!
//! Resilient request pipeline for client applications:
//! - Bearer credentials from a pluggable [`CredentialProvider`]
//! - A timeout budget per attempt, enforced by cancellation
//! - One retry for transport failures, one for expired credentials
//! - A stable error taxonomy ([`ErrorKind`]) for every failure
//! - Typed endpoints for coaches, profile, conversations and analytics
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use lifeline::{Client, CoachSearch, ErrorKind, StaticCredentials};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = Client::builder()
//!         .base_url("https://api.example.com")
//!         .credentials(Arc::new(StaticCredentials::new("token")))
//!         .build()?;
//!
//!     match client.coaches().search(&CoachSearch::new().specialty("career")).await {
//!         Ok(coaches) => println!("{} coaches", coaches.len()),
//!         Err(e) if e.kind() == ErrorKind::NetworkError => println!("offline"),
//!         Err(e) => println!("{}", e.message()),
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, ClientBuilder};
pub use config::{ClientConfig, ClientConfigBuilder, ConnectionPoolConfig};
pub use credentials::{Credential, CredentialProvider, StaticCredentials};
pub use error::{Error, ErrorKind, Result};
pub use observability::{ErrorReporter, ReportError, ServerErrorEvent, TracingReporter};
pub use types::*;

// Module declarations
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod http;
pub mod observability;
pub mod resources;
pub mod types;

// Re-export key dependencies for convenience
pub use async_trait::async_trait;

/// Prelude module for common imports
///
/// # Examples
///
/// ```rust
/// use lifeline::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        Client, ClientConfig, Credential, CredentialProvider, Error, ErrorKind, Result,
        StaticCredentials,
        types::{
            AnalyticsEvent, ChatMessage, Coach, CoachSearch, Conversation, NewMessage, Page,
            ProfileUpdate, UserProfile,
        },
    };
}

/// Crate version, automatically updated from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
