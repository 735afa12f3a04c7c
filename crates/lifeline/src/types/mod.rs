//! Domain types for the typed endpoints
//!
//! These are plain serde payloads; the pipeline itself is agnostic to their shape.

pub use analytics::*;
pub use coach::*;
pub use conversation::*;
pub use profile::*;

pub mod analytics;
pub mod coach;
pub mod conversation;
pub mod profile;
