//! Application layer: services and use cases
//!
//! This layer drives the domain tree from host events and depends on I/O boundary traits.

pub mod error;
pub mod error_ext;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use services::{EventOutcome, ReplayReport, ReplayService, Session};
