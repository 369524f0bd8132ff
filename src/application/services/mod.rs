//! Application services

pub mod replay;
pub mod session;

pub use replay::{ReplayReport, ReplayService};
pub use session::{EventOutcome, Session};
