pub mod error;
pub mod gateways;
pub mod orchestrator;
pub mod pass;

pub use error::{Result, SweepError};
pub use orchestrator::{Orchestrator, Outcome};
pub use pass::{discover_descriptors, run_pass, PassSummary};
