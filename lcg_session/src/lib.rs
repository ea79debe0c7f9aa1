//! Linear congruential generator and the session state an interactive host
//! drives it through.

pub mod config;
pub mod error;
pub mod lcg_cpu;
pub mod session;
pub mod summary;

pub use config::SessionConfig;
pub use error::{Error, InvalidParameter, Result};
pub use lcg_cpu::{GeneratorParams, LinearCongruential};
pub use session::{SequenceEntry, SessionController, SessionSnapshot, SessionStatus};
pub use summary::SequenceSummary;
