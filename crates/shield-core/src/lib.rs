pub mod config;
pub mod error;
pub mod types;

pub use config::ShieldConfig;
pub use error::{Result, ShieldError};
pub use types::*;
