pub mod config;
pub mod error;
pub mod shutdown;

pub use config::*;
pub use error::*;
pub use shutdown::*;
