//! Command implementations.

pub mod config;
pub mod extract;
pub mod vault;

pub use self::config::execute_config;
pub use self::extract::execute_extract;
pub use self::vault::execute_vault;
