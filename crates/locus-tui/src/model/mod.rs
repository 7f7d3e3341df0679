pub mod config;
pub mod toast;
