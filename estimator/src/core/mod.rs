pub mod config;
pub mod format;
pub mod inputs;
pub mod timing;
