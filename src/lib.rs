pub mod config;
pub mod logger;

#[doc(hidden)]
pub use log as __log;
