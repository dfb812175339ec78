pub mod config;

pub use config::ExecutorConfig;
