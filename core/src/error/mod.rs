#[allow(clippy::module_inception)]
pub mod error;
pub mod executor;

pub use error::{CliError, WorkloadError};
pub use executor::{ExecutorError, RegistryError, TaskError, TaskErrorKind};
