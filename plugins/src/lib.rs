pub mod alert;
pub mod factory;
pub mod functions;
pub mod services;
