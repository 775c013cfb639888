pub mod connection;
pub mod executor;
pub mod executor_factory;
pub mod target;
pub mod transfer;
