pub mod config;
pub mod error;
pub mod middleware;
pub mod scylla;
