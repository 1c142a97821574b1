pub mod dsl;
pub mod endpoint;
pub mod interpreter;
