pub mod dsl;
pub mod interpreter;
pub mod middleware;
