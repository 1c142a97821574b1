pub mod common;
pub mod endpoints;
pub mod helper;
pub mod middlewares;
pub mod startup;
