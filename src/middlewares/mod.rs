pub mod authenticate_caller;
