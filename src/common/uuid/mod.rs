pub mod uuid4;
