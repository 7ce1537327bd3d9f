pub mod operations;
pub mod suggest;
