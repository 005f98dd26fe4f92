pub mod error;
pub mod matrix;
pub mod point;
pub mod route;
