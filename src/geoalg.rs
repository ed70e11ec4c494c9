pub mod element;
pub mod matrix;
