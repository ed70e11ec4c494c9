pub mod error;
pub mod geoalg;
pub mod statistics;
pub mod nn;
pub mod timed;
pub mod prettify;

pub use error::{Error, Result};
pub use geoalg::element::{Element, Real};
pub use geoalg::matrix::{Matrix, Shaped, Vector};
