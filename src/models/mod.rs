pub mod image;
pub mod result;

pub use image::*;
pub use result::*;
