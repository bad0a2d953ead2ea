pub mod bounds;
pub mod buffer;
pub mod processor;

pub use bounds::{fit_dimensions, PreprocessConfig};
pub use buffer::PixelBuffer;
pub use processor::ImagePreprocessor;
