mod error;
pub use error::MorphologyError;

mod footprint;
pub use footprint::Footprint;

mod ops;
pub use ops::{grey_closing, grey_dilation, grey_erosion, grey_opening};
