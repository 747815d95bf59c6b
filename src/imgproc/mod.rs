pub mod filter;
pub mod morphology;

pub use filter::{savitzky_golay_kernel, smooth_columns};
pub use morphology::dilate;
