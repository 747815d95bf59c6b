pub mod image;
pub mod types;

pub use self::image::{AngleImage, DepthImage, Image, LabelImage, PointImage};
pub use self::types::{PixelCoord, Point3};
