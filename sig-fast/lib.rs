//! FAST-9 keypoint detection tuned for binarized images: segment test,
//! Harris scoring, distance-based non-maximum suppression and
//! intensity-centroid orientation.

mod corner_detection;
mod detector;
mod error;
mod refinement;
mod types;
mod utils;

pub use corner_detection::CornerDetector;
pub use detector::FastDetector;
pub use error::{FastError, FastResult};
pub use refinement::KeypointRefinement;
pub use types::CornerType;
pub use utils::has_consecutive_pixels;
