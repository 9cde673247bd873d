//! Pure text-matching helpers shared by the source adapters.
//!
//! Nothing in here performs I/O; the adapters compose these functions into
//! their search strategies.

pub mod similarity;
pub mod variations;

pub use similarity::similarity;
pub use variations::{make_variations, model_variations};
