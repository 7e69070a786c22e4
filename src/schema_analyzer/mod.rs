// Schema analyzer module: normalization and layout
pub mod layout;
pub mod normalizer;


pub use layout::*;
pub use normalizer::*;
