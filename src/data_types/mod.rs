pub mod configs;
pub mod sample;
pub mod viewport;

pub use configs::*;
pub use sample::*;
pub use viewport::*;
