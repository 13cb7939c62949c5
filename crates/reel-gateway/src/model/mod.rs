mod health;
mod video;

pub use health::*;
pub use video::*;
