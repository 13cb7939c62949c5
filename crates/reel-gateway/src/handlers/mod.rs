mod health;
mod videos;

pub use health::*;
pub use videos::*;
