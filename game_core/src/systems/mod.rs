pub mod collision;
pub mod movement;
pub mod particles;
pub mod scoring;

pub use collision::*;
pub use movement::*;
pub use particles::*;
pub use scoring::*;
