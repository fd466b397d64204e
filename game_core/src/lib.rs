//! Deterministic Pong simulation
//!
//! A [`Match`] owns an ECS world (ball, paddles, particles) and advances it one
//! frame per [`Match::update`] call: controllers move paddles, the ball is
//! integrated and swept against paddles and walls, goals are scored, and the
//! COIN_TOSS -> SERVE -> PLAY -> END state machine moves on. Renderers read a
//! [`Snapshot`]; reporters take the [`MatchResult`] once the match ends.

pub mod arena;
pub mod coin_toss;
pub mod components;
pub mod config;
pub mod controllers;
pub mod error;
pub mod game;
pub mod modifiers;
pub mod params;
pub mod resources;
pub mod snapshot;
pub mod systems;

pub use arena::*;
pub use coin_toss::*;
pub use components::*;
pub use config::*;
pub use error::*;
pub use game::*;
pub use modifiers::*;
pub use params::*;
pub use resources::*;
pub use snapshot::*;

use controllers::Controller;
use hecs::World;

/// Helper to create a paddle entity
pub fn create_paddle(world: &mut World, paddle: Paddle, controller: Controller) -> hecs::Entity {
    world.spawn((paddle, controller))
}

/// Helper to create the ball entity
pub fn create_ball(world: &mut World, pos: glam::Vec2, vel: glam::Vec2, radius: f32) -> hecs::Entity {
    world.spawn((Ball::new(pos, vel, radius),))
}
