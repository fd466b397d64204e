//! Paddle controllers
//!
//! Every paddle entity carries one [`Controller`]. The simulation only talks
//! to it through [`PaddleController`], so nothing outside this module needs to
//! know whether a human or the AI is behind a paddle.

pub mod ai;
pub mod player;

pub use ai::*;
pub use player::*;

use crate::{Arena, Ball, BallDeparted, GameRng, InputState, Modifiers, Paddle};

/// Direction of spin requested at contact, in paddle-axis terms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinDir {
    /// Toward the low end of the paddle axis (up, or left for horizontal paddles)
    Up,
    /// Toward the high end of the paddle axis
    Down,
}

impl SpinDir {
    pub fn sign(self) -> f32 {
        match self {
            SpinDir::Up => -1.0,
            SpinDir::Down => 1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            SpinDir::Up => SpinDir::Down,
            SpinDir::Down => SpinDir::Up,
        }
    }
}

/// What a controller wants at the instant the ball touches its paddle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Intent {
    pub up_held: bool,
    pub down_held: bool,
    pub spin: Option<SpinDir>,
}

impl Intent {
    /// Spin to impart: a single held key wins over a planned spin
    pub fn spin_dir(&self) -> Option<SpinDir> {
        match (self.up_held, self.down_held) {
            (true, false) => Some(SpinDir::Up),
            (false, true) => Some(SpinDir::Down),
            _ => self.spin,
        }
    }
}

/// Read-only view of the world handed to controllers each frame
#[derive(Debug, Clone, Copy)]
pub struct ControlContext<'a> {
    pub ball: &'a Ball,
    pub arena: &'a Arena,
    pub input: &'a InputState,
    pub modifiers: &'a Modifiers,
    pub now: f32,
    pub dt: f32,
    /// Ball is in play (false while waiting to serve)
    pub live: bool,
}

/// Capability shared by human and AI controllers
pub trait PaddleController: Send + Sync {
    /// Decide and apply this frame's paddle motion
    fn update(&mut self, paddle: &mut Paddle, ctx: &ControlContext, rng: &mut GameRng);

    /// Held keys and planned spin, queried at paddle contact
    fn intent(&self) -> Intent;

    /// Some paddle just returned the ball
    fn on_ball_departed(
        &mut self,
        _paddle: &Paddle,
        _event: &BallDeparted,
        _ctx: &ControlContext,
        _rng: &mut GameRng,
    ) {
    }

    /// A new serve is about to start
    fn reset(&mut self, _paddle: &Paddle, _ctx: &ControlContext) {}

    /// Internal AI fields for debug overlays
    fn debug(&self) -> Option<AiState> {
        None
    }
}

/// Controller component attached to each paddle entity
pub struct Controller(pub Box<dyn PaddleController>);

impl Controller {
    pub fn new(inner: impl PaddleController + 'static) -> Self {
        Self(Box::new(inner))
    }
}

impl std::fmt::Debug for Controller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Controller")
            .field("intent", &self.0.intent())
            .finish()
    }
}
