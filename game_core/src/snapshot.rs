use glam::Vec2;

use crate::controllers::{AiState, Controller};
use crate::{Ball, Match, Mode, Paddle, Particle, Phase, Serve, Side};

/// Paddle as seen by a renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleView {
    pub side: Side,
    pub pos: Vec2,
    pub size: Vec2,
    /// Zone and aim for AI-driven paddles
    pub ai: Option<AiState>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleView {
    pub pos: Vec2,
    pub alpha: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoinTossView {
    pub highlighted: Side,
    pub winner: Option<Side>,
}

/// Read-only copy of everything a frame shows
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub phase: Phase,
    pub mode: Mode,
    pub now: f32,
    /// Present while the toss is running
    pub coin_toss: Option<CoinTossView>,
    pub ball: Ball,
    pub paddles: Vec<PaddleView>,
    pub particles: Vec<ParticleView>,
    pub scores: Vec<(Side, u8)>,
    pub match_timer: f32,
    pub serve_timer: f32,
    pub serve: Option<Serve>,
    pub winner: Option<Side>,
}

impl Match {
    pub fn snapshot(&self) -> Snapshot {
        let world = self.world();

        let mut paddles: Vec<PaddleView> = world
            .query::<(&Paddle, &Controller)>()
            .iter()
            .map(|(_e, (paddle, controller))| PaddleView {
                side: paddle.side,
                pos: paddle.pos,
                size: paddle.size,
                ai: controller.0.debug(),
            })
            .collect();
        paddles.sort_by_key(|view| view.side);

        let particles = world
            .query::<&Particle>()
            .iter()
            .map(|(_e, particle)| ParticleView {
                pos: particle.pos,
                alpha: particle.alpha(),
            })
            .collect();

        let coin_toss = (self.phase() == Phase::CoinToss).then(|| CoinTossView {
            highlighted: self.coin_toss().highlighted(),
            winner: self.coin_toss().winner(),
        });

        Snapshot {
            phase: self.phase(),
            mode: self.arena().mode,
            now: self.time().now,
            coin_toss,
            ball: self.ball(),
            paddles,
            particles,
            scores: self.score().for_sides(self.arena().sides()),
            match_timer: self.match_timer(),
            serve_timer: self.serve_timer(),
            serve: self.serve(),
            winner: self.winner(),
        }
    }
}
