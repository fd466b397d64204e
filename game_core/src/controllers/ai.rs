//! Predictive AI opponent
//!
//! The AI never tracks the ball directly. While the ball approaches, it keeps
//! a predicted "zone" of likely arrival positions whose width shrinks as the
//! ball gets closer, and only commits to a new aim point inside that zone at
//! a difficulty-dependent cadence. Spin play is planned when the opponent
//! returns the ball, not at the AI's own hit.

use std::fmt;
use std::str::FromStr;

use tracing::debug;

use crate::controllers::{ControlContext, Intent, PaddleController, SpinDir};
use crate::systems::integrate_ball;
use crate::{Arena, Ball, BallDeparted, ConfigError, GameRng, Orientation, Paddle, Params, Side};

/// AI difficulty tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

/// Tuning tuple for one difficulty
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiProfile {
    /// Ball distance (px) below which the AI starts deciding
    pub reaction_distance: f32,
    /// Zone radius (px) once the ball is at the paddle
    pub zone_error: f32,
    /// Longest time (s) a decision is kept before re-evaluating
    pub stickiness: f32,
    /// Predict wall bounces and spin curvature
    pub anticipation: bool,
    /// Probability of planning spin for the next hit
    pub spin_chance: f64,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Normal, Difficulty::Hard];

    pub fn profile(self) -> AiProfile {
        match self {
            Difficulty::Easy => AiProfile {
                reaction_distance: 280.0,
                zone_error: 70.0,
                stickiness: 0.7,
                anticipation: false,
                spin_chance: 0.0,
            },
            Difficulty::Normal => AiProfile {
                reaction_distance: 450.0,
                zone_error: 40.0,
                stickiness: 0.45,
                anticipation: true,
                spin_chance: 0.2,
            },
            Difficulty::Hard => AiProfile {
                reaction_distance: 640.0,
                zone_error: 15.0,
                stickiness: 0.25,
                anticipation: true,
                spin_chance: 0.45,
            },
        }
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Difficulty::Easy => "easy",
            Difficulty::Normal => "normal",
            Difficulty::Hard => "hard",
        };
        f.write_str(name)
    }
}

/// Per-paddle AI memory, also exposed for debug overlays
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiState {
    /// Predicted arrival position along the paddle axis
    pub zone_center: f32,
    pub zone_radius: f32,
    /// Current target for the paddle center
    pub aim: f32,
    /// Simulation time of the next allowed decision
    pub next_decision_at: f32,
    pub spin_intent: Option<SpinDir>,
    /// Ball is currently heading for this paddle
    pub tracking: bool,
}

impl AiState {
    fn idle(rest: f32) -> Self {
        Self {
            zone_center: rest,
            zone_radius: 0.0,
            aim: rest,
            next_decision_at: 0.0,
            spin_intent: None,
            tracking: false,
        }
    }
}

/// Whether the edges running alongside this paddle's approach bounce the ball
fn has_side_walls(side: Side, arena: &Arena) -> bool {
    let perpendicular = match side.orientation() {
        Orientation::Vertical => Side::Top,
        Orientation::Horizontal => Side::Left,
    };
    !arena.is_goal_edge(perpendicular) || arena.tunnels
}

/// Step a copy of the ball until it reaches the contact plane of `side`.
///
/// Returns the along-axis position at contact, or `None` when the ball is not
/// heading for this side or never gets there within the step cap.
pub fn simulate_arrival(ball: &Ball, side: Side, arena: &Arena, anticipation: bool) -> Option<f32> {
    if !side.is_approached_by(ball.vel) {
        return None;
    }

    let orientation = side.orientation();
    let inward = orientation.across(side.inward());
    let target = arena.paddle_face(side) + inward * ball.radius;
    let extent = arena.along_extent(side);
    let (low, high) = (ball.radius, extent - ball.radius);
    let walls = anticipation && has_side_walls(side, arena);
    let max_angle = arena.mode.max_spin_angle();

    let mut sim = *ball;
    if !anticipation {
        sim.spin = 0.0;
    }

    for _ in 0..Params::AI_PREDICTION_MAX_STEPS {
        integrate_ball(&mut sim, Params::AI_PREDICTION_DT, max_angle);

        let before = (orientation.across(sim.prev_pos) - target) * inward;
        let after = (orientation.across(sim.pos) - target) * inward;
        if after <= 0.0 {
            let t = if before > after {
                (before / (before - after)).clamp(0.0, 1.0)
            } else {
                1.0
            };
            let along = orientation.along(sim.prev_pos.lerp(sim.pos, t));
            return Some(along.clamp(0.0, extent));
        }

        if walls {
            let along = orientation.along(sim.pos);
            let across = orientation.across(sim.pos);
            let along_vel = orientation.along(sim.vel);
            let across_vel = orientation.across(sim.vel);
            if along < low && along_vel < 0.0 {
                sim.pos = orientation.compose(2.0 * low - along, across);
                sim.vel = orientation.compose(-along_vel, across_vel);
                sim.spin = 0.0;
            } else if along > high && along_vel > 0.0 {
                sim.pos = orientation.compose(2.0 * high - along, across);
                sim.vel = orientation.compose(-along_vel, across_vel);
                sim.spin = 0.0;
            }
        }
    }

    None
}

/// Predicted zone center, falling back to the ball's current position
pub fn predict_zone_center(ball: &Ball, side: Side, arena: &Arena, anticipation: bool) -> f32 {
    simulate_arrival(ball, side, arena, anticipation)
        .unwrap_or_else(|| side.orientation().along(ball.pos))
}

/// Zone radius for a ball `distance` px away from the paddle face
pub fn zone_radius(profile: &AiProfile, distance: f32, max_distance: f32) -> f32 {
    let t = if max_distance > 0.0 {
        (distance / max_distance).clamp(0.0, 1.0)
    } else {
        0.0
    };
    profile.zone_error + (Params::AI_UNCERTAINTY - profile.zone_error) * t
}

/// Paddle driven by zone prediction
#[derive(Debug, Clone)]
pub struct AiController {
    difficulty: Difficulty,
    profile: AiProfile,
    state: AiState,
}

impl AiController {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            difficulty,
            profile: difficulty.profile(),
            state: AiState::idle(0.0),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn profile(&self) -> &AiProfile {
        &self.profile
    }

    pub fn state(&self) -> &AiState {
        &self.state
    }

    fn rest_position(side: Side, arena: &Arena) -> f32 {
        arena.along_extent(side) / 2.0
    }

    /// Refresh the zone and, when allowed, pick a new aim point
    fn track(&mut self, paddle: &Paddle, ctx: &ControlContext, rng: &mut GameRng) {
        let side = paddle.side;
        let orientation = side.orientation();
        let distance = (orientation.across(ctx.ball.pos) - ctx.arena.paddle_face(side)).abs();
        let max_distance = ctx.arena.across_extent(side);

        self.state.tracking = true;
        self.state.zone_center =
            predict_zone_center(ctx.ball, side, ctx.arena, self.profile.anticipation);
        self.state.zone_radius = zone_radius(&self.profile, distance, max_distance);

        if distance > self.profile.reaction_distance || ctx.now < self.state.next_decision_at {
            return;
        }

        self.state.aim = self.state.zone_center + rng.symmetric(self.state.zone_radius);
        let hold = (self.profile.stickiness * distance / max_distance).max(Params::AI_MIN_STICKINESS);
        self.state.next_decision_at = ctx.now + hold;

        debug!(
            ?side,
            zone_center = self.state.zone_center,
            zone_radius = self.state.zone_radius,
            aim = self.state.aim,
            hold,
            "AI decision"
        );
    }

    fn step_toward_aim(&self, paddle: &mut Paddle, ctx: &ControlContext) {
        let diff = self.state.aim - paddle.along();
        if diff.abs() <= Params::AI_DEAD_BAND {
            return;
        }
        let step = (paddle.speed * ctx.dt).min(diff.abs());
        let bounds = ctx.arena.along_bounds(paddle.side, paddle.half_length());
        paddle.slide(step.copysign(diff), bounds);
    }

    /// Opponent just returned the ball: maybe plan spin for our next hit
    fn plan_spin(&mut self, paddle: &Paddle, ball: &Ball, ctx: &ControlContext, rng: &mut GameRng) {
        self.state.spin_intent = None;
        if !ctx.modifiers.spin || self.profile.spin_chance <= 0.0 {
            return;
        }
        let side = paddle.side;
        let Some(center) = simulate_arrival(ball, side, ctx.arena, self.profile.anticipation) else {
            return;
        };

        let extent = ctx.arena.along_extent(side);
        let margin = extent * Params::AI_SAFE_BAND;
        if center < margin || center > extent - margin {
            return;
        }
        if !rng.chance(self.profile.spin_chance) {
            return;
        }

        let tendency = if center >= extent / 2.0 {
            SpinDir::Down
        } else {
            SpinDir::Up
        };
        let dir = if rng.chance(Params::AI_SPIN_FOLLOW) {
            tendency
        } else {
            tendency.flipped()
        };
        self.state.spin_intent = Some(dir);
        debug!(?side, ?dir, center, "AI plans spin");
    }
}

impl PaddleController for AiController {
    fn update(&mut self, paddle: &mut Paddle, ctx: &ControlContext, rng: &mut GameRng) {
        let side = paddle.side;
        if ctx.live && side.is_approached_by(ctx.ball.vel) {
            self.track(paddle, ctx, rng);
        } else {
            // Drift back to the middle while the ball is elsewhere
            self.state.tracking = false;
            self.state.aim = Self::rest_position(side, ctx.arena);
            self.state.zone_center = self.state.aim;
            self.state.zone_radius = 0.0;
        }
        self.step_toward_aim(paddle, ctx);
    }

    fn intent(&self) -> Intent {
        Intent {
            up_held: false,
            down_held: false,
            spin: self.state.spin_intent,
        }
    }

    fn on_ball_departed(
        &mut self,
        paddle: &Paddle,
        event: &BallDeparted,
        ctx: &ControlContext,
        rng: &mut GameRng,
    ) {
        if event.side == paddle.side {
            // Our own hit consumed any planned spin
            self.state.spin_intent = None;
            self.state.tracking = false;
            return;
        }
        self.state.next_decision_at = ctx.now;
        self.plan_spin(paddle, &event.ball, ctx, rng);
    }

    fn reset(&mut self, paddle: &Paddle, ctx: &ControlContext) {
        self.state = AiState::idle(Self::rest_position(paddle.side, ctx.arena));
    }

    fn debug(&self) -> Option<AiState> {
        Some(self.state)
    }
}
