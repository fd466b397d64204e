use crate::controllers::{Difficulty, KeyBinding};
use crate::{ConfigError, Modifiers, Params, Side};

/// Number of paddles in play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    TwoPaddle,
    FourPaddle,
}

impl Mode {
    pub fn sides(self) -> &'static [Side] {
        match self {
            Mode::TwoPaddle => &[Side::Left, Side::Right],
            Mode::FourPaddle => &Side::ALL,
        }
    }

    pub fn max_bounce_angle(self) -> f32 {
        match self {
            Mode::TwoPaddle => Params::BOUNCE_ANGLE_TWO,
            Mode::FourPaddle => Params::BOUNCE_ANGLE_FOUR,
        }
    }

    pub fn max_spin_angle(self) -> f32 {
        match self {
            Mode::TwoPaddle => Params::SPIN_MAX_ANGLE_TWO,
            Mode::FourPaddle => Params::SPIN_MAX_ANGLE_FOUR,
        }
    }
}

/// Game configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub arena_width: f32,
    pub arena_height: f32,
    pub goal_size: f32,
    pub goal_margin: f32,
    pub paddle_thickness: f32,
    pub paddle_length: f32,
    pub paddle_margin: f32,
    pub paddle_speed: f32,
    pub ball_radius: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_increase: f32,
    pub win_score: u8,
    pub match_duration: f32,
    pub serve_delay: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            arena_width: Params::ARENA_WIDTH,
            arena_height: Params::ARENA_HEIGHT,
            goal_size: Params::GOAL_SIZE,
            goal_margin: Params::GOAL_MARGIN,
            paddle_thickness: Params::PADDLE_THICKNESS,
            paddle_length: Params::PADDLE_LENGTH,
            paddle_margin: Params::PADDLE_MARGIN,
            paddle_speed: Params::PADDLE_SPEED,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_increase: Params::BALL_SPEED_INCREASE,
            win_score: Params::WIN_SCORE,
            match_duration: Params::MATCH_DURATION,
            serve_delay: Params::SERVE_DELAY,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject tunings the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("arena_width", self.arena_width),
            ("arena_height", self.arena_height),
            ("paddle_thickness", self.paddle_thickness),
            ("paddle_length", self.paddle_length),
            ("paddle_speed", self.paddle_speed),
            ("ball_radius", self.ball_radius),
            ("ball_speed_initial", self.ball_speed_initial),
            ("match_duration", self.match_duration),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }
        let non_negative = [
            ("goal_margin", self.goal_margin),
            ("paddle_margin", self.paddle_margin),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidTuning { field, value });
            }
        }
        // The opening must fit on the shortest edge a goal can sit on
        let shortest_edge = self.arena_width.min(self.arena_height);
        if !(self.goal_size > 0.0 && self.goal_size <= shortest_edge) {
            return Err(ConfigError::InvalidTuning {
                field: "goal_size",
                value: self.goal_size,
            });
        }
        if self.ball_speed_increase.is_nan() || self.ball_speed_increase < 1.0 {
            return Err(ConfigError::InvalidTuning {
                field: "ball_speed_increase",
                value: self.ball_speed_increase,
            });
        }
        if self.serve_delay.is_nan() || self.serve_delay < 0.0 {
            return Err(ConfigError::InvalidTuning {
                field: "serve_delay",
                value: self.serve_delay,
            });
        }
        if self.win_score == 0 {
            return Err(ConfigError::InvalidTuning {
                field: "win_score",
                value: 0.0,
            });
        }
        Ok(())
    }
}

/// How one side is controlled, as written in the match setup
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControllerSpec {
    /// Human player; key names such as "ArrowUp" or "w"
    Human { up: String, down: String },
    /// AI opponent; difficulty tag "easy", "normal" or "hard"
    Ai { difficulty: String },
}

impl ControllerSpec {
    pub fn human(up: &str, down: &str) -> Self {
        ControllerSpec::Human {
            up: up.to_string(),
            down: down.to_string(),
        }
    }

    pub fn ai(difficulty: &str) -> Self {
        ControllerSpec::Ai {
            difficulty: difficulty.to_string(),
        }
    }
}

/// Validated controller choice for one side
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerKind {
    Human(KeyBinding),
    Ai(Difficulty),
}

impl ControllerKind {
    pub fn is_ai(&self) -> bool {
        matches!(self, ControllerKind::Ai(_))
    }
}

/// Everything needed to start a match
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    pub mode: Mode,
    pub controllers: Vec<(Side, ControllerSpec)>,
    pub modifiers: Modifiers,
    /// Perspective of the result event
    pub local_side: Side,
    pub seed: u64,
    pub tuning: Config,
}

impl MatchConfig {
    pub fn new(mode: Mode, controllers: Vec<(Side, ControllerSpec)>) -> Self {
        Self {
            mode,
            controllers,
            modifiers: Modifiers::none(),
            local_side: Side::Left,
            seed: 12345,
            tuning: Config::default(),
        }
    }

    /// Human on the left with W/S against an AI on the right
    pub fn versus_ai(difficulty: &str) -> Self {
        Self::new(
            Mode::TwoPaddle,
            vec![
                (Side::Left, ControllerSpec::human("w", "s")),
                (Side::Right, ControllerSpec::ai(difficulty)),
            ],
        )
    }

    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check every side and parse bindings and difficulty tags
    pub fn resolve(&self) -> Result<Vec<(Side, ControllerKind)>, ConfigError> {
        self.tuning.validate()?;

        let mut resolved: Vec<(Side, ControllerKind)> = Vec::with_capacity(self.controllers.len());
        let mut bound_keys = Vec::new();

        for (side, spec) in &self.controllers {
            if !self.mode.sides().contains(side) {
                return Err(ConfigError::UnexpectedSide(*side));
            }
            if resolved.iter().any(|(s, _)| s == side) {
                return Err(ConfigError::DuplicateSide(*side));
            }

            let kind = match spec {
                ControllerSpec::Human { up, down } => {
                    let binding = KeyBinding::parse(up, down)?;
                    for key in [binding.up, binding.down] {
                        if bound_keys.contains(&key) {
                            return Err(ConfigError::DuplicateKey(key.to_string()));
                        }
                        bound_keys.push(key);
                    }
                    ControllerKind::Human(binding)
                }
                ControllerSpec::Ai { difficulty } => ControllerKind::Ai(difficulty.parse()?),
            };
            resolved.push((*side, kind));
        }

        for side in self.mode.sides() {
            if !resolved.iter().any(|(s, _)| s == side) {
                return Err(ConfigError::MissingSide(*side));
            }
        }
        if !self.mode.sides().contains(&self.local_side) {
            return Err(ConfigError::UnexpectedSide(self.local_side));
        }

        resolved.sort_by_key(|(side, _)| *side);
        Ok(resolved)
    }
}
