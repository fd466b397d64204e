//! Keyboard-driven paddles

use std::fmt;

use crate::controllers::{ControlContext, Intent, PaddleController};
use crate::{ConfigError, GameRng, Paddle};

/// A physical key the driver reports as held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    /// Lowercase ASCII letter or digit
    Char(char),
}

impl Key {
    /// Parse a key name as reported by keyboard events ("ArrowUp", "w", "W", "8")
    pub fn parse(name: &str) -> Result<Key, ConfigError> {
        let key = match name {
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            " " | "Space" => Key::Space,
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => {
                        Key::Char(c.to_ascii_lowercase())
                    }
                    _ => return Err(ConfigError::MalformedKey(name.to_string())),
                }
            }
        };
        Ok(key)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::ArrowUp => f.write_str("ArrowUp"),
            Key::ArrowDown => f.write_str("ArrowDown"),
            Key::ArrowLeft => f.write_str("ArrowLeft"),
            Key::ArrowRight => f.write_str("ArrowRight"),
            Key::Space => f.write_str("Space"),
            Key::Char(c) => write!(f, "{c}"),
        }
    }
}

impl std::str::FromStr for Key {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::parse(s)
    }
}

/// The two keys that move one paddle. `up` moves toward the low end of the
/// paddle axis (left for horizontal paddles).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBinding {
    pub up: Key,
    pub down: Key,
}

impl KeyBinding {
    pub fn parse(up: &str, down: &str) -> Result<Self, ConfigError> {
        let binding = Self {
            up: Key::parse(up)?,
            down: Key::parse(down)?,
        };
        if binding.up == binding.down {
            return Err(ConfigError::DuplicateKey(binding.up.to_string()));
        }
        Ok(binding)
    }
}

/// Moves its paddle at full speed while a bound key is held
#[derive(Debug, Clone)]
pub struct PlayerController {
    binding: KeyBinding,
    up_held: bool,
    down_held: bool,
}

impl PlayerController {
    pub fn new(binding: KeyBinding) -> Self {
        Self {
            binding,
            up_held: false,
            down_held: false,
        }
    }

    pub fn binding(&self) -> KeyBinding {
        self.binding
    }

    /// -1 = up, 0 = stop, 1 = down
    fn dir(&self) -> i8 {
        self.down_held as i8 - self.up_held as i8
    }
}

impl PaddleController for PlayerController {
    fn update(&mut self, paddle: &mut Paddle, ctx: &ControlContext, _rng: &mut GameRng) {
        self.up_held = ctx.input.is_held(self.binding.up);
        self.down_held = ctx.input.is_held(self.binding.down);

        let dir = self.dir();
        if dir != 0 {
            let bounds = ctx.arena.along_bounds(paddle.side, paddle.half_length());
            paddle.slide(dir as f32 * paddle.speed * ctx.dt, bounds);
        }
    }

    fn intent(&self) -> Intent {
        Intent {
            up_held: self.up_held,
            down_held: self.down_held,
            spin: None,
        }
    }
}
