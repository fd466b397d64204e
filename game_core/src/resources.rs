use std::collections::HashSet;

use glam::Vec2;

use crate::controllers::Key;
use crate::{Ball, Side};

/// Time resource for tracking simulation time
#[derive(Debug, Clone, Copy)]
pub struct Time {
    pub dt: f32,  // Delta time for this step
    pub now: f32, // Total elapsed time
}

impl Time {
    pub fn new(dt: f32, now: f32) -> Self {
        Self { dt, now }
    }
}

impl Default for Time {
    fn default() -> Self {
        Self {
            dt: 1.0 / 60.0,
            now: 0.0,
        }
    }
}

/// Game score tracking, one slot per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Score {
    pub points: [u8; 4],
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, side: Side) -> u8 {
        self.points[side.index()]
    }

    pub fn increment(&mut self, side: Side) {
        let slot = &mut self.points[side.index()];
        *slot = slot.saturating_add(1);
    }

    /// First side (in `sides` order) at or above the cap
    pub fn has_winner(&self, win_score: u8, sides: &[Side]) -> Option<Side> {
        sides.iter().copied().find(|side| self.get(*side) >= win_score)
    }

    /// Side with the strictly highest score, `None` on a tie
    pub fn leader(&self, sides: &[Side]) -> Option<Side> {
        let best = sides.iter().map(|side| self.get(*side)).max()?;
        let mut leaders = sides.iter().filter(|side| self.get(**side) == best);
        match (leaders.next(), leaders.next()) {
            (Some(side), None) => Some(*side),
            _ => None,
        }
    }

    /// Scores for the given sides, in order
    pub fn for_sides(&self, sides: &[Side]) -> Vec<(Side, u8)> {
        sides.iter().map(|side| (*side, self.get(*side))).collect()
    }
}

/// Random number generator
pub struct GameRng(pub rand::rngs::StdRng);

impl GameRng {
    pub fn new(seed: u64) -> Self {
        use rand::SeedableRng;
        Self(rand::rngs::StdRng::seed_from_u64(seed))
    }

    /// Uniform draw in `[lo, hi)`; returns `lo` for an empty range
    pub fn range(&mut self, lo: f32, hi: f32) -> f32 {
        use rand::Rng;
        if hi > lo {
            self.0.gen_range(lo..hi)
        } else {
            lo
        }
    }

    /// Uniform draw in `[-half, half)`
    pub fn symmetric(&mut self, half: f32) -> f32 {
        self.range(-half, half)
    }

    pub fn chance(&mut self, p: f64) -> bool {
        use rand::Rng;
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    pub fn index(&mut self, len: usize) -> usize {
        use rand::Rng;
        if len <= 1 {
            0
        } else {
            self.0.gen_range(0..len)
        }
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::new(12345)
    }
}

impl std::fmt::Debug for GameRng {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GameRng")
    }
}

/// Keys held down for the current frame
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: Key) {
        self.held.insert(key);
    }

    pub fn release(&mut self, key: Key) {
        self.held.remove(&key);
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    pub fn clear(&mut self) {
        self.held.clear();
    }
}

/// Ball leaving a paddle after a valid hit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallDeparted {
    pub side: Side,
    /// Ball state right after the hit was resolved
    pub ball: Ball,
    pub spin: f32,
}

/// Ball crossing a goal line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Goal {
    pub conceded: Side,
    /// `None` when nobody is credited (four-paddle own goals without a second toucher)
    pub scorer: Option<Side>,
}

/// Request for a particle spray at an impact point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Burst {
    pub pos: Vec2,
    /// Particles fan out around this direction
    pub normal: Vec2,
    pub count: usize,
}

/// Events that occurred during this frame
#[derive(Debug, Clone, Default)]
pub struct Events {
    pub goal: Option<Goal>,
    pub ball_hit_paddle: Option<Side>,
    pub ball_hit_wall: bool,
    /// Ball slipped into the goal tunnel on this side
    pub tunnel_entered: Option<Side>,
    pub departures: Vec<BallDeparted>,
    pub bursts: Vec<Burst>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.goal = None;
        self.ball_hit_paddle = None;
        self.ball_hit_wall = false;
        self.tunnel_entered = None;
        self.departures.clear();
        self.bursts.clear();
    }
}

/// Which paddles touched the ball most recently in this rally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Touches {
    pub last: Option<Side>,
    pub penultimate: Option<Side>,
}

impl Touches {
    pub fn record(&mut self, side: Side) {
        if self.last != Some(side) {
            self.penultimate = self.last;
            self.last = Some(side);
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Side credited with a goal conceded by `conceded`
    pub fn credited(&self, conceded: Side) -> Option<Side> {
        match (self.last, self.penultimate) {
            (Some(last), _) if last != conceded => Some(last),
            (_, Some(prev)) if prev != conceded => Some(prev),
            _ => None,
        }
    }
}
