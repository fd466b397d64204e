use glam::Vec2;

/// Arena edge a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Left,
    Right,
    Top,
    Bottom,
}

impl Side {
    pub const ALL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
            Side::Top => 2,
            Side::Bottom => 3,
        }
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    pub fn orientation(self) -> Orientation {
        match self {
            Side::Left | Side::Right => Orientation::Vertical,
            Side::Top | Side::Bottom => Orientation::Horizontal,
        }
    }

    /// Unit normal pointing from this edge into the field
    pub fn inward(self) -> Vec2 {
        match self {
            Side::Left => Vec2::X,
            Side::Right => Vec2::NEG_X,
            Side::Top => Vec2::Y,
            Side::Bottom => Vec2::NEG_Y,
        }
    }

    /// True when `vel` carries the ball toward this edge
    pub fn is_approached_by(self, vel: Vec2) -> bool {
        vel.dot(self.inward()) < 0.0
    }
}

/// Paddle long-axis orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Left/right paddles, long along y
    Vertical,
    /// Top/bottom paddles, long along x
    Horizontal,
}

impl Orientation {
    /// Coordinate along the paddle's long axis
    pub fn along(self, v: Vec2) -> f32 {
        match self {
            Orientation::Vertical => v.y,
            Orientation::Horizontal => v.x,
        }
    }

    /// Coordinate across the paddle (along the edge normal)
    pub fn across(self, v: Vec2) -> f32 {
        match self {
            Orientation::Vertical => v.x,
            Orientation::Horizontal => v.y,
        }
    }

    pub fn compose(self, along: f32, across: f32) -> Vec2 {
        match self {
            Orientation::Vertical => Vec2::new(across, along),
            Orientation::Horizontal => Vec2::new(along, across),
        }
    }

    pub fn along_axis(self) -> Vec2 {
        match self {
            Orientation::Vertical => Vec2::Y,
            Orientation::Horizontal => Vec2::X,
        }
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub prev_pos: Vec2, // Position at the start of the frame, for swept tests
    pub radius: f32,
    pub vel: Vec2,
    pub speed_coef: f32,
    pub spin: f32, // Signed angular rate in rad/s
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self {
            pos,
            prev_pos: pos,
            radius,
            vel,
            speed_coef: 1.0,
            spin: 0.0,
        }
    }

    /// Place the ball and forget its previous frame
    pub fn teleport(&mut self, pos: Vec2) {
        self.pos = pos;
        self.prev_pos = pos;
    }

    /// Velocity actually applied to the position this frame
    pub fn effective_velocity(&self) -> Vec2 {
        self.vel * self.speed_coef
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// Paddle component - represents one side's paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Paddle {
    pub side: Side,
    pub pos: Vec2,  // Center
    pub size: Vec2, // Full width and height
    pub speed: f32,
}

impl Paddle {
    pub fn new(side: Side, pos: Vec2, length: f32, thickness: f32, speed: f32) -> Self {
        let size = side.orientation().compose(length, thickness);
        Self {
            side,
            pos,
            size,
            speed,
        }
    }

    pub fn orientation(&self) -> Orientation {
        self.side.orientation()
    }

    pub fn along(&self) -> f32 {
        self.orientation().along(self.pos)
    }

    pub fn half_length(&self) -> f32 {
        self.orientation().along(self.size) / 2.0
    }

    pub fn rect(&self) -> crate::Aabb {
        crate::Aabb::from_center_size(self.pos, self.size)
    }

    /// Move along the long axis, clamped to `bounds` (center min/max)
    pub fn slide(&mut self, delta: f32, bounds: (f32, f32)) {
        let along = (self.along() + delta).clamp(bounds.0, bounds.1);
        let across = self.orientation().across(self.pos);
        self.pos = self.orientation().compose(along, across);
    }
}

/// Decorative particle spawned by impacts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub prev_pos: Vec2,
    pub vel: Vec2,
    pub life: f32,
    pub max_life: f32,
}

impl Particle {
    pub fn new(pos: Vec2, vel: Vec2, life: f32) -> Self {
        Self {
            pos,
            prev_pos: pos,
            vel,
            life,
            max_life: life,
        }
    }

    pub fn alpha(&self) -> f32 {
        if self.max_life <= 0.0 {
            return 0.0;
        }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.life <= 0.0
    }
}
