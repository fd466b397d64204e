use glam::Vec2;

use crate::{Config, Mode, Modifiers, Side};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

/// Axis whose slab the swept segment entered last
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Crossed a left/right face
    X,
    /// Crossed a top/bottom face
    Y,
}

/// Entry point of a segment into a box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepHit {
    pub t: f32,
    pub axis: Axis,
}

impl Aabb {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec2 {
        (self.min + self.max) * 0.5
    }

    /// Grow every face outward by `margin`
    pub fn expand(&self, margin: f32) -> Self {
        Self {
            min: self.min - Vec2::splat(margin),
            max: self.max + Vec2::splat(margin),
        }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Check if circle intersects AABB
    pub fn intersects_circle(&self, center: Vec2, radius: f32) -> bool {
        self.distance_to(center) <= radius
    }

    /// Distance from a point to the box surface (0 inside)
    pub fn distance_to(&self, point: Vec2) -> f32 {
        let closest = point.clamp(self.min, self.max);
        (point - closest).length()
    }

    /// Outward normal of the face nearest to an inside `point`
    pub fn exit_normal(&self, point: Vec2) -> Vec2 {
        let faces = [
            (point.x - self.min.x, Vec2::NEG_X),
            (self.max.x - point.x, Vec2::X),
            (point.y - self.min.y, Vec2::NEG_Y),
            (self.max.y - point.y, Vec2::Y),
        ];
        let mut best = faces[0];
        for face in &faces[1..] {
            if face.0 < best.0 {
                best = *face;
            }
        }
        best.1
    }

    /// Slab test of the segment `from -> to` against the box.
    ///
    /// Returns `None` when the segment misses the box or starts inside it.
    pub fn sweep(&self, from: Vec2, to: Vec2) -> Option<SweepHit> {
        let delta = to - from;
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        let mut axis = Axis::X;

        let slabs = [
            (Axis::X, from.x, delta.x, self.min.x, self.max.x),
            (Axis::Y, from.y, delta.y, self.min.y, self.max.y),
        ];
        for (slab_axis, start, d, min, max) in slabs {
            if d.abs() < f32::EPSILON {
                if start < min || start > max {
                    return None;
                }
                continue;
            }
            let mut t0 = (min - start) / d;
            let mut t1 = (max - start) / d;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            if t0 > t_enter {
                t_enter = t0;
                axis = slab_axis;
            }
            t_exit = t_exit.min(t1);
        }

        if t_enter > t_exit || t_enter < 0.0 || t_enter > 1.0 {
            return None;
        }
        Some(SweepHit { t: t_enter, axis })
    }
}

/// Static playfield geometry for one match
#[derive(Debug, Clone, PartialEq)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
    pub mode: Mode,
    pub tunnels: bool,
    pub goal_size: f32,
    pub goal_margin: f32,
    pub paddle_margin: f32,
    pub paddle_thickness: f32,
    pub paddle_length: f32,
}

impl Arena {
    pub fn new(config: &Config, mode: Mode, modifiers: &Modifiers) -> Self {
        Self {
            width: config.arena_width,
            height: config.arena_height,
            mode,
            tunnels: modifiers.arena,
            goal_size: config.goal_size,
            goal_margin: config.goal_margin,
            paddle_margin: config.paddle_margin,
            paddle_thickness: config.paddle_thickness,
            paddle_length: config.paddle_length,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Sides that carry a paddle and a goal in this mode
    pub fn sides(&self) -> &'static [Side] {
        self.mode.sides()
    }

    pub fn is_goal_edge(&self, side: Side) -> bool {
        self.sides().contains(&side)
    }

    /// Across-coordinate of the arena edge itself
    pub fn edge(&self, side: Side) -> f32 {
        match side {
            Side::Left | Side::Top => 0.0,
            Side::Right => self.width,
            Side::Bottom => self.height,
        }
    }

    /// Length of the edge along the paddle axis
    pub fn along_extent(&self, side: Side) -> f32 {
        side.orientation().along(self.size())
    }

    /// Distance across the field between this edge and the opposite one
    pub fn across_extent(&self, side: Side) -> f32 {
        side.orientation().across(self.size())
    }

    /// Across-coordinate of the paddle face that looks into the field
    pub fn paddle_face(&self, side: Side) -> f32 {
        self.edge(side) + side.orientation().across(side.inward()) * (self.paddle_margin + self.paddle_thickness)
    }

    /// Resting center of the paddle defending `side`
    pub fn paddle_spawn(&self, side: Side) -> Vec2 {
        let orientation = side.orientation();
        let across = self.edge(side)
            + orientation.across(side.inward()) * (self.paddle_margin + self.paddle_thickness / 2.0);
        orientation.compose(self.along_extent(side) / 2.0, across)
    }

    /// Allowed range for a paddle center along its long axis
    pub fn along_bounds(&self, side: Side, half_length: f32) -> (f32, f32) {
        let inset = match self.mode {
            Mode::TwoPaddle => 0.0,
            // Leave the corners to the perpendicular paddles
            Mode::FourPaddle => self.paddle_margin + self.paddle_thickness,
        };
        let extent = self.along_extent(side);
        let min = inset + half_length;
        let max = extent - inset - half_length;
        if min > max {
            let mid = extent / 2.0;
            (mid, mid)
        } else {
            (min, max)
        }
    }

    /// Along-range of the scoring slot on a goal edge
    pub fn goal_band(&self, side: Side) -> (f32, f32) {
        let mid = self.along_extent(side) / 2.0;
        let half = self.goal_size / 2.0;
        (mid - half, mid + half)
    }

    /// Whether a ball at `along` on `side` may pass the edge
    pub fn is_open(&self, side: Side, along: f32) -> bool {
        if !self.is_goal_edge(side) {
            return false;
        }
        if !self.tunnels {
            return true;
        }
        let (lo, hi) = self.goal_band(side);
        along >= lo && along <= hi
    }

    /// Signed depth of `pos` past the edge of `side` (positive = outside the field)
    pub fn depth_past(&self, side: Side, pos: Vec2) -> f32 {
        let across = side.orientation().across(pos);
        (self.edge(side) - across) * side.orientation().across(side.inward())
    }

    /// Where the ball is placed before it is served from `side`
    pub fn serve_spot(&self, side: Side, ball_radius: f32, offset: f32) -> Vec2 {
        let orientation = side.orientation();
        let across = self.paddle_face(side) + orientation.across(side.inward()) * (ball_radius + offset);
        orientation.compose(self.along_extent(side) / 2.0, across)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena(mode: Mode, tunnels: bool) -> Arena {
        let modifiers = Modifiers {
            arena: tunnels,
            ..Modifiers::default()
        };
        Arena::new(&Config::default(), mode, &modifiers)
    }

    #[test]
    fn test_sweep_enters_left_face() {
        let rect = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        let hit = rect
            .sweep(Vec2::new(0.0, 5.0), Vec2::new(30.0, 5.0))
            .expect("segment crosses the box");
        assert_eq!(hit.axis, Axis::X);
        assert!((hit.t - 1.0 / 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_sweep_enters_top_face() {
        let rect = Aabb::new(Vec2::new(0.0, 10.0), Vec2::new(100.0, 20.0));
        let hit = rect
            .sweep(Vec2::new(50.0, 0.0), Vec2::new(55.0, 40.0))
            .expect("segment crosses the box");
        assert_eq!(hit.axis, Axis::Y);
    }

    #[test]
    fn test_sweep_misses_and_inside() {
        let rect = Aabb::new(Vec2::new(10.0, 0.0), Vec2::new(20.0, 10.0));
        assert!(rect.sweep(Vec2::new(0.0, 20.0), Vec2::new(30.0, 20.0)).is_none());
        assert!(rect.sweep(Vec2::new(0.0, 5.0), Vec2::new(5.0, 5.0)).is_none());
        assert!(rect.sweep(Vec2::new(15.0, 5.0), Vec2::new(30.0, 5.0)).is_none());
    }

    #[test]
    fn test_circle_intersection() {
        let rect = Aabb::from_center_size(Vec2::new(0.0, 0.0), Vec2::new(2.0, 2.0));
        assert!(rect.intersects_circle(Vec2::new(1.5, 0.0), 0.6));
        assert!(!rect.intersects_circle(Vec2::new(3.0, 3.0), 0.6));
    }

    #[test]
    fn test_exit_normal_picks_shallowest_face() {
        let rect = Aabb::new(Vec2::new(12.0, 242.0), Vec2::new(38.0, 358.0));
        assert_eq!(rect.exit_normal(Vec2::new(16.0, 352.0)), Vec2::NEG_X);
        assert_eq!(rect.exit_normal(Vec2::new(35.0, 300.0)), Vec2::X);
        assert_eq!(rect.exit_normal(Vec2::new(25.0, 245.0)), Vec2::NEG_Y);
        assert_eq!(rect.exit_normal(Vec2::new(25.0, 356.0)), Vec2::Y);
    }

    #[test]
    fn test_paddle_faces_two_paddle() {
        let arena = arena(Mode::TwoPaddle, false);
        assert_eq!(arena.paddle_face(Side::Left), 30.0);
        assert_eq!(arena.paddle_face(Side::Right), 770.0);
        assert_eq!(arena.paddle_spawn(Side::Right), Vec2::new(775.0, 300.0));
        assert_eq!(arena.along_bounds(Side::Left, 50.0), (50.0, 550.0));
    }

    #[test]
    fn test_four_paddle_bounds_leave_corners() {
        let arena = arena(Mode::FourPaddle, false);
        assert_eq!(arena.paddle_spawn(Side::Top), Vec2::new(400.0, 25.0));
        assert_eq!(arena.paddle_face(Side::Bottom), 570.0);
        assert_eq!(arena.along_bounds(Side::Left, 50.0), (80.0, 520.0));
    }

    #[test]
    fn test_goal_band_with_tunnels() {
        let arena = arena(Mode::TwoPaddle, true);
        assert_eq!(arena.goal_band(Side::Left), (200.0, 400.0));
        assert!(arena.is_open(Side::Left, 300.0));
        assert!(!arena.is_open(Side::Left, 100.0));
        assert!(!arena.is_open(Side::Top, 400.0));
    }

    #[test]
    fn test_open_edges_without_tunnels() {
        let arena = arena(Mode::TwoPaddle, false);
        assert!(arena.is_open(Side::Right, 10.0));
        assert!(!arena.is_open(Side::Bottom, 10.0));
    }

    #[test]
    fn test_depth_past_edges() {
        let arena = arena(Mode::FourPaddle, false);
        assert_eq!(arena.depth_past(Side::Left, Vec2::new(-5.0, 100.0)), 5.0);
        assert_eq!(arena.depth_past(Side::Right, Vec2::new(790.0, 100.0)), -10.0);
        assert_eq!(arena.depth_past(Side::Bottom, Vec2::new(0.0, 610.0)), 10.0);
    }
}
