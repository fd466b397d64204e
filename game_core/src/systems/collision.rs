use std::cmp::Ordering;

use glam::Vec2;
use hecs::World;
use tracing::{debug, trace};

use crate::controllers::{Controller, Intent, SpinDir};
use crate::{
    Arena, Axis, Ball, BallDeparted, Burst, Config, Events, Modifiers, Orientation, Paddle,
    Params, Side, Touches,
};

/// Swept contact between the ball and one paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaddleHit {
    pub side: Side,
    /// Axis of the face that was crossed
    pub axis: Axis,
    /// Ball center at the moment of contact
    pub contact: Vec2,
    /// Ball was already inside the paddle's reach (the paddle moved into it)
    pub overlap: bool,
}

/// Swept test of the ball's last move against one paddle
pub fn sweep_paddle(ball: &Ball, paddle: &Paddle) -> Option<PaddleHit> {
    let reach = paddle.rect().expand(ball.radius);
    if let Some(hit) = reach.sweep(ball.prev_pos, ball.pos) {
        return Some(PaddleHit {
            side: paddle.side,
            axis: hit.axis,
            contact: ball.prev_pos.lerp(ball.pos, hit.t),
            overlap: false,
        });
    }
    if paddle.rect().intersects_circle(ball.pos, ball.radius) {
        let axis = if reach.exit_normal(ball.pos).x != 0.0 {
            Axis::X
        } else {
            Axis::Y
        };
        return Some(PaddleHit {
            side: paddle.side,
            axis,
            contact: ball.pos,
            overlap: true,
        });
    }
    None
}

/// Nearest paddle the ball touched during its last move
pub fn find_paddle_hit(ball: &Ball, paddles: &[Paddle]) -> Option<PaddleHit> {
    let threshold = ball.radius + (ball.pos - ball.prev_pos).length();
    paddles
        .iter()
        .filter_map(|paddle| {
            let distance = paddle.rect().distance_to(ball.prev_pos);
            if distance > threshold {
                return None;
            }
            sweep_paddle(ball, paddle).map(|hit| (distance, hit))
        })
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(Ordering::Equal))
        .map(|(_, hit)| hit)
}

/// Reflection direction for a hit `offset` in `[-1, 1]` along the paddle
pub fn bounce_direction(side: Side, offset: f32, max_angle: f32) -> Vec2 {
    let angle = offset.clamp(-1.0, 1.0) * max_angle;
    side.inward() * angle.cos() + side.orientation().along_axis() * angle.sin()
}

/// Signed spin rate that curves `vel` toward `dir` along the paddle axis
pub fn spin_for(dir: SpinDir, orientation: Orientation, vel: Vec2) -> f32 {
    // d(vel)/d(angle) is vel.perp(); its along component decides the turn sense
    let turn = orientation.along(vel.perp()).signum();
    dir.sign() * turn * Params::SPIN_RATE
}

/// Outcome of resolving a paddle contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Resolution {
    /// Returned off the paddle face: modifiers applied
    Return,
    /// Glanced off an end cap or the back of the paddle
    Glance,
    /// Ball was already leaving this face
    None,
}

/// Reflect the ball off a paddle and apply modifier hooks on a valid return
pub fn resolve_paddle_hit(
    ball: &mut Ball,
    paddle: &Paddle,
    hit: &PaddleHit,
    intent: &Intent,
    arena: &Arena,
    config: &Config,
    modifiers: &Modifiers,
) -> Resolution {
    let reach = paddle.rect().expand(ball.radius);
    let normal = if hit.overlap {
        reach.exit_normal(ball.pos)
    } else {
        match hit.axis {
            Axis::X => Vec2::new((ball.prev_pos.x - reach.center().x).signum(), 0.0),
            Axis::Y => Vec2::new(0.0, (ball.prev_pos.y - reach.center().y).signum()),
        }
    };

    if hit.overlap {
        // Push out through the nearest face, whichever way the ball is heading
        match hit.axis {
            Axis::X => ball.pos.x = if normal.x > 0.0 { reach.max.x } else { reach.min.x },
            Axis::Y => ball.pos.y = if normal.y > 0.0 { reach.max.y } else { reach.min.y },
        }
    }
    if ball.vel.dot(normal) >= 0.0 {
        return Resolution::None;
    }

    match hit.axis {
        Axis::X => {
            ball.vel.x = -ball.vel.x;
            if !hit.overlap {
                ball.pos.x = ball.prev_pos.x;
            }
        }
        Axis::Y => {
            ball.vel.y = -ball.vel.y;
            if !hit.overlap {
                ball.pos.y = ball.prev_pos.y;
            }
        }
    }

    let orientation = paddle.orientation();
    let face_axis = match orientation {
        Orientation::Vertical => Axis::X,
        Orientation::Horizontal => Axis::Y,
    };
    if hit.axis != face_axis || normal.dot(paddle.side.inward()) <= 0.0 {
        return Resolution::Glance;
    }

    if modifiers.angular_bounce {
        let offset = (orientation.along(hit.contact) - paddle.along()) / paddle.half_length();
        let speed = ball.vel.length();
        ball.vel = bounce_direction(paddle.side, offset, arena.mode.max_bounce_angle()) * speed;
    }
    if modifiers.speed_increase {
        ball.speed_coef *= config.ball_speed_increase;
    }
    ball.spin = match intent.spin_dir() {
        Some(dir) if modifiers.spin => spin_for(dir, orientation, ball.vel),
        _ => 0.0,
    };

    Resolution::Return
}

/// Reflect off a solid edge and push the ball back inside the field
fn bounce_off_wall(ball: &mut Ball, arena: &Arena, side: Side, events: &mut Events) {
    let orientation = side.orientation();
    let inward = orientation.across(side.inward());
    let along = orientation.along(ball.pos);
    let mut across_vel = orientation.across(ball.vel);

    let heading_out = across_vel * inward < 0.0;
    if heading_out {
        across_vel = -across_vel;
    }
    ball.pos = orientation.compose(along, arena.edge(side) + inward * ball.radius);
    ball.vel = orientation.compose(orientation.along(ball.vel), across_vel);

    if heading_out {
        ball.spin = 0.0;
        events.ball_hit_wall = true;
        events.bursts.push(Burst {
            pos: orientation.compose(along, arena.edge(side)),
            normal: side.inward(),
            count: Params::PARTICLES_WALL,
        });
        trace!(?side, "ball hit wall");
    }
}

/// Tunnel side walls, once the ball is past the edge plane
fn keep_in_tunnel(ball: &mut Ball, side: Side, band: (f32, f32), events: &mut Events) {
    let orientation = side.orientation();
    let along = orientation.along(ball.pos);
    let across = orientation.across(ball.pos);
    let along_vel = orientation.along(ball.vel);
    let across_vel = orientation.across(ball.vel);
    let (low, high) = (band.0 + ball.radius, band.1 - ball.radius);

    let (clamped, reflected) = if along < low {
        (low, along_vel < 0.0)
    } else if along > high {
        (high, along_vel > 0.0)
    } else {
        return;
    };

    ball.pos = orientation.compose(clamped, across);
    if reflected {
        ball.vel = orientation.compose(-along_vel, across_vel);
        ball.spin = 0.0;
        events.ball_hit_wall = true;
    }
}

/// Bounce off the nearer corner of a tunnel mouth when `center` is within reach of it.
///
/// Returns whether the ball was deflected.
fn deflect_off_corner(
    ball: &mut Ball,
    arena: &Arena,
    side: Side,
    band: (f32, f32),
    center: Vec2,
    events: &mut Events,
) -> bool {
    let orientation = side.orientation();
    let along = orientation.along(center);
    let corner_along = if along - band.0 < band.1 - along {
        band.0
    } else {
        band.1
    };
    let corner = orientation.compose(corner_along, arena.edge(side));
    let offset = center - corner;
    if offset.length() >= ball.radius {
        return false;
    }
    let Some(normal) = offset.try_normalize() else {
        return false;
    };
    if ball.vel.dot(normal) >= 0.0 {
        return false;
    }

    ball.vel -= 2.0 * ball.vel.dot(normal) * normal;
    ball.pos = corner + normal * ball.radius;
    ball.spin = 0.0;
    events.ball_hit_wall = true;
    events.bursts.push(Burst {
        pos: corner,
        normal,
        count: Params::PARTICLES_WALL,
    });
    trace!(?side, "ball hit tunnel corner");
    true
}

/// Walls, and tunnel mouths when the arena modifier is on
pub fn resolve_edges(ball: &mut Ball, arena: &Arena, events: &mut Events) {
    for side in Side::ALL {
        let depth = arena.depth_past(side, ball.pos);
        if depth + ball.radius <= 0.0 {
            continue;
        }
        if !arena.is_goal_edge(side) {
            bounce_off_wall(ball, arena, side, events);
            continue;
        }
        if !arena.tunnels {
            // Open goal line: scoring decides
            continue;
        }

        let orientation = side.orientation();
        let band = arena.goal_band(side);
        let prev_depth = arena.depth_past(side, ball.prev_pos);
        let entering = prev_depth + ball.radius <= 0.0;

        if !entering && depth > 0.0 {
            keep_in_tunnel(ball, side, band, events);
            continue;
        }

        // Where along the edge the ball first touched the plane
        let along = if entering && depth > prev_depth {
            let t = (-(prev_depth + ball.radius) / (depth - prev_depth)).clamp(0.0, 1.0);
            orientation.along(ball.prev_pos.lerp(ball.pos, t))
        } else {
            orientation.along(ball.pos)
        };

        if along < band.0 || along > band.1 {
            bounce_off_wall(ball, arena, side, events);
            continue;
        }

        // Until the center is past the plane the mouth corners are the nearest solid
        let mouth = if depth > 0.0 {
            let t = -prev_depth / (depth - prev_depth);
            ball.prev_pos.lerp(ball.pos, t)
        } else {
            ball.pos
        };
        if deflect_off_corner(ball, arena, side, band, mouth, events) {
            continue;
        }
        if entering {
            events.tunnel_entered = Some(side);
        }
        if depth > 0.0 {
            keep_in_tunnel(ball, side, band, events);
        }
    }
}

/// Check ball collisions with paddles, walls and tunnels
pub fn check_collisions(
    world: &mut World,
    arena: &Arena,
    config: &Config,
    modifiers: &Modifiers,
    touches: &mut Touches,
    events: &mut Events,
) {
    // First, collect ball and paddle data without holding borrows
    let ball_data = {
        let mut ball_query = world.query::<&Ball>();
        ball_query.iter().next().map(|(_e, ball)| *ball)
    };
    let Some(mut ball) = ball_data else {
        return; // No ball in world
    };

    let paddles: Vec<(Paddle, Intent)> = world
        .query::<(&Paddle, &Controller)>()
        .iter()
        .map(|(_e, (paddle, controller))| (*paddle, controller.0.intent()))
        .collect();
    let rects: Vec<Paddle> = paddles.iter().map(|(paddle, _)| *paddle).collect();

    if let Some(hit) = find_paddle_hit(&ball, &rects) {
        if let Some((paddle, intent)) = paddles.iter().find(|(p, _)| p.side == hit.side) {
            let resolution =
                resolve_paddle_hit(&mut ball, paddle, &hit, intent, arena, config, modifiers);
            if resolution != Resolution::None {
                touches.record(hit.side);
                events.ball_hit_paddle = Some(hit.side);
                events.bursts.push(Burst {
                    pos: hit.contact,
                    normal: ball.vel.normalize_or_zero(),
                    count: Params::PARTICLES_PADDLE,
                });
            }
            if resolution == Resolution::Return {
                debug!(
                    side = ?hit.side,
                    speed_coef = ball.speed_coef,
                    spin = ball.spin,
                    "ball returned"
                );
                events.departures.push(BallDeparted {
                    side: hit.side,
                    ball,
                    spin: ball.spin,
                });
            }
        }
    }

    resolve_edges(&mut ball, arena, events);

    // Update ball
    for (_entity, stored) in world.query_mut::<&mut Ball>() {
        *stored = ball;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::PaddleController;
    use crate::{create_ball, create_paddle, GameRng, Mode, Time};

    /// Controller that never moves and always reports the same intent
    struct FixedIntent(Intent);

    impl PaddleController for FixedIntent {
        fn update(&mut self, _paddle: &mut Paddle, _ctx: &crate::controllers::ControlContext, _rng: &mut GameRng) {}

        fn intent(&self) -> Intent {
            self.0
        }
    }

    struct Setup {
        world: World,
        arena: Arena,
        config: Config,
        modifiers: Modifiers,
        touches: Touches,
        events: Events,
    }

    fn setup(mode: Mode, modifiers: Modifiers, intent: Intent) -> Setup {
        let config = Config::new();
        let arena = Arena::new(&config, mode, &modifiers);
        let mut world = World::new();
        for side in mode.sides() {
            let paddle = Paddle::new(
                *side,
                arena.paddle_spawn(*side),
                config.paddle_length,
                config.paddle_thickness,
                config.paddle_speed,
            );
            create_paddle(&mut world, paddle, Controller::new(FixedIntent(intent)));
        }
        Setup {
            world,
            arena,
            config,
            modifiers,
            touches: Touches::default(),
            events: Events::new(),
        }
    }

    impl Setup {
        /// Place the ball so that it travels `prev -> pos` this frame
        fn ball(&mut self, prev: Vec2, pos: Vec2, vel: Vec2) -> hecs::Entity {
            let entity = create_ball(&mut self.world, pos, vel, self.config.ball_radius);
            self.world.get::<&mut Ball>(entity).unwrap().prev_pos = prev;
            entity
        }

        fn collide(&mut self) {
            check_collisions(
                &mut self.world,
                &self.arena,
                &self.config,
                &self.modifiers,
                &mut self.touches,
                &mut self.events,
            );
        }

        fn read(&self, entity: hecs::Entity) -> Ball {
            *self.world.get::<&Ball>(entity).unwrap()
        }
    }

    #[test]
    fn test_ball_bounces_off_top_wall() {
        let mut s = setup(Mode::TwoPaddle, Modifiers::none(), Intent::default());
        let e = s.ball(Vec2::new(400.0, 10.0), Vec2::new(405.0, 4.0), Vec2::new(300.0, -360.0));
        s.world.get::<&mut Ball>(e).unwrap().spin = 1.0;

        s.collide();

        let ball = s.read(e);
        assert!(ball.vel.y > 0.0, "Ball should bounce down after hitting top wall");
        assert_eq!(ball.vel.x, 300.0, "X velocity should be unchanged");
        assert_eq!(ball.pos.y, s.config.ball_radius, "Ball should be pushed out of wall");
        assert_eq!(ball.spin, 0.0, "Wall contact kills spin");
        assert!(s.events.ball_hit_wall);
        assert_eq!(s.events.bursts.len(), 1);
    }

    #[test]
    fn test_wall_bounce_conserves_speed() {
        let mut s = setup(Mode::TwoPaddle, Modifiers::none(), Intent::default());
        let vel = Vec2::new(-210.0, 280.0);
        let e = s.ball(Vec2::new(300.0, 588.0), Vec2::new(296.5, 595.0), vel);

        s.collide();

        let ball = s.read(e);
        assert!((ball.speed() - vel.length()).abs() < 1e-3);
        assert!(ball.pos.y <= s.arena.height - ball.radius);
    }

    #[test]
    fn test_ball_collides_with_left_paddle() {
        let mut s = setup(Mode::TwoPaddle, Modifiers::none(), Intent::default());
        let prev = Vec2::new(45.0, 300.0);
        let e = s.ball(prev, Vec2::new(35.0, 300.0), Vec2::new(-600.0, 0.0));

        s.collide();

        let ball = s.read(e);
        assert!(ball.vel.x > 0.0, "Ball should bounce right after hitting left paddle");
        assert_eq!(ball.pos.x, prev.x, "Ball snaps back along the flipped axis");
        assert_eq!(s.events.ball_hit_paddle, Some(Side::Left));
        assert_eq!(s.touches.last, Some(Side::Left));
        assert_eq!(s.events.departures.len(), 1);
        assert_eq!(s.events.departures[0].side, Side::Left);
    }

    #[test]
    fn test_fast_ball_does_not_tunnel_through_paddle() {
        let mut s = setup(Mode::TwoPaddle, Modifiers::none(), Intent::default());
        // Crosses the whole right paddle in one frame
        let e = s.ball(Vec2::new(740.0, 310.0), Vec2::new(800.0, 310.0), Vec2::new(3600.0, 0.0));

        s.collide();

        let ball = s.read(e);
        assert!(ball.vel.x < 0.0);
        assert!(ball.pos.x <= 762.0, "Ball must end outside the paddle reach");
        assert_eq!(s.events.ball_hit_paddle, Some(Side::Right));
    }

    #[test]
    fn test_ball_moving_away_is_ignored() {
        let mut s = setup(Mode::TwoPaddle, Modifiers::none(), Intent::default());
        let e = s.ball(Vec2::new(36.0, 300.0), Vec2::new(37.0, 300.0), Vec2::new(300.0, 0.0));

        s.collide();

        assert_eq!(s.read(e).vel, Vec2::new(300.0, 0.0));
        assert!(s.events.ball_hit_paddle.is_none());
        assert!(s.events.departures.is_empty());
    }

    #[test]
    fn test_end_cap_hit_flips_vertical_velocity() {
        let mut s = setup(Mode::TwoPaddle, Modifiers::all(), Intent::default());
        // Falls onto the top end of the left paddle (y = 250)
        let e = s.ball(Vec2::new(25.0, 236.0), Vec2::new(25.0, 246.0), Vec2::new(0.0, 600.0));

        s.collide();

        let ball = s.read(e);
        assert!(ball.vel.y < 0.0);
        assert_eq!(ball.pos.y, 236.0);
        assert_eq!(ball.speed_coef, 1.0, "Glancing hits fire no modifiers");
        assert!(s.events.departures.is_empty());
    }

    #[test]
    fn test_paddle_pushes_out_overlapping_ball() {
        let mut s = setup(Mode::TwoPaddle, Modifiers::none(), Intent::default());
        // Ball resting inside the right paddle's reach
        let e = s.ball(Vec2::new(768.0, 300.0), Vec2::new(768.0, 300.0), Vec2::new(200.0, 10.0));

        s.collide();

        let ball = s.read(e);
        assert_eq!(ball.pos.x, 762.0);
        assert!(ball.vel.x < 0.0);
    }

    #[test]
    fn test_ball_behind_paddle_is_pushed_out_the_back() {
        let mut s = setup(Mode::TwoPaddle, Modifiers::all(), Intent::default());
        // Already behind the left face (x = 30), beside the lower end cap
        let e = s.ball(Vec2::new(21.0, 352.0), Vec2::new(16.0, 352.0), Vec2::new(-300.0, 0.0));

        s.collide();

        let ball = s.read(e);
        assert_eq!(ball.pos.x, 12.0, "Pushed out through the back face");
        assert_eq!(ball.vel, Vec2::new(-300.0, 0.0), "Still heading for the goal");
        assert_eq!(ball.speed_coef, 1.0);
        assert!(s.events.ball_hit_paddle.is_none());
        assert!(s.events.departures.is_empty());
        assert_eq!(s.touches.last, None);
    }

    #[test]
    fn test_speed_increase_on_return() {
        let modifiers = Modifiers {
            speed_increase: true,
            ..Modifiers::none()
        };
        let mut s = setup(Mode::TwoPaddle, modifiers, Intent::default());
        let e = s.ball(Vec2::new(45.0, 300.0), Vec2::new(35.0, 300.0), Vec2::new(-300.0, 40.0));

        s.collide();

        let ball = s.read(e);
        assert_eq!(ball.speed_coef, Params::BALL_SPEED_INCREASE);
        assert!((ball.speed() - Vec2::new(300.0, 40.0).length()).abs() < 1e-3);
    }

    #[test]
    fn test_angular_bounce_center_and_edge() {
        let modifiers = Modifiers {
            angular_bounce: true,
            ..Modifiers::none()
        };

        let mut s = setup(Mode::TwoPaddle, modifiers, Intent::default());
        let e = s.ball(Vec2::new(45.0, 290.0), Vec2::new(35.0, 300.0), Vec2::new(-300.0, 300.0));
        s.collide();
        let center = s.read(e);
        // Contact at y = 297: offset -0.06
        let expected = -0.06 * Params::BOUNCE_ANGLE_TWO;
        assert!((center.vel.y.atan2(center.vel.x) - expected).abs() < 1e-3);

        let dir = bounce_direction(Side::Left, 0.0, Params::BOUNCE_ANGLE_TWO);
        assert_eq!(dir, Vec2::X, "Center hit leaves straight out");
        let edge = bounce_direction(Side::Left, 1.0, Params::BOUNCE_ANGLE_TWO);
        assert!((horizontal(edge) - Params::BOUNCE_ANGLE_TWO).abs() < 1e-5);
        let wide = bounce_direction(Side::Top, -1.0, Params::BOUNCE_ANGLE_FOUR);
        assert!(wide.y > 0.0 && wide.x < 0.0);
    }

    fn horizontal(v: Vec2) -> f32 {
        v.y.abs().atan2(v.x.abs())
    }

    #[test]
    fn test_spin_from_held_key() {
        let modifiers = Modifiers {
            spin: true,
            ..Modifiers::none()
        };
        let held_down = Intent {
            down_held: true,
            ..Intent::default()
        };
        let mut s = setup(Mode::TwoPaddle, modifiers, held_down);
        let e = s.ball(Vec2::new(45.0, 300.0), Vec2::new(35.0, 300.0), Vec2::new(-300.0, 0.0));

        s.collide();

        let mut ball = s.read(e);
        assert_eq!(ball.spin, Params::SPIN_RATE);
        assert_eq!(s.events.departures[0].spin, Params::SPIN_RATE);

        // Spin curves the return downward (toward +y)
        crate::systems::move_ball(&mut s.world, &Time::new(0.1, 0.0), Params::SPIN_MAX_ANGLE_TWO);
        ball = s.read(e);
        assert!(ball.vel.y > 0.0);
    }

    #[test]
    fn test_no_spin_without_modifier_or_intent() {
        let held_up = Intent {
            up_held: true,
            ..Intent::default()
        };
        let mut s = setup(Mode::TwoPaddle, Modifiers::none(), held_up);
        let e = s.ball(Vec2::new(45.0, 300.0), Vec2::new(35.0, 300.0), Vec2::new(-300.0, 0.0));
        s.world.get::<&mut Ball>(e).unwrap().spin = 2.0;

        s.collide();

        assert_eq!(s.read(e).spin, 0.0);
    }

    #[test]
    fn test_spin_direction_for_horizontal_paddles() {
        // Ball leaving the top paddle downward; "down" key means +x
        let vel = Vec2::new(0.0, 300.0);
        let spin = spin_for(SpinDir::Down, Orientation::Horizontal, vel);
        let curved = Vec2::from_angle(spin * 0.1).rotate(vel);
        assert!(curved.x > 0.0);
    }

    #[test]
    fn test_nearest_paddle_wins() {
        let config = Config::new();
        let near = Paddle::new(Side::Left, Vec2::new(25.0, 300.0), 100.0, 10.0, 400.0);
        let far = Paddle::new(Side::Right, Vec2::new(775.0, 300.0), 100.0, 10.0, 400.0);
        let mut ball = Ball::new(Vec2::new(35.0, 300.0), Vec2::new(-300.0, 0.0), config.ball_radius);
        ball.prev_pos = Vec2::new(45.0, 300.0);

        let hit = find_paddle_hit(&ball, &[far, near]).expect("left paddle hit");
        assert_eq!(hit.side, Side::Left);
        assert_eq!(hit.axis, Axis::X);
        assert!((hit.contact.x - 38.0).abs() < 1e-4);
    }

    #[test]
    fn test_scenario_ball_reaches_right_paddle_on_time() {
        let mut s = setup(Mode::TwoPaddle, Modifiers::none(), Intent::default());
        let e = s.ball(Vec2::new(400.0, 300.0), Vec2::new(400.0, 300.0), Vec2::new(300.0, 0.0));
        let dt = 1.0 / 240.0;
        let expected = (770.0 - 400.0 - s.config.ball_radius) / 300.0;

        let mut elapsed = 0.0;
        for _ in 0..1000 {
            crate::systems::move_ball(&mut s.world, &Time::new(dt, elapsed), Params::SPIN_MAX_ANGLE_TWO);
            elapsed += dt;
            s.events.clear();
            s.collide();
            if s.events.ball_hit_paddle.is_some() {
                break;
            }
        }

        assert_eq!(s.events.ball_hit_paddle, Some(Side::Right));
        assert!((elapsed - expected).abs() <= dt + 1e-4, "hit after {elapsed}s, expected {expected}s");
    }

    #[test]
    fn test_open_goal_line_is_not_a_wall() {
        let mut s = setup(Mode::TwoPaddle, Modifiers::none(), Intent::default());
        let e = s.ball(Vec2::new(6.0, 100.0), Vec2::new(-4.0, 100.0), Vec2::new(-300.0, 0.0));

        s.collide();

        assert_eq!(s.read(e).vel.x, -300.0);
        assert!(!s.events.ball_hit_wall);
    }

    #[test]
    fn test_tunnel_lets_ball_through_inside_band() {
        let arena_on = Modifiers {
            arena: true,
            ..Modifiers::none()
        };
        let mut s = setup(Mode::TwoPaddle, arena_on, Intent::default());
        let e = s.ball(Vec2::new(10.0, 250.0), Vec2::new(2.0, 250.0), Vec2::new(-480.0, 0.0));

        s.collide();

        let ball = s.read(e);
        assert_eq!(ball.vel.x, -480.0, "Ball keeps going into the tunnel");
        assert!(!s.events.ball_hit_wall);
        assert_eq!(s.events.tunnel_entered, Some(Side::Left));
    }

    #[test]
    fn test_tunnel_edges_bounce_outside_band() {
        let arena_on = Modifiers {
            arena: true,
            ..Modifiers::none()
        };
        let mut s = setup(Mode::TwoPaddle, arena_on, Intent::default());
        let e = s.ball(Vec2::new(10.0, 100.0), Vec2::new(2.0, 100.0), Vec2::new(-480.0, 0.0));

        s.collide();

        let ball = s.read(e);
        assert_eq!(ball.vel.x, 480.0, "Side wall outside the slot reflects");
        assert_eq!(ball.pos.x, s.config.ball_radius);
        assert!(s.events.ball_hit_wall);
    }

    #[test]
    fn test_tunnel_corner_deflects_ball() {
        let arena_on = Modifiers {
            arena: true,
            ..Modifiers::none()
        };
        let mut s = setup(Mode::TwoPaddle, arena_on, Intent::default());
        // Entering just inside the slot's upper edge (y = 200)
        let e = s.ball(Vec2::new(10.0, 203.0), Vec2::new(4.0, 203.0), Vec2::new(-300.0, 0.0));

        s.collide();

        let ball = s.read(e);
        let corner = Vec2::new(0.0, 200.0);
        assert!(ball.vel.x > 0.0 && ball.vel.y > 0.0, "Corner throws the ball back and down");
        assert!((ball.speed() - 300.0).abs() < 1e-3);
        assert!((ball.pos.distance(corner) - s.config.ball_radius).abs() < 1e-3);
        assert!(s.events.ball_hit_wall);
        assert_eq!(s.events.tunnel_entered, None);
    }

    #[test]
    fn test_tunnel_side_walls_contain_ball() {
        let arena_on = Modifiers {
            arena: true,
            ..Modifiers::none()
        };
        let mut s = setup(Mode::TwoPaddle, arena_on, Intent::default());
        // Already inside the left tunnel, drifting into its lower edge (y = 400)
        let e = s.ball(Vec2::new(-5.0, 388.0), Vec2::new(-8.0, 395.0), Vec2::new(-100.0, 200.0));

        s.collide();

        let ball = s.read(e);
        assert_eq!(ball.pos.y, 392.0);
        assert!(ball.vel.y < 0.0);
    }

    #[test]
    fn test_four_paddle_has_no_walls() {
        let mut s = setup(Mode::FourPaddle, Modifiers::none(), Intent::default());
        let e = s.ball(Vec2::new(100.0, 6.0), Vec2::new(101.0, -2.0), Vec2::new(30.0, -300.0));

        s.collide();

        assert_eq!(s.read(e).vel.y, -300.0);
        assert!(!s.events.ball_hit_wall);
    }
}
