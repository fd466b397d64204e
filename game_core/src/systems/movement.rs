use glam::Vec2;
use hecs::World;

use crate::controllers::{ControlContext, Controller};
use crate::{Ball, BallDeparted, GameRng, Paddle, Params, Time};

/// Angle between a velocity and the horizontal axis, in `[0, pi/2]`
pub fn horizontal_angle(vel: Vec2) -> f32 {
    vel.y.abs().atan2(vel.x.abs())
}

/// Rotate `vel` by `angle`, keeping the old velocity if the result would be
/// steeper than `max_angle`
pub fn apply_spin(vel: Vec2, angle: f32, max_angle: f32) -> Vec2 {
    let rotated = Vec2::from_angle(angle).rotate(vel);
    if horizontal_angle(rotated) > max_angle {
        vel
    } else {
        rotated
    }
}

/// Semi-implicit Euler step for one ball
pub fn integrate_ball(ball: &mut Ball, dt: f32, max_spin_angle: f32) {
    ball.prev_pos = ball.pos;

    let mut boost = 1.0;
    if ball.spin != 0.0 {
        ball.vel = apply_spin(ball.vel, ball.spin * dt, max_spin_angle);
        boost = Params::SPIN_BOOST;
    }
    ball.pos += ball.effective_velocity() * dt * boost;
}

/// Move ball based on velocity, speed coefficient and spin
pub fn move_ball(world: &mut World, time: &Time, max_spin_angle: f32) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        integrate_ball(ball, time.dt, max_spin_angle);
    }
}

/// Slide the ball to a stop once the match is over
pub fn decay_ball(world: &mut World, time: &Time) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.vel /= Params::END_DECAY;
        ball.prev_pos = ball.pos;
        ball.pos += ball.effective_velocity() * time.dt;
    }
}

/// Let each paddle's controller decide and apply its motion
pub fn drive_paddles(world: &mut World, ctx: &ControlContext, rng: &mut GameRng) {
    for (_entity, (paddle, controller)) in world.query_mut::<(&mut Paddle, &mut Controller)>() {
        controller.0.update(paddle, ctx, rng);
    }
}

/// Deliver this frame's paddle departures to every controller
pub fn dispatch_departures(
    world: &mut World,
    departures: &[BallDeparted],
    ctx: &ControlContext,
    rng: &mut GameRng,
) {
    for event in departures {
        for (_entity, (paddle, controller)) in world.query_mut::<(&Paddle, &mut Controller)>() {
            controller.0.on_ball_departed(paddle, event, ctx, rng);
        }
    }
}

/// Put paddles back at their spawn points and clear controller memory
pub fn reset_paddles(world: &mut World, ctx: &ControlContext) {
    for (_entity, (paddle, controller)) in world.query_mut::<(&mut Paddle, &mut Controller)>() {
        paddle.pos = ctx.arena.paddle_spawn(paddle.side);
        controller.0.reset(paddle, ctx);
    }
}
