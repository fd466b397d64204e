use std::f32::consts::FRAC_PI_2;

use glam::Vec2;
use hecs::World;

use crate::{Aabb, Arena, Burst, GameRng, Paddle, Params, Particle, Time};

/// Spawn particles for this frame's impact bursts
pub fn spawn_bursts(world: &mut World, bursts: &[Burst], rng: &mut GameRng) {
    let mut alive = world.query::<&Particle>().iter().count();

    for burst in bursts {
        let base = burst.normal.y.atan2(burst.normal.x);
        for _ in 0..burst.count {
            if alive >= Params::MAX_PARTICLES {
                return;
            }
            let angle = base + rng.symmetric(FRAC_PI_2);
            let speed = rng.range(Params::PARTICLE_SPEED_MIN, Params::PARTICLE_SPEED_MAX);
            let life = Params::PARTICLE_LIFE * rng.range(0.6, 1.0);
            world.spawn((Particle::new(burst.pos, Vec2::from_angle(angle) * speed, life),));
            alive += 1;
        }
    }
}

/// Integrate, damp and bounce particles off the arena and paddles
pub fn update_particles(world: &mut World, time: &Time, arena: &Arena) {
    let rects: Vec<Aabb> = world
        .query::<&Paddle>()
        .iter()
        .map(|(_e, paddle)| paddle.rect())
        .collect();
    let bounds = Aabb::new(Vec2::ZERO, arena.size());

    for (_entity, particle) in world.query_mut::<&mut Particle>() {
        particle.prev_pos = particle.pos;
        particle.pos += particle.vel * time.dt;
        particle.vel *= Params::PARTICLE_DAMPING;

        if particle.pos.x < bounds.min.x || particle.pos.x > bounds.max.x {
            particle.pos.x = particle.pos.x.clamp(bounds.min.x, bounds.max.x);
            particle.vel.x *= -Params::PARTICLE_RESTITUTION;
        }
        if particle.pos.y < bounds.min.y || particle.pos.y > bounds.max.y {
            particle.pos.y = particle.pos.y.clamp(bounds.min.y, bounds.max.y);
            particle.vel.y *= -Params::PARTICLE_RESTITUTION;
        }

        for rect in &rects {
            if !rect.contains(particle.pos) {
                continue;
            }
            let prev = particle.prev_pos;
            if prev.x < rect.min.x || prev.x > rect.max.x {
                particle.pos.x = prev.x;
                particle.vel.x *= -Params::PARTICLE_RESTITUTION;
            } else {
                particle.pos.y = prev.y;
                particle.vel.y *= -Params::PARTICLE_RESTITUTION;
            }
        }

        particle.life -= time.dt;
    }
}

/// Garbage collection: despawn expired particles
pub fn gc(world: &mut World) {
    let to_remove: Vec<_> = world
        .query::<&Particle>()
        .iter()
        .filter(|(_e, particle)| particle.is_expired())
        .map(|(entity, _)| entity)
        .collect();

    for entity in to_remove {
        let _ = world.despawn(entity);
    }
}
