use hecs::World;
use tracing::info;

use crate::{Arena, Ball, Burst, Events, Goal, Mode, Params, Score, Touches};

/// Check if the ball crossed a goal line far enough to count
pub fn check_scoring(
    world: &World,
    arena: &Arena,
    touches: &Touches,
    score: &mut Score,
    events: &mut Events,
) -> Option<Goal> {
    let ball = world.query::<&Ball>().iter().next().map(|(_e, ball)| *ball)?;

    let conceded = arena
        .sides()
        .iter()
        .copied()
        .find(|side| arena.depth_past(*side, ball.pos) > arena.goal_margin)?;

    let scorer = match arena.mode {
        Mode::TwoPaddle => Some(conceded.opposite()),
        Mode::FourPaddle => touches.credited(conceded),
    };
    if let Some(side) = scorer {
        score.increment(side);
    }
    info!(?conceded, ?scorer, points = ?score.points, "goal");

    let goal = Goal { conceded, scorer };
    events.goal = Some(goal);
    events.bursts.push(Burst {
        pos: ball.pos,
        normal: conceded.inward(),
        count: Params::PARTICLES_GOAL,
    });
    Some(goal)
}
