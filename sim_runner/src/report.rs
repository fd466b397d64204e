//! Conversion from simulation state to the reporting envelope

use game_core::{MatchResult, Phase, Side, Snapshot};
use proto::{FrameReport, MatchReport, PaddleReport, PhaseTag, SideTag};

pub fn side_tag(side: Side) -> SideTag {
    match side {
        Side::Left => SideTag::Left,
        Side::Right => SideTag::Right,
        Side::Top => SideTag::Top,
        Side::Bottom => SideTag::Bottom,
    }
}

pub fn phase_tag(phase: Phase) -> PhaseTag {
    match phase {
        Phase::CoinToss => PhaseTag::CoinToss,
        Phase::Serve => PhaseTag::Serve,
        Phase::Play => PhaseTag::Play,
        Phase::End => PhaseTag::End,
    }
}

fn scores(scores: &[(Side, u8)]) -> Vec<(SideTag, u8)> {
    scores
        .iter()
        .map(|(side, points)| (side_tag(*side), *points))
        .collect()
}

pub fn frame_report(tick: u32, snapshot: &Snapshot) -> FrameReport {
    FrameReport {
        tick,
        phase: phase_tag(snapshot.phase),
        ball_x: snapshot.ball.pos.x,
        ball_y: snapshot.ball.pos.y,
        ball_vx: snapshot.ball.vel.x,
        ball_vy: snapshot.ball.vel.y,
        paddles: snapshot
            .paddles
            .iter()
            .map(|paddle| PaddleReport {
                side: side_tag(paddle.side),
                x: paddle.pos.x,
                y: paddle.pos.y,
            })
            .collect(),
        scores: scores(&snapshot.scores),
        match_timer: snapshot.match_timer,
        serve_timer: snapshot.serve_timer,
    }
}

pub fn match_report(result: &MatchResult, seed: u64) -> MatchReport {
    MatchReport {
        won: result.won,
        vs_ai: result.vs_ai,
        final_scores: scores(&result.final_scores),
        winner: result.winner.map(side_tag),
        duration_s: result.duration,
        seed,
    }
}
