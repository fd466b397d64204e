//! Reporting envelope for Pong matches
//!
//! Uses postcard for compact binary serialization. The simulation never encodes
//! anything itself; drivers convert snapshots and results into these types.

use postcard::{from_bytes, to_allocvec};

// ============================================================================
// Shared tags
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum SideTag {
    Left,
    Right,
    Top,
    Bottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PhaseTag {
    CoinToss,
    Serve,
    Play,
    End,
}

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PaddleReport {
    pub side: SideTag,
    pub x: f32,
    pub y: f32,
}

/// Per-frame state for replays and spectators
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct FrameReport {
    pub tick: u32,
    pub phase: PhaseTag,
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_vx: f32,
    pub ball_vy: f32,
    pub paddles: Vec<PaddleReport>,
    pub scores: Vec<(SideTag, u8)>,
    pub match_timer: f32,
    pub serve_timer: f32,
}

/// Terminal result consumed by persistence/leaderboards
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchReport {
    pub won: bool,
    pub vs_ai: bool,
    pub final_scores: Vec<(SideTag, u8)>,
    /// `None` for a tie at timer expiry
    pub winner: Option<SideTag>,
    pub duration_s: f32,
    pub seed: u64,
}

impl MatchReport {
    pub fn score_of(&self, side: SideTag) -> Option<u8> {
        self.final_scores
            .iter()
            .find(|(s, _)| *s == side)
            .map(|(_, points)| *points)
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Report {
    Frame(FrameReport),
    Result(MatchReport),
}

// ============================================================================
// Serialization Helpers
// ============================================================================

impl Report {
    /// Serialize report to bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>, postcard::Error> {
        to_allocvec(self)
    }

    /// Deserialize report from bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        from_bytes(bytes)
    }
}
