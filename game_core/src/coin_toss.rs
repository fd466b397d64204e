use tracing::{info, trace};

use crate::{GameRng, Mode, Params, Side};

/// What a coin toss frame produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TossStatus {
    /// Highlight still cycling
    Rolling,
    /// Roll just stopped on this side
    Decided(Side),
    /// Showing the winner
    Holding,
    /// Hold finished: start serving
    Done(Side),
}

/// Pre-match "slot machine" picking the side that receives first
#[derive(Debug, Clone, PartialEq)]
pub struct CoinToss {
    candidates: &'static [Side],
    highlighted: Side,
    elapsed: f32,
    since_switch: f32,
    winner: Option<Side>,
    roll: f32,
    hold: f32,
}

impl CoinToss {
    pub fn new(mode: Mode, rng: &mut GameRng) -> Self {
        let candidates = mode.sides();
        Self {
            candidates,
            highlighted: candidates[rng.index(candidates.len())],
            elapsed: 0.0,
            since_switch: 0.0,
            winner: None,
            roll: Params::COIN_TOSS_ROLL,
            hold: Params::COIN_TOSS_RESULT,
        }
    }

    pub fn highlighted(&self) -> Side {
        self.highlighted
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Total time from the first frame to the serve
    pub fn duration(&self) -> f32 {
        self.roll + self.hold
    }

    /// Time between highlight switches: shrinks quadratically over the roll
    pub fn interval(&self) -> f32 {
        let progress = (self.elapsed / self.roll).clamp(0.0, 1.0);
        Params::COIN_TOSS_SLOWEST
            + (Params::COIN_TOSS_FASTEST - Params::COIN_TOSS_SLOWEST) * progress * progress
    }

    pub fn advance(&mut self, dt: f32, rng: &mut GameRng) -> TossStatus {
        self.elapsed += dt;

        if let Some(winner) = self.winner {
            if self.elapsed >= self.duration() {
                return TossStatus::Done(winner);
            }
            return TossStatus::Holding;
        }

        if self.elapsed >= self.roll {
            self.winner = Some(self.highlighted);
            info!(winner = ?self.highlighted, "coin toss decided");
            return TossStatus::Decided(self.highlighted);
        }

        self.since_switch += dt;
        loop {
            let interval = self.interval();
            if self.since_switch < interval {
                break;
            }
            self.since_switch -= interval;
            self.switch(rng);
        }
        TossStatus::Rolling
    }

    /// Move the highlight to a different candidate
    fn switch(&mut self, rng: &mut GameRng) {
        let current = self.highlighted;
        let others: Vec<Side> = self
            .candidates
            .iter()
            .copied()
            .filter(|side| *side != current)
            .collect();
        if others.is_empty() {
            return;
        }
        self.highlighted = others[rng.index(others.len())];
        trace!(highlighted = ?self.highlighted, "coin toss switch");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interval_shrinks_quadratically() {
        let mut rng = GameRng::new(1);
        let mut toss = CoinToss::new(Mode::TwoPaddle, &mut rng);
        assert!((toss.interval() - Params::COIN_TOSS_SLOWEST).abs() < 1e-6);

        toss.elapsed = toss.roll / 2.0;
        let expected = Params::COIN_TOSS_SLOWEST
            + (Params::COIN_TOSS_FASTEST - Params::COIN_TOSS_SLOWEST) * 0.25;
        assert!((toss.interval() - expected).abs() < 1e-6);

        toss.elapsed = toss.roll;
        assert!((toss.interval() - Params::COIN_TOSS_FASTEST).abs() < 1e-6);
    }

    #[test]
    fn test_highlight_alternates_in_two_paddle_mode() {
        let mut rng = GameRng::new(9);
        let mut toss = CoinToss::new(Mode::TwoPaddle, &mut rng);
        let first = toss.highlighted();

        // First switch lands after the slowest interval
        toss.advance(0.3, &mut rng);
        assert_eq!(toss.highlighted(), first);
        toss.advance(0.25, &mut rng);
        assert_eq!(toss.highlighted(), first.opposite());
    }

    #[test]
    fn test_switches_accelerate() {
        let mut rng = GameRng::new(3);
        let mut toss = CoinToss::new(Mode::FourPaddle, &mut rng);
        let dt = 1.0 / 60.0;
        let mut switches_first_second = 0;
        let mut switches_last_second = 0;
        let mut previous = toss.highlighted();

        for frame in 0..240 {
            toss.advance(dt, &mut rng);
            if toss.highlighted() != previous {
                if frame < 60 {
                    switches_first_second += 1;
                } else if frame >= 180 {
                    switches_last_second += 1;
                }
                previous = toss.highlighted();
            }
        }
        assert!(switches_last_second > switches_first_second * 2);
    }

    #[test]
    fn test_toss_decides_then_holds_then_finishes() {
        let mut rng = GameRng::new(42);
        let mut toss = CoinToss::new(Mode::TwoPaddle, &mut rng);
        let dt = 0.05;
        let mut decided = None;
        let mut done = None;

        for _ in 0..200 {
            match toss.advance(dt, &mut rng) {
                TossStatus::Decided(side) => {
                    assert!(decided.is_none(), "decided twice");
                    decided = Some(side);
                }
                TossStatus::Done(side) => {
                    done = Some((side, toss.elapsed()));
                    break;
                }
                TossStatus::Rolling | TossStatus::Holding => {}
            }
        }

        let (winner, at) = done.expect("toss finishes");
        assert_eq!(Some(winner), decided);
        assert_eq!(toss.winner(), Some(winner));
        assert!(at >= toss.duration() - 1e-4 && at < toss.duration() + dt + 1e-4);
    }

    #[test]
    fn test_same_seed_same_winner() {
        let run = |seed| {
            let mut rng = GameRng::new(seed);
            let mut toss = CoinToss::new(Mode::FourPaddle, &mut rng);
            loop {
                if let TossStatus::Done(side) = toss.advance(1.0 / 60.0, &mut rng) {
                    return side;
                }
            }
        };
        assert_eq!(run(77), run(77));
    }
}
