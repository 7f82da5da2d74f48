//! # engine::scores
//!
//! Where sub-scores come from.  The ranker only sees the [`ScoreSource`]
//! trait; production plugs in [`RandomScoreSource`], tests plug in fixed
//! sequences.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::models::SubScores;

pub trait ScoreSource: Send + Sync {
    /// Draw one `(twitter, unusualWhales, tradingview)` triple for `symbol`,
    /// every component in `[0, 1]`.
    fn draw(&mut self, symbol: &str) -> SubScores;
}

/// Independent uniform draws — demo data, not a market read.
pub struct RandomScoreSource {
    rng: StdRng,
}

impl RandomScoreSource {
    /// `Some(seed)` gives a reproducible sequence, `None` seeds from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }
}

impl ScoreSource for RandomScoreSource {
    fn draw(&mut self, _symbol: &str) -> SubScores {
        SubScores {
            twitter: self.rng.gen_range(0.0..=1.0),
            unusual_whales: self.rng.gen_range(0.0..=1.0),
            tradingview: self.rng.gen_range(0.0..=1.0),
        }
    }
}
