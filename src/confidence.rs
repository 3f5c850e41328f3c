use rand::rngs::{StdRng, ThreadRng};
use rand::{Rng, SeedableRng};

/// Confidence for an exact-pass pairing lies in this half-open range.
pub const EXACT_RANGE: std::ops::Range<f64> = 95.0..100.0;
/// Confidence for an unmatched row lies in this half-open range.
pub const UNMATCHED_RANGE: std::ops::Range<f64> = 0.0..30.0;

/// Supplies the confidences that are not derived from a score.
///
/// Status never depends on these values, only the reported percentage does.
pub trait ConfidenceSource {
    fn exact_match(&mut self) -> f64;
    fn unmatched(&mut self) -> f64;
}

/// Constant anchors. Two runs over the same input compare equal.
#[derive(Debug, Clone, Copy)]
pub struct FixedConfidence {
    pub exact: f64,
    pub unmatched: f64,
}

impl Default for FixedConfidence {
    fn default() -> Self {
        Self {
            exact: 97.5,
            unmatched: 0.0,
        }
    }
}

impl ConfidenceSource for FixedConfidence {
    fn exact_match(&mut self) -> f64 {
        self.exact
    }

    fn unmatched(&mut self) -> f64 {
        self.unmatched
    }
}

/// Uniform draws from a seeded generator; reproducible per seed.
pub struct SeededConfidence {
    rng: StdRng,
}

impl SeededConfidence {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl ConfidenceSource for SeededConfidence {
    fn exact_match(&mut self) -> f64 {
        self.rng.gen_range(EXACT_RANGE)
    }

    fn unmatched(&mut self) -> f64 {
        self.rng.gen_range(UNMATCHED_RANGE)
    }
}

/// Fresh entropy on every run.
pub struct EntropyConfidence {
    rng: ThreadRng,
}

impl Default for EntropyConfidence {
    fn default() -> Self {
        Self {
            rng: rand::thread_rng(),
        }
    }
}

impl ConfidenceSource for EntropyConfidence {
    fn exact_match(&mut self) -> f64 {
        self.rng.gen_range(EXACT_RANGE)
    }

    fn unmatched(&mut self) -> f64 {
        self.rng.gen_range(UNMATCHED_RANGE)
    }
}

/// Pick a source from CLI flags: a seed wins, then `random`, else fixed anchors.
pub fn from_options(seed: Option<u64>, random: bool) -> Box<dyn ConfidenceSource> {
    match (seed, random) {
        (Some(seed), _) => Box::new(SeededConfidence::new(seed)),
        (None, true) => Box::new(EntropyConfidence::default()),
        (None, false) => Box::new(FixedConfidence::default()),
    }
}
