// src/model/random.rs

use crate::error::{SimError, SimResult};
use rand::SeedableRng;
use rand_distr::{Distribution, Uniform};
use rand_pcg::Pcg64;

/// Source of uniform probabilities in [0, 1).
///
/// Every random draw in the simulation goes through this trait, so a run is
/// a pure function of the sequence it yields.
pub trait RandomSource {
    fn next_f64(&mut self) -> f64;
}

/// PCG-backed source. Same seed, same sequence.
#[derive(Debug, Clone)]
pub struct SeededSource {
    rng: Pcg64,
    unit: Uniform<f64>,
    seed: Option<u64>,
}

impl SeededSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg64::seed_from_u64(seed),
            unit: Uniform::new(0.0, 1.0),
            seed: Some(seed),
        }
    }

    /// Non-reproducible source seeded from the OS.
    pub fn from_entropy() -> Self {
        Self {
            rng: Pcg64::from_entropy(),
            unit: Uniform::new(0.0, 1.0),
            seed: None,
        }
    }

    /// Builds a seeded source when a seed is given, an entropy one otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::new(seed),
            None => Self::from_entropy(),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }
}

impl RandomSource for SeededSource {
    fn next_f64(&mut self) -> f64 {
        self.unit.sample(&mut self.rng)
    }
}

/// Replays a fixed list of values, cycling when exhausted.
#[derive(Debug, Clone)]
pub struct ScriptedSource {
    values: Vec<f64>,
    cursor: usize,
}

impl ScriptedSource {
    pub fn new(values: Vec<f64>) -> SimResult<Self> {
        if let Some(bad) = values.iter().find(|v| !(0.0..1.0).contains(*v)) {
            return Err(SimError::invalid("script", format!("{bad} is outside [0, 1)")));
        }
        if values.is_empty() {
            return Err(SimError::invalid("script", "needs at least one value"));
        }
        Ok(Self { values, cursor: 0 })
    }

    /// Returns `value` forever. Values outside [0, 1) are clamped into it.
    pub fn constant(value: f64) -> Self {
        Self {
            values: vec![value.clamp(0.0, 1.0 - f64::EPSILON)],
            cursor: 0,
        }
    }

    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for ScriptedSource {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
