// src/io/demand.rs

use crate::model::random::RandomSource;

/// One slice of the empirical demand distribution: probabilities below
/// `upper_p` (and at or above the previous band's) map uniformly onto
/// `low..=high`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemandBand {
    pub upper_p: f64,
    pub low: u32,
    pub high: u32,
}

impl DemandBand {
    /// Number of integer demand values the band covers.
    pub fn span(&self) -> u32 {
        self.high - self.low + 1
    }
}

/// Monthly vaccine demand. Heavy mass between 2500 and 6000, thin tails.
pub const DEMAND_BANDS: [DemandBand; 6] = [
    DemandBand { upper_p: 0.07, low: 1000, high: 2500 },
    DemandBand { upper_p: 0.40, low: 2500, high: 4000 },
    DemandBand { upper_p: 0.65, low: 4000, high: 6000 },
    DemandBand { upper_p: 0.83, low: 6000, high: 7000 },
    DemandBand { upper_p: 0.93, low: 7000, high: 8000 },
    DemandBand { upper_p: 1.00, low: 8000, high: 10000 },
];

pub const MIN_DEMAND: u32 = 1000;
pub const MAX_DEMAND: u32 = 10000;

/// Anything that yields one demand value per trial.
pub trait DemandSource {
    fn sample(&mut self) -> u32;
}

/// Samples the fixed piecewise-uniform distribution.
///
/// Each sample takes two independent draws from the source: one picks the
/// band, the other the offset inside it.
#[derive(Debug, Clone)]
pub struct DemandSampler<R: RandomSource> {
    source: R,
}

impl<R: RandomSource> DemandSampler<R> {
    pub fn new(source: R) -> Self {
        Self { source }
    }

    pub fn into_inner(self) -> R {
        self.source
    }
}

impl<R: RandomSource> DemandSource for DemandSampler<R> {
    fn sample(&mut self) -> u32 {
        let band = band_for(self.source.next_f64());
        let offset = (self.source.next_f64() * band.span() as f64) as u32;
        band.low + offset.min(band.span() - 1)
    }
}

fn band_for(p: f64) -> &'static DemandBand {
    DEMAND_BANDS
        .iter()
        .find(|band| p < band.upper_p)
        .unwrap_or(&DEMAND_BANDS[DEMAND_BANDS.len() - 1])
}

/// Inverse CDF of the demand distribution, treating each band as continuous
/// over its integer span.
pub fn demand_quantile(q: f64) -> f64 {
    if q <= 0.0 {
        return MIN_DEMAND as f64;
    }
    if q >= 1.0 {
        return MAX_DEMAND as f64;
    }

    let mut lower_p = 0.0;
    for band in &DEMAND_BANDS {
        if q < band.upper_p {
            let fraction = (q - lower_p) / (band.upper_p - lower_p);
            let value = band.low as f64 + fraction * band.span() as f64;
            return value.min(band.high as f64);
        }
        lower_p = band.upper_p;
    }
    MAX_DEMAND as f64
}

/// Always returns the same demand. Makes estimator results exact.
#[derive(Debug, Clone, Copy)]
pub struct FixedDemand(pub u32);

impl DemandSource for FixedDemand {
    fn sample(&mut self) -> u32 {
        self.0
    }
}
