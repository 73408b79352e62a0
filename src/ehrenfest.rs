//! Ehrenfest urn simulator
//!
//! `n` particles are split between two boxes of identical size laid side by
//! side. At each step one particle, chosen uniformly with replacement, jumps to
//! the other box. The simulator yields one [`Frame`] for the initial
//! configuration and one per transition, carrying the running statistics an
//! animation needs.

use std::iter::FusedIterator;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::histogram::{DensityHistogram, FluctuationHistogram};
use crate::params::EhrenfestParams;
use crate::Result;

/// Box a particle belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn flipped(self) -> Self {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }
}

/// State of the urn after one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// 0 for the initial configuration
    pub step: usize,
    /// Particle x coordinates; box B particles are shifted by the box width
    pub x: Vec<f64>,
    /// Particle y coordinates
    pub y: Vec<f64>,
    pub membership: Vec<Side>,
    pub count_a: usize,
    pub count_b: usize,
    /// Fraction in box A at every step so far
    pub fraction_a: Vec<f64>,
    /// Fraction in box B at every step so far
    pub fraction_b: Vec<f64>,
    /// `count_b - count_a` at every step so far
    pub fluctuations: Vec<i64>,
    pub histogram: DensityHistogram,
    /// Mean of `fluctuations`
    pub fluctuation_mean: f64,
    /// Population standard deviation of `fluctuations`
    pub fluctuation_std: f64,
    /// Fitted normal density at each histogram edge; empty on the first frame
    pub gaussian_fit: Vec<f64>,
}

impl Frame {
    /// Bin edges paired with the fitted density
    pub fn fit_points(&self) -> Vec<(f64, f64)> {
        self.histogram
            .edges
            .iter()
            .copied()
            .zip(self.gaussian_fit.iter().copied())
            .collect()
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            steps: self.step,
            count_a: self.count_a,
            count_b: self.count_b,
            fraction_a: self.fraction_a.last().copied().unwrap_or(0.0),
            fraction_b: self.fraction_b.last().copied().unwrap_or(0.0),
            fluctuation_mean: self.fluctuation_mean,
            fluctuation_std: self.fluctuation_std,
        }
    }
}

/// Final statistics of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub steps: usize,
    pub count_a: usize,
    pub count_b: usize,
    pub fraction_a: f64,
    pub fraction_b: f64,
    pub fluctuation_mean: f64,
    /// Population standard deviation
    pub fluctuation_std: f64,
}

/// Ehrenfest urn simulation; iterate it to pull frames
pub struct Ehrenfest<R = StdRng> {
    width: f64,
    height: f64,
    n_steps: usize,
    /// Position inside the particle's own box, in `[0, width)`
    local_x: Vec<f64>,
    y: Vec<f64>,
    membership: Vec<Side>,
    count_a: usize,
    fraction_a: Vec<f64>,
    fraction_b: Vec<f64>,
    fluctuations: Vec<i64>,
    histogram: FluctuationHistogram,
    /// Frames handed out so far
    emitted: usize,
    picker: Uniform<usize>,
    rng: R,
}

impl<R: Rng> Ehrenfest<R> {
    /// Create a simulation drawing from `rng`.
    ///
    /// Parameters are validated before the first draw. The first `n_a`
    /// particles start in box A, the remaining `n_b` in box B.
    pub fn new(params: &EhrenfestParams, mut rng: R) -> Result<Self> {
        params.validate()?;

        let n = params.n();
        let x_dist = Uniform::new(0.0, params.width);
        let y_dist = Uniform::new(0.0, params.height);

        let mut local_x = Vec::with_capacity(n);
        let mut y = Vec::with_capacity(n);
        for _ in 0..n {
            local_x.push(x_dist.sample(&mut rng));
            y.push(y_dist.sample(&mut rng));
        }

        let membership: Vec<Side> = (0..n)
            .map(|i| if i < params.n_a { Side::A } else { Side::B })
            .collect();

        let mut sim = Self {
            width: params.width,
            height: params.height,
            n_steps: params.n_steps,
            local_x,
            y,
            membership,
            count_a: params.n_a,
            fraction_a: Vec::new(),
            fraction_b: Vec::new(),
            fluctuations: Vec::new(),
            histogram: FluctuationHistogram::new(n),
            emitted: 0,
            picker: Uniform::new(0, n),
            rng,
        };
        sim.record_statistics();

        debug!(
            n_a = params.n_a,
            n_b = params.n_b,
            n_steps = params.n_steps,
            width = params.width,
            height = params.height,
            "ehrenfest simulation initialised"
        );

        Ok(sim)
    }

    /// Move one random particle to the other box
    fn transition(&mut self) {
        let i = self.picker.sample(&mut self.rng);
        let side = self.membership[i].flipped();
        self.membership[i] = side;
        match side {
            Side::A => self.count_a += 1,
            Side::B => self.count_a -= 1,
        }
        self.record_statistics();

        trace!(
            step = self.emitted,
            particle = i,
            to = ?side,
            count_a = self.count_a,
            "particle moved"
        );
    }

    fn record_statistics(&mut self) {
        let n = self.n();
        let (count_a, count_b) = self.counts();
        self.fraction_a.push(count_a as f64 / n as f64);
        self.fraction_b.push(count_b as f64 / n as f64);

        let fluctuation = count_b as i64 - count_a as i64;
        self.fluctuations.push(fluctuation);
        let recorded = self.histogram.record(fluctuation);
        debug_assert!(recorded, "fluctuation {fluctuation} outside [-n, n]");
    }
}

impl<R> Ehrenfest<R> {
    /// Total number of particles
    pub fn n(&self) -> usize {
        self.membership.len()
    }

    /// Current `(count_a, count_b)`
    pub fn counts(&self) -> (usize, usize) {
        (self.count_a, self.n() - self.count_a)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn membership(&self) -> &[Side] {
        &self.membership
    }

    pub fn fluctuations(&self) -> &[i64] {
        &self.fluctuations
    }

    pub fn histogram(&self) -> &FluctuationHistogram {
        &self.histogram
    }

    /// Frames still to be produced
    pub fn remaining(&self) -> usize {
        (self.n_steps + 1).saturating_sub(self.emitted)
    }

    /// Snapshot of the current state
    pub fn current_frame(&self) -> Frame {
        let x = self
            .local_x
            .iter()
            .zip(self.membership.iter())
            .map(|(&x, side)| match side {
                Side::A => x,
                Side::B => x + self.width,
            })
            .collect();
        let (count_a, count_b) = self.counts();

        Frame {
            step: self.fluctuations.len() - 1,
            x,
            y: self.y.clone(),
            membership: self.membership.clone(),
            count_a,
            count_b,
            fraction_a: self.fraction_a.clone(),
            fraction_b: self.fraction_b.clone(),
            fluctuations: self.fluctuations.clone(),
            histogram: self.histogram.snapshot(),
            fluctuation_mean: self.histogram.mean().unwrap_or(0.0),
            fluctuation_std: self.histogram.std_dev().unwrap_or(0.0),
            gaussian_fit: self.histogram.gaussian_fit(),
        }
    }
}

impl Ehrenfest<StdRng> {
    /// Reproducible simulation
    pub fn seeded(params: &EhrenfestParams, seed: u64) -> Result<Self> {
        Self::new(params, StdRng::seed_from_u64(seed))
    }

    /// Seeded from `params.seed` when present, otherwise from OS entropy
    pub fn from_params(params: &EhrenfestParams) -> Result<Self> {
        match params.seed {
            Some(seed) => Self::seeded(params, seed),
            None => Self::new(params, StdRng::from_entropy()),
        }
    }
}

impl<R: Rng> Iterator for Ehrenfest<R> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        if self.remaining() == 0 {
            return None;
        }
        if self.emitted > 0 {
            self.transition();
        }
        self.emitted += 1;
        Some(self.current_frame())
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl<R: Rng> ExactSizeIterator for Ehrenfest<R> {}

impl<R: Rng> FusedIterator for Ehrenfest<R> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PchemError;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_frame_for_zero_steps() {
        let params = EhrenfestParams::new(10, 10, 0, 100.0, 100.0);
        let frames: Vec<Frame> = Ehrenfest::seeded(&params, 1).unwrap().collect();

        assert_eq!(frames.len(), 1);
        let frame = &frames[0];
        assert_eq!(frame.step, 0);
        assert_eq!(frame.fraction_a, vec![0.5]);
        assert_eq!(frame.fraction_b, vec![0.5]);
        assert_eq!(frame.fluctuations, vec![0]);
        assert!(frame.gaussian_fit.is_empty());
        assert!(frame.fit_points().is_empty());
    }

    #[test]
    fn test_initial_assignment_order() {
        let params = EhrenfestParams::new(3, 2, 0, 10.0, 5.0);
        let frame = Ehrenfest::seeded(&params, 9).unwrap().next().unwrap();

        assert_eq!(frame.membership, vec![Side::A, Side::A, Side::A, Side::B, Side::B]);
        assert!(frame.x[..3].iter().all(|&x| (0.0..10.0).contains(&x)));
        assert!(frame.x[3..].iter().all(|&x| (10.0..20.0).contains(&x)));
        assert!(frame.y.iter().all(|&y| (0.0..5.0).contains(&y)));
    }

    #[test]
    fn test_all_in_a_spreads_at_most_one_per_step() {
        let params = EhrenfestParams::new(50, 0, 5, 100.0, 100.0);
        let frames: Vec<Frame> = Ehrenfest::seeded(&params, 3).unwrap().collect();

        assert_eq!(frames.len(), 6);
        assert_eq!(frames[0].count_b, 0);
        // the first move is forced from A to B
        assert_eq!(frames[1].count_b, 1);
        for (k, frame) in frames.iter().enumerate() {
            assert!(frame.count_b <= k);
        }
    }

    #[test]
    fn test_exhausted_stays_exhausted() {
        let params = EhrenfestParams::new(2, 2, 3, 1.0, 1.0);
        let mut sim = Ehrenfest::seeded(&params, 11).unwrap();
        assert_eq!(sim.len(), 4);
        for _ in 0..4 {
            assert!(sim.next().is_some());
        }
        assert_eq!(sim.remaining(), 0);
        assert!(sim.next().is_none());
        assert!(sim.next().is_none());
    }

    #[test]
    fn test_same_seed_same_frames() {
        let params = EhrenfestParams::new(7, 4, 25, 100.0, 50.0);
        let a: Vec<Frame> = Ehrenfest::seeded(&params, 42).unwrap().collect();
        let b: Vec<Frame> = Ehrenfest::seeded(&params, 42).unwrap().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_from_params_uses_seed() {
        let params = EhrenfestParams::new(5, 5, 10, 1.0, 1.0).with_seed(5);
        let a: Vec<Frame> = Ehrenfest::from_params(&params).unwrap().collect();
        let b: Vec<Frame> = Ehrenfest::seeded(&params, 5).unwrap().collect();
        assert_eq!(a, b);
    }

    #[test]
    fn test_second_frame_has_fit() {
        let params = EhrenfestParams::new(4, 4, 1, 1.0, 1.0);
        let frames: Vec<Frame> = Ehrenfest::seeded(&params, 2).unwrap().collect();
        let last = &frames[1];

        assert_eq!(last.gaussian_fit.len(), last.histogram.edges.len());
        assert_relative_eq!(last.histogram.area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_invalid_params_rejected() {
        let params = EhrenfestParams::new(0, 0, 10, 100.0, 100.0);
        assert!(matches!(
            Ehrenfest::seeded(&params, 0),
            Err(PchemError::InvalidParameter(_))
        ));

        let params = EhrenfestParams::new(1, 0, 10, 0.0, 100.0);
        assert!(Ehrenfest::seeded(&params, 0).is_err());
    }

    #[test]
    fn test_frame_moments_match_history() {
        let params = EhrenfestParams::new(6, 2, 40, 1.0, 1.0);
        for frame in Ehrenfest::seeded(&params, 21).unwrap() {
            let samples = frame.fluctuations.len() as f64;
            let mean = frame.fluctuations.iter().sum::<i64>() as f64 / samples;
            let var = frame
                .fluctuations
                .iter()
                .map(|&f| (f as f64 - mean).powi(2))
                .sum::<f64>()
                / samples;

            let summary = frame.summary();
            assert_relative_eq!(summary.fluctuation_mean, mean, epsilon = 1e-12);
            assert_relative_eq!(summary.fluctuation_std, var.sqrt(), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_box_b_positions_stay_finite_for_wide_boxes() {
        let params = EhrenfestParams::new(0, 3, 0, 8e307, 1.0);
        let frame = Ehrenfest::seeded(&params, 1).unwrap().next().unwrap();
        for &x in &frame.x {
            assert!(x.is_finite());
            assert!((8e307..1.6e308).contains(&x));
        }

        let params = EhrenfestParams::new(0, 3, 0, 1e308, 1.0);
        assert!(matches!(
            Ehrenfest::seeded(&params, 1),
            Err(PchemError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_single_particle_alternates() {
        let params = EhrenfestParams::new(1, 0, 4, 1.0, 1.0);
        let sides: Vec<Side> = Ehrenfest::seeded(&params, 8)
            .unwrap()
            .map(|f| f.membership[0])
            .collect();
        assert_eq!(sides, vec![Side::A, Side::B, Side::A, Side::B, Side::A]);
    }
}
