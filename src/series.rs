//! Sliding-window storage for the three animated series, plus the synthetic sample source.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;
use std::collections::VecDeque;

/// Number of series the widget animates.
pub const SERIES_COUNT: usize = 3;

/// Three fixed-length windows of samples, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SeriesStore {
    capacity: usize,
    series: [VecDeque<u32>; SERIES_COUNT],
}

impl SeriesStore {
    /// Empty store; nothing is visible until [`SeriesStore::initialize`] runs.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            series: Default::default(),
        }
    }

    /// Build a store directly from windows, mainly for tests and replays.
    /// Windows longer than `capacity` keep their newest samples.
    pub fn from_windows(capacity: usize, windows: [Vec<u32>; SERIES_COUNT]) -> Self {
        let series = windows.map(|w| {
            let skip = w.len().saturating_sub(capacity);
            w.into_iter().skip(skip).collect::<VecDeque<_>>()
        });
        Self { capacity, series }
    }

    /// Replace every window with `capacity` fresh samples per series.
    pub fn initialize<F>(&mut self, capacity: usize, mut generator: F)
    where
        F: FnMut() -> u32,
    {
        self.capacity = capacity;
        for s in self.series.iter_mut() {
            s.clear();
            s.extend((0..capacity).map(|_| generator()));
        }
    }

    /// Append one new sample per series and evict the oldest, keeping lengths fixed.
    ///
    /// A window that has not reached capacity yet only grows.
    pub fn advance<F>(&mut self, mut generator: F)
    where
        F: FnMut() -> u32,
    {
        for s in self.series.iter_mut() {
            s.push_back(generator());
            if s.len() > self.capacity {
                s.pop_front();
            }
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Length of the primary window (all windows share it once filled).
    pub fn len(&self) -> usize {
        self.series[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.iter().all(VecDeque::is_empty)
    }

    /// Window `idx` as a contiguous slice copy, oldest first.
    pub fn window(&self, idx: usize) -> Vec<u32> {
        self.series
            .get(idx)
            .map(|s| s.iter().copied().collect())
            .unwrap_or_default()
    }

    /// The first series, the only one drawn by bar, area and scatter charts.
    pub fn primary(&self) -> Vec<u32> {
        self.window(0)
    }

    /// All windows in order.
    pub fn windows(&self) -> [Vec<u32>; SERIES_COUNT] {
        [self.window(0), self.window(1), self.window(2)]
    }

    /// Raw sample of the primary series at `index`.
    pub fn primary_at(&self, index: usize) -> Option<u32> {
        self.series[0].get(index).copied()
    }
}

/// Uniform integer samples in `[0, max_range)`.
#[derive(Debug, Clone)]
pub struct RandomSamples {
    rng: StdRng,
}

impl RandomSamples {
    /// Seeded source for reproducible runs; `None` draws a seed from the OS.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    pub fn sample(&mut self, max_range: u32) -> u32 {
        self.rng.gen_range(0..max_range.max(1))
    }
}
