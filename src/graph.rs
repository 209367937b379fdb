// Copyright 2025 the Pathbender Authors
// SPDX-License-Identifier: Apache-2.0

//! Downsampling adapter between motion profiles and the graph widget.
//!
//! The service returns profiles at arbitrary resolution; the graph only
//! ever receives `ceil(n / MAX_POINTS)`-strided samples so render cost is
//! bounded no matter how dense the profile is. Sampling is index-strided
//! and order-preserving, never interpolated, and keeps the original `time`
//! values as x-coordinates.

use crate::model::ProfilePoint;
use crate::settings;

/// Downsampled render buffers for the three plotted series.
///
/// Velocity plots against the left value axis; acceleration and jerk share
/// the right one. These buffers are derived data, rebuilt wholesale from
/// each new profile.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileSeries {
    pub velocity: Vec<(f64, f64)>,
    pub acceleration: Vec<(f64, f64)>,
    pub jerk: Vec<(f64, f64)>,
}

impl ProfileSeries {
    /// Downsample a profile into graph buffers.
    pub fn from_profile(profile: &[ProfilePoint]) -> Self {
        let mut series = Self::default();
        if profile.is_empty() {
            return series;
        }

        let step = profile.len().div_ceil(settings::graph::MAX_POINTS);
        for pt in profile.iter().step_by(step) {
            series.velocity.push((pt.time, pt.velocity));
            series.acceleration.push((pt.time, pt.acceleration));
            series.jerk.push((pt.time, pt.jerk));
        }
        series
    }

    pub fn is_empty(&self) -> bool {
        self.velocity.is_empty()
    }

    pub fn len(&self) -> usize {
        self.velocity.len()
    }

    /// Last sampled time, the x-extent of the graph.
    pub fn time_span(&self) -> f64 {
        self.velocity.last().map(|&(t, _)| t).unwrap_or(0.0)
    }

    /// Peak velocity magnitude, the left axis extent.
    pub fn velocity_peak(&self) -> f64 {
        self.velocity
            .iter()
            .map(|&(_, v)| v.abs())
            .fold(0.0, f64::max)
    }

    /// Peak acceleration/jerk magnitude, the right axis extent.
    pub fn accel_jerk_peak(&self) -> f64 {
        self.acceleration
            .iter()
            .chain(self.jerk.iter())
            .map(|&(_, v)| v.abs())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_of(n: usize) -> Vec<ProfilePoint> {
        (0..n)
            .map(|i| ProfilePoint {
                time: i as f64 * 0.01,
                velocity: (i % 7) as f64,
                acceleration: (i % 5) as f64 - 2.0,
                jerk: (i % 3) as f64 - 1.0,
            })
            .collect()
    }

    #[test]
    fn empty_profile_gives_empty_series() {
        let series = ProfileSeries::from_profile(&[]);
        assert!(series.is_empty());
        assert_eq!(series.time_span(), 0.0);
    }

    #[test]
    fn short_profiles_pass_through_unsampled() {
        let profile = profile_of(150);
        let series = ProfileSeries::from_profile(&profile);
        assert_eq!(series.len(), 150);
        assert_eq!(series.velocity[0], (0.0, 0.0));
    }

    #[test]
    fn long_profiles_obey_the_point_budget() {
        for n in [201, 399, 400, 401, 1000, 12345] {
            let profile = profile_of(n);
            let series = ProfileSeries::from_profile(&profile);
            let step = n.div_ceil(settings::graph::MAX_POINTS);
            let expected = n.div_ceil(step);
            assert_eq!(series.len(), expected, "n = {n}");
            assert!(series.len() <= settings::graph::MAX_POINTS, "n = {n}");
        }
    }

    #[test]
    fn sampling_starts_at_index_zero_and_preserves_order() {
        let profile = profile_of(1000);
        let series = ProfileSeries::from_profile(&profile);
        assert_eq!(series.velocity[0].0, profile[0].time);
        // Sampled times are a strictly increasing subsequence
        for pair in series.velocity.windows(2) {
            assert!(pair[1].0 > pair[0].0);
        }
        // And each sample is an original point, not an interpolation
        let step = 1000usize.div_ceil(settings::graph::MAX_POINTS);
        for (k, &(t, v)) in series.velocity.iter().enumerate() {
            let original = &profile[k * step];
            assert_eq!(t, original.time);
            assert_eq!(v, original.velocity);
        }
    }

    #[test]
    fn peaks_cover_both_shared_axis_series() {
        let profile = vec![
            ProfilePoint {
                time: 0.0,
                velocity: 3.0,
                acceleration: -9.0,
                jerk: 2.0,
            },
            ProfilePoint {
                time: 0.1,
                velocity: 5.0,
                acceleration: 1.0,
                jerk: -11.0,
            },
        ];
        let series = ProfileSeries::from_profile(&profile);
        assert_eq!(series.velocity_peak(), 5.0);
        assert_eq!(series.accel_jerk_peak(), 11.0);
    }
}
