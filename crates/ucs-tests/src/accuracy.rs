//! Inversion accuracy measured as CAM02-UCS distance
//!
//! One unit of Jab distance is roughly one just-noticeable difference, so
//! a round trip with a maximum below 1.0 is visually exact.

use ucs_core::{Rgb, ViewingConditions, delta_e, srgb_to_ucs, srgb_to_ucs_batch, ucs_to_srgb_batch};

/// Statistics from a Jab distance comparison
#[derive(Debug, Clone)]
pub struct DeltaStats {
    /// Mean distance across all samples
    pub mean: f64,
    /// Maximum distance
    pub max: f64,
    /// 95th percentile distance
    pub p95: f64,
    /// Number of samples
    pub count: usize,
}

impl DeltaStats {
    /// Summarize a set of distances
    pub fn from_distances(mut distances: Vec<f64>) -> Self {
        if distances.is_empty() {
            return Self {
                mean: 0.0,
                max: 0.0,
                p95: 0.0,
                count: 0,
            };
        }
        distances.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let count = distances.len();
        let mean = distances.iter().sum::<f64>() / count as f64;
        let max = distances.last().copied().unwrap_or(0.0);
        let p95_idx = ((count as f64 * 0.95) as usize).min(count - 1);
        let p95 = distances[p95_idx];

        Self {
            mean,
            max,
            p95,
            count,
        }
    }

    /// Check if all differences are imperceptible (distance < 1.0)
    pub fn is_excellent(&self) -> bool {
        self.max < 1.0
    }

    /// Check if differences are barely perceptible (distance < 2.0)
    pub fn is_good(&self) -> bool {
        self.max < 2.0
    }
}

/// Encode, invert and re-encode `colors`; distances between the two encodings
pub fn inversion_stats(colors: &[Rgb], conditions: &ViewingConditions, bounded: bool) -> DeltaStats {
    let targets = srgb_to_ucs_batch(colors, conditions);
    let recovered = ucs_to_srgb_batch(&targets, conditions, bounded);
    let distances = targets
        .iter()
        .zip(&recovered)
        .map(|(t, rgb)| delta_e(*t, srgb_to_ucs(*rgb, conditions)))
        .collect();
    DeltaStats::from_distances(distances)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ucs_core::Jab;

    #[test]
    fn test_stats() {
        let stats = DeltaStats::from_distances(vec![0.5, 0.1, 0.3, 0.1]);
        assert_eq!(stats.count, 4);
        assert!((stats.mean - 0.25).abs() < 1e-12);
        assert_eq!(stats.max, 0.5);
        assert_eq!(stats.p95, 0.5);
        assert!(stats.is_excellent());
    }

    #[test]
    fn test_empty() {
        let stats = DeltaStats::from_distances(Vec::new());
        assert_eq!(stats.count, 0);
        assert!(stats.is_excellent());
    }

    #[test]
    fn test_identical_colors() {
        let jab = Jab::new(50.0, 1.0, 2.0);
        let stats = DeltaStats::from_distances(vec![delta_e(jab, jab); 3]);
        assert_eq!(stats.max, 0.0);
    }
}
