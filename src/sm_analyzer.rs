//! Mean pairwise (step, infected) distance across snapshots

use serde::Deserialize;

use crate::sm_interface::Record;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// Fewer than two records, so there is no pair to measure
    #[error("insufficient data: {records} record(s), need at least 2")]
    InsufficientData { records: usize },
}

/// How pairs are enumerated. The mean is the same either way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairMode {
    /// Every (i, j) with i != j: n * (n - 1) pairs
    #[default]
    Ordered,
    /// Every i < j: n * (n - 1) / 2 pairs
    Unordered,
}

/// Result of one analysis run
#[derive(Debug, Clone, PartialEq)]
pub struct StabilityReport {
    pub records: usize,
    pub pairs: usize,
    pub total_distance: f64,
    pub mean: f64,
}

impl StabilityReport {
    pub fn print_summary(&self) {
        println!("\n╔════════════════════════════════════════════════════════╗");
        println!("║    STABILITY ANALYSIS                                  ║");
        println!("╚════════════════════════════════════════════════════════╝\n");
        println!("  Records: {}", self.records);
        println!("  Pairs: {}", self.pairs);
        println!("  Total distance: {:.4}", self.total_distance);
        println!("  Mean distance: {:.4}", self.mean);
        println!();
    }
}

/// Euclidean distance between two (x, y) points
pub fn euclidean_distance(a: (i32, i32), b: (i32, i32)) -> f64 {
    let dx = f64::from(a.0) - f64::from(b.0);
    let dy = f64::from(a.1) - f64::from(b.1);
    (dx * dx + dy * dy).sqrt()
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StabilityAnalyzer {
    mode: PairMode,
}

impl StabilityAnalyzer {
    pub fn new(mode: PairMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> PairMode {
        self.mode
    }

    pub fn analyze(&self, records: &[Record]) -> Result<StabilityReport, AnalysisError> {
        let n = records.len();
        if n < 2 {
            return Err(AnalysisError::InsufficientData { records: n });
        }

        let mut total_distance = 0.0;
        let mut pairs = 0;

        for (i, a) in records.iter().enumerate() {
            let others = match self.mode {
                PairMode::Ordered => 0,
                PairMode::Unordered => i + 1,
            };
            for (j, b) in records.iter().enumerate().skip(others) {
                // self-pairs go by index, equal values still count
                if i == j {
                    continue;
                }
                total_distance += euclidean_distance(a.point(), b.point());
                pairs += 1;
            }
        }

        Ok(StabilityReport {
            records: n,
            pairs,
            total_distance,
            mean: total_distance / pairs as f64,
        })
    }

    pub fn compute_mean_pairwise_distance(&self, records: &[Record]) -> Result<f64, AnalysisError> {
        self.analyze(records).map(|report| report.mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(points: &[(i32, i32)]) -> Vec<Record> {
        points
            .iter()
            .map(|&(step, infected)| Record::new(step, 0, 0, infected))
            .collect()
    }

    #[test]
    fn test_known_triangle() {
        assert_eq!(euclidean_distance((0, 0), (3, 4)), 5.0);
        assert_eq!(euclidean_distance((3, 4), (0, 0)), 5.0);
    }

    #[test]
    fn test_extreme_values_do_not_overflow() {
        let d = euclidean_distance((i32::MIN, 0), (i32::MAX, 0));
        assert!((d - u32::MAX as f64).abs() < 1.0);
    }

    #[test]
    fn test_pair_count_ordered() {
        let records = pts(&[(0, 0), (1, 1), (2, 2), (3, 3), (4, 4)]);
        let report = StabilityAnalyzer::default().analyze(&records).unwrap();
        assert_eq!(report.pairs, 5 * 4);
        assert_eq!(report.records, 5);
    }

    #[test]
    fn test_ordered_sum_is_double_unordered() {
        let records = pts(&[(1, 0), (2, 3), (3, 4), (10, -2)]);
        let ordered = StabilityAnalyzer::new(PairMode::Ordered)
            .analyze(&records)
            .unwrap();
        let unordered = StabilityAnalyzer::new(PairMode::Unordered)
            .analyze(&records)
            .unwrap();

        assert_eq!(unordered.pairs, 6);
        assert_eq!(ordered.pairs, 12);
        assert!((ordered.total_distance - 2.0 * unordered.total_distance).abs() < 1e-9);
        assert!((ordered.mean - unordered.mean).abs() < 1e-12);
    }

    #[test]
    fn test_duplicate_points_contribute_zero() {
        let records = pts(&[(2, 7), (2, 7)]);
        let report = StabilityAnalyzer::default().analyze(&records).unwrap();
        // identical values are still a distinct pair
        assert_eq!(report.pairs, 2);
        assert_eq!(report.total_distance, 0.0);
        assert_eq!(report.mean, 0.0);
    }

    #[test]
    fn test_basic_scenario() {
        let records = vec![
            Record::new(1, 5, 2, 0),
            Record::new(2, 5, 2, 3),
            Record::new(3, 5, 2, 4),
        ];
        let report = StabilityAnalyzer::default().analyze(&records).unwrap();

        let expected_sum = 2.0 * (10f64.sqrt() + 20f64.sqrt() + 2f64.sqrt());
        assert_eq!(report.pairs, 6);
        assert!((report.total_distance - expected_sum).abs() < 1e-9);
        assert!((report.mean - 3.0162).abs() < 1e-4);
    }

    #[test]
    fn test_only_step_and_infected_matter() {
        let a = vec![Record::new(0, 1, 1, 0), Record::new(3, 100, 50, 4)];
        let mean = StabilityAnalyzer::default()
            .compute_mean_pairwise_distance(&a)
            .unwrap();
        assert_eq!(mean, 5.0);
    }

    #[test]
    fn test_insufficient_data() {
        let analyzer = StabilityAnalyzer::default();
        assert_eq!(
            analyzer.analyze(&[]),
            Err(AnalysisError::InsufficientData { records: 0 })
        );
        assert_eq!(
            analyzer.compute_mean_pairwise_distance(&pts(&[(1, 1)])),
            Err(AnalysisError::InsufficientData { records: 1 })
        );
    }
}
