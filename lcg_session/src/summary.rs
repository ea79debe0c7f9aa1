use serde::Serialize;

use crate::session::SequenceEntry;

/// Headline statistics over the normalized column of a sequence.
#[derive(Copy, Clone, Debug, PartialEq, Serialize)]
pub struct SequenceSummary {
    pub count: usize,
    pub mean: f64,
    /// Population standard deviation.
    pub std_dev: f64,
    /// Difference between the largest and smallest value.
    pub span: f64,
}

impl SequenceSummary {
    /// `None` when there is nothing to summarize.
    pub fn from_entries(entries: &[SequenceEntry]) -> Option<Self> {
        if entries.is_empty() {
            return None;
        }
        let count = entries.len();
        let n = count as f64;
        let mean = entries.iter().map(|e| e.normalized).sum::<f64>() / n;
        let variance = entries
            .iter()
            .map(|e| (e.normalized - mean).powi(2))
            .sum::<f64>()
            / n;
        let (min, max) = entries.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), e| {
            (lo.min(e.normalized), hi.max(e.normalized))
        });
        Some(Self {
            count,
            mean,
            std_dev: variance.sqrt(),
            span: max - min,
        })
    }
}

impl std::fmt::Display for SequenceSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "count={} mean={:.5} std_dev={:.5} span={:.5}",
            self.count, self.mean, self.std_dev, self.span
        )
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn entries(values: &[f64]) -> Vec<SequenceEntry> {
        values
            .iter()
            .enumerate()
            .map(|(i, &normalized)| SequenceEntry {
                index: i + 1,
                integer: (normalized * 100.0) as i64,
                normalized,
            })
            .collect()
    }

    #[test]
    fn test_empty() {
        assert_eq!(SequenceSummary::from_entries(&[]), None);
    }

    #[test]
    fn test_single_value() {
        let summary = SequenceSummary::from_entries(&entries(&[0.25])).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.mean, 0.25);
        assert_eq!(summary.std_dev, 0.0);
        assert_eq!(summary.span, 0.0);
    }

    #[test]
    fn test_population_statistics() {
        let summary = SequenceSummary::from_entries(&entries(&[0.0, 0.5, 0.25, 0.75])).unwrap();
        assert_eq!(summary.count, 4);
        assert_eq!(summary.mean, 0.375);
        // Deviations 0.375, 0.125, 0.125, 0.375 give variance 0.078125.
        assert!((summary.std_dev - 0.078125f64.sqrt()).abs() < 1e-12);
        assert_eq!(summary.span, 0.75);
        assert_eq!(
            summary.to_string(),
            "count=4 mean=0.37500 std_dev=0.27951 span=0.75000"
        );
    }
}
