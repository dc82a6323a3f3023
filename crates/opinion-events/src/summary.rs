//! Run Summary Types
//!
//! Aggregate statistics written once a run has finished.

use serde::{Deserialize, Serialize};

/// Average opinion of one group (or age band)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupAverage {
    pub label: String,
    /// Inclusive lower bound of the group value
    pub lower: f64,
    /// Exclusive upper bound; `None` for open-ended bands
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper: Option<f64>,
    pub members: usize,
    /// `None` if the group is empty
    pub mean_opinion: Option<f64>,
}

/// Opinion counts over equally sized bins spanning [0, 1]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpinionHistogram {
    pub counts: Vec<usize>,
}

impl OpinionHistogram {
    pub fn num_bins(&self) -> usize {
        self.counts.len()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Summary of a complete run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub mode: String,
    pub seed: u64,
    pub num_steps: u64,
    pub num_users: usize,
    pub frames_written: u64,
    pub mean_opinion: f64,
    pub opinion_std: f64,
    #[serde(default)]
    pub group_averages: Vec<GroupAverage>,
    #[serde(default)]
    pub histogram: OpinionHistogram,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_histogram_counts() {
        let hist = OpinionHistogram {
            counts: vec![1, 0, 3, 0],
        };
        assert_eq!(hist.num_bins(), 4);
        assert_eq!(hist.total(), 4);
    }

    #[test]
    fn test_open_band_skips_upper() {
        let avg = GroupAverage {
            label: "80+".to_string(),
            lower: 80.0,
            upper: None,
            members: 0,
            mean_opinion: None,
        };
        let json = serde_json::to_string(&avg).unwrap();
        assert!(!json.contains("upper"));
    }
}
