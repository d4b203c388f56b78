//! Response and session metrics
//!
//! Process-lifetime aggregator for response latency, response length, and
//! per-session summaries. Samples grow without bound for the life of the
//! process and are never persisted. The aggregator is passed explicitly into
//! the session controller so independent sessions (and tests) never share
//! state through a global.

use serde::Serialize;

use crate::history::SessionSummary;

/// Accumulated samples across one process run
#[derive(Default)]
pub struct MetricsAggregator {
    response_times: Vec<f64>,
    response_lengths: Vec<usize>,
    sessions: Vec<SessionSummary>,
}

/// Point-in-time aggregate view, computed on demand
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsReport {
    pub avg_response_time: f64,
    pub avg_response_length: f64,
    pub total_sessions: usize,
    pub session_summaries: Vec<SessionSummary>,
}

impl MetricsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record latency and length samples for one model response
    ///
    /// `elapsed_secs` is a monotonic elapsed interval measured by the caller,
    /// so it is never negative.
    pub fn evaluate_response(&mut self, response: &str, elapsed_secs: f64) {
        self.response_times.push(elapsed_secs);
        self.response_lengths.push(response.chars().count());
    }

    /// Record the summary of a finished session
    pub fn add_session_metrics(&mut self, summary: SessionSummary) {
        self.sessions.push(summary);
    }

    /// Compute the aggregate view over everything recorded so far
    ///
    /// Averages report as zero when no samples exist; an empty run is a
    /// defined case, not an error or a NaN.
    pub fn report(&self) -> MetricsReport {
        MetricsReport {
            avg_response_time: mean(&self.response_times),
            avg_response_length: mean(
                &self
                    .response_lengths
                    .iter()
                    .map(|&n| n as f64)
                    .collect::<Vec<_>>(),
            ),
            total_sessions: self.sessions.len(),
            session_summaries: self.sessions.clone(),
        }
    }
}

fn mean(samples: &[f64]) -> f64 {
    if samples.is_empty() {
        return 0.0;
    }
    samples.iter().sum::<f64>() / samples.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_aggregator_reports_zeroes() {
        let metrics = MetricsAggregator::new();
        let report = metrics.report();

        assert_eq!(report.avg_response_time, 0.0);
        assert_eq!(report.avg_response_length, 0.0);
        assert_eq!(report.total_sessions, 0);
        assert!(report.session_summaries.is_empty());
    }

    #[test]
    fn averages_over_recorded_samples() {
        let mut metrics = MetricsAggregator::new();
        metrics.evaluate_response("abcd", 1.0);
        metrics.evaluate_response("ab", 3.0);

        let report = metrics.report();
        assert_eq!(report.avg_response_time, 2.0);
        assert_eq!(report.avg_response_length, 3.0);
    }

    #[test]
    fn response_length_counts_chars() {
        let mut metrics = MetricsAggregator::new();
        metrics.evaluate_response("café", 0.5);

        assert_eq!(metrics.report().avg_response_length, 4.0);
    }

    #[test]
    fn session_summaries_accumulate_in_order() {
        let mut metrics = MetricsAggregator::new();
        for n in 1..=2 {
            metrics.add_session_metrics(SessionSummary {
                session_start: None,
                session_end: None,
                total_interactions: n,
                topics: Vec::new(),
            });
        }

        let report = metrics.report();
        assert_eq!(report.total_sessions, 2);
        assert_eq!(report.session_summaries[0].total_interactions, 1);
        assert_eq!(report.session_summaries[1].total_interactions, 2);
    }
}
