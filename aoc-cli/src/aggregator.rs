//! Result aggregator for ordering parallel solver results
//!
//! Results arrive in whatever order the workers finish. The aggregator holds
//! them back until every key that sorts before them has been emitted.

use crate::executor::{SolverResult, WorkItem};
use std::collections::{BTreeMap, VecDeque};

/// Key for ordering results (year, day, part) - ordered ascending
#[derive(Debug, Ord, PartialOrd, Eq, PartialEq, Clone, Copy)]
pub struct ResultKey {
    pub year: u16,
    pub day: u8,
    pub part: u8,
}

impl From<&SolverResult> for ResultKey {
    fn from(r: &SolverResult) -> Self {
        Self {
            year: r.year,
            day: r.day,
            part: r.part,
        }
    }
}

impl ResultKey {
    /// Every key a work item will produce
    pub fn for_work(work: &WorkItem) -> impl Iterator<Item = ResultKey> + '_ {
        work.parts.clone().map(|part| ResultKey {
            year: work.year,
            day: work.day,
            part,
        })
    }
}

/// Aggregator that buffers results and emits them in sorted order
pub struct ResultAggregator {
    /// Keys not yet emitted, smallest first
    expected: VecDeque<ResultKey>,
    /// Received results waiting for an earlier key
    pending: BTreeMap<ResultKey, SolverResult>,
}

impl ResultAggregator {
    /// Create aggregator from list of expected keys
    pub fn new(mut expected_keys: Vec<ResultKey>) -> Self {
        expected_keys.sort_unstable();
        expected_keys.dedup();
        Self {
            expected: expected_keys.into(),
            pending: BTreeMap::new(),
        }
    }

    /// Add a result and return any results ready for output (in order)
    pub fn add(&mut self, result: SolverResult) -> Vec<SolverResult> {
        self.pending.insert(ResultKey::from(&result), result);

        let mut ready = Vec::new();
        while let Some(next) = self.expected.front()
            && let Some(result) = self.pending.remove(next)
        {
            self.expected.pop_front();
            ready.push(result);
        }
        ready
    }

    /// Drain remaining results in order (for final output)
    pub fn drain(&mut self) -> Vec<SolverResult> {
        let drained = std::mem::take(&mut self.pending);
        self.expected.retain(|key| !drained.contains_key(key));
        drained.into_values().collect()
    }

    /// Keys that never arrived
    pub fn missing(&self) -> impl Iterator<Item = &ResultKey> {
        self.expected.iter()
    }

    /// Check if all expected results have been received
    pub fn is_complete(&self) -> bool {
        self.expected.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn make_result(year: u16, day: u8, part: u8) -> SolverResult {
        SolverResult {
            year,
            day,
            part,
            answer: Ok(format!("{}_{}_{}", year, day, part)),
            parse_duration: Some(TimeDelta::milliseconds(5)),
            solve_duration: TimeDelta::milliseconds(10),
        }
    }

    fn key(year: u16, day: u8, part: u8) -> ResultKey {
        ResultKey { year, day, part }
    }

    fn keys_of(results: &[SolverResult]) -> Vec<ResultKey> {
        results.iter().map(ResultKey::from).collect()
    }

    #[test]
    fn test_in_order_results() {
        let mut agg = ResultAggregator::new(vec![key(2015, 1, 1), key(2015, 1, 2)]);

        let ready = agg.add(make_result(2015, 1, 1));
        assert_eq!(keys_of(&ready), vec![key(2015, 1, 1)]);

        let ready = agg.add(make_result(2015, 1, 2));
        assert_eq!(keys_of(&ready), vec![key(2015, 1, 2)]);

        assert!(agg.is_complete());
    }

    #[test]
    fn test_out_of_order_results() {
        let mut agg = ResultAggregator::new(vec![
            key(2015, 2, 1),
            key(2015, 1, 2),
            key(2015, 1, 1),
        ]);

        assert!(agg.add(make_result(2015, 1, 2)).is_empty());
        assert!(agg.add(make_result(2015, 2, 1)).is_empty());

        let ready = agg.add(make_result(2015, 1, 1));
        assert_eq!(
            keys_of(&ready),
            vec![key(2015, 1, 1), key(2015, 1, 2), key(2015, 2, 1)]
        );
        assert_eq!(ready[0].answer.as_deref().ok(), Some("2015_1_1"));
        assert!(agg.is_complete());
    }

    #[test]
    fn test_years_sort_before_days() {
        let mut agg = ResultAggregator::new(vec![key(2024, 16, 1), key(2016, 25, 1)]);
        assert!(agg.add(make_result(2024, 16, 1)).is_empty());
        let ready = agg.add(make_result(2016, 25, 1));
        assert_eq!(keys_of(&ready), vec![key(2016, 25, 1), key(2024, 16, 1)]);
    }

    #[test]
    fn test_drain_remaining() {
        let mut agg = ResultAggregator::new(vec![key(2015, 1, 1), key(2015, 1, 2)]);

        agg.add(make_result(2015, 1, 2));

        let remaining = agg.drain();
        assert_eq!(keys_of(&remaining), vec![key(2015, 1, 2)]);
        assert!(!agg.is_complete());
        assert_eq!(agg.missing().copied().collect::<Vec<_>>(), vec![key(2015, 1, 1)]);
    }

    #[test]
    fn test_keys_for_work_item() {
        let work = WorkItem {
            year: 2024,
            day: 16,
            parts: 1..=2,
        };
        assert_eq!(
            ResultKey::for_work(&work).collect::<Vec<_>>(),
            vec![key(2024, 16, 1), key(2024, 16, 2)]
        );
    }
}
