//! Work queue for the placement loop.
//!
//! Units are ordered once by score (descending, stable). After that the
//! queue is a plain deque: a partially placed unit goes back to the front
//! through [`WorkQueue::retry_front`] and is tried again before anything else.

use std::collections::VecDeque;

use crate::chunking::Chunk;

#[derive(Debug, Default)]
pub struct WorkQueue {
    units: VecDeque<Chunk>,
    dequeued: u64,
    retries: u64,
}

impl WorkQueue {
    /// Build a queue ordered by score, highest first. Equal scores keep input order.
    pub fn from_units(mut units: Vec<Chunk>) -> Self {
        units.sort_by(|a, b| b.score.total_cmp(&a.score));
        Self {
            units: units.into(),
            dequeued: 0,
            retries: 0,
        }
    }

    pub fn pop_front(&mut self) -> Option<Chunk> {
        let unit = self.units.pop_front()?;
        self.dequeued += 1;
        Some(unit)
    }

    /// Put a partially placed unit back at the head of the queue.
    pub fn retry_front(&mut self, unit: Chunk) {
        self.retries += 1;
        self.units.push_front(unit);
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn dequeued(&self) -> u64 {
        self.dequeued
    }

    pub fn retries(&self) -> u64 {
        self.retries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;
    use chrono::NaiveDate;

    fn unit(id: &str, score: f64) -> Chunk {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let mut c = Chunk::whole(&Task::new(id, id), today);
        c.score = score;
        c
    }

    #[test]
    fn orders_by_score_desc_and_keeps_ties_stable() {
        let mut q = WorkQueue::from_units(vec![
            unit("a", 10.0),
            unit("b", 50.0),
            unit("c", 10.0),
            unit("d", 20.0),
        ]);
        let order: Vec<String> = std::iter::from_fn(|| q.pop_front()).map(|c| c.id).collect();
        assert_eq!(order, vec!["b", "d", "a", "c"]);
    }

    #[test]
    fn retry_front_jumps_ahead_of_higher_scores() {
        let mut q = WorkQueue::from_units(vec![unit("hi", 100.0), unit("lo", 1.0)]);
        let mut lo = unit("lo2", -5.0);
        lo.score -= 1.0;
        let first = q.pop_front().unwrap();
        assert_eq!(first.id, "hi");

        q.retry_front(lo);
        assert_eq!(q.pop_front().unwrap().id, "lo2");
        assert_eq!(q.retries(), 1);
        assert_eq!(q.dequeued(), 2);
        assert_eq!(q.len(), 1);
    }
}
