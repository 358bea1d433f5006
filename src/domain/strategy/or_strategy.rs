//! OR combination of child strategies.
//!
//! Every child sees the same snapshots. At each position the combined
//! outcome is Buy if any child says Buy, otherwise Sell if any child says
//! Sell, otherwise Hold.

use std::iter;
use std::sync::Arc;

use crate::domain::action::Action;
use crate::domain::snapshot::Snapshot;
use crate::domain::stream::Stream;

use super::Strategy;

pub struct OrStrategy {
    name: String,
    children: Vec<Arc<dyn Strategy>>,
}

impl OrStrategy {
    pub fn new(
        name: impl Into<String>,
        first: Arc<dyn Strategy>,
        second: Arc<dyn Strategy>,
    ) -> Self {
        Self {
            name: name.into(),
            children: vec![first, second],
        }
    }

    pub fn or(mut self, child: Arc<dyn Strategy>) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(&self) -> &[Arc<dyn Strategy>] {
        &self.children
    }
}

impl Strategy for OrStrategy {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn compute(&self, snapshots: Stream<Snapshot>) -> Stream<Action> {
        let branches = snapshots.fan_out_n(self.children.len());
        let mut outcomes: Vec<Stream<Action>> = self
            .children
            .iter()
            .zip(branches)
            .map(|(child, branch)| child.compute(branch))
            .collect();

        // Children are stepped in lockstep; the shortest one ends the stream.
        Stream::spawn(iter::from_fn(move || {
            let mut step = Vec::with_capacity(outcomes.len());
            for outcome in outcomes.iter_mut() {
                step.push(outcome.next()?);
            }
            Some(Action::any_of(step))
        }))
    }

    fn min_history(&self) -> usize {
        self.children
            .iter()
            .map(|c| c.min_history())
            .max()
            .unwrap_or(0)
    }
}
