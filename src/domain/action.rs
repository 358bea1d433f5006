//! Trading decisions and the transformations applied to decision sequences.

use std::fmt;

use crate::domain::stream::Stream;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Action {
    Buy,
    Sell,
    #[default]
    Hold,
}

impl Action {
    pub const ALL: [Action; 3] = [Action::Buy, Action::Sell, Action::Hold];

    pub fn is_actionable(self) -> bool {
        self != Action::Hold
    }

    /// Combine child outcomes for one step: Buy if any child buys, else Sell
    /// if any child sells, else Hold.
    pub fn any_of<I>(outcomes: I) -> Action
    where
        I: IntoIterator<Item = Action>,
    {
        let mut combined = Action::Hold;
        for outcome in outcomes {
            match outcome {
                Action::Buy => return Action::Buy,
                Action::Sell => combined = Action::Sell,
                Action::Hold => {}
            }
        }
        combined
    }

    /// Label used in marker file names.
    pub fn marker_label(self) -> &'static str {
        match self {
            Action::Buy => "BUY",
            Action::Sell => "SELL",
            Action::Hold => "HOLD",
        }
    }

    /// Short chart annotation; Hold is left blank.
    pub fn annotation(self) -> &'static str {
        match self {
            Action::Buy => "B",
            Action::Sell => "S",
            Action::Hold => "",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Action::Buy => "Buy",
            Action::Sell => "Sell",
            Action::Hold => "Hold",
        };
        f.write_str(s)
    }
}

/// Edge-triggered decisions from raw per-step outcomes.
///
/// A Buy or Sell is kept only where it differs from the last actionable
/// outcome; repeats become Hold.
pub struct Normalize<I> {
    actions: I,
    last: Option<Action>,
}

impl<I: Iterator<Item = Action>> Iterator for Normalize<I> {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        let action = self.actions.next()?;
        if action.is_actionable() && self.last != Some(action) {
            self.last = Some(action);
            Some(action)
        } else {
            Some(Action::Hold)
        }
    }
}

/// Per-step state from edge-triggered decisions: the last actionable
/// decision is carried forward over Holds.
pub struct Denormalize<I> {
    actions: I,
    last: Action,
}

impl<I: Iterator<Item = Action>> Iterator for Denormalize<I> {
    type Item = Action;

    fn next(&mut self) -> Option<Action> {
        let action = self.actions.next()?;
        if action.is_actionable() {
            self.last = action;
        }
        Some(self.last)
    }
}

pub fn normalize<I>(actions: I) -> Normalize<I::IntoIter>
where
    I: IntoIterator<Item = Action>,
{
    Normalize {
        actions: actions.into_iter(),
        last: None,
    }
}

pub fn denormalize<I>(actions: I) -> Denormalize<I::IntoIter>
where
    I: IntoIterator<Item = Action>,
{
    Denormalize {
        actions: actions.into_iter(),
        last: Action::Hold,
    }
}

pub fn normalize_stream(actions: Stream<Action>) -> Stream<Action> {
    Stream::spawn(normalize(actions))
}

pub fn denormalize_stream(actions: Stream<Action>) -> Stream<Action> {
    Stream::spawn(denormalize(actions))
}

pub fn annotations<I>(actions: I) -> Vec<String>
where
    I: IntoIterator<Item = Action>,
{
    actions
        .into_iter()
        .map(|a| a.annotation().to_string())
        .collect()
}
