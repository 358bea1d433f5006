//! Finite, ordered producer/consumer streams.
//!
//! A [`Stream`] is the receiving end of a channel and is consumed as an
//! [`Iterator`]. Streams are either produced lazily by a producer thread
//! feeding a bounded queue ([`Stream::spawn`]) or fully buffered up front
//! ([`Stream::buffered`]). Completion is explicit: the stream ends once its
//! producer has sent every item and dropped the sender.
//!
//! [`Stream::fan_out`] replicates one stream into independent branches. The
//! source is drained into a buffer first, so every branch can be read at its
//! own pace and abandoning one branch never blocks another.

use crossbeam_channel::{bounded, unbounded, Receiver};
use std::thread;

/// Capacity of the hand-off queue between a spawned producer and its consumer.
pub const STREAM_CAPACITY: usize = 64;

pub struct Stream<T> {
    rx: Receiver<T>,
}

impl<T: Send + 'static> Stream<T> {
    /// Produce `source` on a background thread.
    ///
    /// The producer stops early if the consumer drops the stream.
    pub fn spawn<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T> + Send + 'static,
    {
        let (tx, rx) = bounded(STREAM_CAPACITY);
        thread::spawn(move || {
            for item in source {
                if tx.send(item).is_err() {
                    break;
                }
            }
        });
        Self { rx }
    }

    /// Eagerly buffer `source` into a stream.
    pub fn buffered<I>(source: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let (tx, rx) = unbounded();
        for item in source {
            if tx.send(item).is_err() {
                break;
            }
        }
        Self { rx }
    }

    pub fn empty() -> Self {
        Self::buffered(std::iter::empty())
    }

    /// Keep only the items matching `predicate`, in order.
    pub fn filtered<F>(self, predicate: F) -> Self
    where
        F: FnMut(&T) -> bool + Send + 'static,
    {
        Stream::spawn(self.filter(predicate))
    }

    pub fn mapped<U, F>(self, f: F) -> Stream<U>
    where
        U: Send + 'static,
        F: FnMut(T) -> U + Send + 'static,
    {
        Stream::spawn(self.map(f))
    }
}

impl<T: Clone + Send + 'static> Stream<T> {
    /// Replicate this stream into `N` independent branches.
    pub fn fan_out<const N: usize>(self) -> [Stream<T>; N] {
        let items: Vec<T> = self.collect();
        std::array::from_fn(|_| Stream::buffered(items.iter().cloned()))
    }

    /// Like [`Stream::fan_out`] with the branch count chosen at runtime.
    pub fn fan_out_n(self, count: usize) -> Vec<Stream<T>> {
        let items: Vec<T> = self.collect();
        (0..count)
            .map(|_| Stream::buffered(items.iter().cloned()))
            .collect()
    }
}

impl<T> Iterator for Stream<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.rx.recv().ok()
    }
}

impl<T: Send + 'static> FromIterator<T> for Stream<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Stream::buffered(iter)
    }
}

impl<T: Send + 'static> From<Vec<T>> for Stream<T> {
    fn from(items: Vec<T>) -> Self {
        Stream::buffered(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn spawned_stream_preserves_order() {
        let items: Vec<u32> = Stream::spawn(0..500).collect();
        assert_eq!(items, (0..500).collect::<Vec<_>>());
    }

    #[test]
    fn buffered_stream_terminates() {
        let stream: Stream<&str> = vec!["a", "b"].into();
        assert_eq!(stream.count(), 2);
    }

    #[test]
    fn empty_stream() {
        assert_eq!(Stream::<u8>::empty().next(), None);
    }

    #[test]
    fn dropping_consumer_does_not_hang_producer() {
        let mut stream = Stream::spawn(0..1_000_000u64);
        assert_eq!(stream.next(), Some(0));
        drop(stream);
    }

    #[test]
    fn filtered_keeps_matching_items() {
        let evens: Vec<u32> = Stream::spawn(0..10u32).filtered(|n| n % 2 == 0).collect();
        assert_eq!(evens, vec![0, 2, 4, 6, 8]);
    }

    #[test]
    fn mapped_transforms_items() {
        let doubled: Vec<u32> = Stream::buffered(vec![1u32, 2, 3]).mapped(|n| n * 2).collect();
        assert_eq!(doubled, vec![2, 4, 6]);
    }

    #[test]
    fn fan_out_branches_are_independent() {
        let [a, b, c] = Stream::spawn(0..100u32).fan_out();

        // Drain the branches out of step with each other.
        let c_items: Vec<u32> = c.collect();
        let b_first: Vec<u32> = b.take(3).collect();
        let a_items: Vec<u32> = a.collect();

        assert_eq!(c_items.len(), 100);
        assert_eq!(b_first, vec![0, 1, 2]);
        assert_eq!(a_items, c_items);
    }

    #[test]
    fn fan_out_of_empty_stream() {
        let [a, b] = Stream::<u32>::empty().fan_out();
        assert_eq!(a.count(), 0);
        assert_eq!(b.count(), 0);
    }

    proptest! {
        #[test]
        fn fan_out_n_replicates_every_item(
            items in prop::collection::vec(any::<i64>(), 0..100),
            count in 2usize..8,
        ) {
            let branches = Stream::buffered(items.clone()).fan_out_n(count);
            prop_assert_eq!(branches.len(), count);
            for branch in branches {
                let collected: Vec<i64> = branch.collect();
                prop_assert_eq!(&collected, &items);
            }
        }
    }
}
