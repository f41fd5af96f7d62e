//! Blocking multi-producer FIFO queue.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;

/// FIFO queue for handing values between threads.
///
/// Producers [`push`](Self::push); consumers either poll with
/// [`try_pop`](Self::try_pop) or park in [`wait_pop`](Self::wait_pop)
/// until an element arrives. Elements pushed by one thread are popped
/// in the order that thread pushed them.
///
/// The queue has no built-in close signal. A consumer blocked in
/// `wait_pop` is released by pushing a value, so shutdown protocols
/// reserve a sentinel value that tells the consumer to stop instead
/// of processing it.
#[derive(Debug, Default)]
pub struct SharedQueue<T> {
    items: Mutex<VecDeque<T>>,
    ready: Condvar,
}

impl<T> SharedQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: Mutex::new(VecDeque::new()),
            ready: Condvar::new(),
        }
    }

    /// Enqueues a value and wakes one waiting consumer.
    pub fn push(&self, value: T) {
        self.items.lock().push_back(value);
        self.ready.notify_one();
    }

    /// Dequeues the oldest value, or returns `None` when empty.
    ///
    /// Never blocks beyond the internal lock.
    #[must_use]
    pub fn try_pop(&self) -> Option<T> {
        self.items.lock().pop_front()
    }

    /// Dequeues the oldest value, parking the calling thread until one
    /// is available.
    #[must_use]
    pub fn wait_pop(&self) -> T {
        let mut items = self.items.lock();
        loop {
            if let Some(value) = items.pop_front() {
                return value;
            }
            self.ready.wait(&mut items);
        }
    }

    /// Number of queued values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().len()
    }

    /// True when no values are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn test_fifo_order_single_thread() {
        let queue = SharedQueue::new();
        for i in 0..4 {
            queue.push(i);
        }
        for i in 0..4 {
            assert_eq!(queue.try_pop(), Some(i));
        }
        assert_eq!(queue.try_pop(), None);
    }

    #[test]
    fn test_try_pop_on_empty_returns_none() {
        let queue: SharedQueue<u32> = SharedQueue::new();
        assert_eq!(queue.try_pop(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_wait_pop_parks_until_push() {
        let queue = Arc::new(SharedQueue::new());
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.wait_pop())
        };

        // Give the consumer time to park before releasing it.
        thread::sleep(Duration::from_millis(50));
        queue.push(99u32);
        assert_eq!(consumer.join().unwrap(), 99);
    }

    #[test]
    fn test_sentinel_releases_parked_consumer() {
        #[derive(Debug, PartialEq, Eq)]
        enum Message {
            Work(u32),
            Stop,
        }

        let queue = Arc::new(SharedQueue::new());
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut handled = 0;
                loop {
                    match queue.wait_pop() {
                        Message::Work(_) => handled += 1,
                        Message::Stop => return handled,
                    }
                }
            })
        };

        queue.push(Message::Work(1));
        queue.push(Message::Work(2));
        queue.push(Message::Stop);
        assert_eq!(consumer.join().unwrap(), 2);
    }

    #[test]
    fn test_every_push_popped_exactly_once_per_producer_in_order() {
        const PRODUCERS: usize = 4;
        const PER_PRODUCER: usize = 1000;

        let queue = Arc::new(SharedQueue::new());
        let producers: Vec<_> = (0..PRODUCERS)
            .map(|p| {
                let queue = Arc::clone(&queue);
                thread::spawn(move || {
                    for seq in 0..PER_PRODUCER {
                        queue.push((p, seq));
                    }
                })
            })
            .collect();

        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                let mut next_expected = [0usize; PRODUCERS];
                for _ in 0..PRODUCERS * PER_PRODUCER {
                    let (p, seq) = queue.wait_pop();
                    assert_eq!(seq, next_expected[p], "producer {p} reordered");
                    next_expected[p] += 1;
                }
                next_expected
            })
        };

        for producer in producers {
            producer.join().unwrap();
        }
        let next_expected = consumer.join().unwrap();

        assert!(queue.is_empty());
        assert_eq!(next_expected, [PER_PRODUCER; PRODUCERS]);
    }
}
