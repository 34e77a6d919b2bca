// NoiseNode — Bounded Hand-off Queue
//
// The single point of hand-off between the sampling path and the network
// path. Fixed capacity, FIFO, internally synchronized. The producer side
// never waits beyond a short bounded timeout: when the consumer falls behind
// the *newest* packet is dropped — queued data is never overwritten — and the
// drop is counted for the monitor task.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Condvar, Mutex};
use std::time::{Duration, Instant};

struct Inner<T> {
    items: VecDeque<T>,
    closed: bool,
}

pub struct BoundedQueue<T> {
    inner: Mutex<Inner<T>>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
    enqueued: AtomicU64,
    dropped: AtomicU64,
}

impl<T> BoundedQueue<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "queue capacity must be positive");
        Self {
            inner: Mutex::new(Inner { items: VecDeque::with_capacity(capacity), closed: false }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
            enqueued: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Enqueue `item` if a slot frees up within `timeout` (zero is valid and
    /// means "try once"). Returns `false` when the item was dropped — queue
    /// full past the deadline, or queue closed. Dropping is not an error; it
    /// is the expected degradation path under sustained network slowness.
    pub fn try_enqueue(&self, item: T, timeout: Duration) -> bool {
        let mut inner = self.inner.lock().unwrap();

        if inner.items.len() >= self.capacity && !timeout.is_zero() && !inner.closed {
            let deadline = Instant::now() + timeout;
            while inner.items.len() >= self.capacity && !inner.closed {
                let now = Instant::now();
                if now >= deadline {
                    break;
                }
                let (guard, wait) = self.not_full.wait_timeout(inner, deadline - now).unwrap();
                inner = guard;
                if wait.timed_out() {
                    break;
                }
            }
        }

        if inner.closed || inner.items.len() >= self.capacity {
            drop(inner);
            self.dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        inner.items.push_back(item);
        drop(inner);
        self.enqueued.fetch_add(1, Ordering::Relaxed);
        self.not_empty.notify_one();
        true
    }

    /// Remove and return the oldest item. Blocks until one is available,
    /// `timeout` elapses (`None` blocks indefinitely — the consumer's normal
    /// operating mode), or the queue is closed and drained.
    pub fn receive(&self, timeout: Option<Duration>) -> Option<T> {
        let mut inner = self.inner.lock().unwrap();

        match timeout {
            None => {
                while inner.items.is_empty() && !inner.closed {
                    inner = self.not_empty.wait(inner).unwrap();
                }
            }
            Some(timeout) => {
                let deadline = Instant::now() + timeout;
                while inner.items.is_empty() && !inner.closed {
                    let now = Instant::now();
                    if now >= deadline {
                        break;
                    }
                    let (guard, wait) = self.not_empty.wait_timeout(inner, deadline - now).unwrap();
                    inner = guard;
                    if wait.timed_out() {
                        break;
                    }
                }
            }
        }

        let item = inner.items.pop_front();
        drop(inner);
        if item.is_some() {
            self.not_full.notify_one();
        }
        item
    }

    /// Close the queue: wake all waiters, fail further enqueues, let the
    /// consumer drain what remains and then observe `None`.
    pub fn close(&self) {
        let mut inner = self.inner.lock().unwrap();
        inner.closed = true;
        drop(inner);
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    pub fn is_closed(&self) -> bool {
        self.inner.lock().unwrap().closed
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total items successfully enqueued since creation.
    pub fn enqueued(&self) -> u64 {
        self.enqueued.load(Ordering::Relaxed)
    }

    /// Total items dropped at the producer side since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn fifo_order_is_preserved() {
        let queue = BoundedQueue::new(8);
        for i in 0..5 {
            assert!(queue.try_enqueue(i, Duration::ZERO));
        }
        for i in 0..5 {
            assert_eq!(queue.receive(Some(Duration::ZERO)), Some(i));
        }
        assert_eq!(queue.receive(Some(Duration::ZERO)), None);
    }

    #[test]
    fn overflow_drops_the_newest_item() {
        let queue = BoundedQueue::new(2);
        assert!(queue.try_enqueue('a', Duration::ZERO));
        assert!(queue.try_enqueue('b', Duration::ZERO));
        assert!(!queue.try_enqueue('c', Duration::ZERO));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.dropped(), 1);
        assert_eq!(queue.enqueued(), 2);
        // The retained items are the ones enqueued before the drop.
        assert_eq!(queue.receive(Some(Duration::ZERO)), Some('a'));
        assert_eq!(queue.receive(Some(Duration::ZERO)), Some('b'));
    }

    #[test]
    fn bounded_enqueue_wait_succeeds_when_consumer_drains() {
        let queue = Arc::new(BoundedQueue::new(1));
        assert!(queue.try_enqueue(1u32, Duration::ZERO));

        let drainer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                queue.receive(None)
            })
        };

        // Full now, but a slot frees up inside the 200 ms window.
        assert!(queue.try_enqueue(2u32, Duration::from_millis(200)));
        assert_eq!(drainer.join().unwrap(), Some(1));
        assert_eq!(queue.receive(Some(Duration::ZERO)), Some(2));
    }

    #[test]
    fn bounded_enqueue_wait_expires_on_a_stalled_consumer() {
        let queue = BoundedQueue::new(1);
        assert!(queue.try_enqueue(1u32, Duration::ZERO));

        let start = Instant::now();
        assert!(!queue.try_enqueue(2u32, Duration::from_millis(30)));
        let waited = start.elapsed();

        assert!(waited >= Duration::from_millis(25), "returned too early: {waited:?}");
        assert!(waited < Duration::from_millis(500), "waited unbounded: {waited:?}");
        assert_eq!(queue.dropped(), 1);
    }

    #[test]
    fn receive_blocks_until_an_item_arrives() {
        let queue = Arc::new(BoundedQueue::new(4));

        let producer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(50));
                queue.try_enqueue(99u32, Duration::ZERO)
            })
        };

        let start = Instant::now();
        let item = queue.receive(None);
        let waited = start.elapsed();

        assert_eq!(item, Some(99));
        assert!(waited >= Duration::from_millis(40), "returned too early: {waited:?}");
        assert!(producer.join().unwrap());
        // Exactly once — the queue is empty again.
        assert_eq!(queue.receive(Some(Duration::ZERO)), None);
    }

    #[test]
    fn close_drains_then_terminates_the_consumer() {
        let queue = BoundedQueue::new(4);
        assert!(queue.try_enqueue(1u32, Duration::ZERO));
        queue.close();

        assert!(!queue.try_enqueue(2u32, Duration::ZERO));
        assert_eq!(queue.receive(None), Some(1));
        assert_eq!(queue.receive(None), None);
    }

    #[test]
    fn close_wakes_a_blocked_consumer() {
        let queue = Arc::new(BoundedQueue::<u32>::new(4));
        let consumer = {
            let queue = Arc::clone(&queue);
            thread::spawn(move || queue.receive(None))
        };

        thread::sleep(Duration::from_millis(20));
        queue.close();
        assert_eq!(consumer.join().unwrap(), None);
    }
}
