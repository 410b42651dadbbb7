//! Blocking bounded FIFO queue.
//!
//! One mutex guards the item sequence, one condition variable carries both
//! "no longer empty" and "no longer full". Every waiting predicate is
//! rechecked after each wake, so spurious wakeups are harmless.

use crate::CapacityError;
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Capacity used when none is given.
pub const DEFAULT_CAPACITY: usize = usize::MAX;

struct Inner<T>{
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> Inner<T>{
    #[inline]
    fn is_full(&self) -> bool{
        self.items.len() >= self.capacity
    }
}

pub struct BlockingQueue<T>{
    inner: Mutex<Inner<T>>,
    /// Broadcast on empty->non-empty and full->non-full transitions.
    signal: Condvar,
}

impl<T> BlockingQueue<T>{
    pub fn new() -> Self{
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// `capacity` bounds the number of queued elements: `push` blocks and
    /// `try_push` fails while the bound is reached.
    pub fn with_capacity(capacity: usize) -> Self{
        assert!(capacity > 0, "capacity must be non-zero");
        Self{
            inner: Mutex::new(Inner{items: VecDeque::new(), capacity}),
            signal: Condvar::new(),
        }
    }

    pub fn is_empty(&self) -> bool{
        self.inner.lock().items.is_empty()
    }

    pub fn len(&self) -> usize{
        self.inner.lock().items.len()
    }

    pub fn capacity(&self) -> usize{
        self.inner.lock().capacity
    }

    /// Appends `value`, blocking while the queue is full. Returns only after
    /// the element is stored.
    pub fn push(&self, value: T){
        let mut inner = self.inner.lock();
        while inner.is_full(){
            self.signal.wait(&mut inner);
        }

        let was_empty = inner.items.is_empty();
        inner.items.push_back(value);
        drop(inner);

        if was_empty{
            // signal after releasing the lock
            self.signal.notify_all();
        }
    }

    /// Appends `value` if the queue is not full.
    pub fn try_push(&self, value: T) -> Result<(), CapacityError<T>>{
        let mut inner = self.inner.lock();
        if inner.is_full(){
            return Err(CapacityError{value});
        }

        let was_empty = inner.items.is_empty();
        inner.items.push_back(value);
        drop(inner);

        if was_empty{
            self.signal.notify_all();
        }
        Ok(())
    }

    /// Removes the front element, blocking while the queue is empty.
    pub fn pop(&self) -> T{
        let mut inner = self.inner.lock();
        loop{
            let was_full = inner.is_full();
            if let Some(value) = inner.items.pop_front(){
                drop(inner);
                if was_full{
                    self.signal.notify_all();
                }
                return value;
            }
            self.signal.wait(&mut inner);
        }
    }

    /// Removes the front element if there is one.
    pub fn try_pop(&self) -> Option<T>{
        let mut inner = self.inner.lock();
        let was_full = inner.is_full();
        let value = inner.items.pop_front()?;
        drop(inner);

        if was_full{
            self.signal.notify_all();
        }
        Some(value)
    }

    /// Waits up to `timeout` for an element. `None` means the deadline was
    /// reached; the queue is left untouched in that case. The deadline is
    /// computed once, on a monotonic clock, so spurious wakeups do not
    /// extend the wait.
    pub fn pop_timeout(&self, timeout: Duration) -> Option<T>{
        let deadline = Instant::now() + timeout;

        let mut inner = self.inner.lock();
        loop{
            let was_full = inner.is_full();
            if let Some(value) = inner.items.pop_front(){
                drop(inner);
                if was_full{
                    self.signal.notify_all();
                }
                return Some(value);
            }
            if self.signal.wait_until(&mut inner, deadline).timed_out(){
                return None;
            }
        }
    }
}

impl<T: Clone> BlockingQueue<T>{
    /// Replaces this queue's elements and capacity with a copy of `source`'s.
    ///
    /// Both locks are taken in address order, so two queues copy-assigned
    /// concurrently in opposite directions cannot deadlock. Waiters on this
    /// queue are woken iff the copy crossed an empty->non-empty or
    /// full->non-full boundary. Copying a queue onto itself is a no-op.
    pub fn copy_from(&self, source: &BlockingQueue<T>){
        if std::ptr::eq(self, source){
            return;
        }

        let (mut dst, src);
        if (self as *const Self) < (source as *const Self){
            dst = self.inner.lock();
            src = source.inner.lock();
        } else {
            src = source.inner.lock();
            dst = self.inner.lock();
        }

        let wake = (dst.items.is_empty() && !src.items.is_empty())
            || (dst.is_full() && !src.is_full());

        dst.capacity = src.capacity;
        dst.items = src.items.clone();

        drop(src);
        drop(dst);

        if wake{
            self.signal.notify_all();
        }
    }
}

impl<T: Clone> Clone for BlockingQueue<T>{
    /// Snapshot under the source lock. The new queue has no waiters, no
    /// signaling is needed.
    fn clone(&self) -> Self{
        let inner = self.inner.lock();
        Self{
            inner: Mutex::new(Inner{items: inner.items.clone(), capacity: inner.capacity}),
            signal: Condvar::new(),
        }
    }
}

impl<T> Default for BlockingQueue<T>{
    fn default() -> Self{
        Self::new()
    }
}
