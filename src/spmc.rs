//! Single producer, any number of consumers.
//!
//! Wait-free push. Consumers share the compare-and-swap pop protocol, so
//! [Consumer] clones can pop from any number of threads.

use crate::ring::RingStorage;
use crate::sync::{Arc, Ordering};
use crate::CapacityError;

/// Creates a ring of N slots (N-1 usable), split into the sole producer
/// handle and a cloneable consumer handle.
///
/// N must be a power of two.
pub fn queue<T, const N: usize>() -> (Producer<T, N>, Consumer<T, N>){
    let ring = Arc::new(RingStorage::new());
    (Producer{ring: ring.clone()}, Consumer{ring})
}

/// Pushing half of the queue. Not [Clone] - together with `push(&mut self)`
/// this keeps the producer side on exactly one thread at a time.
pub struct Producer<T, const N: usize>{
    ring: Arc<RingStorage<T, N>>,
}

/// Popping half of the queue. Clone freely, pops synchronize between
/// consumers through the read counter.
pub struct Consumer<T, const N: usize>{
    ring: Arc<RingStorage<T, N>>,
}

impl<T, const N: usize> Producer<T, N>{
    /// Stores `value` at the write position. Fails if the ring is full.
    #[inline]
    pub fn push(&mut self, value: T) -> Result<(), CapacityError<T>>{
        // sole producer: this handle is not Clone and push is &mut self
        unsafe{ self.ring.push_single(value) }
    }

    pub fn len(&self) -> usize{
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool{
        self.ring.is_empty()
    }

    pub fn is_full(&self) -> bool{
        self.ring.is_full()
    }

    pub fn capacity(&self) -> usize{
        N - 1
    }

    #[cfg(test)]
    pub(crate) fn seed_counters(&mut self, start: u32){
        self.ring.seed_counters(start);
    }
}

impl<T, const N: usize> Consumer<T, N>{
    /// Removes the oldest element. `None` if the ring is empty.
    #[inline]
    pub fn pop(&self) -> Option<T>{
        let ring = &*self.ring;
        ring.pop_bounded(|| ring.write_index.load(Ordering::Acquire))
    }

    pub fn len(&self) -> usize{
        self.ring.len()
    }

    pub fn is_empty(&self) -> bool{
        self.ring.is_empty()
    }

    pub fn is_full(&self) -> bool{
        self.ring.is_full()
    }

    pub fn capacity(&self) -> usize{
        N - 1
    }
}

impl<T, const N: usize> Clone for Consumer<T, N>{
    fn clone(&self) -> Self{
        Self{ring: self.ring.clone()}
    }
}
