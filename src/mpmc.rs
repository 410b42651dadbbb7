//! Multiple producers, multiple consumers.
//!
//! Producers reserve a slot with a CAS on the write counter, then commit it
//! to consumers by advancing `max_read_index` in reservation order.

use crate::ring::{count_to_index, RingStorage};
use crate::sync::{thread, AtomicU32, Ordering};
use crate::CapacityError;

pub struct ArrayQueue<T, const N: usize>{
    ring: RingStorage<T, N>,

    /// Everything below this counter is committed and readable. Trails
    /// `write_index` while some producer holds an uncommitted reservation.
    max_read_index: AtomicU32,
}

impl<T, const N: usize> ArrayQueue<T, N>{
    /// N must be a power of two; N-1 elements are usable.
    pub fn new() -> Self{
        Self{
            ring: RingStorage::new(),
            max_read_index: AtomicU32::new(0),
        }
    }

    /// Stores `value` at the tail. Fails if the ring is full.
    ///
    /// Lock-free: loses the reservation race only to another producer that
    /// made progress. The commit spin waits for producers with earlier
    /// reservations and yields the time slice to them.
    pub fn push(&self, value: T) -> Result<(), CapacityError<T>>{
        let mut current;
        loop{
            current  = self.ring.write_index.load(Ordering::Acquire);
            let read = self.ring.read_index.load(Ordering::Acquire);
            if count_to_index::<N>(current.wrapping_add(1)) == count_to_index::<N>(read){
                return Err(CapacityError{value});
            }

            // More than one producer. Loop until this thread owns the slot.
            if self.ring.write_index.compare_exchange(
                current, current.wrapping_add(1),
                Ordering::AcqRel, Ordering::Relaxed).is_ok()
            {
                break;
            }
        }

        // the slot is reserved for this thread now
        unsafe{ self.ring.slot_write(count_to_index::<N>(current), value); }

        // Commits must land in the same order as the reservations above, so
        // consumers never see a slot whose predecessor is still being written.
        while self.max_read_index.compare_exchange(
            current, current.wrapping_add(1),
            Ordering::AcqRel, Ordering::Relaxed).is_err()
        {
            thread::yield_now();
        }

        #[cfg(feature = "exact_size")]
        self.ring.live_count.fetch_add(1, Ordering::AcqRel);

        Ok(())
    }

    /// Removes the oldest committed element. `None` if the ring is empty or
    /// every remaining reservation is still uncommitted.
    #[inline]
    pub fn pop(&self) -> Option<T>{
        self.ring.pop_bounded(|| self.max_read_index.load(Ordering::Acquire))
    }

    /// Best-effort under concurrency, exact with the `exact_size` feature.
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
    pub(crate) fn seed_counters(&self, start: u32){
        self.ring.seed_counters(start);
        self.max_read_index.store(start, Ordering::Relaxed);
    }
}

impl<T, const N: usize> Default for ArrayQueue<T, N>{
    fn default() -> Self{
        Self::new()
    }
}
