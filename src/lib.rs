mod sync;
mod ring;

pub mod spmc;
pub mod mpmc;

#[cfg(not(loom))]
pub mod blocking;
#[cfg(not(loom))]
pub mod consumer;

#[cfg(test)]
mod tests;

use std::fmt;

/// Error, indicating insufficient capacity. Hands the rejected value back.
pub struct CapacityError<V>{
    pub value: V,
}

impl<V> fmt::Debug for CapacityError<V>{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("CapacityError")
    }
}
