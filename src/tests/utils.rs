use crate::mpmc::ArrayQueue;
use crate::spmc;

/// Pops until the queue reads empty, collecting values in pop order.
pub(crate) fn drain_mpmc<T, const N: usize>(queue: &ArrayQueue<T, N>) -> Vec<T>{
    let mut v = Vec::new();
    while let Some(value) = queue.pop(){
        v.push(value);
    }
    v
}

pub(crate) fn drain_spmc<T, const N: usize>(consumer: &spmc::Consumer<T, N>) -> Vec<T>{
    let mut v = Vec::new();
    while let Some(value) = consumer.pop(){
        v.push(value);
    }
    v
}
