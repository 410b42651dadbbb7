use crate::mpmc::ArrayQueue;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

/// Spawns `producers` threads, each pushing its own `(id, 0..per_producer)`
/// sequence, and `consumers` threads popping until every pushed value was
/// seen. Returns one pop log per consumer, in that consumer's pop order.
pub(crate) fn mpmc_exchange_impl<const N: usize>(
    producers: usize,
    consumers: usize,
    per_producer: usize,
) -> Vec<Vec<(usize, usize)>>{
    let queue = Arc::new(ArrayQueue::<(usize, usize), N>::new());
    let total = producers * per_producer;
    let popped = Arc::new(AtomicUsize::new(0));

    let mut producer_threads = Vec::new();
    for id in 0..producers{
        let queue = queue.clone();
        producer_threads.push(thread::spawn(move || {
            for seq in 0..per_producer{
                let mut value = (id, seq);
                loop{
                    match queue.push(value){
                        Ok(()) => break,
                        Err(err) => {
                            value = err.value;
                            thread::yield_now();
                        }
                    }
                }
            }
        }));
    }

    let mut consumer_threads = Vec::new();
    for _ in 0..consumers{
        let queue = queue.clone();
        let popped = popped.clone();
        consumer_threads.push(thread::spawn(move || {
            let mut log = Vec::new();
            while popped.load(Ordering::Acquire) < total{
                match queue.pop(){
                    Some(value) => {
                        popped.fetch_add(1, Ordering::AcqRel);
                        log.push(value);
                    }
                    None => thread::yield_now(),
                }
            }
            log
        }));
    }

    for thread in producer_threads{
        thread.join().unwrap();
    }
    let mut logs = Vec::new();
    for thread in consumer_threads{
        logs.push(thread.join().unwrap());
    }
    logs
}

/// Checks one consumer's pop log: for every producer, the observed `seq`
/// subsequence must be strictly increasing.
pub(crate) fn assert_per_producer_order(producers: usize, log: &[(usize, usize)]){
    let mut last = vec![None::<usize>; producers];
    for &(id, seq) in log{
        if let Some(prev) = last[id]{
            assert!(prev < seq, "producer {} order violated: {} before {}", id, prev, seq);
        }
        last[id] = Some(seq);
    }
}
