//! Worker thread draining a blocking queue through a consume handler.

use crate::blocking::{BlockingQueue, DEFAULT_CAPACITY};
use crate::sync::{thread, Arc, AtomicBool, Ordering};
use std::panic;
use std::time::Duration;

/// Wake-up interval of the worker. With nothing to consume it wakes this
/// often to check whether it has been told to finish.
const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Owns one [BlockingQueue] and one background thread that forwards every
/// queued element to the consume handler, in queue order. Created running,
/// stopped by [join](ConsumerThread::join).
pub struct ConsumerThread<T: Send + 'static>{
    queue: Arc<BlockingQueue<T>>,
    stop: Arc<AtomicBool>,
    worker: Option<thread::JoinHandle<()>>,
}

impl<T: Send + 'static> ConsumerThread<T>{
    /// Worker over an effectively unbounded queue.
    pub fn new<C>(consume: C) -> Self
        where C: FnMut(T) + Send + 'static
    {
        Self::with_init(DEFAULT_CAPACITY, consume, ||{})
    }

    pub fn with_capacity<C>(capacity: usize, consume: C) -> Self
        where C: FnMut(T) + Send + 'static
    {
        Self::with_init(capacity, consume, ||{})
    }

    /// `init` runs once on the worker thread, strictly before the first
    /// `consume` call.
    pub fn with_init<C, I>(capacity: usize, consume: C, init: I) -> Self
        where C: FnMut(T) + Send + 'static,
              I: FnOnce() + Send + 'static
    {
        let queue = Arc::new(BlockingQueue::with_capacity(capacity));
        let stop = Arc::new(AtomicBool::new(false));

        let worker = {
            let queue = queue.clone();
            let stop = stop.clone();
            thread::spawn(move || worker_routine(queue, stop, consume, init))
        };

        Self{queue, stop, worker: Some(worker)}
    }

    /// Non-blocking enqueue. Returns whether the element was queued.
    pub fn produce(&self, value: T) -> bool{
        self.queue.try_push(value).is_ok()
    }

    /// Blocking enqueue; returns once the element is queued.
    pub fn produce_or_block(&self, value: T){
        self.queue.push(value);
    }

    /// Tells the worker to finish and waits for it. Elements still queued
    /// are discarded. A panic that escaped one of the handlers resurfaces
    /// here. A second call is a no-op.
    pub fn join(&mut self){
        if let Err(payload) = self.shutdown(){
            panic::resume_unwind(payload);
        }
    }

    /// Like [join](ConsumerThread::join), but first waits until the queue is
    /// observed empty. Producers must have stopped; otherwise the wait never
    /// ends.
    pub fn drain_and_join(&mut self){
        if self.worker.is_some(){
            while !self.queue.is_empty(){
                thread::sleep(POLL_INTERVAL);
            }
        }
        self.join();
    }

    fn shutdown(&mut self) -> thread::Result<()>{
        match self.worker.take(){
            Some(worker) => {
                self.stop.store(true, Ordering::Release);
                worker.join()
            }
            None => Ok(()),
        }
    }
}

impl<T: Send + 'static> Drop for ConsumerThread<T>{
    fn drop(&mut self){
        // a handler panic is dropped here; join() is the reporting path
        let _ = self.shutdown();
    }
}

fn worker_routine<T, C, I>(
    queue: Arc<BlockingQueue<T>>,
    stop: Arc<AtomicBool>,
    mut consume: C,
    init: I,
)
    where T: Send, C: FnMut(T), I: FnOnce()
{
    init();

    // the stop flag is polled at every timed-pop return
    while !stop.load(Ordering::Acquire){
        if let Some(value) = queue.pop_timeout(POLL_INTERVAL){
            consume(value);
        }
    }
}
