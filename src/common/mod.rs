use std::thread;
use std::thread::JoinHandle;

use crossbeam_channel::{Receiver, Sender};

/// Background thread with its termination channel.
#[derive(Debug)]
pub struct Worker {
    pub join_handle: JoinHandle<()>,
    pub terminate_worker_tx: Sender<()>,
}

/// Runs the worker function on a new thread. The worker receives its parameters and the
/// termination channel.
pub fn run_worker<T: Send + 'static, F: Fn(T, Receiver<()>) + Send + 'static>(
    worker: F,
    params: T,
) -> Worker {
    let (terminate_worker_tx, terminate_worker_rx): (Sender<()>, Receiver<()>) =
        crossbeam_channel::unbounded();

    let join_handle = thread::spawn(move || worker(params, terminate_worker_rx));

    Worker {
        join_handle,
        terminate_worker_tx,
    }
}

#[derive(Debug)]
pub struct WorkerPool {
    workers: Vec<Worker>,
}

impl WorkerPool {
    pub fn new(workers: Vec<Worker>) -> WorkerPool {
        WorkerPool { workers }
    }

    pub fn terminate(&self) {
        for worker in &self.workers {
            let send_result = worker.terminate_worker_tx.send(());
            if send_result.is_err() {
                error!("Cannot send termination signal")
            }
        }
    }

    pub fn join(self) {
        for worker in self.workers {
            let join_result = worker.join_handle.join();
            if join_result.is_err() {
                error!("Worker returned an error")
            }
        }
    }
}
