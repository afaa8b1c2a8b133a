//! Parallel encode/decode of independent buffers.
//!
//! Architecture:
//! - Main thread: queue one job per input
//! - Worker pool: each worker owns its own compressor or decompressor
//! - Main thread: collect results back into input order
//!
//! Workers share nothing but the read-only inputs, so no locking is needed.

use crossbeam::channel::{bounded, Receiver, Sender};

use super::compress::Compressor;
use super::decompress::Decompressor;
use crate::error::{Error, Result};
use crate::EncodeConfig;

/// Resolve a thread count: 0 means one per CPU
pub fn effective_threads(num_threads: usize) -> usize {
    match num_threads {
        0 => num_cpus::get().clamp(1, 32),
        n => n.clamp(1, 32),
    }
}

/// Encode every input, returning one result per input in the same order
pub fn encode_batch<T: AsRef<[u8]> + Sync>(
    inputs: &[T],
    config: &EncodeConfig,
    num_threads: usize,
) -> Result<Vec<Result<Vec<u8>>>> {
    run_batch(inputs, num_threads, || {
        let mut compressor = Compressor::new(config.clone());
        move |data: &[u8]| compressor.encode(data)
    })
}

/// Decode every input, returning one result per input in the same order
pub fn decode_batch<T: AsRef<[u8]> + Sync>(
    inputs: &[T],
    num_threads: usize,
) -> Result<Vec<Result<Vec<u8>>>> {
    run_batch(inputs, num_threads, || {
        let mut decompressor = Decompressor::new();
        move |data: &[u8]| decompressor.decode(data)
    })
}

type JobResult = (usize, Result<Vec<u8>>);

fn run_batch<T, F, W>(
    inputs: &[T],
    num_threads: usize,
    make_worker: F,
) -> Result<Vec<Result<Vec<u8>>>>
where
    T: AsRef<[u8]> + Sync,
    F: Fn() -> W + Sync,
    W: FnMut(&[u8]) -> Result<Vec<u8>>,
{
    if inputs.is_empty() {
        return Ok(Vec::new());
    }

    let num_threads = effective_threads(num_threads).min(inputs.len());
    tracing::debug!(inputs = inputs.len(), threads = num_threads, "starting batch");

    // Both channels hold every job, so neither side ever blocks
    let (job_tx, job_rx): (Sender<usize>, Receiver<usize>) = bounded(inputs.len());
    let (result_tx, result_rx): (Sender<JobResult>, Receiver<JobResult>) = bounded(inputs.len());

    for idx in 0..inputs.len() {
        job_tx.send(idx).map_err(|_| Error::Internal("job queue closed".to_string()))?;
    }
    drop(job_tx);

    let make_worker = &make_worker;
    crossbeam::scope(|scope| {
        for _ in 0..num_threads {
            let job_rx = job_rx.clone();
            let result_tx = result_tx.clone();

            scope.spawn(move |_| {
                let mut work = make_worker();
                for idx in job_rx.iter() {
                    let result = work(inputs[idx].as_ref());
                    if result_tx.send((idx, result)).is_err() {
                        break;
                    }
                }
            });
        }
    })
    .map_err(|_| Error::Internal("Thread panicked".to_string()))?;
    drop(result_tx);

    let mut slots: Vec<Option<Result<Vec<u8>>>> = (0..inputs.len()).map(|_| None).collect();
    for (idx, result) in result_rx.iter() {
        slots[idx] = Some(result);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(idx, slot)| {
            slot.ok_or_else(|| Error::Internal(format!("no result for input {}", idx)))
        })
        .collect()
}
