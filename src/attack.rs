//! The dictionary-attack driver.
//!
//! A single reader streams candidates from the wordlist; with more than one
//! worker they are fanned out over a bounded channel to a pool of threads,
//! each running the full PBKDF2 → PRF → MIC pipeline. A shared atomic stop
//! flag, checked before each candidate, ends the run on the first match or
//! on external cancellation.

use std::{
    io,
    num::NonZeroUsize,
    sync::{
        atomic::{AtomicBool, Ordering},
        Mutex,
    },
    thread,
};

use crossbeam_channel::bounded;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    crypto::map_passphrase_to_psk,
    hccapx::{Hccapx, KeyVersion},
    verify::verify,
};

/// The longest WPA2-Personal passphrase in bytes.
pub const MAX_PASSPHRASE_SIZE: usize = 63;
/// How many candidates the reader may buffer ahead of the workers.
pub const QUEUE_DEPTH: usize = 1024;

#[derive(Debug, Error)]
/// An error that aborts a dictionary attack.
pub enum AttackError {
    #[error("wordlist could not be read: {0}")]
    Wordlist(#[from] io::Error),
    #[error("handshake record uses unsupported key version {0:?}")]
    UnsupportedKeyVersion(KeyVersion),
}

/// The default worker count, one per logical core.
pub fn default_workers() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

/// Run a wordlist against a handshake record.
///
/// Candidates are tried in stream order; ones whose length is zero or
/// exceeds [MAX_PASSPHRASE_SIZE] are skipped. The first candidate whose
/// recomputed MIC matches the captured one is returned, [None] once the
/// wordlist is exhausted. With `workers` equal to one all verification
/// happens on the calling thread and the input order is preserved exactly;
/// with more workers candidates race and the first match by completion time
/// wins.
///
/// `stop` is shared with the workers and may be set by a signal handler;
/// setting it makes everyone wind down at the next candidate boundary.
pub fn attack<I>(
    record: &Hccapx,
    candidates: I,
    workers: NonZeroUsize,
    stop: &AtomicBool,
) -> Result<Option<Vec<u8>>, AttackError>
where
    I: Iterator<Item = io::Result<Vec<u8>>>,
{
    if record.key_version != KeyVersion::HmacSha1Aes {
        return Err(AttackError::UnsupportedKeyVersion(record.key_version));
    }
    info!(workers = workers.get(), "starting dictionary attack");
    if workers.get() == 1 {
        attack_serial(record, candidates, stop)
    } else {
        attack_parallel(record, candidates, workers, stop)
    }
}

fn attack_serial<I>(
    record: &Hccapx,
    candidates: I,
    stop: &AtomicBool,
) -> Result<Option<Vec<u8>>, AttackError>
where
    I: Iterator<Item = io::Result<Vec<u8>>>,
{
    for candidate in candidates {
        if stop.load(Ordering::Relaxed) {
            break;
        }
        let candidate = candidate?;
        if try_candidate(record, &candidate) {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

fn attack_parallel<I>(
    record: &Hccapx,
    candidates: I,
    workers: NonZeroUsize,
    stop: &AtomicBool,
) -> Result<Option<Vec<u8>>, AttackError>
where
    I: Iterator<Item = io::Result<Vec<u8>>>,
{
    let (sender, receiver) = bounded::<Vec<u8>>(QUEUE_DEPTH);
    let found = Mutex::new(None);
    let mut read_error = None;

    thread::scope(|scope| {
        for _ in 0..workers.get() {
            let receiver = receiver.clone();
            let found = &found;
            scope.spawn(move || {
                while let Ok(candidate) = receiver.recv() {
                    if stop.load(Ordering::Relaxed) {
                        break;
                    }
                    if try_candidate(record, &candidate) {
                        let mut slot = found.lock().unwrap();
                        if slot.is_none() {
                            *slot = Some(candidate);
                        }
                        stop.store(true, Ordering::Relaxed);
                        break;
                    }
                }
            });
        }
        drop(receiver);

        for candidate in candidates {
            if stop.load(Ordering::Relaxed) {
                break;
            }
            match candidate {
                // A send fails once all workers are gone, which only
                // happens after the stop flag was raised.
                Ok(candidate) => {
                    if sender.send(candidate).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    read_error = Some(error);
                    stop.store(true, Ordering::Relaxed);
                    break;
                }
            }
        }
        drop(sender);
    });

    if let Some(error) = read_error {
        return Err(error.into());
    }
    Ok(found.into_inner().unwrap())
}

fn try_candidate(record: &Hccapx, candidate: &[u8]) -> bool {
    if candidate.is_empty() || candidate.len() > MAX_PASSPHRASE_SIZE {
        debug!(length = candidate.len(), "skipping out-of-range candidate");
        return false;
    }
    let pmk = map_passphrase_to_psk(candidate, record.essid());
    // The key version was checked before any candidate was tried.
    matches!(verify(record, &pmk), Ok(true))
}
