//! A thread-safe handle that serializes actions on one run.
//!
//! Only one action is processed at a time. An action submitted while
//! another is still running is refused with [`RunError::Busy`] instead
//! of queueing. Once an action panics, every later call fails with
//! [`RunError::Interrupted`].

use std::sync::{Arc, Mutex, MutexGuard, TryLockError};
use std::thread;
use std::time::Duration;

use log::{debug, warn};

use crate::error::{RunError, RunResult};
use crate::session::Run;
use crate::snapshot::RunSnapshot;

/// Paces accepted actions, e.g. to let a front end animate dice.
pub trait Pacer: Send + Sync {
    /// Called once per accepted action, before it is applied.
    fn pause(&self);
}

/// Sleeps for a fixed duration. Zero disables pacing.
#[derive(Debug, Clone, Copy)]
pub struct FixedDelay(pub Duration);

impl Pacer for FixedDelay {
    fn pause(&self) {
        if !self.0.is_zero() {
            thread::sleep(self.0);
        }
    }
}

/// Shared, cloneable access to a run.
#[derive(Clone)]
pub struct SharedRun {
    inner: Arc<Mutex<Run>>,
    pacer: Arc<dyn Pacer>,
}

impl SharedRun {
    /// Wrap a run, pacing with its configured delay.
    pub fn new(run: Run) -> Self {
        let delay = FixedDelay(run.config().pacing);
        Self::with_pacer(run, delay)
    }

    /// Wrap a run with a custom pacer.
    pub fn with_pacer(run: Run, pacer: impl Pacer + 'static) -> Self {
        Self {
            inner: Arc::new(Mutex::new(run)),
            pacer: Arc::new(pacer),
        }
    }

    fn try_lock(&self) -> RunResult<MutexGuard<'_, Run>> {
        match self.inner.try_lock() {
            Ok(guard) => Ok(guard),
            Err(TryLockError::WouldBlock) => {
                debug!("action refused: run busy");
                Err(RunError::Busy)
            }
            Err(TryLockError::Poisoned(_)) => {
                warn!("action refused: an earlier action panicked mid-run");
                Err(RunError::Interrupted)
            }
        }
    }

    /// Apply an action, or fail with [`RunError::Busy`] if one is running.
    pub fn try_submit<T>(&self, action: impl FnOnce(&mut Run) -> RunResult<T>) -> RunResult<T> {
        let mut guard = self.try_lock()?;
        self.pacer.pause();
        action(&mut guard)
    }

    /// Read from the run without pacing.
    pub fn inspect<T>(&self, read: impl FnOnce(&Run) -> T) -> RunResult<T> {
        let guard = self.try_lock()?;
        Ok(read(&guard))
    }

    /// Capture the current state without pacing.
    pub fn snapshot(&self) -> RunResult<RunSnapshot> {
        self.inspect(Run::snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RunConfig;
    use std::sync::mpsc::{self, Receiver, Sender};

    /// Signals when an action is in flight and holds it until released.
    struct Gate {
        entered: Mutex<Sender<()>>,
        release: Mutex<Receiver<()>>,
    }

    impl Pacer for Gate {
        fn pause(&self) {
            if let Ok(tx) = self.entered.lock() {
                let _ = tx.send(());
            }
            if let Ok(rx) = self.release.lock() {
                let _ = rx.recv();
            }
        }
    }

    fn run() -> Run {
        Run::start("Ondraszek", RunConfig::default().with_seed(5).without_pacing())
    }

    #[test]
    fn submit_applies_action() {
        let shared = SharedRun::new(run());
        shared.try_submit(|r| r.choose(0)).unwrap();
        let snap = shared.snapshot().unwrap();
        assert_eq!(snap.character.name, "Ondraszek");
    }

    #[test]
    fn second_action_while_busy_is_refused() {
        let (entered_tx, entered_rx) = mpsc::channel();
        let (release_tx, release_rx) = mpsc::channel();
        let gate = Gate {
            entered: Mutex::new(entered_tx),
            release: Mutex::new(release_rx),
        };
        let shared = SharedRun::with_pacer(run(), gate);

        let worker = {
            let shared = shared.clone();
            thread::spawn(move || shared.try_submit(|r| Ok(r.character().coins)))
        };
        entered_rx.recv().unwrap();

        let refused = shared.try_submit(|r| Ok(r.character().coins));
        assert!(matches!(refused, Err(RunError::Busy)));
        assert!(matches!(shared.snapshot(), Err(RunError::Busy)));

        release_tx.send(()).unwrap();
        assert!(worker.join().unwrap().is_ok());
        assert!(shared.snapshot().is_ok());
    }

    #[test]
    fn panicked_action_interrupts_the_run() {
        let shared = SharedRun::new(run());
        let worker = {
            let shared = shared.clone();
            thread::spawn(move || {
                let _ = shared.try_submit(|r| -> RunResult<()> {
                    r.choose(0)?;
                    panic!("action failed midway");
                });
            })
        };
        assert!(worker.join().is_err());

        assert!(matches!(
            shared.try_submit(|r| r.travel()),
            Err(RunError::Interrupted)
        ));
        assert!(matches!(shared.snapshot(), Err(RunError::Interrupted)));
    }

    #[test]
    fn zero_delay_does_not_sleep() {
        FixedDelay(Duration::ZERO).pause();
    }
}
