//! Hand-off from the detection producer to the state owner.
//!
//! Detection completes on a worker thread; the `TrajectoryState` belongs to
//! the thread that draws it. There is no queue between them: the producer
//! writes into a single slot holding at most one pending batch plus a reset
//! flag, and a newer batch overwrites an older one that was never drained.
//! Only the owner applies what it takes from the slot.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use log::trace;

use crate::integration::error::SessionError;
use crate::trajectory::{TrajectorySample, TrajectoryState};

/// Work for the state owner.
#[derive(Debug, Clone, PartialEq)]
pub enum TrajectoryMessage {
    /// All observations from one detector completion
    Observations(Vec<TrajectorySample>),
    /// A new detection pass begins
    Reset,
}

impl TrajectoryMessage {
    /// Apply the message to `state`.
    pub fn apply(self, state: &mut TrajectoryState) {
        match self {
            TrajectoryMessage::Observations(samples) => {
                state.apply_observations(samples);
            }
            TrajectoryMessage::Reset => state.reset(),
        }
    }
}

#[derive(Debug, Default)]
struct Slot {
    reset: bool,
    observations: Option<Vec<TrajectorySample>>,
    senders: usize,
    receiver_alive: bool,
}

impl Slot {
    fn is_empty(&self) -> bool {
        !self.reset && self.observations.is_none()
    }

    /// Pending work in application order: reset first, then the latest batch.
    fn take(&mut self) -> Vec<TrajectoryMessage> {
        let mut messages = Vec::with_capacity(2);
        if std::mem::take(&mut self.reset) {
            messages.push(TrajectoryMessage::Reset);
        }
        if let Some(samples) = self.observations.take() {
            messages.push(TrajectoryMessage::Observations(samples));
        }
        messages
    }
}

#[derive(Debug, Default)]
struct Shared {
    slot: Mutex<Slot>,
    ready: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        // the slot holds plain data, so a poisoned lock is still consistent
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Producer side; cheap to clone.
#[derive(Debug)]
pub struct TrajectorySender {
    shared: Arc<Shared>,
}

impl TrajectorySender {
    /// Publish a message, replacing any batch the owner has not taken yet.
    ///
    /// A reset also discards the pending batch, since it predates the new
    /// detection pass.
    pub fn send(&self, message: TrajectoryMessage) -> Result<(), SessionError> {
        let mut slot = self.shared.lock();
        if !slot.receiver_alive {
            return Err(SessionError::Disconnected);
        }
        match message {
            TrajectoryMessage::Observations(samples) => {
                if slot.observations.replace(samples).is_some() {
                    trace!("superseding an undrained trajectory batch");
                }
            }
            TrajectoryMessage::Reset => {
                slot.reset = true;
                slot.observations = None;
            }
        }
        drop(slot);
        self.shared.ready.notify_all();
        Ok(())
    }
}

impl Clone for TrajectorySender {
    fn clone(&self) -> Self {
        self.shared.lock().senders += 1;
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl Drop for TrajectorySender {
    fn drop(&mut self) {
        self.shared.lock().senders -= 1;
        self.shared.ready.notify_all();
    }
}

/// Consumer side, held by the state owner.
#[derive(Debug)]
pub struct TrajectoryReceiver {
    shared: Arc<Shared>,
}

impl TrajectoryReceiver {
    /// Apply whatever is pending without blocking.
    ///
    /// # Returns
    /// The number of messages applied: at most a reset and one batch, however
    /// many batches the producer published since the last call.
    pub fn drain_into(&self, state: &mut TrajectoryState) -> usize {
        let messages = self.shared.lock().take();
        let applied = messages.len();
        for message in messages {
            message.apply(state);
        }
        applied
    }

    /// Apply pending work as it arrives until every sender is gone.
    pub fn wait_into(&self, state: &mut TrajectoryState) -> usize {
        let mut applied = 0;
        loop {
            let messages = {
                let mut slot = self.shared.lock();
                while slot.is_empty() && slot.senders > 0 {
                    slot = self
                        .shared
                        .ready
                        .wait(slot)
                        .unwrap_or_else(|e| e.into_inner());
                }
                if slot.is_empty() {
                    break;
                }
                slot.take()
            };
            applied += messages.len();
            for message in messages {
                message.apply(state);
            }
        }
        applied
    }
}

impl Drop for TrajectoryReceiver {
    fn drop(&mut self) {
        self.shared.lock().receiver_alive = false;
    }
}

/// Create a connected sender/receiver pair.
pub fn channel() -> (TrajectorySender, TrajectoryReceiver) {
    let shared = Arc::new(Shared {
        slot: Mutex::new(Slot {
            senders: 1,
            receiver_alive: true,
            ..Slot::default()
        }),
        ready: Condvar::new(),
    });
    (
        TrajectorySender {
            shared: Arc::clone(&shared),
        },
        TrajectoryReceiver { shared },
    )
}
