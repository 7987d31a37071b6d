//! Bounded inter-task queues and the serial guard.
//!
//! Built on `embassy-sync` primitives with a critical-section raw mutex,
//! so producers and consumers may sit on different threads (FreeRTOS
//! tasks on target). Every blocking operation carries a timeout; an
//! expired timeout leaves the queue exactly as it was.
//!
//! ```text
//! ┌──────────┐ SensorSample ┌──────────┐ ControlCommand ┌───────────┐
//! │ Sensing  │─────(5)─────▶│ Decision │──────(3)──────▶│ Actuation │
//! └──────────┘              └──────────┘        ▲       └───────────┘
//!                                               │
//!                                        ┌───────────┐
//!                                        │ Reporting │
//!                                        └───────────┘
//! ```

use core::time::Duration;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::{Channel, TrySendError};
use embassy_sync::mutex::{Mutex, MutexGuard};
use embassy_time::with_timeout;

use crate::error::QueueError;
use crate::time::to_embassy;

/// An item the queue refused because it stayed full for the whole
/// timeout. The caller decides whether to drop it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueueFull<T>(pub T);

/// Fixed-capacity FIFO with timed offer/poll.
pub struct BoundedQueue<T, const N: usize> {
    channel: Channel<CriticalSectionRawMutex, T, N>,
}

impl<T, const N: usize> Default for BoundedQueue<T, N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, const N: usize> BoundedQueue<T, N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Dequeue, waiting at most `timeout`. A zero timeout never waits.
    pub async fn poll(&self, timeout: Duration) -> Result<T, QueueError> {
        if timeout.is_zero() {
            return self.try_poll();
        }
        with_timeout(to_embassy(timeout), self.channel.receive())
            .await
            .map_err(|_| QueueError::Empty)
    }

    pub fn try_poll(&self) -> Result<T, QueueError> {
        self.channel.try_receive().map_err(|_| QueueError::Empty)
    }

    /// Enqueue without waiting.
    pub fn try_offer(&self, item: T) -> Result<(), QueueFull<T>> {
        self.channel.try_send(item).map_err(|TrySendError::Full(item)| QueueFull(item))
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.channel.is_full()
    }

    pub const fn capacity(&self) -> usize {
        N
    }
}

impl<T: Clone, const N: usize> BoundedQueue<T, N> {
    /// Enqueue, waiting at most `timeout` for a free slot. A zero timeout
    /// never waits. On failure nothing was enqueued and the item is
    /// handed back.
    ///
    /// `T: Clone` is needed because the pending send owns a copy of the
    /// item and is dropped on timeout; the original goes back to the
    /// caller. Both queued types are `Copy`. Use [`try_offer`] for types
    /// that cannot be cloned.
    ///
    /// [`try_offer`]: Self::try_offer
    pub async fn offer(&self, item: T, timeout: Duration) -> Result<(), QueueFull<T>> {
        let item = match self.try_offer(item) {
            Ok(()) => return Ok(()),
            Err(QueueFull(item)) if timeout.is_zero() => return Err(QueueFull(item)),
            Err(QueueFull(item)) => item,
        };
        with_timeout(to_embassy(timeout), self.channel.send(item.clone()))
            .await
            .map_err(|_| QueueFull(item))
    }
}

/// Mutual exclusion around a single serial transmitter, so concurrent
/// writers never interleave their bytes.
pub struct SerialGuard<T> {
    inner: Mutex<CriticalSectionRawMutex, T>,
}

impl<T> SerialGuard<T> {
    pub const fn new(tx: T) -> Self {
        Self {
            inner: Mutex::new(tx),
        }
    }

    /// Acquire the guard, waiting at most `timeout`.
    pub async fn lock_within(
        &self,
        timeout: Duration,
    ) -> Option<MutexGuard<'_, CriticalSectionRawMutex, T>> {
        if timeout.is_zero() {
            return self.inner.try_lock().ok();
        }
        with_timeout(to_embassy(timeout), self.inner.lock()).await.ok()
    }
}
