use tokio::task::JoinHandle;

/// Owned handle to the repeating fetch timer.
///
/// Acquired by [`super::start`]; released by [`SchedulerHandle::stop`] or on
/// drop, whichever comes first. Releasing disarms the timer only: fetches
/// already in flight run to completion.
#[derive(Debug)]
pub struct SchedulerHandle {
    timer: Option<JoinHandle<()>>,
}

impl SchedulerHandle {
    pub(crate) fn new(timer: JoinHandle<()>) -> Self {
        Self { timer: Some(timer) }
    }

    /// Disarm the timer. Returns `true` if this call disarmed it, `false` if
    /// it was already stopped.
    pub fn stop(&mut self) -> bool {
        match self.timer.take() {
            Some(timer) => {
                timer.abort();
                tracing::debug!(event = "core.scheduler.stopped");
                true
            }
            None => false,
        }
    }
}

impl Drop for SchedulerHandle {
    fn drop(&mut self) {
        self.stop();
    }
}
