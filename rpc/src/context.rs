//! Per-call cancellation and deadline.
//!
//! A [`CallContext`] is created by the caller and travels untouched through the
//! [`BookServiceClient`](crate::client::BookServiceClient) down to the [`Transport`](crate::transports::Transport),
//! which is the one in charge of aborting the underlying call when the context is done.
use std::{future::Future, time::Duration};

use tokio::{
    select,
    time::{sleep_until, Instant},
};
use tokio_util::sync::CancellationToken;

use crate::status::Status;

#[derive(Debug, Clone)]
pub struct CallContext {
    /// Point in time after which the call must be abandoned
    deadline: Option<Instant>,
    /// Fired when the caller is no longer interested in the result
    cancellation: CancellationToken,
}

impl CallContext {
    /// A context that never expires and is only done if [`cancel`](#method.cancel) is called
    pub fn background() -> Self {
        Self {
            deadline: None,
            cancellation: CancellationToken::new(),
        }
    }

    /// A context that expires after `timeout`. A timeout too far in the future to be represented never expires.
    pub fn with_timeout(timeout: Duration) -> Self {
        match Instant::now().checked_add(timeout) {
            Some(deadline) => Self::with_deadline(deadline),
            None => Self::background(),
        }
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            cancellation: CancellationToken::new(),
        }
    }

    /// Derive a context with the same deadline that is cancelled together with `self`,
    /// but whose own cancellation doesn't propagate back.
    pub fn child(&self) -> Self {
        Self {
            deadline: self.deadline,
            cancellation: self.cancellation.child_token(),
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    /// The reason why the context is done, or `None` while it's still alive
    pub fn err(&self) -> Option<Status> {
        if self.cancellation.is_cancelled() {
            return Some(cancelled());
        }

        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(deadline_exceeded()),
            _ => None,
        }
    }

    /// Resolves once the context is cancelled or its deadline passes
    pub async fn done(&self) -> Status {
        match self.deadline {
            Some(deadline) => {
                select! {
                    _ = self.cancellation.cancelled() => cancelled(),
                    _ = sleep_until(deadline) => deadline_exceeded(),
                }
            }
            None => {
                self.cancellation.cancelled().await;
                cancelled()
            }
        }
    }

    /// Run `future` bound to this context.
    ///
    /// If the context is already done the future is never polled. Otherwise the first of both
    /// to finish wins, so the future is dropped (and so aborted) when the context is done before.
    pub async fn guard<T, F>(&self, future: F) -> Result<T, Status>
    where
        F: Future<Output = Result<T, Status>>,
    {
        if let Some(status) = self.err() {
            return Err(status);
        }

        select! {
            status = self.done() => Err(status),
            result = future => result,
        }
    }
}

impl Default for CallContext {
    fn default() -> Self {
        Self::background()
    }
}

fn cancelled() -> Status {
    Status::cancelled("context canceled")
}

fn deadline_exceeded() -> Status {
    Status::deadline_exceeded("context deadline exceeded")
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicBool, Ordering},
        time::Duration,
    };

    use tokio::time::sleep;

    use super::CallContext;
    use crate::status::Code;

    #[tokio::test]
    async fn test_expired_context_never_polls_the_future() {
        let polled = AtomicBool::new(false);
        let ctx = CallContext::with_timeout(Duration::ZERO);

        let result = ctx
            .guard(async {
                polled.store(true, Ordering::SeqCst);
                Ok(())
            })
            .await;

        assert_eq!(result.unwrap_err().code(), Code::DeadlineExceeded);
        assert!(!polled.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_guard_aborts_on_deadline() {
        let ctx = CallContext::with_timeout(Duration::from_millis(20));

        let result = ctx
            .guard(async {
                sleep(Duration::from_secs(10)).await;
                Ok(1)
            })
            .await;

        assert_eq!(result.unwrap_err().code(), Code::DeadlineExceeded);
    }

    #[tokio::test]
    async fn test_guard_returns_future_result() {
        let ctx = CallContext::with_timeout(Duration::from_secs(10));
        assert_eq!(ctx.guard(async { Ok(7) }).await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_cancellation_is_reported_before_deadline() {
        let ctx = CallContext::with_timeout(Duration::ZERO);
        ctx.cancel();
        assert_eq!(ctx.err().unwrap().code(), Code::Cancelled);
        assert_eq!(ctx.done().await.code(), Code::Cancelled);
    }

    #[tokio::test]
    async fn test_child_follows_parent_cancellation_only() {
        let parent = CallContext::background();
        let child = parent.child();

        child.cancel();
        assert!(parent.err().is_none());

        let other_child = parent.child();
        parent.cancel();
        assert_eq!(other_child.err().unwrap().code(), Code::Cancelled);
    }

    #[tokio::test]
    async fn test_unrepresentable_timeout_never_expires() {
        let ctx = CallContext::with_timeout(Duration::MAX);
        assert!(ctx.deadline().is_none());
        assert!(ctx.err().is_none());
        assert_eq!(ctx.guard(async { Ok(3) }).await.unwrap(), 3);
    }

    #[test]
    fn test_background_is_never_done() {
        let ctx = CallContext::default();
        assert!(ctx.deadline().is_none());
        assert!(ctx.err().is_none());
    }
}
