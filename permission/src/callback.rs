use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

use futures::channel::oneshot;

use crate::{RequestCode, ResultSet};

type CallbackFn = Box<dyn FnOnce(RequestCode, &ResultSet) + Send>;

/// Receives the result of one permission request, at most once.
pub struct Callback(CallbackFn);

impl Callback {
    /// Wrap a closure.
    pub fn new<F>(f: F) -> Self
    where
        F: FnOnce(RequestCode, &ResultSet) + Send + 'static,
    {
        Self(Box::new(f))
    }

    /// A callback paired with a future resolving to the delivered result.
    ///
    /// The future resolves to `None` if the callback is dropped undelivered,
    /// for instance when a dialog gate is declined.
    #[must_use]
    pub fn channel() -> (Self, ResultReceiver) {
        let (tx, rx) = oneshot::channel();
        let callback = Self::new(move |_, results: &ResultSet| {
            let _ = tx.send(results.clone());
        });
        (callback, ResultReceiver(rx))
    }

    pub(crate) fn invoke(self, code: RequestCode, results: &ResultSet) {
        (self.0)(code, results);
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback").finish_non_exhaustive()
    }
}

/// Future half of [`Callback::channel`].
#[derive(Debug)]
pub struct ResultReceiver(oneshot::Receiver<ResultSet>);

impl Future for ResultReceiver {
    type Output = Option<ResultSet>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.0).poll(cx).map(Result::ok)
    }
}
