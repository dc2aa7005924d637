//! View-scoped cancellation.
//!
//! Every page controller owns a [`ViewScope`]. Requests started through it
//! stop as soon as the scope is cancelled or dropped, so a closed view never
//! applies a late response.

use std::future::Future;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::error::{ClientError, ClientResult};

/// Cancellation scope of one open view.
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    /// Creates an open scope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a scope that is also cancelled when `self` is.
    #[must_use]
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    /// Whether the scope has been closed.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Closes the scope, cancelling everything still running in it.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Awaits `request` unless the scope closes first.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::Cancelled` if the scope closes first, otherwise
    /// whatever `request` returns.
    pub async fn run<T, F>(&self, request: F) -> ClientResult<T>
    where
        F: Future<Output = ClientResult<T>>,
    {
        run_until_cancelled(&self.token, request).await
    }

    /// Spawns `request` on the runtime, bound to this scope.
    pub fn spawn<T, F>(&self, request: F) -> JoinHandle<ClientResult<T>>
    where
        T: Send + 'static,
        F: Future<Output = ClientResult<T>> + Send + 'static,
    {
        let token = self.token.clone();
        tokio::spawn(async move { run_until_cancelled(&token, request).await })
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

async fn run_until_cancelled<T, F>(token: &CancellationToken, request: F) -> ClientResult<T>
where
    F: Future<Output = ClientResult<T>>,
{
    tokio::select! {
        biased;
        () = token.cancelled() => {
            debug!("Request cancelled with its view");
            Err(ClientError::Cancelled)
        }
        result = request => result,
    }
}
