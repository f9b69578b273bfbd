//! Deferred values
//!
//! An [`Output`] is a placeholder for a value that is not known while the
//! resource graph is being declared. It resolves exactly once; every clone
//! observes the same result, and a transform attached with [`Output::apply`]
//! runs at most once no matter how many times the derived output is awaited.

use futures_util::future::{self, BoxFuture, FutureExt, Shared};
use std::convert::Infallible;
use std::fmt;
use std::future::Future;
use thiserror::Error;
use tokio::sync::oneshot;

/// Resolution failure of a deferred value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OutputError {
    /// A transform attached with `apply` returned an error
    #[error("{0}")]
    Apply(String),

    /// The resource owning this output could not be registered
    #[error("{0}")]
    Registration(String),

    #[error("output was never resolved")]
    Unresolved,

    #[error("missing property: {0}")]
    MissingProperty(String),

    #[error("property `{key}` has an unexpected shape: {reason}")]
    Decode { key: String, reason: String },
}

type SharedResult<T> = Shared<BoxFuture<'static, Result<T, OutputError>>>;

/// Single-resolution asynchronous value
#[derive(Clone)]
pub struct Output<T> {
    inner: SharedResult<T>,
}

impl<T> Output<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// An output whose value is already known
    pub fn new(value: T) -> Self {
        Self::from_future(future::ready(Ok(value)))
    }

    /// An output that resolves to `error`
    pub fn failed(error: OutputError) -> Self {
        Self::from_future(future::ready(Err(error)))
    }

    pub fn from_future<F>(fut: F) -> Self
    where
        F: Future<Output = Result<T, OutputError>> + Send + 'static,
    {
        Self {
            inner: fut.boxed().shared(),
        }
    }

    /// An unresolved output together with the one-shot handle that settles it
    ///
    /// Dropping the resolver without settling fails the output with
    /// [`OutputError::Unresolved`].
    pub fn pending() -> (Self, OutputResolver<T>) {
        let (tx, rx) = oneshot::channel();
        let output =
            Self::from_future(async move { rx.await.unwrap_or(Err(OutputError::Unresolved)) });
        (output, OutputResolver { tx })
    }

    /// Wait for the value
    pub async fn resolve(&self) -> Result<T, OutputError> {
        self.inner.clone().await
    }

    /// The result, if the output has already resolved
    pub fn peek(&self) -> Option<Result<T, OutputError>> {
        self.inner.peek().cloned()
    }

    /// Attach a fallible transform, producing a new deferred value
    ///
    /// Upstream failures pass through untouched. A transform error becomes
    /// [`OutputError::Apply`] carrying the error's display text verbatim.
    pub fn apply<U, E, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        E: fmt::Display,
        F: FnOnce(T) -> std::result::Result<U, E> + Send + 'static,
    {
        let upstream = self.inner.clone();
        Output::from_future(async move {
            let value = upstream.await?;
            f(value).map_err(|e| OutputError::Apply(e.to_string()))
        })
    }

    /// Attach an infallible transform
    pub fn map<U, F>(&self, f: F) -> Output<U>
    where
        U: Clone + Send + Sync + 'static,
        F: FnOnce(T) -> U + Send + 'static,
    {
        self.apply(move |value| Ok::<U, Infallible>(f(value)))
    }

    /// Join outputs in order; fails with the first error encountered
    pub fn all<I>(outputs: I) -> Output<Vec<T>>
    where
        I: IntoIterator<Item = Output<T>>,
    {
        let pending: Vec<_> = outputs.into_iter().map(|o| o.inner).collect();
        Output::from_future(future::try_join_all(pending))
    }
}

impl<T> fmt::Debug for Output<T>
where
    T: fmt::Debug + Clone + Send + Sync + 'static,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.peek() {
            Some(Ok(value)) => f.debug_tuple("Output").field(&value).finish(),
            Some(Err(e)) => write!(f, "Output(<failed: {}>)", e),
            None => write!(f, "Output(<pending>)"),
        }
    }
}

impl From<String> for Output<String> {
    fn from(value: String) -> Self {
        Output::new(value)
    }
}

impl From<bool> for Output<bool> {
    fn from(value: bool) -> Self {
        Output::new(value)
    }
}

impl From<&str> for Output<String> {
    fn from(value: &str) -> Self {
        Output::new(value.to_string())
    }
}

/// One-shot handle settling a pending [`Output`]
pub struct OutputResolver<T> {
    tx: oneshot::Sender<Result<T, OutputError>>,
}

impl<T> OutputResolver<T> {
    pub fn resolve(self, value: T) {
        self.settle(Ok(value));
    }

    pub fn reject(self, error: OutputError) {
        self.settle(Err(error));
    }

    pub fn settle(self, result: Result<T, OutputError>) {
        // Every clone of the output may already be gone
        let _ = self.tx.send(result);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_known_value_resolves() {
        let out = Output::new(42);
        assert_eq!(out.resolve().await, Ok(42));
        assert_eq!(out.peek(), Some(Ok(42)));
    }

    #[tokio::test]
    async fn test_apply_chains() {
        let name: Output<String> = "network".into();
        let id = name.map(|n| format!("{}_id", n));
        let len = id.apply(|s| Ok::<_, String>(s.len()));

        assert_eq!(id.resolve().await.unwrap(), "network_id");
        assert_eq!(len.resolve().await.unwrap(), 10);
    }

    #[tokio::test]
    async fn test_apply_error_keeps_message() {
        let out = Output::new(1).apply(|_| Err::<i32, _>("not OK!"));
        let err = out.resolve().await.unwrap_err();

        assert_eq!(err, OutputError::Apply("not OK!".to_string()));
        assert_eq!(err.to_string(), "not OK!");
    }

    #[tokio::test]
    async fn test_upstream_failure_skips_transform() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let out = Output::<i32>::failed(OutputError::Unresolved).map(move |v| {
            seen.fetch_add(1, Ordering::SeqCst);
            v + 1
        });

        assert_eq!(out.resolve().await, Err(OutputError::Unresolved));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transform_runs_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let seen = calls.clone();
        let out = Output::new(2).map(move |v| {
            seen.fetch_add(1, Ordering::SeqCst);
            v * 2
        });
        let other = out.clone();

        assert_eq!(out.resolve().await, Ok(4));
        assert_eq!(other.resolve().await, Ok(4));
        assert_eq!(out.resolve().await, Ok(4));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_pending_resolves_later() {
        let (out, resolver) = Output::<String>::pending();
        let derived = out.map(|s| s.to_uppercase());
        assert!(derived.peek().is_none());

        let waiter = tokio::spawn({
            let derived = derived.clone();
            async move { derived.resolve().await }
        });
        resolver.resolve("instance".to_string());

        assert_eq!(waiter.await.unwrap().unwrap(), "INSTANCE");
    }

    #[tokio::test]
    async fn test_dropped_resolver_is_unresolved() {
        let (out, resolver) = Output::<i32>::pending();
        drop(resolver);
        assert_eq!(out.resolve().await, Err(OutputError::Unresolved));
    }

    #[tokio::test]
    async fn test_all_preserves_order() {
        let (late, resolver) = Output::pending();
        let joined = Output::all(vec![late, Output::new(2), Output::new(3)]);
        resolver.resolve(1);
        assert_eq!(joined.resolve().await, Ok(vec![1, 2, 3]));

        let failing = Output::all(vec![
            Output::new(1),
            Output::failed(OutputError::MissingProperty("id".into())),
        ]);
        assert_eq!(
            failing.resolve().await,
            Err(OutputError::MissingProperty("id".into()))
        );
    }

    #[test]
    fn test_debug_shows_state() {
        let out = Output::new(7);
        assert_eq!(format!("{:?}", out), "Output(<pending>)");
        tokio_test::block_on(out.resolve()).unwrap();
        assert_eq!(format!("{:?}", out), "Output(7)");
    }
}
