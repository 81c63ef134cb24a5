use std::future::Future;

/// Runs `future` on its own task and waits for it.
///
/// Dropping the returned future (a client hanging up mid-request) leaves the
/// spawned task running, so view state always reaches its committed form.
pub(crate) async fn detached<F>(future: F) -> F::Output
where
    F: Future + Send + 'static,
    F::Output: Send + 'static,
{
    match tokio::spawn(future).await {
        Ok(output) => output,
        Err(err) if err.is_panic() => std::panic::resume_unwind(err.into_panic()),
        // Only runtime shutdown cancels the task, and that drops this future too.
        Err(_) => std::future::pending().await,
    }
}
