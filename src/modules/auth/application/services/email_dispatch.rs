use std::future::Future;
use std::time::Duration;

use uuid::Uuid;

use crate::email::application::ports::outgoing::EmailError;

pub const MAX_EMAIL_ATTEMPTS: u32 = 3;

/// Sends an account email off the request path. Failed attempts back off
/// `2^attempt` seconds; after the last one the failure is only logged.
pub fn spawn_email_with_retry<F, Fut>(user_id: Uuid, kind: &'static str, send: F)
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = Result<(), EmailError>> + Send + 'static,
{
    tokio::spawn(send_with_retry(user_id, kind, send));
}

pub async fn send_with_retry<F, Fut>(user_id: Uuid, kind: &'static str, send: F) -> bool
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<(), EmailError>>,
{
    for attempt in 1..=MAX_EMAIL_ATTEMPTS {
        match send().await {
            Ok(()) => {
                tracing::info!(user_id = %user_id, kind, attempt, "Email sent");
                return true;
            }
            Err(e) if attempt < MAX_EMAIL_ATTEMPTS => {
                tracing::warn!(
                    user_id = %user_id,
                    kind,
                    "Email attempt {}/{} failed: {}. Retrying...",
                    attempt,
                    MAX_EMAIL_ATTEMPTS,
                    e
                );
                tokio::time::sleep(Duration::from_secs(2_u64.pow(attempt))).await;
            }
            Err(e) => {
                tracing::error!(
                    user_id = %user_id,
                    kind,
                    "All {} email attempts failed: {}",
                    MAX_EMAIL_ATTEMPTS,
                    e
                );
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_success() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let delivered = send_with_retry(Uuid::new_v4(), "test", move || {
            let n = counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if n < 2 {
                    Err(EmailError::TransportFailed("busy".into()))
                } else {
                    Ok(())
                }
            }
        })
        .await;

        assert!(delivered);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_gives_up_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let delivered = send_with_retry(Uuid::new_v4(), "test", move || {
            counter.fetch_add(1, Ordering::SeqCst);
            async { Err(EmailError::TransportFailed("down".into())) }
        })
        .await;

        assert!(!delivered);
        assert_eq!(calls.load(Ordering::SeqCst), MAX_EMAIL_ATTEMPTS);
    }
}
