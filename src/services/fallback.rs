use std::future::Future;

use tracing::warn;

use crate::{dao::remote::RemoteDaoError, error::ServiceError};

/// Run a remote call first and fall back to local storage on any failure.
///
/// This is the single place the remote-then-local pattern lives: a remote
/// success wins outright, any remote failure (transport, status, decode) is
/// logged and answered from the local closure, and with no remote configured
/// the local closure runs directly. The fallback is one-shot; the remote
/// call is never retried.
pub async fn remote_first<T, R, L, LFut>(
    operation: &'static str,
    remote: Option<R>,
    local: L,
) -> Result<T, ServiceError>
where
    R: Future<Output = Result<T, RemoteDaoError>>,
    L: FnOnce() -> LFut,
    LFut: Future<Output = Result<T, ServiceError>>,
{
    if let Some(call) = remote {
        match call.await {
            Ok(value) => return Ok(value),
            Err(err) => warn!(
                operation,
                error = %err,
                "remote API call failed; falling back to local store"
            ),
        }
    }

    local().await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    fn remote_ok(value: u32) -> Option<impl Future<Output = Result<u32, RemoteDaoError>>> {
        Some(async move { Ok(value) })
    }

    fn remote_err() -> Option<impl Future<Output = Result<u32, RemoteDaoError>>> {
        Some(async {
            Err(RemoteDaoError::RequestStatus {
                url: "http://remote.test/api/equipos".into(),
                status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            })
        })
    }

    #[tokio::test]
    async fn remote_success_short_circuits() {
        let local_ran = AtomicBool::new(false);
        let value = remote_first("test", remote_ok(7), || async {
            local_ran.store(true, Ordering::SeqCst);
            Ok(99)
        })
        .await
        .unwrap();

        assert_eq!(value, 7);
        assert!(!local_ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn remote_failure_falls_back_to_local() {
        let value = remote_first("test", remote_err(), || async { Ok(99) })
            .await
            .unwrap();
        assert_eq!(value, 99);
    }

    #[tokio::test]
    async fn missing_remote_goes_straight_to_local() {
        let remote: Option<std::future::Ready<Result<u32, RemoteDaoError>>> = None;
        let value = remote_first("test", remote, || async { Ok(42) }).await.unwrap();
        assert_eq!(value, 42);
    }

    #[tokio::test]
    async fn local_errors_surface_when_both_sides_fail() {
        let outcome = remote_first("test", remote_err(), || async {
            Err::<u32, _>(ServiceError::NotFound("gone".into()))
        })
        .await;
        assert!(matches!(outcome, Err(ServiceError::NotFound(_))));
    }
}
