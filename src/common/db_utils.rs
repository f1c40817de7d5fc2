// src/common/db_utils.rs

use std::future::Future;
use std::time::Duration;

use crate::common::error::AppError;

// Política de reintento das leituras em lote: até 3 tentativas com atraso
// linear (0 ms -> 250 ms -> 500 ms), apenas para falhas transitórias.
const MAX_READ_ATTEMPTS: u32 = 3;
const RETRY_STEP_MS: u64 = 250;

fn is_transient(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::PoolTimedOut | sqlx::Error::Io(_))
}

/// Executa uma leitura reintentando falhas transitórias do banco.
/// Qualquer outro erro aborta imediatamente.
pub(crate) async fn with_read_retry<T, F, Fut>(table: &'static str, op: F) -> Result<T, AppError>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut attempt: u32 = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if is_transient(&e) => {
                attempt += 1;
                if attempt >= MAX_READ_ATTEMPTS {
                    tracing::error!(
                        "Falha ao carregar a tabela '{}' após {} tentativas: {}",
                        table,
                        MAX_READ_ATTEMPTS,
                        e
                    );
                    return Err(AppError::UpstreamUnavailable(table));
                }
                let delay = Duration::from_millis(RETRY_STEP_MS * u64::from(attempt));
                tracing::warn!(
                    "Erro transitório em '{}' (tentativa {}). Aguardando {:?}…",
                    table,
                    attempt,
                    delay
                );
                tokio::time::sleep(delay).await;
            }
            Err(e) => return Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn succeeds_without_retry() {
        let result = with_read_retry("orders", || async { Ok::<_, sqlx::Error>(7) }).await;
        assert_eq!(result.unwrap(), 7);
    }

    #[tokio::test]
    async fn retries_transient_errors_up_to_the_limit() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, AppError> = with_read_retry("orders", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(sqlx::Error::Io(io::Error::other("down"))) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(AppError::UpstreamUnavailable("orders"))));
    }

    #[tokio::test]
    async fn non_transient_errors_abort_immediately() {
        let calls = AtomicU32::new(0);
        let result: Result<u32, AppError> = with_read_retry("orders", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(sqlx::Error::RowNotFound) }
        })
        .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(AppError::DatabaseError(_))));
    }
}
