use std::time::Duration;

use log::info;

use crate::error::RetryExhaustedError;
use crate::plan::PlannedCall;

use super::{models::CallResult, runner::RequestExecutor};

pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(3);

/// Retries transport failures with a fixed backoff.
///
/// The budget comes from the call's `client_conf.retry_attempts`: a call is
/// tried at most `retry_attempts + 1` times. HTTP statuses are never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn with_backoff(backoff: Duration) -> Self {
        Self { backoff }
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    pub async fn run<E>(
        &self,
        executor: &E,
        request: &PlannedCall,
    ) -> Result<CallResult, RetryExhaustedError>
    where
        E: RequestExecutor,
    {
        let mut remaining = request.call.client_conf.retry_attempts;
        let mut attempts = 0;

        loop {
            attempts += 1;
            let err = match executor.execute(request).await {
                Ok(result) => return Ok(result),
                Err(err) => err,
            };

            info!("Got error in http request attempt: {err}");
            if remaining == 0 {
                return Err(RetryExhaustedError {
                    path: request.call.path.clone(),
                    attempts,
                    last: err,
                });
            }

            info!("Going to retry request, attempts left {remaining}");
            tokio::time::sleep(self.backoff).await;
            remaining -= 1;
        }
    }
}
