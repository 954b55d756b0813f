use std::path::Path;

use crate::config::ExecutionContext;
use crate::error::ApplyError;
use crate::executor::{log_attempt, log_planned, log_response, RequestExecutor, RetryPolicy};
use crate::plan::{discover, expand, load_document, PlannedCall};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub calls: usize,
    pub errors: usize,
}

impl RunSummary {
    /// Error count as a process status, saturated so it never wraps to 0.
    pub fn exit_status(&self) -> u8 {
        u8::try_from(self.errors).unwrap_or(u8::MAX)
    }
}

/// Applies every call found under a config directory, strictly in order.
#[derive(Debug)]
pub struct Pipeline<E> {
    context: ExecutionContext,
    executor: E,
    retry: RetryPolicy,
}

impl<E: RequestExecutor> Pipeline<E> {
    pub fn new(context: ExecutionContext, executor: E) -> Self {
        Self {
            context,
            executor,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Loads and resolves every call before anything is sent, so broken
    /// config never leaves the target half-applied.
    ///
    /// This is eager: all files are read and every descriptor is built up
    /// front, before the first retry loop starts. When a later file is
    /// malformed the run fails with that config error and sends nothing,
    /// even if an earlier call would have exhausted its retries first.
    pub async fn plan(&self, dir: &Path) -> Result<Vec<PlannedCall>, ApplyError> {
        let mut planned = Vec::new();

        for file in discover(dir)? {
            let document = load_document(&file).await?;
            for call in expand(&document)? {
                let call = call?;
                let index = planned.len();
                let url = self
                    .context
                    .url_for(&call.path)
                    .map_err(|source| ApplyError::InvalidUrl {
                        source_file: file.clone(),
                        index,
                        url: format!("{}{}", self.context.base(), call.path),
                        source,
                    })?;
                planned.push(PlannedCall {
                    index,
                    source: file.clone(),
                    url,
                    call,
                });
            }
        }

        Ok(planned)
    }

    pub async fn run(&self, dir: &Path) -> Result<RunSummary, ApplyError> {
        let planned = self.plan(dir).await?;
        let mut summary = RunSummary::default();

        for request in &planned {
            log_attempt(request);
            let result = self.retry.run(&self.executor, request).await?;
            log_response(&result);

            summary.calls += 1;
            if result.is_error() {
                summary.errors += 1;
            }
        }

        Ok(summary)
    }

    pub async fn dry_run(&self, dir: &Path) -> Result<Vec<PlannedCall>, ApplyError> {
        let planned = self.plan(dir).await?;
        for request in &planned {
            log_planned(request);
        }
        Ok(planned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Credentials;
    use crate::error::TransportError;
    use crate::executor::CallResult;
    use anyhow::Result;
    use std::{collections::HashMap, fs, sync::Mutex};
    use tempfile::tempdir;

    /// Answers from a fixed path → status table and records what was sent.
    #[derive(Default)]
    struct ScriptedExecutor {
        statuses: HashMap<String, u16>,
        sent: Mutex<Vec<String>>,
    }

    impl ScriptedExecutor {
        fn with(statuses: &[(&str, u16)]) -> Self {
            Self {
                statuses: statuses
                    .iter()
                    .map(|(path, status)| (path.to_string(), *status))
                    .collect(),
                sent: Mutex::default(),
            }
        }

        fn sent(&self) -> Vec<String> {
            self.sent.lock().unwrap().clone()
        }
    }

    impl RequestExecutor for ScriptedExecutor {
        async fn execute(&self, request: &PlannedCall) -> Result<CallResult, TransportError> {
            self.sent.lock().unwrap().push(request.call.path.clone());
            match self.statuses.get(&request.call.path) {
                Some(status) => Ok(CallResult {
                    status: *status,
                    body: String::new(),
                }),
                None => Err(TransportError::new(request.url.as_str(), "unreachable")),
            }
        }
    }

    fn context() -> ExecutionContext {
        ExecutionContext::new(
            "http://127.0.0.1",
            8080,
            Credentials {
                username: "u".to_string(),
                password: "p".to_string(),
            },
        )
        .unwrap()
    }

    fn call_file(paths: &[&str]) -> String {
        let mut yaml = String::from("client_conf:\n  request_timeout: 1\n  retry_attempts: 0\napi_calls:\n");
        for path in paths {
            yaml.push_str(&format!("  - path: {path}\n    payload: '{{}}'\n"));
        }
        yaml
    }

    #[tokio::test]
    async fn plan_preserves_file_and_call_order() -> Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("20-second.yaml"), call_file(&["/c"]))?;
        fs::write(temp.path().join("10-first.yaml"), call_file(&["/a", "/b"]))?;

        let pipeline = Pipeline::new(context(), ScriptedExecutor::default());
        let planned = pipeline.plan(temp.path()).await?;

        let described: Vec<_> = planned
            .iter()
            .map(|p| (p.index, p.url.to_string()))
            .collect();
        assert_eq!(
            described,
            vec![
                (0, "http://127.0.0.1:8080/a".to_string()),
                (1, "http://127.0.0.1:8080/b".to_string()),
                (2, "http://127.0.0.1:8080/c".to_string()),
            ]
        );
        assert!(planned[2].source.ends_with("20-second.yaml"));
        Ok(())
    }

    #[tokio::test]
    async fn counts_only_statuses_above_200() -> Result<()> {
        let temp = tempdir()?;
        fs::write(
            temp.path().join("01.yaml"),
            call_file(&["/ok", "/created", "/moved", "/missing", "/broken"]),
        )?;

        let executor = ScriptedExecutor::with(&[
            ("/ok", 200),
            ("/created", 201),
            ("/moved", 301),
            ("/missing", 404),
            ("/broken", 500),
        ]);
        let pipeline = Pipeline::new(context(), executor);
        let summary = pipeline.run(temp.path()).await?;

        assert_eq!(summary, RunSummary { calls: 5, errors: 4 });
        assert_eq!(summary.exit_status(), 4);
        Ok(())
    }

    #[tokio::test]
    async fn schema_errors_abort_before_any_request() -> Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("01.yaml"), call_file(&["/a"]))?;
        fs::write(temp.path().join("02.yaml"), "api_calls: nope\n")?;

        let pipeline = Pipeline::new(context(), ScriptedExecutor::with(&[("/a", 200)]));
        let err = pipeline.run(temp.path()).await.unwrap_err();

        assert!(matches!(err, ApplyError::Schema(_)));
        assert!(pipeline.executor.sent().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn config_errors_take_precedence_over_transport_failures() -> Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("01.yaml"), call_file(&["/a", "/down"]))?;
        fs::write(temp.path().join("02.yaml"), "api_calls: [unterminated")?;

        let pipeline = Pipeline::new(context(), ScriptedExecutor::with(&[("/a", 200)]));
        let err = pipeline.run(temp.path()).await.unwrap_err();

        match err {
            ApplyError::Parse(err) => assert!(err.to_string().contains("02.yaml")),
            other => panic!("unexpected error: {other}"),
        }
        assert!(pipeline.executor.sent().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn exhaustion_stops_remaining_calls() -> Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("01.yaml"), call_file(&["/a", "/down", "/b"]))?;
        fs::write(temp.path().join("02.yaml"), call_file(&["/c"]))?;

        let executor = ScriptedExecutor::with(&[("/a", 500), ("/b", 200), ("/c", 200)]);
        let pipeline = Pipeline::new(context(), executor);
        let err = pipeline.run(temp.path()).await.unwrap_err();

        match err {
            ApplyError::RetryExhausted(err) => {
                assert_eq!(err.path, "/down");
                assert_eq!(err.attempts, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(pipeline.executor.sent(), vec!["/a", "/down"]);
        Ok(())
    }

    #[tokio::test]
    async fn dry_run_sends_nothing() -> Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("01.yaml"), call_file(&["/a", "/b"]))?;

        let pipeline = Pipeline::new(context(), ScriptedExecutor::default());
        let planned = pipeline.dry_run(temp.path()).await?;

        assert_eq!(planned.len(), 2);
        assert!(pipeline.executor.sent().is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn empty_directory_is_a_clean_run() -> Result<()> {
        let temp = tempdir()?;
        let pipeline = Pipeline::new(context(), ScriptedExecutor::default());
        assert_eq!(pipeline.run(temp.path()).await?, RunSummary::default());
        Ok(())
    }

    #[test]
    fn exit_status_saturates() {
        let summary = RunSummary {
            calls: 300,
            errors: 256,
        };
        assert_eq!(summary.exit_status(), 255);
    }
}
