use log::info;

use crate::plan::PlannedCall;

use super::models::CallResult;

pub fn log_attempt(request: &PlannedCall) {
    info!(
        "[{}] Performing API request to {}",
        request.index, request.call.path
    );
}

pub fn log_response(result: &CallResult) {
    info!("{}", format_response(result));
}

pub fn log_planned(request: &PlannedCall) {
    info!("{}", format_planned(request));
}

fn format_response(result: &CallResult) -> String {
    format!(
        "Response status code: {}. Response body: {}",
        result.status, result.body
    )
}

fn format_planned(request: &PlannedCall) -> String {
    format!(
        "[{}] PUT {} ({}, timeout {:?}, retries {}, {} byte body)",
        request.index,
        request.url,
        request.source.display(),
        request.call.client_conf.request_timeout,
        request.call.client_conf.retry_attempts,
        request.call.payload.len()
    )
}
