//! Turns gateway error payloads into [`GatewayError`] values.
//!
//! Faults are returned, never raised; callers decide whether a fault is
//! fatal.

use crate::classify::{classify, ClassifiedError};
use crate::config::RESULT_ERROR;
use crate::error::GatewayError;
use crate::response::{GatewayMessage, GatewayResponse};

/// Build a fault from the response's error payload, if it carries one.
///
/// An `errors` list always produces a fault. Without one, the `messages`
/// list produces a fault only when the result code is `Error`; success
/// responses carry informational messages too.
pub fn handle(response: &GatewayResponse) -> Result<(), GatewayError> {
    if let Some(errors) = &response.errors {
        return Err(fault(errors));
    }

    match &response.messages {
        Some(messages) if response.result.as_deref() == Some(RESULT_ERROR) => Err(fault(messages)),
        _ => Ok(()),
    }
}

/// Accept successful responses and turn everything else into a fault.
///
/// A failed response without any classifiable entries yields the generic
/// gateway error.
pub fn check(response: &GatewayResponse) -> Result<(), GatewayError> {
    if response.is_ok() {
        return Ok(());
    }

    handle(response)?;
    tracing::warn!(result = ?response.result, "Gateway failure without error details");
    Err(GatewayError::generic())
}

fn fault(entries: &[GatewayMessage]) -> GatewayError {
    let errors: Vec<ClassifiedError> = entries
        .iter()
        .map(|entry| classify(entry.code.as_deref(), entry.text.as_deref()))
        .collect();

    let error = match entries.first().and_then(|first| first.text.clone()) {
        Some(message) => GatewayError { message, errors },
        None => GatewayError {
            errors,
            ..GatewayError::generic()
        },
    };

    tracing::error!(message = %error.message, count = error.errors.len(), "Gateway returned an error");
    error
}
