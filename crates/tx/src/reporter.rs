use crate::error::TxError;
use tracing::error;

/// Receives every error that ends a transaction stream
pub trait TxErrorReporter: Send + Sync {
    fn report(&self, operation: &str, error: &TxError);
}

/// Writes stream errors to the tracing subscriber
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingErrorReporter;

impl TxErrorReporter for TracingErrorReporter {
    fn report(&self, operation: &str, error: &TxError) {
        error!(operation, %error, "transaction stream failed");
    }
}
