use crate::storage::Storage;
use crate::ui::messages::error;

/// Append to the audit trail without failing the caller's operation.
pub fn record(storage: &dyn Storage, operation: &str, target: &str, message: &str) {
    if let Err(e) = storage.audit(operation, target, message) {
        error(format!("Failed to write internal log: {}", e));
    }
}
