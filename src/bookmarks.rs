pub mod chrome;
pub mod escape;
pub mod firefox;

use std::collections::BTreeMap;

use crate::ingress::IngressRecord;

/// Folder name both browsers show after import.
pub const FOLDER_NAME: &str = "Kubernetes Ingresses";

/// Bookmark title shown for a record.
fn title(record: &IngressRecord) -> String {
    format!("{} ({})", record.host, record.namespace)
}

/// Flattens a namespace-grouped map in namespace key order, keeping each
/// namespace's host order.
fn flatten(grouped: &BTreeMap<String, Vec<IngressRecord>>) -> Vec<IngressRecord> {
    grouped.values().flatten().cloned().collect()
}
