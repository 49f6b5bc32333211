//! Turns hierarchy notifications into reportable records.

use crate::hierarchy::{ClassifiedRecord, HierarchyNotification};

/// Classify every enable/disable entry of a notification, in input order.
///
/// Topology-only entries (added, removed, attached, detached) are dropped:
/// by the time they are seen, looking up the device they refer to would
/// observe stale state. Repeated entries are reported repeatedly.
pub fn classify(notification: &HierarchyNotification) -> Vec<ClassifiedRecord> {
    notification
        .info
        .iter()
        .filter(|info| info.is_enable_or_disable())
        .map(ClassifiedRecord::from_info)
        .collect()
}
