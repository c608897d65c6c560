// Duplicate-tab detection: one surviving tab per file path, empty views culled

use std::collections::HashSet;

use crate::workspace::{Leaf, LeafId};

/// Scan a snapshot of open leaves and return the ids to detach, in scan
/// order. The first leaf bound to each path survives; every later leaf on
/// the same path is marked, as is every empty-view leaf. Leaves that are
/// neither file-bound nor empty (graph view, settings pane, ...) are left
/// alone. The caller detaches the whole batch after the scan, so removal
/// can never change which leaf counts as first occurrence.
pub fn compute_duplicates(leaves: &[Leaf]) -> Vec<LeafId> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut to_remove = Vec::new();

    for leaf in leaves {
        if let Some(file) = leaf.bound_file() {
            if !seen.insert(file.path.as_str()) {
                to_remove.push(leaf.id);
            }
        } else if leaf.is_empty_view() {
            to_remove.push(leaf.id);
        }
    }

    to_remove
}
