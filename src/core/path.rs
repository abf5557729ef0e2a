//! Vault path composition.

use crate::core::manifest::Entry;

/// Vault path for an entry.
///
/// Returns `group_path` unchanged unless the entry sets `nameAsSubPath`, in
/// which case the entry name is appended as a path segment.
pub fn compose(entry: &Entry, group_path: &str) -> String {
    if !entry.name_as_sub_path {
        return group_path.to_string();
    }

    let base = match group_path.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ => group_path,
    };
    if base.is_empty() {
        entry.name.clone()
    } else if base.ends_with('/') {
        format!("{}{}", base, entry.name)
    } else {
        format!("{}/{}", base, entry.name)
    }
}
