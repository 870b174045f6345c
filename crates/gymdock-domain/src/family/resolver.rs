use std::collections::HashSet;

use super::roster::FamilyRoster;

/// Names compare equal after trimming and lowercasing.
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

pub fn names_match(a: &str, b: &str) -> bool {
    normalize_name(a) == normalize_name(b)
}

/// Active roster names with no check-in yet in the period, in roster order.
pub fn resolve_not_checked_in<S: AsRef<str>>(
    roster: &FamilyRoster,
    checked_in: &[S],
) -> Vec<String> {
    let checked_in: HashSet<String> = checked_in
        .iter()
        .map(|name| normalize_name(name.as_ref()))
        .collect();

    roster
        .active_names()
        .into_iter()
        .filter(|name| !checked_in.contains(&normalize_name(name)))
        .collect()
}

/// Restrict the backend's pending list to the active roster.
///
/// Pending names the roster does not know about (or that belong to deleted
/// members) are dropped; the result uses the roster's spelling and order.
pub fn resolve_from_pending<S: AsRef<str>>(roster: &FamilyRoster, pending: &[S]) -> Vec<String> {
    let pending: HashSet<String> = pending
        .iter()
        .map(|name| normalize_name(name.as_ref()))
        .collect();

    roster
        .active_names()
        .into_iter()
        .filter(|name| pending.contains(&normalize_name(name)))
        .collect()
}
