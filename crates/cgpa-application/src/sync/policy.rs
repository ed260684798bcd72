//! Migration policy.
//!
//! Decides whether a device's anonymous records should be copied into a
//! signed-in user's brand-new remote document. This is a heuristic, kept
//! here so it can change without touching the state machine.

use cgpa_core::record::RecordState;

/// True when `local` holds at least one course with units in a live
/// semester.
///
/// Seed-only or course-less data is not migrated, so an empty default never
/// lands in a remote document that another device may fill later.
pub fn is_worth_migrating(local: &RecordState) -> bool {
    local.has_weighted_course()
}
