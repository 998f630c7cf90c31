//! Builds the user-facing revision log from raw approval rows.
//!
//! The host system stores one row per production approval, oldest first.
//! Each row's timestamp and requester/approver describe when the NEXT
//! snapshot was promoted — the snapshot a row identifies was archived at
//! the following approval. The log therefore shifts that metadata down by
//! one position after reversing to newest-first order, patches the oldest
//! entry with the project's production-move metadata, and prepends a
//! synthetic entry for the currently active revision.

use crate::identity::{IdentityResolver, UserDirectory};
use crate::sources::traits::{ProjectHistory, RevisionDescriptor, CURRENT_REVISION};

/// Build the labelled, newest-first revision log.
///
/// Returns an empty log when the project has no approved revisions.
/// Callers need at least two entries before offering a comparison.
pub fn build_revision_log<D: UserDirectory>(
    history: &ProjectHistory,
    resolver: &mut IdentityResolver<D>,
) -> Vec<RevisionDescriptor> {
    let rows = &history.rows;
    let Some(newest_row) = rows.last() else {
        return Vec::new();
    };

    let mut log: Vec<RevisionDescriptor> = rows
        .iter()
        .enumerate()
        .map(|(rev_num, row)| RevisionDescriptor {
            id: row.id.clone(),
            label: if rev_num == 0 {
                "Moved to Production".to_owned()
            } else {
                format!("Production Revision #{rev_num}")
            },
            ts_approved: row.ts_approved.clone(),
            requester: resolver.resolve(&row.requester_id),
            approver: resolver.resolve(&row.approver_id),
            automatic_approval: row.automatic,
        })
        .collect();

    // Newest first
    log.reverse();

    // Shift approval metadata down by one: each snapshot was archived at
    // the next-newer approval, so it inherits that row's metadata.
    for index in 0..log.len().saturating_sub(1) {
        let next = log[index + 1].clone();
        let entry = &mut log[index];
        entry.ts_approved = next.ts_approved;
        entry.requester = next.requester;
        entry.approver = next.approver;
        entry.automatic_approval = next.automatic_approval;
    }

    // The oldest entry is the original production move; its timestamp and
    // mover are stored separately from the approval rows.
    if let Some(production_time) = &history.production_time {
        if let Some(oldest) = log.last_mut() {
            oldest.ts_approved = production_time.clone();
            if let Some(mover_id) = &history.production_mover_id {
                oldest.approver = resolver.resolve(mover_id);
            }
        }
    }

    // The currently active revision carries the newest row's metadata.
    log.insert(
        0,
        RevisionDescriptor {
            id: CURRENT_REVISION.to_owned(),
            label: format!("Production Revision #{} (Current Revision)", rows.len()),
            ts_approved: newest_row.ts_approved.clone(),
            requester: resolver.resolve(&newest_row.requester_id),
            approver: resolver.resolve(&newest_row.approver_id),
            automatic_approval: newest_row.automatic,
        },
    );

    log
}
