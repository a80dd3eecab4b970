//! Roster reconciliation: partition candidates into new vs. already present.

use std::collections::HashSet;

use batchdesk_core::{DomainError, DomainResult, EmployeeId};

/// Outcome of reconciling a candidate list against a roster.
///
/// Ephemeral; produced per operation and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RosterDelta {
    /// Candidates not yet on the roster, in input order, without repeats.
    pub new_ids: Vec<EmployeeId>,
    /// Candidates that were already on the roster (informational).
    pub already_present_ids: Vec<EmployeeId>,
}

/// Partition `candidates` against `current`.
///
/// A candidate repeated within the submission counts as already present on
/// its second occurrence, so `new_ids` never holds the same id twice.
///
/// Fails with `EmptyCandidateList` when there is nothing to reconcile and
/// with `AllDuplicates` when every candidate is already on the roster.
pub fn reconcile(
    current: &HashSet<EmployeeId>,
    candidates: &[EmployeeId],
) -> DomainResult<RosterDelta> {
    if candidates.is_empty() {
        return Err(DomainError::EmptyCandidateList);
    }

    let mut delta = RosterDelta::default();
    let mut seen = HashSet::with_capacity(candidates.len());

    for &id in candidates {
        if current.contains(&id) || !seen.insert(id) {
            delta.already_present_ids.push(id);
        } else {
            delta.new_ids.push(id);
        }
    }

    if delta.new_ids.is_empty() && !delta.already_present_ids.is_empty() {
        return Err(DomainError::AllDuplicates);
    }

    Ok(delta)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<EmployeeId> {
        raw.iter().copied().map(EmployeeId::new).collect()
    }

    fn set(raw: &[i64]) -> HashSet<EmployeeId> {
        ids(raw).into_iter().collect()
    }

    #[test]
    fn partitions_mixed_submission_in_input_order() {
        let delta = reconcile(&set(&[100, 200]), &ids(&[300, 100, 400, 200])).unwrap();
        assert_eq!(delta.new_ids, ids(&[300, 400]));
        assert_eq!(delta.already_present_ids, ids(&[100, 200]));
    }

    #[test]
    fn empty_candidate_list_is_rejected() {
        assert_eq!(
            reconcile(&set(&[1]), &[]).unwrap_err(),
            DomainError::EmptyCandidateList
        );
    }

    #[test]
    fn all_duplicate_submission_is_rejected() {
        assert_eq!(
            reconcile(&set(&[1, 2, 3]), &ids(&[3, 1])).unwrap_err(),
            DomainError::AllDuplicates
        );
    }

    #[test]
    fn repeated_candidate_is_only_new_once() {
        let delta = reconcile(&set(&[]), &ids(&[5, 6, 5])).unwrap();
        assert_eq!(delta.new_ids, ids(&[5, 6]));
        assert_eq!(delta.already_present_ids, ids(&[5]));
    }

    #[test]
    fn empty_roster_makes_everything_new() {
        let delta = reconcile(&HashSet::new(), &ids(&[9, 8, 7])).unwrap();
        assert_eq!(delta.new_ids, ids(&[9, 8, 7]));
        assert!(delta.already_present_ids.is_empty());
    }

    mod proptest_tests {
        use super::*;
        use proptest::collection::{hash_set, vec};
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: candidates disjoint from the roster all come back as new, in order.
            #[test]
            fn disjoint_candidates_are_all_new(
                roster in hash_set(0i64..1_000, 0..50),
                candidates in hash_set(1_000i64..2_000, 1..50)
            ) {
                let current: HashSet<EmployeeId> = roster.into_iter().map(EmployeeId::new).collect();
                let candidates: Vec<EmployeeId> = candidates.into_iter().map(EmployeeId::new).collect();

                let delta = reconcile(&current, &candidates).unwrap();
                prop_assert_eq!(&delta.new_ids, &candidates);
                prop_assert!(delta.already_present_ids.is_empty());
            }

            /// Property: candidates drawn entirely from the roster are rejected.
            #[test]
            fn contained_candidates_are_all_duplicates(
                roster in vec(0i64..10_000, 1..50),
                picks in vec(any::<prop::sample::Index>(), 1..50)
            ) {
                let candidates: Vec<EmployeeId> = picks
                    .iter()
                    .map(|ix| EmployeeId::new(*ix.get(&roster)))
                    .collect();
                let current: HashSet<EmployeeId> = roster.into_iter().map(EmployeeId::new).collect();

                prop_assert_eq!(reconcile(&current, &candidates), Err(DomainError::AllDuplicates));
            }
        }
    }
}
