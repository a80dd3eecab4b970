//! Roster: the ordered, duplicate-free list of employees assigned to a batch.

use std::collections::HashSet;

use batchdesk_core::{DomainError, DomainResult, EmployeeId};

use crate::reconcile::{RosterDelta, reconcile};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    ids: Vec<EmployeeId>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a roster from a fresh id list, keeping the first occurrence of each id.
    pub fn from_ids(ids: impl IntoIterator<Item = EmployeeId>) -> Self {
        let mut seen = HashSet::new();
        let ids = ids.into_iter().filter(|id| seen.insert(*id)).collect();
        Self { ids }
    }

    pub fn ids(&self) -> &[EmployeeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn id_set(&self) -> HashSet<EmployeeId> {
        self.ids.iter().copied().collect()
    }

    /// Reconcile `candidates` against the roster and append the new ids.
    pub fn add(&mut self, candidates: &[EmployeeId]) -> DomainResult<RosterDelta> {
        let delta = reconcile(&self.id_set(), candidates)?;
        self.ids.extend_from_slice(&delta.new_ids);
        Ok(delta)
    }

    pub fn remove(&mut self, id: EmployeeId) -> DomainResult<()> {
        let pos = self
            .ids
            .iter()
            .position(|e| *e == id)
            .ok_or(DomainError::EmployeeNotFound(id))?;
        self.ids.remove(pos);
        Ok(())
    }

    /// Remove every id in `ids`, or none of them.
    ///
    /// Ids are checked in input order against a working copy; the first one
    /// that is not (or no longer) present aborts with `EmployeeNotFound` and
    /// the roster is left untouched.
    pub fn remove_all(&mut self, ids: &[EmployeeId]) -> DomainResult<()> {
        let mut remaining = self.ids.clone();
        for &id in ids {
            let pos = remaining
                .iter()
                .position(|e| *e == id)
                .ok_or(DomainError::EmployeeNotFound(id))?;
            remaining.remove(pos);
        }
        self.ids = remaining;
        Ok(())
    }
}

impl From<Roster> for Vec<EmployeeId> {
    fn from(value: Roster) -> Self {
        value.ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[i64]) -> Vec<EmployeeId> {
        raw.iter().copied().map(EmployeeId::new).collect()
    }

    #[test]
    fn from_ids_drops_later_repeats() {
        let roster = Roster::from_ids(ids(&[3, 1, 3, 2, 1]));
        assert_eq!(roster.ids(), ids(&[3, 1, 2]).as_slice());
    }

    #[test]
    fn add_appends_only_new_ids() {
        let mut roster = Roster::from_ids(ids(&[100, 200]));
        let delta = roster.add(&ids(&[200, 300])).unwrap();
        assert_eq!(delta.new_ids, ids(&[300]));
        assert_eq!(roster.ids(), ids(&[100, 200, 300]).as_slice());
    }

    #[test]
    fn remove_missing_employee_leaves_roster_unchanged() {
        let mut roster = Roster::from_ids(ids(&[100, 200]));
        let err = roster.remove(EmployeeId::new(500)).unwrap_err();
        assert_eq!(err, DomainError::EmployeeNotFound(EmployeeId::new(500)));
        assert_eq!(roster.ids(), ids(&[100, 200]).as_slice());
    }

    #[test]
    fn remove_all_is_all_or_nothing() {
        let mut roster = Roster::from_ids(ids(&[1, 2, 3]));
        let err = roster.remove_all(&ids(&[1, 9, 2])).unwrap_err();
        assert_eq!(err, DomainError::EmployeeNotFound(EmployeeId::new(9)));
        assert_eq!(roster.ids(), ids(&[1, 2, 3]).as_slice());

        roster.remove_all(&ids(&[3, 1])).unwrap();
        assert_eq!(roster.ids(), ids(&[2]).as_slice());
    }

    #[test]
    fn remove_all_reports_first_missing_id_in_input_order() {
        let mut roster = Roster::from_ids(ids(&[1]));
        let err = roster.remove_all(&ids(&[7, 8])).unwrap_err();
        assert_eq!(err, DomainError::EmployeeNotFound(EmployeeId::new(7)));
    }

    #[test]
    fn remove_all_rejects_repeated_id_after_first_removal() {
        let mut roster = Roster::from_ids(ids(&[1, 2]));
        let err = roster.remove_all(&ids(&[1, 1])).unwrap_err();
        assert_eq!(err, DomainError::EmployeeNotFound(EmployeeId::new(1)));
        assert_eq!(roster.len(), 2);
    }
}
