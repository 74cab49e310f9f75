use std::fmt::Debug;
use std::fmt::Display;
use std::fmt::Formatter;

use super::AffineView;
use super::IntegerVariable;
use super::TransformableVariable;
use crate::containers::StorageKey;
use crate::engine::notifications::Watchers;
use crate::engine::Assignments;

/// The handle of a domain held by [`Assignments`]. Every other integer variable is a view over
/// one of these.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DomainId {
    index: u32,
}

impl DomainId {
    pub(crate) fn new(index: u32) -> Self {
        DomainId { index }
    }
}

impl StorageKey for DomainId {
    fn index(&self) -> usize {
        self.index as usize
    }

    fn create_from_index(index: usize) -> Self {
        DomainId::new(index as u32)
    }
}

impl IntegerVariable for DomainId {
    type AffineView = AffineView<Self>;

    fn lower_bound(&self, assignment: &Assignments) -> i32 {
        assignment.get_lower_bound(*self)
    }

    fn upper_bound(&self, assignment: &Assignments) -> i32 {
        assignment.get_upper_bound(*self)
    }

    fn contains(&self, assignment: &Assignments, value: i32) -> bool {
        assignment.is_value_in_domain(*self, value)
    }

    fn iterate_domain(&self, assignment: &Assignments) -> impl Iterator<Item = i32> {
        assignment.get_domain_iterator(*self)
    }

    fn watch_all(&self, watchers: &mut Watchers<'_>) {
        watchers.watch(*self);
    }
}

impl TransformableVariable<AffineView<DomainId>> for DomainId {
    fn scaled(&self, scale: i32) -> AffineView<DomainId> {
        AffineView::new(*self, scale, 0)
    }

    fn offset(&self, offset: i32) -> AffineView<DomainId> {
        AffineView::new(*self, 1, offset)
    }
}

impl Display for DomainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "x{}", self.index)
    }
}

impl Debug for DomainId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}
