use std::collections::BTreeMap;

use crate::basic_types::EmptyDomain;
use crate::basic_types::Trail;
use crate::containers::KeyedVec;
use crate::containers::StorageKey;
use crate::engine::predicates::predicate::Comparison;
use crate::engine::predicates::predicate::Predicate;
use crate::engine::variables::DomainId;
use crate::engine::variables::IntegerVariable;
use crate::fd_assert_moderate;
use crate::fd_assert_simple;

/// The domains of all variables, together with a trail of every change made to them so they can
/// be restored on backtrack.
#[derive(Clone, Debug)]
pub struct Assignments {
    trail: Trail<DomainChange>,
    domains: KeyedVec<DomainId, IntegerDomain>,
}

impl Default for Assignments {
    fn default() -> Self {
        let mut assignments = Self {
            trail: Default::default(),
            domains: Default::default(),
        };

        // The domain with id 0 is fixed to 1 and backs the always-true predicate.
        let _ = assignments.grow(1, 1);

        assignments
    }
}

impl Assignments {
    pub(crate) fn open_decision_level(&mut self) {
        self.trail.open_level()
    }

    pub(crate) fn get_decision_level(&self) -> usize {
        self.trail.level()
    }

    /// The domains which were created through the public interface, i.e. excluding the domain
    /// backing the always-true predicate.
    pub(crate) fn get_domains(&self) -> impl Iterator<Item = DomainId> {
        (1..self.domains.len()).map(DomainId::create_from_index)
    }

    pub(crate) fn num_changes(&self) -> usize {
        self.trail.len()
    }

    /// The domain touched by the `index`-th change on the trail.
    pub(crate) fn changed_domain(&self, index: usize) -> DomainId {
        self.trail[index].domain_id
    }

    pub(crate) fn grow(&mut self, lower_bound: i32, upper_bound: i32) -> DomainId {
        fd_assert_simple!(lower_bound <= upper_bound, "Cannot create an empty domain.");

        self.domains.push(IntegerDomain {
            lower_bound,
            upper_bound,
            holes: BTreeMap::new(),
        })
    }

    pub(crate) fn get_lower_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].lower_bound
    }

    pub(crate) fn get_upper_bound(&self, domain_id: DomainId) -> i32 {
        self.domains[domain_id].upper_bound
    }

    #[cfg(test)]
    pub(crate) fn get_assigned_value<Var: IntegerVariable>(&self, var: &Var) -> Option<i32> {
        self.is_domain_assigned(var).then(|| var.lower_bound(self))
    }

    pub(crate) fn is_domain_assigned<Var: IntegerVariable>(&self, var: &Var) -> bool {
        var.lower_bound(self) == var.upper_bound(self)
    }

    pub(crate) fn is_value_in_domain(&self, domain_id: DomainId, value: i32) -> bool {
        self.domains[domain_id].contains(value)
    }

    /// The number of values which are still in the domain.
    pub(crate) fn get_domain_size(&self, domain_id: DomainId) -> u32 {
        self.domains[domain_id].size()
    }

    /// The smallest value of the domain which is larger than `value`.
    pub(crate) fn next_value_after(&self, domain_id: DomainId, value: i32) -> Option<i32> {
        let domain = &self.domains[domain_id];
        value
            .checked_add(1)
            .and_then(|from| domain.first_value_from(from.max(domain.lower_bound)))
    }

    pub(crate) fn get_domain_iterator(&self, domain_id: DomainId) -> impl Iterator<Item = i32> + '_ {
        std::iter::successors(Some(self.get_lower_bound(domain_id)), move |&value| {
            self.next_value_after(domain_id, value)
        })
    }
}

impl Assignments {
    /// Applies the predicate to the domain it refers to.
    ///
    /// Returns `Ok(true)` if the domain changed and `Ok(false)` if the predicate was already
    /// satisfied. If the predicate would empty the domain the domain is left untouched and
    /// [`EmptyDomain`] is returned.
    pub(crate) fn post_predicate(&mut self, predicate: Predicate) -> Result<bool, EmptyDomain> {
        let domain_id = predicate.domain();
        let value = predicate.value();
        match predicate.comparison() {
            Comparison::AtLeast => self.tighten_lower_bound(domain_id, value),
            Comparison::AtMost => self.tighten_upper_bound(domain_id, value),
            Comparison::NotEqual => self.remove_range(domain_id, value, value),
            Comparison::Equal => self.make_assignment(domain_id, value),
        }
    }

    /// Removes every value in `[from, to]` from the domain.
    ///
    /// A range touching a bound moves that bound. The values in the interior are removed with
    /// one change per run of values which were still in the domain.
    pub(crate) fn remove_range(
        &mut self,
        domain_id: DomainId,
        from: i32,
        to: i32,
    ) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        let from = from.max(domain.lower_bound);
        let to = to.min(domain.upper_bound);
        if from > to {
            return Ok(false);
        }

        match (from == domain.lower_bound, to == domain.upper_bound) {
            (true, true) => Err(EmptyDomain),
            (true, false) => self.tighten_lower_bound(domain_id, to + 1),
            (false, true) => self.tighten_upper_bound(domain_id, from - 1),
            (false, false) => {
                let runs = domain.runs_of_values(from, to);
                let changed = !runs.is_empty();
                for (start, end) in runs {
                    let domain = &mut self.domains[domain_id];
                    self.trail.push(DomainChange {
                        domain_id,
                        old_lower_bound: domain.lower_bound,
                        old_upper_bound: domain.upper_bound,
                        removed_hole: Some(start),
                    });
                    let _ = domain.holes.insert(start, end);
                }

                Ok(changed)
            }
        }
    }

    fn tighten_lower_bound(
        &mut self,
        domain_id: DomainId,
        new_lower_bound: i32,
    ) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        if new_lower_bound <= domain.lower_bound {
            return Ok(false);
        }

        let upper_bound = domain.upper_bound;
        let lower_bound = domain
            .first_value_from(new_lower_bound)
            .ok_or(EmptyDomain)?;
        self.update_bounds(domain_id, lower_bound, upper_bound);

        Ok(true)
    }

    fn tighten_upper_bound(
        &mut self,
        domain_id: DomainId,
        new_upper_bound: i32,
    ) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        if new_upper_bound >= domain.upper_bound {
            return Ok(false);
        }

        let lower_bound = domain.lower_bound;
        let upper_bound = domain
            .last_value_until(new_upper_bound)
            .ok_or(EmptyDomain)?;
        self.update_bounds(domain_id, lower_bound, upper_bound);

        Ok(true)
    }

    fn make_assignment(&mut self, domain_id: DomainId, value: i32) -> Result<bool, EmptyDomain> {
        let domain = &self.domains[domain_id];
        if !domain.contains(value) {
            return Err(EmptyDomain);
        }
        if domain.lower_bound == value && domain.upper_bound == value {
            return Ok(false);
        }

        self.update_bounds(domain_id, value, value);

        Ok(true)
    }

    fn update_bounds(&mut self, domain_id: DomainId, lower_bound: i32, upper_bound: i32) {
        fd_assert_moderate!(
            self.domains[domain_id].contains(lower_bound)
                && self.domains[domain_id].contains(upper_bound)
        );

        let domain = &mut self.domains[domain_id];
        self.trail.push(DomainChange {
            domain_id,
            old_lower_bound: domain.lower_bound,
            old_upper_bound: domain.upper_bound,
            removed_hole: None,
        });

        domain.lower_bound = lower_bound;
        domain.upper_bound = upper_bound;
    }

    pub(crate) fn is_predicate_satisfied(&self, predicate: Predicate) -> bool {
        let domain = &self.domains[predicate.domain()];
        let value = predicate.value();
        match predicate.comparison() {
            Comparison::AtLeast => domain.lower_bound >= value,
            Comparison::AtMost => domain.upper_bound <= value,
            Comparison::NotEqual => !domain.contains(value),
            Comparison::Equal => domain.lower_bound == value && domain.upper_bound == value,
        }
    }

    pub(crate) fn is_predicate_falsified(&self, predicate: Predicate) -> bool {
        self.is_predicate_satisfied(!predicate)
    }

    /// Undoes every change made after `new_decision_level`.
    pub(crate) fn backtrack_to(&mut self, new_decision_level: usize) {
        for entry in self.trail.backtrack_to(new_decision_level) {
            let domain = &mut self.domains[entry.domain_id];
            domain.lower_bound = entry.old_lower_bound;
            domain.upper_bound = entry.old_upper_bound;
            if let Some(hole) = entry.removed_hole {
                let _ = domain.holes.remove(&hole);
            }
        }
    }
}

/// One change to a domain, with what is needed to undo it.
#[derive(Clone, Copy, Debug)]
pub(crate) struct DomainChange {
    domain_id: DomainId,
    old_lower_bound: i32,
    old_upper_bound: i32,
    /// The start of the hole this change added.
    removed_hole: Option<i32>,
}

/// An interval with holes. Both bounds are always values of the domain.
#[derive(Clone, Debug)]
struct IntegerDomain {
    lower_bound: i32,
    upper_bound: i32,
    /// Disjoint ranges of values removed from the interior of the domain, keyed by their first
    /// value and mapped to their last. Holes which fall outside the bounds after a bound was
    /// tightened are kept until the domain is restored.
    holes: BTreeMap<i32, i32>,
}

impl IntegerDomain {
    fn contains(&self, value: i32) -> bool {
        self.lower_bound <= value && value <= self.upper_bound && self.hole_at(value).is_none()
    }

    /// The last value of the hole containing `value`.
    fn hole_at(&self, value: i32) -> Option<i32> {
        self.holes
            .range(..=value)
            .next_back()
            .and_then(|(_, &end)| (end >= value).then_some(end))
    }

    fn size(&self) -> u32 {
        // The bounds are never inside a hole, so every hole starting within them ends within them.
        let removed: i64 = self
            .holes
            .range(self.lower_bound..=self.upper_bound)
            .map(|(&start, &end)| i64::from(end) - i64::from(start) + 1)
            .sum();
        let size = i64::from(self.upper_bound) - i64::from(self.lower_bound) + 1 - removed;
        u32::try_from(size).unwrap_or(u32::MAX)
    }

    fn first_value_from(&self, bound: i32) -> Option<i32> {
        let mut value = bound;
        while let Some(end) = self.hole_at(value) {
            value = end.checked_add(1)?;
        }
        (value <= self.upper_bound).then_some(value)
    }

    fn last_value_until(&self, bound: i32) -> Option<i32> {
        let mut value = bound;
        while let Some((&start, _)) = self
            .holes
            .range(..=value)
            .next_back()
            .filter(|&(_, &end)| end >= value)
        {
            value = start.checked_sub(1)?;
        }
        (value >= self.lower_bound).then_some(value)
    }

    /// The maximal ranges of values in `[from, to]` which are still in the domain.
    fn runs_of_values(&self, from: i32, to: i32) -> Vec<(i32, i32)> {
        let mut runs = Vec::new();
        let mut next = self.first_value_from(from);

        while let Some(start) = next.filter(|&start| start <= to) {
            let end = self
                .holes
                .range(start..)
                .next()
                .map_or(to, |(&hole_start, _)| (hole_start - 1).min(to));
            runs.push((start, end));
            next = if end < to {
                self.first_value_from(end + 1)
            } else {
                None
            };
        }

        runs
    }
}
