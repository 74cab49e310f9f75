use std::collections::VecDeque;

use crate::containers::HashSet;
use crate::engine::propagation::PropagatorId;

/// Propagators waiting to be propagated, grouped by priority. Within a priority the queue is
/// first-in first-out.
#[derive(Debug)]
pub(crate) struct PropagatorQueue {
    queues: Vec<VecDeque<PropagatorId>>,
    present_propagators: HashSet<PropagatorId>,
}

impl PropagatorQueue {
    pub(crate) fn new(num_priority_levels: u32) -> PropagatorQueue {
        PropagatorQueue {
            queues: vec![VecDeque::new(); num_priority_levels as usize],
            present_propagators: HashSet::default(),
        }
    }

    /// Adds the propagator unless it is already waiting. Priorities beyond the configured levels
    /// share the last level.
    pub(crate) fn enqueue_propagator(&mut self, propagator_id: PropagatorId, priority: u32) {
        if self.present_propagators.insert(propagator_id) {
            let level = (priority as usize).min(self.queues.len() - 1);
            self.queues[level].push_back(propagator_id);
        }
    }

    pub(crate) fn pop(&mut self) -> Option<PropagatorId> {
        let propagator_id = self
            .queues
            .iter_mut()
            .find_map(|queue| queue.pop_front())?;
        let _ = self.present_propagators.remove(&propagator_id);
        Some(propagator_id)
    }

    pub(crate) fn clear(&mut self) {
        self.queues.iter_mut().for_each(VecDeque::clear);
        self.present_propagators.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_priority_values_are_popped_first() {
        let mut queue = PropagatorQueue::new(4);
        queue.enqueue_propagator(PropagatorId(0), 3);
        queue.enqueue_propagator(PropagatorId(1), 0);
        queue.enqueue_propagator(PropagatorId(2), 3);

        assert_eq!(Some(PropagatorId(1)), queue.pop());
        assert_eq!(Some(PropagatorId(0)), queue.pop());
        assert_eq!(Some(PropagatorId(2)), queue.pop());
        assert_eq!(None, queue.pop());
    }

    #[test]
    fn a_propagator_is_only_queued_once() {
        let mut queue = PropagatorQueue::new(4);
        queue.enqueue_propagator(PropagatorId(5), 1);
        queue.enqueue_propagator(PropagatorId(5), 1);

        assert_eq!(Some(PropagatorId(5)), queue.pop());
        assert_eq!(None, queue.pop());
    }

    #[test]
    fn clearing_empties_every_level() {
        let mut queue = PropagatorQueue::new(2);
        queue.enqueue_propagator(PropagatorId(0), 0);
        queue.enqueue_propagator(PropagatorId(1), 7);
        queue.clear();

        assert_eq!(None, queue.pop());
    }
}
