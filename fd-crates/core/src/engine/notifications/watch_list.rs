use crate::containers::KeyedVec;
use crate::engine::propagation::PropagatorId;
use crate::engine::variables::DomainId;

/// For every domain the propagators which need to be enqueued when that domain changes.
#[derive(Debug, Default)]
pub(crate) struct WatchList {
    watchers: KeyedVec<DomainId, Vec<PropagatorId>>,
}

impl WatchList {
    /// Makes sure the watch list has an (empty) entry for `domain`.
    pub(crate) fn grow(&mut self, domain: DomainId) {
        self.watchers.extend_to_include(domain, Vec::new());
    }

    pub(crate) fn get_affected_propagators(&self, domain: DomainId) -> &[PropagatorId] {
        self.watchers.get(domain).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Used to register a propagator for notifications about changes to a particular domain.
#[derive(Debug)]
pub struct Watchers<'a> {
    propagator_id: PropagatorId,
    watch_list: &'a mut WatchList,
}

impl<'a> Watchers<'a> {
    pub(crate) fn new(propagator_id: PropagatorId, watch_list: &'a mut WatchList) -> Self {
        Watchers {
            propagator_id,
            watch_list,
        }
    }

    pub(crate) fn watch(&mut self, domain: DomainId) {
        self.watch_list.grow(domain);

        let watchers = &mut self.watch_list.watchers[domain];
        if !watchers.contains(&self.propagator_id) {
            watchers.push(self.propagator_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::containers::StorageKey;

    #[test]
    fn watching_the_same_domain_twice_registers_once() {
        let mut watch_list = WatchList::default();
        let domain = DomainId::new(2);
        let propagator = PropagatorId::create_from_index(0);

        let mut watchers = Watchers::new(propagator, &mut watch_list);
        watchers.watch(domain);
        watchers.watch(domain);

        assert_eq!(&[propagator], watch_list.get_affected_propagators(domain));
        assert!(watch_list
            .get_affected_propagators(DomainId::new(7))
            .is_empty());
    }
}
