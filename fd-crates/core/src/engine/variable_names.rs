use crate::containers::HashMap;
use crate::engine::variables::DomainId;

/// Names given to domains when they were created; unnamed domains have no entry.
#[derive(Debug, Default)]
pub(crate) struct VariableNames {
    integers: HashMap<DomainId, String>,
}

impl VariableNames {
    pub(crate) fn get_int_name(&self, domain_id: DomainId) -> Option<&str> {
        self.integers.get(&domain_id).map(String::as_str)
    }

    /// Replaces an earlier name of the same domain.
    pub(crate) fn add_integer(&mut self, domain_id: DomainId, name: String) {
        let _ = self.integers.insert(domain_id, name);
    }
}
