use std::sync::Arc;

use crate::containers::HashMap;
use crate::engine::variables::DomainId;

/// The names given to domains at creation time.
#[derive(Debug, Default)]
pub struct VariableNames {
    integers: HashMap<DomainId, Arc<str>>,
}

impl VariableNames {
    /// Get the name associated with a domain id.
    pub fn get_int_name(&self, domain_id: DomainId) -> Option<&str> {
        self.integers.get(&domain_id).map(|name| name.as_ref())
    }

    /// Add a name to the integer variable. This will override the existing name if it exists.
    pub(crate) fn add_integer(&mut self, integer: DomainId, name: Arc<str>) {
        let _ = self.integers.insert(integer, name);
    }

    /// The name of the domain, or its identifier (`x<id>`) if it was created without a name.
    pub fn display_name(&self, domain_id: DomainId) -> String {
        self.get_int_name(domain_id)
            .map(str::to_owned)
            .unwrap_or_else(|| domain_id.to_string())
    }
}
