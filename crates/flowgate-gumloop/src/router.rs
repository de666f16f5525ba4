//! Flow type to saved-pipeline id mapping.

use std::collections::BTreeMap;

use crate::error::ProviderError;

/// Maps client-facing flow types to Gumloop saved-pipeline ids.
///
/// The table is fixed at construction; clients never supply ids directly.
#[derive(Debug, Clone, Default)]
pub struct FlowRouter {
    saved_items: BTreeMap<String, String>,
}

impl FlowRouter {
    pub fn new(saved_items: BTreeMap<String, String>) -> Self {
        Self { saved_items }
    }

    /// Resolve a flow type to its saved-pipeline id.
    pub fn resolve(&self, flow_type: &str) -> Result<&str, ProviderError> {
        self.saved_items
            .get(flow_type)
            .map(String::as_str)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                ProviderError::invalid_argument(format!(
                    "Invalid flow type. Must be one of: {}",
                    self.flow_types().collect::<Vec<_>>().join(", ")
                ))
            })
    }

    /// Known flow types, sorted.
    pub fn flow_types(&self) -> impl Iterator<Item = &str> {
        self.saved_items.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.saved_items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved_items.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for FlowRouter
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}
