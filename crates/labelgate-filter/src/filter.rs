use crate::types::{FilterContext, NodeVerdict};
use labelgate_core::{node_name, Node};
use tracing::debug;

/// Label key the default predicate looks for
pub const EXTENDER_LABEL_KEY: &str = "extender";
/// Value the default predicate requires
pub const EXTENDER_LABEL_VALUE: &str = "true";

/// Filter predicate trait
pub trait FilterPredicate: Send + Sync {
    /// Filter a node for the given pod
    fn filter(&self, context: &FilterContext<'_>, node: &Node) -> NodeVerdict;

    /// Name of the filter
    fn name(&self) -> &str;
}

/// Filter requiring a node label with an exact value.
///
/// Comparison is plain case-sensitive string equality: `"TRUE"` or `"1"` do
/// not satisfy a required `"true"`.
pub struct LabelEquals {
    key: String,
    value: String,
}

impl LabelEquals {
    /// Require `key=value` on every eligible node
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// The `extender=true` predicate
    pub fn extender() -> Self {
        Self::new(EXTENDER_LABEL_KEY, EXTENDER_LABEL_VALUE)
    }

    /// Reason attached to nodes that fail this predicate
    pub fn reason(&self) -> String {
        format!("Doesn't have the label {}='{}'", self.key, self.value)
    }
}

impl FilterPredicate for LabelEquals {
    fn filter(&self, _context: &FilterContext<'_>, node: &Node) -> NodeVerdict {
        let name = node_name(node).to_string();

        let actual = node
            .metadata
            .labels
            .as_ref()
            .and_then(|labels| labels.get(&self.key));

        if actual.map(String::as_str) == Some(self.value.as_str()) {
            return NodeVerdict::pass(name);
        }

        debug!(
            "Node {} label {}={:?}, want {:?}",
            name, self.key, actual, self.value
        );

        NodeVerdict::fail(name, self.reason())
    }

    fn name(&self) -> &str {
        "LabelEquals"
    }
}

/// Get default filter predicates
pub fn default_filters() -> Vec<Box<dyn FilterPredicate>> {
    vec![Box::new(LabelEquals::extender())]
}
