use crate::filter::{default_filters, FilterPredicate};
use crate::types::FilterContext;
use labelgate_core::{node_name, ExtenderArgs, ExtenderFilterResult};
use tracing::{debug, error};

/// Error reported when the scheduler sends no candidates.
///
/// With the full-object contract the scheduler only omits `Nodes` when the
/// extender was registered as node-cache capable, so the hint names
/// `NodeCacheCapable == true` where the `NodeNames`-keyed variant said `false`.
pub const NO_NODES_ERROR: &str = "No nodes to compare. \
This should not happen, perhaps the extender is misconfigured with NodeCacheCapable == true.";

/// Partitions candidate nodes into eligible and rejected
pub struct FilterEngine {
    filters: Vec<Box<dyn FilterPredicate>>,
}

impl Default for FilterEngine {
    fn default() -> Self {
        Self::new(default_filters())
    }
}

impl FilterEngine {
    /// Create an engine running `filters` in order
    pub fn new(filters: Vec<Box<dyn FilterPredicate>>) -> Self {
        Self { filters }
    }

    /// Names of the configured predicates
    pub fn filter_names(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Filter the candidates in `args`.
    ///
    /// Never fails: a request without candidates comes back with `Error`
    /// set and nothing classified. Otherwise every candidate lands either in
    /// `NodeNames` (input order kept) or in `FailedNodes` with the reason of
    /// the first predicate it failed.
    pub fn filter(&self, args: &ExtenderArgs) -> ExtenderFilterResult {
        let context = FilterContext::from(args);

        if context.nodes.is_empty() {
            error!("{}", NO_NODES_ERROR);
            return ExtenderFilterResult::with_error(NO_NODES_ERROR);
        }

        let mut result = ExtenderFilterResult::default();
        let mut eligible = Vec::with_capacity(context.nodes.len());

        'nodes: for node in context.nodes {
            for filter in &self.filters {
                let verdict = filter.filter(&context, node);
                if !verdict.passed {
                    let reason = verdict.reason.unwrap_or_default();
                    debug!(
                        "Node {} filtered out by {}: {}",
                        verdict.node_name,
                        filter.name(),
                        reason
                    );
                    result.failed_nodes.insert(verdict.node_name, reason);
                    continue 'nodes;
                }
            }

            eligible.push(node_name(node).to_string());
        }

        debug!(
            "Pod {} has {} eligible of {} candidate nodes",
            args.pod_key(),
            eligible.len(),
            context.nodes.len()
        );

        result.node_names = Some(eligible);
        result
    }
}
