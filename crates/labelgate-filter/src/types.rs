use labelgate_core::{ExtenderArgs, Node, Pod};

/// Filtering context: the pod being placed and its candidate nodes
#[derive(Debug, Clone, Copy)]
pub struct FilterContext<'a> {
    /// Pod to be scheduled, if the scheduler sent one
    pub pod: Option<&'a Pod>,
    /// Candidate nodes in scheduler order
    pub nodes: &'a [Node],
}

impl<'a> FilterContext<'a> {
    /// Create a new filter context
    pub fn new(pod: Option<&'a Pod>, nodes: &'a [Node]) -> Self {
        Self { pod, nodes }
    }
}

impl<'a> From<&'a ExtenderArgs> for FilterContext<'a> {
    fn from(args: &'a ExtenderArgs) -> Self {
        Self::new(args.pod.as_ref(), args.candidates())
    }
}

/// Verdict of a predicate on a single node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeVerdict {
    /// Node name
    pub node_name: String,
    /// Whether the node passed the predicate
    pub passed: bool,
    /// Reason for failure (if any)
    pub reason: Option<String>,
}

impl NodeVerdict {
    /// Create a passing verdict
    pub fn pass(node_name: String) -> Self {
        Self {
            node_name,
            passed: true,
            reason: None,
        }
    }

    /// Create a failing verdict
    pub fn fail(node_name: String, reason: String) -> Self {
        Self {
            node_name,
            passed: false,
            reason: Some(reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_verdict() {
        let pass = NodeVerdict::pass("node1".to_string());
        assert!(pass.passed);
        assert!(pass.reason.is_none());

        let fail = NodeVerdict::fail("node2".to_string(), "Missing label".to_string());
        assert!(!fail.passed);
        assert_eq!(fail.reason, Some("Missing label".to_string()));
    }

    #[test]
    fn test_context_from_args() {
        let args = ExtenderArgs::default();
        let ctx = FilterContext::from(&args);
        assert!(ctx.pod.is_none());
        assert!(ctx.nodes.is_empty());
    }
}
