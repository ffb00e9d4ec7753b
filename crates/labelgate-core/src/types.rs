use crate::{ListMeta, Node, Pod};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Node name -> reason the node was rejected
pub type FailedNodesMap = BTreeMap<String, String>;

/// Arguments the scheduler POSTs to a filter extender
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtenderArgs {
    /// Pod being scheduled
    #[serde(default)]
    pub pod: Option<Pod>,
    /// Candidate nodes, sent in full when the extender is not node-cache capable
    #[serde(default)]
    pub nodes: Option<NodeList>,
    /// Candidate node names, only populated for node-cache capable extenders.
    /// Accepted for compatibility and otherwise ignored.
    #[serde(default)]
    pub node_names: Option<Vec<String>>,
}

impl ExtenderArgs {
    /// Create filter arguments for a pod and its candidate nodes
    pub fn new(pod: Pod, nodes: Vec<Node>) -> Self {
        Self {
            pod: Some(pod),
            nodes: Some(NodeList::new(nodes)),
            node_names: None,
        }
    }

    /// Candidate nodes, empty when the scheduler sent none
    pub fn candidates(&self) -> &[Node] {
        self.nodes
            .as_ref()
            .map(|list| list.items.as_slice())
            .unwrap_or_default()
    }

    /// "namespace/name" of the pod, for log lines
    pub fn pod_key(&self) -> String {
        let meta = self.pod.as_ref().map(|pod| &pod.metadata);
        let namespace = meta.and_then(|m| m.namespace.as_deref()).unwrap_or("");
        let name = meta.and_then(|m| m.name.as_deref()).unwrap_or("");
        format!("{}:{}", namespace, name)
    }
}

/// List of nodes as embedded in `ExtenderArgs.Nodes`.
///
/// The scheduler serializes its typed list without `apiVersion`/`kind`, so
/// unlike `k8s_openapi::List` nothing here is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeList {
    #[serde(rename = "apiVersion", default, skip_serializing_if = "Option::is_none")]
    pub api_version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ListMeta>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<Node>,
}

impl NodeList {
    /// Create a list from nodes
    pub fn new(items: Vec<Node>) -> Self {
        Self {
            items,
            ..Default::default()
        }
    }
}

/// Filter response returned to the scheduler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ExtenderFilterResult {
    /// Eligible nodes as full objects; this extender always answers by name
    #[serde(default)]
    pub nodes: Option<NodeList>,
    /// Eligible node names, in candidate order
    #[serde(default)]
    pub node_names: Option<Vec<String>>,
    /// Rejected nodes and why
    #[serde(default, deserialize_with = "null_as_default")]
    pub failed_nodes: FailedNodesMap,
    /// Rejected nodes that preemption cannot help; never populated here
    #[serde(default, deserialize_with = "null_as_default")]
    pub failed_and_unresolvable_nodes: FailedNodesMap,
    /// Non-empty when the whole request failed
    #[serde(default)]
    pub error: String,
}

impl ExtenderFilterResult {
    /// Create a result that fails the whole request
    pub fn with_error(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            ..Default::default()
        }
    }

    /// Whether the request as a whole failed
    pub fn is_error(&self) -> bool {
        !self.error.is_empty()
    }

    /// Eligible node names, empty when none
    pub fn eligible(&self) -> &[String] {
        self.node_names.as_deref().unwrap_or_default()
    }
}

/// Name of a node, empty if the object carries none
pub fn node_name(node: &Node) -> &str {
    node.metadata.name.as_deref().unwrap_or("")
}

/// Treat an explicit `null` the same as a missing key
fn null_as_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
