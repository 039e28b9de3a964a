//! Plain-text rendering of the volume report.

mod pod_list_ext;

pub use self::pod_list_ext::PodListExt;

/// Header printed before the pods of a node when every node is enumerated.
#[must_use]
pub fn node_header(node_name: &str) -> String { format!("Node: {node_name}\n") }
