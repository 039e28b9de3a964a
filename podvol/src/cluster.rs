//! The cluster queries the report depends on.

use k8s_openapi::api::core::v1::{Node, Pod};
use kube::{Api, ResourceExt, api::ListParams};
use podvol_base::consts::k8s::fields;
use snafu::ResultExt;

use crate::cli::{Error, error};

/// Read-only view of the cluster used by the report.
///
/// Implemented for [`kube::Client`]; tests substitute an in-memory cluster.
pub trait ClusterClient {
    /// Names of all nodes, in the order returned by the API server.
    async fn list_node_names(&self) -> Result<Vec<String>, Error>;

    /// Pods scheduled on `node_name`, restricted to `namespace` when given and
    /// across all namespaces otherwise.
    async fn list_pods_on_node(
        &self,
        node_name: &str,
        namespace: Option<&str>,
    ) -> Result<Vec<Pod>, Error>;
}

impl ClusterClient for kube::Client {
    async fn list_node_names(&self) -> Result<Vec<String>, Error> {
        let nodes = Api::<Node>::all(self.clone())
            .list(&ListParams::default())
            .await
            .context(error::ListNodesSnafu)?;
        Ok(nodes.items.iter().map(ResourceExt::name_any).collect())
    }

    async fn list_pods_on_node(
        &self,
        node_name: &str,
        namespace: Option<&str>,
    ) -> Result<Vec<Pod>, Error> {
        let list_params = node_list_params(node_name);

        let pods = match namespace {
            Some(namespace) => Api::<Pod>::namespaced(self.clone(), namespace)
                .list(&list_params)
                .await
                .with_context(|_| error::ListPodsOnNodeWithNamespaceSnafu {
                    node_name: node_name.to_string(),
                    namespace: namespace.to_string(),
                })?,
            None => Api::<Pod>::all(self.clone()).list(&list_params).await.with_context(|_| {
                error::ListPodsOnNodeSnafu { node_name: node_name.to_string() }
            })?,
        };

        Ok(pods.items)
    }
}

fn node_list_params(node_name: &str) -> ListParams {
    ListParams::default().fields(&format!("{}={node_name}", fields::POD_NODE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_list_params_selects_by_scheduled_node() {
        let list_params = node_list_params("node-a");

        assert_eq!(list_params.field_selector.as_deref(), Some("spec.nodeName=node-a"));
        assert!(list_params.label_selector.is_none());
    }
}
