/// The filters of one invocation.
///
/// Empty strings are treated as absent, so an empty `--namespace` searches all
/// namespaces instead of matching pods whose namespace is `""`.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct QueryScope {
    namespace: Option<String>,
    node_name: Option<String>,
}

impl QueryScope {
    #[must_use]
    pub fn new(namespace: Option<String>, node_name: Option<String>) -> Self {
        Self {
            namespace: namespace.filter(|s| !s.is_empty()),
            node_name: node_name.filter(|s| !s.is_empty()),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> { self.namespace.as_deref() }

    /// `None` means every node of the cluster is reported.
    #[must_use]
    pub fn node_name(&self) -> Option<&str> { self.node_name.as_deref() }
}
