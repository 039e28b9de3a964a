pub mod k8s {
    pub mod env {
        /// Environment variable holding the path of a kubeconfig file.
        pub const KUBECONFIG: &str = "KUBECONFIG";
    }

    pub mod fields {
        /// Field selector key matching the node a pod is scheduled on.
        pub const POD_NODE_NAME: &str = "spec.nodeName";
    }
}

pub mod report {
    /// Width of the separator line printed after each pod.
    pub const SEPARATOR_WIDTH: usize = 40;

    pub const SEPARATOR_CHAR: char = '-';
}
