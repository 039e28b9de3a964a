use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("{source}"))]
    Configuration { source: crate::config::Error },

    #[snafu(display("{source}"))]
    Credentials { source: crate::credentials::Error },

    #[snafu(display("Failed to write to stdout, error: {source}"))]
    WriteStdout { source: std::io::Error },

    #[snafu(display("Failed to initialize Kubernetes client, error: {source}"))]
    KubeClient { source: kube::Error },

    #[snafu(display("Failed to list nodes, error: {source}"))]
    ListNodes {
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display("Failed to list pods on node {node_name}, error: {source}"))]
    ListPodsOnNode {
        node_name: String,
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display(
        "Failed to list pods on node {node_name} in namespace {namespace}, error: {source}"
    ))]
    ListPodsOnNodeWithNamespace {
        node_name: String,
        namespace: String,
        #[snafu(source(from(kube::Error, Box::new)))]
        source: Box<kube::Error>,
    },

    #[snafu(display("Failed to create tokio runtime, error: {source}"))]
    InitializeTokioRuntime { source: std::io::Error },
}

impl From<crate::config::Error> for Error {
    fn from(source: crate::config::Error) -> Self { Self::Configuration { source } }
}

impl From<crate::credentials::Error> for Error {
    fn from(source: crate::credentials::Error) -> Self { Self::Credentials { source } }
}
