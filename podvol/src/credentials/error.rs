use std::path::PathBuf;

use kube::config::{InClusterError, KubeconfigError};
use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Failed to read kubeconfig {}, error: {source}", file_path.display()))]
    ReadKubeconfig {
        file_path: PathBuf,
        #[snafu(source(from(KubeconfigError, Box::new)))]
        source: Box<KubeconfigError>,
    },

    #[snafu(display("Failed to load credentials from kubeconfig {}, error: {source}", file_path.display()))]
    LoadKubeconfig {
        file_path: PathBuf,
        #[snafu(source(from(KubeconfigError, Box::new)))]
        source: Box<KubeconfigError>,
    },

    #[snafu(display("Failed to load in-cluster credentials, error: {source}"))]
    InClusterConfig {
        #[snafu(source(from(InClusterError, Box::new)))]
        source: Box<InClusterError>,
    },

    /// Both the kubeconfig file and the in-cluster environment were tried.
    #[snafu(display("{kubeconfig}; {in_cluster}"))]
    Exhausted { kubeconfig: Box<Self>, in_cluster: Box<Self> },
}
