//! Resolution of the credentials used to reach the Kubernetes API server.
//!
//! The order is fixed: a kubeconfig file named by `KUBECONFIG` (or
//! `--kubeconfig`) first, then the service account mounted into a pod. The
//! first source that yields a configuration wins.

mod error;

use std::path::Path;

use kube::config::{KubeConfigOptions, Kubeconfig};
use snafu::ResultExt;

pub use self::error::Error;

/// Resolves a [`kube::Config`] from `kubeconfig`, falling back to in-cluster
/// credentials.
///
/// An empty path counts as absent.
///
/// # Errors
///
/// Returns [`Error::InClusterConfig`] when no kubeconfig path was given and
/// the process is not running inside a cluster, and [`Error::Exhausted`]
/// when a kubeconfig path was given but neither source worked.
pub async fn resolve(kubeconfig: Option<&Path>) -> Result<kube::Config, Error> {
    let kubeconfig_error = match kubeconfig.filter(|path| !path.as_os_str().is_empty()) {
        Some(path) => match from_kubeconfig_file(path).await {
            Ok(config) => {
                tracing::debug!("Using credentials from kubeconfig {}", path.display());
                return Ok(config);
            }
            Err(err) => {
                tracing::info!("{err}, falling back to in-cluster credentials");
                Some(err)
            }
        },
        None => None,
    };

    match in_cluster() {
        Ok(config) => {
            tracing::debug!("Using in-cluster credentials");
            Ok(config)
        }
        Err(in_cluster_error) => Err(match kubeconfig_error {
            Some(kubeconfig) => Error::Exhausted {
                kubeconfig: Box::new(kubeconfig),
                in_cluster: Box::new(in_cluster_error),
            },
            None => in_cluster_error,
        }),
    }
}

async fn from_kubeconfig_file(path: &Path) -> Result<kube::Config, Error> {
    let kubeconfig = Kubeconfig::read_from(path)
        .with_context(|_| error::ReadKubeconfigSnafu { file_path: path.to_path_buf() })?;
    kube::Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
        .await
        .with_context(|_| error::LoadKubeconfigSnafu { file_path: path.to_path_buf() })
}

fn in_cluster() -> Result<kube::Config, Error> {
    kube::Config::incluster().context(error::InClusterConfigSnafu)
}
