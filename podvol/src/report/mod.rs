//! Walks the requested scope and writes the volume report.

mod scope;

use snafu::ResultExt;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub use self::scope::QueryScope;
use crate::{
    cli::{Error, error},
    cluster::ClusterClient,
    ui::report::{PodListExt, node_header},
};

/// Counters of a finished run.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct ReportSummary {
    pub nodes: usize,
    pub pods: usize,
    /// Listing calls that failed and whose part of the report was skipped.
    pub failures: usize,
}

/// Issues the cluster queries one after another and writes each result to
/// `output` as soon as it arrives.
///
/// Listing failures are written into the report and skipped. Only failing to
/// write `output` aborts the run.
pub struct Reporter<'c, C, W> {
    client: &'c C,
    output: W,
    summary: ReportSummary,
}

impl<'c, C, W> Reporter<'c, C, W>
where
    C: ClusterClient,
    W: AsyncWrite + Unpin,
{
    pub fn new(client: &'c C, output: W) -> Self {
        Self { client, output, summary: ReportSummary::default() }
    }

    pub async fn run(mut self, scope: &QueryScope) -> Result<ReportSummary, Error> {
        match scope.node_name() {
            Some(node_name) => self.report_node(node_name, scope.namespace()).await?,
            None => self.report_all_nodes(scope.namespace()).await?,
        }

        self.output.flush().await.context(error::WriteStdoutSnafu)?;
        Ok(self.summary)
    }

    async fn report_all_nodes(&mut self, namespace: Option<&str>) -> Result<(), Error> {
        let node_names = match self.client.list_node_names().await {
            Ok(node_names) => node_names,
            Err(err) => return self.report_failure(&err).await,
        };
        tracing::debug!("Found {} nodes", node_names.len());

        for node_name in node_names {
            self.write(&node_header(&node_name)).await?;
            self.report_node(&node_name, namespace).await?;
        }

        Ok(())
    }

    async fn report_node(&mut self, node_name: &str, namespace: Option<&str>) -> Result<(), Error> {
        self.summary.nodes += 1;
        tracing::debug!(
            "Listing pods on node {node_name} in {}",
            namespace.unwrap_or("all namespaces")
        );

        match self.client.list_pods_on_node(node_name, namespace).await {
            Ok(pods) => {
                self.summary.pods += pods.len();
                self.write(&pods.render_volume_report()).await
            }
            Err(err) => self.report_failure(&err).await,
        }
    }

    async fn report_failure(&mut self, err: &Error) -> Result<(), Error> {
        self.summary.failures += 1;
        tracing::info!("Skipping part of the report: {err}");
        self.write(&format!("{err}\n")).await
    }

    async fn write(&mut self, text: &str) -> Result<(), Error> {
        self.output.write_all(text.as_bytes()).await.context(error::WriteStdoutSnafu)
    }
}
