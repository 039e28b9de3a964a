//! Command-line front end of `podvol`.
//!
//! ```bash
//! # Every node, every namespace
//! podvol
//!
//! # One node, one namespace
//! podvol --node worker-1 --namespace default
//! ```

pub mod error;

use std::{
    ffi::OsString,
    io::Write,
    path::{Path, PathBuf},
};

use clap::{CommandFactory, Parser};
use podvol_base::{CLI_PROGRAM_NAME, PROJECT_NAME_WITH_INITIAL_CAPITAL, consts::k8s::env};
use snafu::ResultExt;
use tokio::runtime::Builder;

pub use self::error::Error;
use crate::{
    config::Config,
    credentials,
    report::{QueryScope, Reporter},
};

#[derive(Parser)]
#[command(
    name = CLI_PROGRAM_NAME,
    author,
    version,
    about = "Report the number of volumes declared by each pod, per Kubernetes node.",
    long_about = "Lists the pods scheduled on every node of a Kubernetes cluster, or on a \
                  single node, and prints each pod's name, namespace and the number of \
                  volumes declared in its spec. Credentials come from the kubeconfig file \
                  named by KUBECONFIG, or from the pod's service account when running \
                  inside the cluster."
)]
pub struct Cli {
    #[arg(
        long = "namespace",
        short = 'n',
        visible_alias = "ns",
        help = "Only report pods in this namespace. Empty means all namespaces."
    )]
    namespace: Option<String>,

    #[arg(long = "node", help = "Only report pods on this node. Empty means every node.")]
    node: Option<String>,

    #[arg(
        long = "kubeconfig",
        env = env::KUBECONFIG,
        value_parser = clap::builder::OsStringValueParser::new(),
        help = "Kubeconfig file tried before in-cluster credentials. Empty means none."
    )]
    kubeconfig: Option<OsString>,

    #[arg(
        long = "config",
        short = 'c',
        env = "PODVOL_CONFIG_FILE_PATH",
        help = "Specify a configuration file. Defaults to ~/.config/podvol/config.yaml or \
                PODVOL_CONFIG_FILE_PATH env var."
    )]
    config_file: Option<PathBuf>,

    #[arg(
        long = "log-level",
        env = "PODVOL_LOG_LEVEL",
        help = "Set the logging level (e.g., warn, info, debug, trace)."
    )]
    log_level: Option<tracing::Level>,

    #[arg(
        long = "completions",
        value_name = "SHELL",
        help = "Print a shell completion script for the specified shell and exit."
    )]
    completions: Option<clap_complete::Shell>,

    #[arg(
        long = "default-config",
        help = "Print the default configuration in YAML format and exit."
    )]
    default_config: bool,
}

impl Default for Cli {
    fn default() -> Self { Self::parse_from(normalize_namespace_shorthand(std::env::args_os())) }
}

/// Rewrites the two-letter `-ns` flag into `--namespace`, which clap cannot
/// express as a short flag.
///
/// Arguments after `--` and values of flags that take one are left alone.
fn normalize_namespace_shorthand<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let value_flags = value_flag_spellings();
    let mut passthrough = false;
    let mut expects_value = false;

    args.into_iter()
        .map(Into::into)
        .map(|arg| {
            if passthrough || std::mem::take(&mut expects_value) {
                return arg;
            }
            let Some(flag) = arg.to_str() else {
                return arg;
            };
            if flag == "--" {
                passthrough = true;
                return arg;
            }
            if flag == "-ns" {
                expects_value = true;
                return OsString::from("--namespace");
            }
            if let Some(value) = flag.strip_prefix("-ns=") {
                return OsString::from(format!("--namespace={value}"));
            }
            expects_value = value_flags.iter().any(|spelling| spelling == flag);
            arg
        })
        .collect()
}

/// Every `--long`, alias and `-s` spelling of the flags that take a separate
/// value.
fn value_flag_spellings() -> Vec<String> {
    Cli::command()
        .get_arguments()
        .filter(|arg| arg.get_action().takes_values())
        .flat_map(|arg| {
            let longs = arg
                .get_long_and_visible_aliases()
                .into_iter()
                .flatten()
                .map(|long| format!("--{long}"));
            let shorts = arg
                .get_short_and_visible_aliases()
                .into_iter()
                .flatten()
                .map(|short| format!("-{short}"));
            longs.chain(shorts).collect::<Vec<_>>()
        })
        .collect()
}

impl Cli {
    /// The kubeconfig path to try first; an empty value counts as absent.
    fn kubeconfig_path(&self) -> Option<&Path> {
        self.kubeconfig.as_deref().filter(|path| !path.is_empty()).map(Path::new)
    }

    /// Loads the configuration file, if any, and applies `--log-level`.
    ///
    /// A file named explicitly must load. Without one, the first existing
    /// default location is used and a missing file means defaults.
    fn load_config(&self) -> Result<Config, Error> {
        let mut config = match self.config_file.clone().or_else(Config::search_config_file_path) {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };

        if let Some(log_level) = self.log_level {
            config.log.level = log_level;
        }

        Ok(config)
    }

    /// Runs the command and returns the process exit code.
    ///
    /// Listing failures are part of the report and still yield `0`.
    ///
    /// # Errors
    ///
    /// Returns an `Error` when the configuration cannot be loaded, no
    /// credentials can be resolved, the Kubernetes client or the tokio runtime
    /// cannot be created, or stdout cannot be written.
    pub fn run(self) -> Result<i32, Error> {
        if let Some(shell) = self.completions {
            let mut app = Self::command();
            let bin_name = app.get_name().to_string();
            clap_complete::generate(shell, &mut app, bin_name, &mut std::io::stdout());
            return Ok(0);
        }

        if self.default_config {
            let yaml = Config::default().to_yaml()?;
            std::io::stdout().write_all(yaml.as_bytes()).context(error::WriteStdoutSnafu)?;
            return Ok(0);
        }

        let config = self.load_config()?;
        config.log.registry();
        tracing::debug!("{PROJECT_NAME_WITH_INITIAL_CAPITAL} {}", podvol_base::PROJECT_VERSION);

        let kubeconfig = self.kubeconfig_path().map(Path::to_path_buf);
        let Self { namespace, node, .. } = self;
        let scope = QueryScope::new(namespace, node);

        let fut = async move {
            let kube_config = credentials::resolve(kubeconfig.as_deref()).await?;
            let kube_client =
                kube::Client::try_from(kube_config).context(error::KubeClientSnafu)?;

            let summary = Reporter::new(&kube_client, tokio::io::stdout()).run(&scope).await?;
            tracing::debug!(
                "Reported {} pods on {} nodes, {} listing failures",
                summary.pods,
                summary.nodes,
                summary.failures
            );

            Ok::<_, Error>(0)
        };

        Builder::new_current_thread()
            .enable_all()
            .build()
            .context(error::InitializeTokioRuntimeSnafu)?
            .block_on(fut)
    }
}

#[cfg(test)]
mod tests {
    use clap::{
        FromArgMatches,
        builder::{OsStr, Resettable},
    };

    use super::*;

    /// Parses `args` with every environment binding removed, so the result only
    /// depends on the arguments.
    fn try_parse(args: &[&str]) -> Result<Cli, clap::Error> {
        let matches = Cli::command()
            .mut_args(|arg| arg.env(Resettable::<OsStr>::Reset))
            .try_get_matches_from(normalize_namespace_shorthand(args.iter().copied()))?;
        Cli::from_arg_matches(&matches)
    }

    fn parse(args: &[&str]) -> Cli { try_parse(args).expect("arguments are valid") }

    #[test]
    fn test_command_is_well_formed() { Cli::command().debug_assert(); }

    #[test]
    fn test_no_flags_means_no_filters() {
        let cli = parse(&["podvol"]);

        assert_eq!(QueryScope::new(cli.namespace, cli.node), QueryScope::default());
    }

    #[test]
    fn test_namespace_spellings() {
        let cases: [&[&str]; 5] = [
            &["podvol", "--namespace", "default"],
            &["podvol", "-n", "default"],
            &["podvol", "--ns", "default"],
            &["podvol", "-ns", "default"],
            &["podvol", "-ns=default"],
        ];
        for args in cases {
            assert_eq!(parse(args).namespace.as_deref(), Some("default"), "{args:?}");
        }
    }

    #[test]
    fn test_node_and_namespace_together() {
        let cli = parse(&["podvol", "--node", "node-a", "-ns", "kube-system"]);
        let scope = QueryScope::new(cli.namespace, cli.node);

        assert_eq!(scope.node_name(), Some("node-a"));
        assert_eq!(scope.namespace(), Some("kube-system"));
    }

    #[test]
    fn test_empty_values_are_accepted_as_absent() {
        let cli = parse(&["podvol", "--node", "", "--namespace", ""]);

        assert_eq!(QueryScope::new(cli.namespace, cli.node), QueryScope::default());
    }

    #[test]
    fn test_shorthand_normalization_leaves_other_arguments_alone() {
        let args = normalize_namespace_shorthand(["podvol", "--node", "-nsx", "-n", "ns"]);

        assert_eq!(args, ["podvol", "--node", "-nsx", "-n", "ns"].map(OsString::from));
    }

    #[test]
    fn test_log_level_override() {
        let cli = parse(&["podvol", "--log-level", "debug"]);

        assert_eq!(cli.log_level, Some(tracing::Level::DEBUG));
    }

    #[test]
    fn test_completions_shell_is_parsed() {
        let cli = parse(&["podvol", "--completions", "zsh"]);

        assert_eq!(cli.completions, Some(clap_complete::Shell::Zsh));
        assert!(try_parse(&["podvol", "--completions", "cmd.exe"]).is_err());
    }

    #[test]
    fn test_no_kubeconfig_flag_means_no_kubeconfig() {
        assert_eq!(parse(&["podvol"]).kubeconfig_path(), None);
    }

    #[test]
    fn test_kubeconfig_path_is_kept() {
        let cli = parse(&["podvol", "--kubeconfig", "/etc/kube/admin.conf"]);

        assert_eq!(cli.kubeconfig_path(), Some(Path::new("/etc/kube/admin.conf")));
    }

    #[test]
    fn test_empty_kubeconfig_parses_as_absent() {
        let cli = parse(&["podvol", "--kubeconfig", ""]);

        assert_eq!(cli.kubeconfig.as_deref(), Some(std::ffi::OsStr::new("")));
        assert_eq!(cli.kubeconfig_path(), None);
    }

    #[tokio::test]
    async fn test_empty_kubeconfig_falls_back_to_in_cluster_credentials() {
        let cli = parse(&["podvol", "--kubeconfig", ""]);

        match credentials::resolve(cli.kubeconfig_path()).await {
            Ok(_) => {}
            Err(err) => assert!(
                matches!(err, credentials::Error::InClusterConfig { .. }),
                "unexpected error: {err}"
            ),
        }
    }

    #[test]
    fn test_shorthand_is_not_rewritten_after_separator() {
        let args = normalize_namespace_shorthand(["podvol", "--", "-ns", "default"]);

        assert_eq!(args, ["podvol", "--", "-ns", "default"].map(OsString::from));
    }

    #[test]
    fn test_shorthand_is_not_rewritten_as_a_flag_value() {
        for flag in ["--node", "--kubeconfig", "-c", "--ns", "-n"] {
            let args = normalize_namespace_shorthand(["podvol", flag, "-ns"]);

            assert_eq!(args, ["podvol", flag, "-ns"].map(OsString::from), "{flag}");
        }
    }

    #[test]
    fn test_shorthand_value_is_not_rewritten() {
        let args = normalize_namespace_shorthand(["podvol", "-ns", "-ns", "--node", "a"]);

        assert_eq!(args, ["podvol", "--namespace", "-ns", "--node", "a"].map(OsString::from));
    }
}
