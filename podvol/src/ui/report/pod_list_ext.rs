use k8s_openapi::api::core::v1::Pod;
use podvol_base::consts::report::{SEPARATOR_CHAR, SEPARATOR_WIDTH};

use crate::ext::PodExt;

pub trait PodListExt {
    /// Renders one block per pod, in list order:
    ///
    /// ```text
    /// Pod: <name>, Namespace: <namespace>
    /// Volume Count: <count>
    /// ----------------------------------------
    /// ```
    fn render_volume_report(&self) -> String;
}

impl PodListExt for [Pod] {
    fn render_volume_report(&self) -> String { self.iter().map(pod_block).collect() }
}

fn pod_block(pod: &Pod) -> String {
    let separator = std::iter::repeat_n(SEPARATOR_CHAR, SEPARATOR_WIDTH).collect::<String>();
    format!(
        "Pod: {}, Namespace: {}\nVolume Count: {}\n{separator}\n",
        pod.name_or_default(),
        pod.namespace_or_default(),
        pod.volume_count(),
    )
}

#[cfg(test)]
mod tests {
    use k8s_openapi::{
        api::core::v1::{PodSpec, Volume},
        apimachinery::pkg::apis::meta::v1::ObjectMeta,
    };

    use super::*;

    fn pod(name: &str, namespace: &str, volumes: &[&str]) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some(name.to_string()),
                namespace: Some(namespace.to_string()),
                ..ObjectMeta::default()
            },
            spec: Some(PodSpec {
                volumes: Some(
                    volumes
                        .iter()
                        .map(|name| Volume { name: (*name).to_string(), ..Volume::default() })
                        .collect(),
                ),
                ..PodSpec::default()
            }),
            ..Pod::default()
        }
    }

    #[test]
    fn test_render_single_pod() {
        let pods = vec![pod("web-0", "default", &["data", "config", "token"])];

        assert_eq!(
            pods.render_volume_report(),
            "Pod: web-0, Namespace: default\n\
             Volume Count: 3\n\
             ----------------------------------------\n"
        );
    }

    #[test]
    fn test_render_keeps_list_order() {
        let pods = vec![pod("zeta", "b", &[]), pod("alpha", "a", &["data"])];

        let report = pods.render_volume_report();
        let zeta = report.find("Pod: zeta").expect("zeta is rendered");
        let alpha = report.find("Pod: alpha").expect("alpha is rendered");

        assert!(zeta < alpha);
        assert!(report.contains("Pod: zeta, Namespace: b\nVolume Count: 0\n"));
        assert!(report.contains("Pod: alpha, Namespace: a\nVolume Count: 1\n"));
    }

    #[test]
    fn test_render_empty_list_is_empty() {
        let pods: Vec<Pod> = Vec::new();
        assert!(pods.render_volume_report().is_empty());
    }

    #[test]
    fn test_separator_is_forty_dashes() {
        let report = [pod("p", "n", &[])].render_volume_report();
        let separator = report.lines().last().expect("separator line");

        assert_eq!(separator.len(), 40);
        assert!(separator.chars().all(|c| c == '-'));
    }
}
