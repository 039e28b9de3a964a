use k8s_openapi::api::core::v1::Pod;

pub trait PodExt {
    /// Number of volumes declared in the pod spec. A pod without a spec or
    /// without a `volumes` list has none.
    fn volume_count(&self) -> usize;

    fn name_or_default(&self) -> &str;

    fn namespace_or_default(&self) -> &str;
}

impl PodExt for Pod {
    fn volume_count(&self) -> usize {
        self.spec.as_ref().and_then(|spec| spec.volumes.as_ref()).map_or(0, Vec::len)
    }

    fn name_or_default(&self) -> &str { self.metadata.name.as_deref().unwrap_or_default() }

    fn namespace_or_default(&self) -> &str {
        self.metadata.namespace.as_deref().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use k8s_openapi::{
        api::core::v1::{PodSpec, Volume},
        apimachinery::pkg::apis::meta::v1::ObjectMeta,
    };

    use super::*;

    fn pod_with_volumes(volumes: Option<usize>) -> Pod {
        Pod {
            metadata: ObjectMeta {
                name: Some("data-0".to_string()),
                namespace: Some("storage".to_string()),
                ..ObjectMeta::default()
            },
            spec: Some(PodSpec {
                volumes: volumes.map(|count| {
                    (0..count)
                        .map(|i| Volume { name: format!("volume-{i}"), ..Volume::default() })
                        .collect()
                }),
                ..PodSpec::default()
            }),
            ..Pod::default()
        }
    }

    #[test]
    fn test_volume_count_matches_declared_volumes() {
        assert_eq!(pod_with_volumes(Some(3)).volume_count(), 3);
        assert_eq!(pod_with_volumes(Some(1)).volume_count(), 1);
    }

    #[test]
    fn test_volume_count_is_zero_without_volumes() {
        assert_eq!(pod_with_volumes(Some(0)).volume_count(), 0);
        assert_eq!(pod_with_volumes(None).volume_count(), 0);
        assert_eq!(Pod::default().volume_count(), 0);
    }

    #[test]
    fn test_identity_defaults_to_empty() {
        let pod = pod_with_volumes(None);
        assert_eq!(pod.name_or_default(), "data-0");
        assert_eq!(pod.namespace_or_default(), "storage");

        let anonymous = Pod::default();
        assert_eq!(anonymous.name_or_default(), "");
        assert_eq!(anonymous.namespace_or_default(), "");
    }
}
