//! Extensions to `k8s_openapi` types used when building the report.

mod pod;

pub use self::pod::PodExt;
