pub mod collect;
pub mod extract;

/// One routable endpoint flattened out of an ingress rule.
///
/// `url` is composed from (scheme, host, path) at extraction time and never
/// rewritten afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngressRecord {
    pub name: String,
    pub namespace: String,
    pub host: String,
    pub path: String,
    pub url: String,
}
