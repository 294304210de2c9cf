use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;
use k8s_openapi::api::networking::v1::Ingress;

use crate::error::Error;

use super::{extract::extract_records, IngressRecord};

pub const ALL_NAMESPACES: &str = "";

/// Listing seam towards the cluster API. The real implementation lives in
/// [`crate::cluster::KubeClient`]; tests substitute a mock.
#[async_trait]
pub trait ListIngresses: Send + Sync {
    /// Lists ingress resources. An empty namespace lists across all
    /// namespaces.
    async fn list_ingresses(&self, namespace: &str) -> Result<Vec<Ingress>, Error>;
}

/// Fetches ingresses cluster-wide and flattens them into bookmark records.
///
/// Each call performs exactly one list request and holds no state between
/// calls, so a single collector can serve concurrent requests.
pub struct IngressCollector<C>
where
    C: ListIngresses,
{
    client: C,
}

impl<C> IngressCollector<C>
where
    C: ListIngresses,
{
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Every ingress endpoint in the cluster, sorted ascending by url.
    pub async fn fetch_all(&self) -> Result<Vec<IngressRecord>, Error> {
        let ingresses = self.client.list_ingresses(ALL_NAMESPACES).await?;

        let mut records: Vec<IngressRecord> =
            ingresses.iter().flat_map(extract_records).collect();

        records.sort_by(|a, b| a.url.cmp(&b.url));

        Ok(records)
    }

    /// Endpoints grouped by namespace, at most one record per host.
    ///
    /// The first record seen for a (namespace, host) pair wins; later
    /// duplicates are dropped. Each namespace's records are sorted ascending
    /// by host.
    pub async fn fetch_by_namespace(
        &self,
    ) -> Result<BTreeMap<String, Vec<IngressRecord>>, Error> {
        let ingresses = self.client.list_ingresses(ALL_NAMESPACES).await?;

        let mut grouped: BTreeMap<String, Vec<IngressRecord>> = BTreeMap::new();
        let mut seen: BTreeSet<(String, String)> = BTreeSet::new();

        for record in ingresses.iter().flat_map(extract_records) {
            if !seen.insert((record.namespace.clone(), record.host.clone())) {
                continue;
            }

            grouped
                .entry(record.namespace.clone())
                .or_default()
                .push(record);
        }

        for records in grouped.values_mut() {
            records.sort_by(|a, b| a.host.cmp(&b.host));
        }

        Ok(grouped)
    }
}

#[cfg(test)]
pub mod mock {
    use super::{Error, Ingress, ListIngresses};
    use mockall::mock;

    mock! {
        pub IngressApi {}

        #[async_trait::async_trait]
        impl ListIngresses for IngressApi {
            async fn list_ingresses(&self, namespace: &str) -> Result<Vec<Ingress>, Error>;
        }
    }
}
