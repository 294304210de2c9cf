use async_trait::async_trait;
use k8s_openapi::api::networking::v1::Ingress;
use kube::{api::ListParams, Api, Client};

use crate::{error::Error, ingress::collect::ListIngresses};

/// Cluster API handle shared by all request handlers.
///
/// `kube::Client` is cheaply cloneable; one handle is constructed at startup
/// and injected wherever listing is needed.
#[derive(Clone)]
pub struct KubeClient {
    client: Client,
}

impl KubeClient {
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    pub fn to_client(&self) -> Client {
        self.client.clone()
    }
}

#[async_trait]
impl ListIngresses for KubeClient {
    async fn list_ingresses(&self, namespace: &str) -> Result<Vec<Ingress>, Error> {
        let api: Api<Ingress> = if namespace.is_empty() {
            Api::all(self.client.clone())
        } else {
            Api::namespaced(self.client.clone(), namespace)
        };

        let list = api.list(&ListParams::default()).await?;

        Ok(list.items)
    }
}
