use k8s_openapi::api::networking::v1::{Ingress, IngressSpec};

use super::IngressRecord;

/// Flattens one ingress resource into records, one per (rule, path) pair.
///
/// Rules without a host are skipped. A rule that declares no HTTP paths still
/// yields a single record for its host with path `/`. An ingress without a
/// spec or rules yields nothing.
pub fn extract_records(ingress: &Ingress) -> Vec<IngressRecord> {
    let name = ingress.metadata.name.clone().unwrap_or_default();
    let namespace = ingress.metadata.namespace.clone().unwrap_or_default();

    let Some(spec) = &ingress.spec else {
        return Vec::new();
    };

    let Some(rules) = &spec.rules else {
        return Vec::new();
    };

    let mut records = Vec::new();

    for rule in rules {
        let Some(host) = rule.host.as_deref().filter(|host| !host.is_empty()) else {
            continue;
        };

        let scheme = scheme_for_host(spec, host);

        let paths = rule.http.as_ref().filter(|http| !http.paths.is_empty());

        match paths {
            Some(http) => {
                for path in &http.paths {
                    let path = path
                        .path
                        .as_deref()
                        .filter(|path| !path.is_empty())
                        .unwrap_or("/");

                    records.push(IngressRecord {
                        name: name.clone(),
                        namespace: namespace.clone(),
                        host: host.to_string(),
                        path: path.to_string(),
                        url: format!("{scheme}://{host}{path}"),
                    });
                }
            }
            None => {
                records.push(IngressRecord {
                    name: name.clone(),
                    namespace: namespace.clone(),
                    host: host.to_string(),
                    path: "/".to_string(),
                    url: format!("{scheme}://{host}"),
                });
            }
        }
    }

    records
}

/// `https` iff some TLS entry on the same resource lists this host.
fn scheme_for_host(spec: &IngressSpec, host: &str) -> &'static str {
    let secured = spec.tls.as_ref().map_or(false, |entries| {
        entries.iter().any(|tls| {
            tls.hosts
                .as_ref()
                .map_or(false, |hosts| hosts.iter().any(|h| h == host))
        })
    });

    if secured {
        "https"
    } else {
        "http"
    }
}
