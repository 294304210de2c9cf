use std::{sync::Arc, time::Duration};

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::Utc;
use log::{error, info};
use tokio::time::timeout;

use crate::{
    bookmarks::{
        chrome::generate_chrome_grouped, escape::escape_html, firefox::generate_firefox_grouped,
    },
    cluster::KubeClient,
    config::Config,
    error::Error,
    ingress::{collect::IngressCollector, IngressRecord},
};

#[derive(Clone)]
struct AppState {
    collector: Arc<IngressCollector<KubeClient>>,
    fetch_timeout: Duration,
}

/// Runs the HTTP server until ctrl-c.
pub async fn run_server(config: &Config, client: KubeClient) -> anyhow::Result<()> {
    let state = AppState {
        collector: Arc::new(IngressCollector::new(client)),
        fetch_timeout: Duration::from_secs(config.fetch_timeout_secs),
    };

    let app = Router::new()
        .route("/", get(serve_home))
        .route("/firefox/bookmarks.html", get(serve_firefox))
        .route("/chrome/bookmarks.json", get(serve_chrome))
        .route("/health", get(serve_health))
        .route("/readiness", get(serve_readiness))
        .layer(middleware::from_fn(log_requests))
        .with_state(state);

    let addr = config.addr();

    info!("server listening on http://{addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to install ctrl-c handler: {err}");
    }
}

async fn log_requests(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = std::time::Instant::now();

    let response = next.run(request).await;

    info!("{} {} {} {:?}", method, uri, response.status(), start.elapsed());

    response
}

/// Home page: flat list of every ingress endpoint plus download links.
async fn serve_home(State(state): State<AppState>) -> Response {
    let records = match timeout(state.fetch_timeout, state.collector.fetch_all()).await {
        Ok(Ok(records)) => records,
        Ok(Err(err)) => return fetch_failed(err),
        Err(_) => return fetch_timed_out(),
    };

    Html(render_home(&records)).into_response()
}

async fn serve_firefox(State(state): State<AppState>) -> Response {
    let grouped = match timeout(state.fetch_timeout, state.collector.fetch_by_namespace()).await {
        Ok(Ok(grouped)) => grouped,
        Ok(Err(err)) => return fetch_failed(err),
        Err(_) => return fetch_timed_out(),
    };

    let body = generate_firefox_grouped(&grouped, Utc::now().timestamp());

    (
        [
            (header::CONTENT_TYPE, "text/html; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=bookmarks.html",
            ),
        ],
        body,
    )
        .into_response()
}

async fn serve_chrome(State(state): State<AppState>) -> Response {
    let grouped = match timeout(state.fetch_timeout, state.collector.fetch_by_namespace()).await {
        Ok(Ok(grouped)) => grouped,
        Ok(Err(err)) => return fetch_failed(err),
        Err(_) => return fetch_timed_out(),
    };

    let body = match generate_chrome_grouped(&grouped, Utc::now().timestamp()) {
        Ok(body) => body,
        Err(err) => {
            error!("failed to generate bookmarks: {err}");
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to generate bookmarks",
            )
                .into_response();
        }
    };

    (
        [
            (header::CONTENT_TYPE, "application/json; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=bookmarks.json",
            ),
        ],
        body,
    )
        .into_response()
}

/// Verifies cluster API connectivity with a live list call.
async fn serve_health(State(state): State<AppState>) -> Response {
    match timeout(state.fetch_timeout, state.collector.fetch_all()).await {
        Ok(Ok(_)) => (StatusCode::OK, "OK").into_response(),
        Ok(Err(err)) => {
            error!("health check failed: {err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("Unhealthy: {err}"),
            )
                .into_response()
        }
        Err(_) => {
            error!("health check timed out");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "Unhealthy: fetch timed out",
            )
                .into_response()
        }
    }
}

async fn serve_readiness() -> impl IntoResponse {
    (StatusCode::OK, "Ready")
}

fn fetch_failed(err: Error) -> Response {
    error!("failed to retrieve ingresses: {err}");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "Failed to retrieve ingresses",
    )
        .into_response()
}

fn fetch_timed_out() -> Response {
    error!("timed out retrieving ingresses");
    (StatusCode::GATEWAY_TIMEOUT, "Timed out retrieving ingresses").into_response()
}

fn render_home(records: &[IngressRecord]) -> String {
    let mut rows = String::new();

    for record in records {
        rows.push_str(&format!(
            "      <tr><td><a href=\"{url}\">{host}</a></td><td>{namespace}</td><td>{name}</td><td>{path}</td></tr>\n",
            url = record.url,
            host = escape_html(&record.host),
            namespace = escape_html(&record.namespace),
            name = escape_html(&record.name),
            path = escape_html(&record.path),
        ));
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Kubernetes Bookmark Generator</title>
</head>
<body>
  <h1>Kubernetes Bookmark Generator</h1>
  <p>{count} ingress endpoint(s) found.</p>
  <p>
    <a href="/firefox/bookmarks.html">Download Firefox bookmarks</a> |
    <a href="/chrome/bookmarks.json">Download Chrome bookmarks</a>
  </p>
  <table border="1" cellpadding="4" cellspacing="0">
    <thead>
      <tr><th>Host</th><th>Namespace</th><th>Ingress</th><th>Path</th></tr>
    </thead>
    <tbody>
{rows}    </tbody>
  </table>
</body>
</html>
"#,
        count = records.len(),
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn home_page_lists_records_with_escaped_text() {
        let records = vec![IngressRecord {
            name: "web<1>".to_string(),
            namespace: "default".to_string(),
            host: "a&b.example.com".to_string(),
            path: "/".to_string(),
            url: "http://a&b.example.com/".to_string(),
        }];

        let html = render_home(&records);

        assert!(html.contains("1 ingress endpoint(s) found."));
        assert!(html.contains("a&amp;b.example.com"));
        assert!(html.contains("web&lt;1&gt;"));
        assert!(html.contains(r#"href="/firefox/bookmarks.html""#));
        assert!(html.contains(r#"href="/chrome/bookmarks.json""#));
    }

    #[test]
    fn home_page_handles_empty_cluster() {
        let html = render_home(&[]);

        assert!(html.contains("0 ingress endpoint(s) found."));
        assert_eq!(html.matches("<tr><td>").count(), 0);
    }
}
