use std::collections::BTreeMap;

use crate::ingress::IngressRecord;

use super::{escape::escape_html, flatten, title, FOLDER_NAME};

/// Renders records as a Netscape-format bookmark document for Firefox import.
///
/// `timestamp` is Unix seconds, captured once by the caller; every entry in
/// one document carries the same value. Always produces a well-formed
/// document, including for empty input (folder present, zero entries).
pub fn generate_firefox(records: &[IngressRecord], timestamp: i64) -> Vec<u8> {
    let mut html = format!(
        r#"<!DOCTYPE NETSCAPE-Bookmark-file-1>
<!-- This is an automatically generated file.
     It will be read and overwritten.
     DO NOT EDIT! -->
<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">
<TITLE>Bookmarks</TITLE>
<H1>Bookmarks Menu</H1>

<DL><p>
    <DT><H3 ADD_DATE="{timestamp}" LAST_MODIFIED="{timestamp}">{FOLDER_NAME}</H3>
    <DL><p>
"#
    );

    for record in records {
        html.push_str(&format!(
            "        <DT><A HREF=\"{url}\" ADD_DATE=\"{timestamp}\">{title}</A>\n",
            url = record.url,
            title = escape_html(&title(record)),
        ));
    }

    html.push_str("    </DL><p>\n</DL><p>\n");

    html.into_bytes()
}

/// Like [`generate_firefox`], flattening the namespace-grouped map in
/// namespace key order first.
pub fn generate_firefox_grouped(
    grouped: &BTreeMap<String, Vec<IngressRecord>>,
    timestamp: i64,
) -> Vec<u8> {
    generate_firefox(&flatten(grouped), timestamp)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record(host: &str, namespace: &str, url: &str) -> IngressRecord {
        IngressRecord {
            name: format!("{host}-ingress"),
            namespace: namespace.to_string(),
            host: host.to_string(),
            path: "/".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn contains_doctype_urls_and_titles() {
        let records = vec![
            record("example.com", "default", "https://example.com/"),
            record("api.example.com", "production", "https://api.example.com/v1"),
        ];

        let html = String::from_utf8(generate_firefox(&records, 1700000000)).unwrap();

        assert!(html.contains("<!DOCTYPE NETSCAPE-Bookmark-file-1>"));
        assert!(html.contains("https://example.com/"));
        assert!(html.contains("https://api.example.com/v1"));
        assert!(html.contains("example.com (default)"));
        assert!(html.contains("api.example.com (production)"));
    }

    #[test]
    fn timestamp_is_shared_by_folder_and_entries() {
        let records = vec![record("example.com", "default", "https://example.com/")];

        let html = String::from_utf8(generate_firefox(&records, 1700000000)).unwrap();

        assert!(html.contains(r#"<H3 ADD_DATE="1700000000" LAST_MODIFIED="1700000000">"#));
        assert!(html.contains(r#"<A HREF="https://example.com/" ADD_DATE="1700000000">"#));
    }

    #[test]
    fn titles_are_escaped() {
        let records = vec![record("a&b.example.com", "<prod>", "http://a&b.example.com/")];

        let html = String::from_utf8(generate_firefox(&records, 0)).unwrap();

        assert!(html.contains("a&amp;b.example.com (&lt;prod&gt;)"));
    }

    #[test]
    fn empty_input_still_renders_folder() {
        let html = String::from_utf8(generate_firefox(&[], 1700000000)).unwrap();

        assert!(html.contains("Kubernetes Ingresses"));
        assert!(!html.contains("<A HREF"));
        assert!(html.ends_with("    </DL><p>\n</DL><p>\n"));
    }

    #[test]
    fn grouped_output_flattens_in_namespace_order() {
        let mut grouped = BTreeMap::new();
        grouped.insert(
            "monitoring".to_string(),
            vec![record("grafana.example.com", "monitoring", "https://grafana.example.com/")],
        );
        grouped.insert(
            "default".to_string(),
            vec![record("app.example.com", "default", "http://app.example.com/")],
        );

        let html = String::from_utf8(generate_firefox_grouped(&grouped, 0)).unwrap();

        let default_pos = html.find("app.example.com (default)").unwrap();
        let monitoring_pos = html.find("grafana.example.com (monitoring)").unwrap();

        assert!(default_pos < monitoring_pos);
        assert_eq!(html.matches("<DT><A HREF").count(), 2);
    }
}
