use std::collections::BTreeMap;

use serde::Serialize;

use crate::{error::Error, ingress::IngressRecord};

use super::{flatten, title, FOLDER_NAME};

const CHECKSUM_PLACEHOLDER: &str = "computed_checksum";

const BOOKMARK_BAR_GUID: &str = "00000000-0000-4000-a000-000000000000";
const FOLDER_GUID: &str = "00000000-0000-4000-a000-000000000001";
const OTHER_GUID: &str = "00000000-0000-4000-a000-000000000002";
const SYNCED_GUID: &str = "00000000-0000-4000-a000-000000000003";

// Fields are declared alphabetically; the emitted key order must match what
// Chrome itself writes for the file to stay importable.

#[derive(Debug, Serialize)]
struct BookmarkFile {
    checksum: &'static str,
    roots: Roots,
    version: u32,
}

#[derive(Debug, Serialize)]
struct Roots {
    bookmark_bar: Folder,
    other: Folder,
    synced: Folder,
}

#[derive(Debug, Serialize)]
struct Folder {
    children: Vec<Node>,
    date_added: String,
    date_modified: String,
    guid: String,
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct UrlEntry {
    date_added: String,
    guid: String,
    id: String,
    name: String,
    #[serde(rename = "type")]
    kind: &'static str,
    url: String,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Node {
    Folder(Folder),
    Url(UrlEntry),
}

/// Renders records as a Chrome bookmarks JSON file (2-space indent).
///
/// Entry ids are assigned by output position and are not stable across runs
/// if the input order changes. Fails only if JSON encoding itself fails.
pub fn generate_chrome(records: &[IngressRecord], timestamp: i64) -> Result<Vec<u8>, Error> {
    // Chrome stores timestamps in microseconds.
    let micros = format!("{timestamp}000000");

    let children: Vec<Node> = records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            Node::Url(UrlEntry {
                date_added: micros.clone(),
                guid: pseudo_guid(&record.url),
                id: (i + 1).to_string(),
                name: title(record),
                kind: "url",
                url: record.url.clone(),
            })
        })
        .collect();

    let file = BookmarkFile {
        checksum: CHECKSUM_PLACEHOLDER,
        roots: Roots {
            bookmark_bar: Folder {
                children: vec![Node::Folder(Folder {
                    children,
                    date_added: micros.clone(),
                    date_modified: micros.clone(),
                    guid: FOLDER_GUID.to_string(),
                    id: "1".to_string(),
                    name: FOLDER_NAME.to_string(),
                    kind: "folder",
                })],
                date_added: micros.clone(),
                date_modified: micros.clone(),
                guid: BOOKMARK_BAR_GUID.to_string(),
                id: "0".to_string(),
                name: "Bookmarks bar".to_string(),
                kind: "folder",
            },
            other: empty_folder(OTHER_GUID, "2", "Other bookmarks", &micros),
            synced: empty_folder(SYNCED_GUID, "3", "Mobile bookmarks", &micros),
        },
        version: 1,
    };

    Ok(serde_json::to_vec_pretty(&file)?)
}

/// Like [`generate_chrome`], flattening the namespace-grouped map in
/// namespace key order first.
pub fn generate_chrome_grouped(
    grouped: &BTreeMap<String, Vec<IngressRecord>>,
    timestamp: i64,
) -> Result<Vec<u8>, Error> {
    generate_chrome(&flatten(grouped), timestamp)
}

fn empty_folder(guid: &str, id: &str, name: &str, micros: &str) -> Folder {
    Folder {
        children: Vec::new(),
        date_added: micros.to_string(),
        date_modified: micros.to_string(),
        guid: guid.to_string(),
        id: id.to_string(),
        name: name.to_string(),
        kind: "folder",
    }
}

/// Stable per-URL identifier in UUID shape. A rolling hash over the URL's
/// codepoints, not a real UUID; distinct URLs can collide. Kept as-is for
/// compatibility with files produced before this service existed.
fn pseudo_guid(url: &str) -> String {
    let mut hash: u64 = 0;

    for c in url.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(c as u64);
    }

    format!(
        "{:08x}-0000-4000-a000-{:012x}",
        hash & 0xffff_ffff,
        hash & 0xffff_ffff_ffff
    )
}
