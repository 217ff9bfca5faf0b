//! Directory listing module
//!
//! Renders an HTML index for directories without an index file: entries
//! sorted by name, directories suffixed with `/`, names HTML-escaped in
//! labels and percent-encoded in hrefs.

use std::path::Path;
use tokio::fs;

/// One entry in a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Read a directory's entries, sorted by name.
///
/// Entries whose names are not valid UTF-8 are skipped.
pub async fn collect_entries(dir_path: &Path) -> std::io::Result<Vec<ListingEntry>> {
    let mut read_dir = fs::read_dir(dir_path).await?;
    let mut entries = Vec::new();

    while let Some(entry) = read_dir.next_entry().await? {
        let Ok(name) = entry.file_name().into_string() else {
            continue;
        };
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        entries.push(ListingEntry { name, is_dir });
    }

    entries.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(entries)
}

/// Render the listing page for a request path.
pub fn render(request_path: &str, entries: &[ListingEntry]) -> String {
    let title = format!("Directory listing for {}", html_escape(request_path));

    let mut html = String::with_capacity(512);
    html.push_str("<!DOCTYPE HTML>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{title}</title>\n"));
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{title}</h1>\n"));
    html.push_str("<hr>\n<ul>\n");

    for entry in entries {
        let display = if entry.is_dir {
            format!("{}/", entry.name)
        } else {
            entry.name.clone()
        };
        html.push_str(&format!(
            "<li><a href=\"{}\">{}</a></li>\n",
            percent_encode(&display),
            html_escape(&display),
        ));
    }

    html.push_str("</ul>\n<hr>\n</body>\n</html>\n");
    html
}

/// Escape text for inclusion in HTML element content and attributes.
fn html_escape(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            other => out.push(other),
        }
    }
    out
}

/// Percent-encode a path segment for use in an href, keeping unreserved
/// characters and `/` literal.
fn percent_encode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' | b'/' => {
                out.push(byte as char);
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
