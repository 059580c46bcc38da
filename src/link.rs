use regex::Regex;
use std::sync::OnceLock;

use crate::models::DocumentRecord;

const DRIVE_FILE_BASE: &str = "https://drive.google.com/file/d/";

/// Pull a Google Drive file id out of a share link.
///
/// `/d/<id>` path segments are tried before `?id=<id>` / `&id=<id>` query parameters,
/// so a link carrying both resolves to the path id.
pub fn extract_file_id(url: &str) -> Option<String> {
    static RE_PATH: OnceLock<Regex> = OnceLock::new();
    static RE_QUERY: OnceLock<Regex> = OnceLock::new();

    if url.is_empty() {
        return None;
    }

    let re_path =
        RE_PATH.get_or_init(|| Regex::new(r"/d/([a-zA-Z0-9_-]+)").expect("valid path id regex"));
    let re_query = RE_QUERY
        .get_or_init(|| Regex::new(r"[?&]id=([a-zA-Z0-9_-]+)").expect("valid query id regex"));

    [re_path, re_query]
        .into_iter()
        .find_map(|re| re.captures(url))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// URL to load in the viewer: the Drive preview page when the id is known, the raw link otherwise.
pub fn preview_url(record: &DocumentRecord) -> String {
    match &record.file_id {
        Some(file_id) => format!("{DRIVE_FILE_BASE}{file_id}/preview"),
        None => record.link.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(link: &str, file_id: Option<&str>) -> DocumentRecord {
        DocumentRecord {
            id: 1,
            date: String::new(),
            code: "C1".to_string(),
            title: "T1".to_string(),
            description: String::new(),
            category: String::new(),
            link: link.to_string(),
            file_id: file_id.map(str::to_string),
        }
    }

    #[test]
    fn extracts_id_from_file_path() {
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/ABC123/view").as_deref(),
            Some("ABC123")
        );
    }

    #[test]
    fn extracts_id_from_query_parameter() {
        assert_eq!(
            extract_file_id("https://host/doc?id=XYZ_9-9").as_deref(),
            Some("XYZ_9-9")
        );
        assert_eq!(
            extract_file_id("https://drive.google.com/uc?export=download&id=Q-1").as_deref(),
            Some("Q-1")
        );
    }

    #[test]
    fn path_segment_beats_query_parameter() {
        assert_eq!(
            extract_file_id("https://drive.google.com/file/d/PATH1/view?id=QUERY1").as_deref(),
            Some("PATH1")
        );
    }

    #[test]
    fn stops_at_characters_outside_the_id_alphabet() {
        assert_eq!(
            extract_file_id("https://docs.google.com/document/d/Ab_c-9.x/edit").as_deref(),
            Some("Ab_c-9")
        );
    }

    #[test]
    fn no_id_found() {
        assert_eq!(extract_file_id("https://example.com/no-id-here"), None);
        assert_eq!(extract_file_id("https://example.com/?uid=5"), None);
        assert_eq!(extract_file_id(""), None);
    }

    #[test]
    fn preview_uses_drive_template_when_id_known() {
        assert_eq!(
            preview_url(&record("https://x", Some("F1"))),
            "https://drive.google.com/file/d/F1/preview"
        );
    }

    #[test]
    fn preview_falls_back_to_raw_link() {
        assert_eq!(preview_url(&record("https://x", None)), "https://x");
    }
}
