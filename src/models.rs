use serde::{Deserialize, Serialize};

use crate::link::extract_file_id;

/// A registry row as the shell hands it over.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BackendDocument {
    #[serde(rename = "fecha", default)]
    pub date: String,
    #[serde(rename = "codigo", default)]
    pub code: String,
    #[serde(rename = "titulo", default)]
    pub title: String,
    #[serde(rename = "descripcion", default)]
    pub description: String,
    #[serde(rename = "categoria", default)]
    pub category: String,
    #[serde(rename = "enlace", default)]
    pub link: String,
    #[serde(rename = "fileId", default)]
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SavePayload {
    #[serde(rename = "codigo")]
    pub code: String,
    #[serde(rename = "titulo")]
    pub title: String,
    #[serde(rename = "descripcion")]
    pub description: String,
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "enlace")]
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub ok: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(rename = "fileId", default)]
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRecord {
    /// 1-based position in the last load. Not stable across reloads.
    pub id: u32,
    /// Registration timestamp as the sheet formats it; empty for in-memory rows.
    pub date: String,
    pub code: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub link: String,
    pub file_id: Option<String>,
}

impl DocumentRecord {
    /// Build a record from a store row, deriving the Drive id from the link when the
    /// store did not supply one.
    pub fn from_backend(id: u32, doc: BackendDocument) -> Self {
        let file_id = doc
            .file_id
            .filter(|f| !f.trim().is_empty())
            .or_else(|| extract_file_id(&doc.link));
        Self {
            id,
            date: doc.date,
            code: doc.code,
            title: doc.title,
            description: doc.description,
            category: doc.category,
            link: doc.link,
            file_id,
        }
    }

    pub fn from_payload(id: u32, payload: SavePayload) -> Self {
        let file_id = extract_file_id(&payload.link);
        Self {
            id,
            date: String::new(),
            code: payload.code,
            title: payload.title,
            description: payload.description,
            category: payload.category,
            link: payload.link,
            file_id,
        }
    }

    /// Title for headers; falls back to the code for untitled rows.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.code
        } else {
            &self.title
        }
    }
}

/// Number rows by their position in the response, starting at 1.
pub fn records_from_backend(docs: Vec<BackendDocument>) -> Vec<DocumentRecord> {
    docs.into_iter()
        .zip(1..)
        .map(|(doc, id)| DocumentRecord::from_backend(id, doc))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(code: &str, link: &str, file_id: Option<&str>) -> BackendDocument {
        BackendDocument {
            code: code.to_string(),
            title: format!("Title {code}"),
            link: link.to_string(),
            file_id: file_id.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn ids_follow_response_order() {
        let records = records_from_backend(vec![
            row("B", "https://b", None),
            row("A", "https://a", None),
        ]);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].code, "B");
        assert_eq!(records[1].id, 2);
    }

    #[test]
    fn store_file_id_wins_over_link() {
        let record = DocumentRecord::from_backend(
            1,
            row("A", "https://drive.google.com/file/d/FROMLINK/view", Some("FROMSTORE")),
        );
        assert_eq!(record.file_id.as_deref(), Some("FROMSTORE"));
    }

    #[test]
    fn file_id_derived_from_link_when_missing() {
        let record = DocumentRecord::from_backend(
            1,
            row("A", "https://drive.google.com/file/d/ID1/view", Some("  ")),
        );
        assert_eq!(record.file_id.as_deref(), Some("ID1"));
    }

    #[test]
    fn display_title_falls_back_to_code() {
        let mut record = DocumentRecord::from_backend(1, row("C-7", "https://x", None));
        assert_eq!(record.display_title(), "Title C-7");
        record.title.clear();
        assert_eq!(record.display_title(), "C-7");
    }

    #[test]
    fn decodes_shell_payload() {
        let docs: Vec<BackendDocument> = serde_json::from_str(
            r#"[{"fecha":"2024-01-01","codigo":"A1","titulo":"Budget","descripcion":"2024",
                 "categoria":"Finance","enlace":"https://drive.google.com/open?id=Q9"}]"#,
        )
        .unwrap();
        let records = records_from_backend(docs);
        assert_eq!(records[0].category, "Finance");
        assert_eq!(records[0].file_id.as_deref(), Some("Q9"));
    }
}
