use serde::{Deserialize, Deserializer, Serialize};

use crate::config::StorageMode;

/// One row of the registry sheet, as served by `action=list`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackendDocument {
    #[serde(rename = "fecha", default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(rename = "codigo", default, deserialize_with = "lenient_string")]
    pub code: String,
    #[serde(rename = "titulo", default, deserialize_with = "lenient_string")]
    pub title: String,
    #[serde(rename = "descripcion", default, deserialize_with = "lenient_string")]
    pub description: String,
    #[serde(rename = "categoria", default, deserialize_with = "lenient_string")]
    pub category: String,
    #[serde(rename = "enlace", default, deserialize_with = "lenient_string")]
    pub link: String,
    #[serde(
        rename = "fileId",
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_id: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
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

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub ok: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(
        rename = "fileId",
        default,
        deserialize_with = "lenient_optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub file_id: Option<String>,
}

/// What the UI needs to know about the configuration. The endpoint stays in the shell.
#[derive(Debug, Clone, Serialize)]
pub struct ClientSettings {
    pub storage: StorageMode,
    pub demo_user: String,
    pub demo_pass: String,
    pub status_clear_ms: u64,
    pub speech_lang: String,
}

// Sheet cells come back typed: a code like 0042 arrives as the number 42.
fn value_to_string(value: serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s),
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_string(value).unwrap_or_default())
}

fn lenient_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value_to_string(value).filter(|s| !s.trim().is_empty()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_sheet_row_with_numeric_cells() {
        let row: BackendDocument = serde_json::from_str(
            r#"{"fecha":"2024-05-02T10:00:00.000Z","codigo":42,"titulo":"Manual",
                "descripcion":"","categoria":"HR","enlace":"https://drive.google.com/file/d/X1/view"}"#,
        )
        .unwrap();
        assert_eq!(row.code, "42");
        assert_eq!(row.title, "Manual");
        assert_eq!(row.file_id, None);
    }

    #[test]
    fn blank_file_id_is_absent() {
        let row: BackendDocument =
            serde_json::from_str(r#"{"codigo":"A","enlace":"https://x","fileId":""}"#).unwrap();
        assert_eq!(row.file_id, None);
        assert_eq!(row.date, "");
    }

    #[test]
    fn save_response_keeps_rejection_reason() {
        let resp: SaveResponse =
            serde_json::from_str(r#"{"ok":false,"error":"Duplicate code"}"#).unwrap();
        assert!(!resp.ok);
        assert_eq!(resp.error.as_deref(), Some("Duplicate code"));
    }
}
