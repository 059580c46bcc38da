use crate::models::{BackendDocument, LoginResponse, SavePayload, SaveResponse};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Request to document store failed: {0}")]
    Http(#[source] reqwest::Error),
    #[error("Document store answered with status {0}")]
    Status(u16),
    #[error("Unexpected response from document store: {0}")]
    Parse(#[from] serde_json::Error),
}

// The request URL carries the login query, so it never reaches the message.
impl From<reqwest::Error> for StoreError {
    fn from(err: reqwest::Error) -> Self {
        StoreError::Http(err.without_url())
    }
}

/// A single GET against the Apps Script endpoint, selected by `action`.
#[derive(Debug, Clone, Copy)]
pub enum Action<'a> {
    List,
    Login { user: &'a str, pass: &'a str },
    Save(&'a SavePayload),
}

impl Action<'_> {
    pub fn name(&self) -> &'static str {
        match self {
            Action::List => "list",
            Action::Login { .. } => "login",
            Action::Save(_) => "save",
        }
    }

    pub fn query(&self) -> Vec<(&'static str, &str)> {
        let mut params = vec![("action", self.name())];
        match self {
            Action::List => {}
            Action::Login { user, pass } => {
                params.push(("user", *user));
                params.push(("pass", *pass));
            }
            Action::Save(payload) => {
                params.push(("codigo", payload.code.as_str()));
                params.push(("titulo", payload.title.as_str()));
                params.push(("descripcion", payload.description.as_str()));
                params.push(("categoria", payload.category.as_str()));
                params.push(("enlace", payload.link.as_str()));
            }
        }
        params
    }
}

/// HTTP client for the spreadsheet-backed registry.
pub struct RemoteStore {
    base_url: String,
    client: reqwest::Client,
}

impl RemoteStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().to_string(),
            client: reqwest::Client::new(),
        }
    }

    async fn get(&self, action: Action<'_>) -> Result<String, StoreError> {
        let response = self
            .client
            .get(&self.base_url)
            .query(&action.query())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            log::warn!("Store action={} failed with status {}", action.name(), status);
            return Err(StoreError::Status(status.as_u16()));
        }
        Ok(response.text().await?)
    }

    pub async fn list(&self) -> Result<Vec<BackendDocument>, StoreError> {
        let body = self.get(Action::List).await?;
        let documents = parse_list(&body)?;
        log::info!("Store action=list returned {} documents", documents.len());
        Ok(documents)
    }

    pub async fn login(&self, user: &str, pass: &str) -> Result<LoginResponse, StoreError> {
        let body = self.get(Action::Login { user, pass }).await?;
        let response: LoginResponse = serde_json::from_str(&body)?;
        log::info!("Store action=login ok={}", response.ok);
        Ok(response)
    }

    pub async fn save(&self, payload: &SavePayload) -> Result<SaveResponse, StoreError> {
        let body = self.get(Action::Save(payload)).await?;
        let response: SaveResponse = serde_json::from_str(&body)?;
        if response.ok {
            log::info!("Store action=save accepted code {:?}", payload.code);
        } else {
            log::warn!(
                "Store action=save rejected code {:?}: {}",
                payload.code,
                response.error.as_deref().unwrap_or("no reason given")
            );
        }
        Ok(response)
    }
}

/// Decode a list body. Anything falsy (`null`, `false`, `0`, `""`, nothing) is an empty registry.
pub fn parse_list(body: &str) -> Result<Vec<BackendDocument>, StoreError> {
    let body = body.trim();
    if body.is_empty() {
        return Ok(Vec::new());
    }
    let value: serde_json::Value = serde_json::from_str(body)?;
    let falsy = match &value {
        serde_json::Value::Null => true,
        serde_json::Value::Bool(b) => !b,
        serde_json::Value::Number(n) => n.as_f64() == Some(0.0),
        serde_json::Value::String(s) => s.is_empty(),
        _ => false,
    };
    if falsy {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_value(value)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> SavePayload {
        SavePayload {
            code: "C1".to_string(),
            title: "Policy & Rules".to_string(),
            description: String::new(),
            category: "HR".to_string(),
            link: "https://drive.google.com/file/d/ID1/view?usp=sharing".to_string(),
        }
    }

    #[test]
    fn list_query_only_names_the_action() {
        assert_eq!(Action::List.query(), vec![("action", "list")]);
    }

    #[test]
    fn login_query_carries_credentials() {
        let action = Action::Login {
            user: "ana",
            pass: "s3cret",
        };
        assert_eq!(
            action.query(),
            vec![("action", "login"), ("user", "ana"), ("pass", "s3cret")]
        );
    }

    #[test]
    fn save_query_uses_sheet_column_names_in_order() {
        let payload = payload();
        let keys: Vec<&str> = Action::Save(&payload).query().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec!["action", "codigo", "titulo", "descripcion", "categoria", "enlace"]
        );
    }

    #[test]
    fn save_query_is_url_encoded_by_the_client() {
        let store = RemoteStore::new("https://script.example.com/exec");
        let payload = payload();
        let request = store
            .client
            .get(&store.base_url)
            .query(&Action::Save(&payload).query())
            .build()
            .unwrap();
        let url = request.url().as_str();
        assert!(url.starts_with("https://script.example.com/exec?action=save&codigo=C1"));
        assert!(url.contains("titulo=Policy+%26+Rules"));
        assert!(url.contains("enlace=https%3A%2F%2Fdrive.google.com%2Ffile%2Fd%2FID1%2Fview%3Fusp%3Dsharing"));
    }

    #[tokio::test]
    async fn failed_login_error_hides_credentials() {
        // Nothing listens on port 1, so the request fails before any response.
        let store = RemoteStore::new("http://127.0.0.1:1/exec");
        let err = store.login("ana", "s3cret-pw").await.unwrap_err();
        assert!(matches!(err, StoreError::Http(_)));
        let text = err.to_string();
        assert!(!text.contains("s3cret-pw"), "{text}");
        assert!(!text.contains("127.0.0.1:1/exec"), "{text}");
    }

    #[test]
    fn falsy_list_bodies_are_empty() {
        for body in ["", "  ", "null", "false", "0", "\"\""] {
            assert!(parse_list(body).unwrap().is_empty(), "body {body:?}");
        }
    }

    #[test]
    fn parses_list_rows_in_order() {
        let docs = parse_list(
            r#"[{"fecha":"","codigo":"A","titulo":"First","descripcion":"","categoria":"","enlace":"https://a"},
                {"fecha":"","codigo":"B","titulo":"Second","descripcion":"","categoria":"","enlace":"https://b","fileId":"FB"}]"#,
        )
        .unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].code, "A");
        assert_eq!(docs[1].file_id.as_deref(), Some("FB"));
    }

    #[test]
    fn html_error_page_is_a_parse_error() {
        assert!(matches!(
            parse_list("<!DOCTYPE html><html></html>"),
            Err(StoreError::Parse(_))
        ));
    }
}
