use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::models::{BackendDocument, LoginResponse, SavePayload, SaveResponse};
use crate::settings::ClientSettings;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = ["window", "__TAURI__", "core"])]
    async fn invoke(cmd: &str, args: JsValue) -> Result<JsValue, JsValue>;
}

/// The call never produced a usable answer. An explicit `ok: false` is not an error here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("{0}")]
    Transport(String),
    #[error("Unexpected response: {0}")]
    Decode(String),
    #[error("Could not encode request: {0}")]
    Encode(String),
}

#[derive(Serialize)]
struct LoginArgs<'a> { user: &'a str, pass: &'a str }
#[derive(Serialize)]
struct SaveArgs<'a> { payload: &'a SavePayload }
#[derive(Serialize)]
struct OpenArgs<'a> { url: &'a str }

fn js_error_text(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

fn to_args<T: Serialize>(args: &T) -> Result<JsValue, StoreError> {
    serde_wasm_bindgen::to_value(args).map_err(|e| StoreError::Encode(e.to_string()))
}

async fn call<T: DeserializeOwned>(cmd: &str, args: JsValue) -> Result<T, StoreError> {
    let value = invoke(cmd, args)
        .await
        .map_err(|e| StoreError::Transport(js_error_text(&e)))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| StoreError::Decode(e.to_string()))
}

pub async fn load_settings() -> Result<ClientSettings, StoreError> {
    call("load_settings", JsValue::NULL).await
}

pub async fn list_documents() -> Result<Vec<BackendDocument>, StoreError> {
    call("list_documents", JsValue::NULL).await
}

pub async fn login(user: &str, pass: &str) -> Result<LoginResponse, StoreError> {
    call("login", to_args(&LoginArgs { user, pass })?).await
}

pub async fn save_document(payload: &SavePayload) -> Result<SaveResponse, StoreError> {
    call("save_document", to_args(&SaveArgs { payload })?).await
}

pub async fn open_external(url: &str) -> Result<(), StoreError> {
    invoke("open_external", to_args(&OpenArgs { url })?)
        .await
        .map(|_| ())
        .map_err(|e| StoreError::Transport(js_error_text(&e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_failure_is_not_reported_as_a_response() {
        let encode = StoreError::Encode("key must be a string".to_string()).to_string();
        assert_eq!(encode, "Could not encode request: key must be a string");
        assert!(!encode.contains("response"));
        assert_ne!(
            StoreError::Decode("x".to_string()).to_string(),
            StoreError::Encode("x".to_string()).to_string()
        );
    }
}
