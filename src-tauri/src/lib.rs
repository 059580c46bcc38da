pub mod config;
pub mod models;
pub mod store;

use std::path::PathBuf;
use tauri::{AppHandle, Manager, State};
use tauri_plugin_opener::OpenerExt;

use config::AppConfig;
use models::{BackendDocument, ClientSettings, LoginResponse, SavePayload, SaveResponse};
use store::RemoteStore;

const SETTINGS_FILE: &str = "settings.json";

pub struct Registry {
    config: AppConfig,
    store: RemoteStore,
}

impl Registry {
    pub fn new(config: AppConfig) -> Self {
        let store = RemoteStore::new(&config.endpoint);
        Self { config, store }
    }
}

fn settings_path(app: &AppHandle) -> Result<PathBuf, String> {
    let dir = app.path().app_config_dir().map_err(|e| e.to_string())?;
    Ok(dir.join(SETTINGS_FILE))
}

fn load_config(app: &AppHandle) -> AppConfig {
    let loaded = settings_path(app)
        .and_then(|path| {
            log::info!("Settings path: {:?}", path);
            AppConfig::load(&path).map_err(|e| e.to_string())
        })
        .and_then(|config| config.with_env().map_err(|e| e.to_string()));
    match loaded {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Falling back to default settings: {}", e);
            AppConfig::default()
        }
    }
}

#[tauri::command]
fn load_settings(registry: State<'_, Registry>) -> ClientSettings {
    registry.config.client_settings()
}

#[tauri::command]
async fn list_documents(registry: State<'_, Registry>) -> Result<Vec<BackendDocument>, String> {
    registry.store.list().await.map_err(|e| {
        log::warn!("Listing documents failed: {}", e);
        e.to_string()
    })
}

#[tauri::command]
async fn login(
    registry: State<'_, Registry>,
    user: String,
    pass: String,
) -> Result<LoginResponse, String> {
    registry.store.login(&user, &pass).await.map_err(|e| {
        log::warn!("Login request failed: {}", e);
        e.to_string()
    })
}

#[tauri::command]
async fn save_document(
    registry: State<'_, Registry>,
    payload: SavePayload,
) -> Result<SaveResponse, String> {
    registry.store.save(&payload).await.map_err(|e| {
        log::warn!("Saving document {:?} failed: {}", payload.code, e);
        e.to_string()
    })
}

#[tauri::command]
fn open_external(app: AppHandle, url: &str) -> Result<(), String> {
    app.opener()
        .open_url(url, None::<&str>)
        .map_err(|e| e.to_string())
}

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|app| {
            let config = load_config(app.handle());
            log::info!(
                "Document registry starting (storage: {:?}, endpoint: {})",
                config.storage,
                config.endpoint
            );
            app.manage(Registry::new(config));
            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            load_settings,
            list_documents,
            login,
            save_document,
            open_external
        ])
        .run(tauri::generate_context!())
        .expect("error while running tauri application");
}
