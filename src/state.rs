use std::time::Duration;

use crate::cache::DocumentCache;
use crate::filter::filter_documents;
use crate::link::preview_url;
use crate::models::{
    records_from_backend, BackendDocument, DocumentRecord, LoginResponse, SavePayload,
    SaveResponse,
};
use crate::settings::{ClientSettings, StorageMode};
use crate::store::StoreError;

pub const MSG_VERIFYING: &str = "Verifying…";
pub const MSG_BAD_CREDENTIALS: &str = "Incorrect username or password.";
pub const MSG_LOGIN_FAILED: &str = "Login error. Check your connection and try again.";
pub const MSG_REQUIRED_FIELDS: &str = "Code, title and link are required.";
pub const MSG_SAVING: &str = "Saving…";
pub const MSG_SAVE_FAILED: &str = "Could not save the document. Check your connection and try again.";
pub const MSG_SAVE_REJECTED: &str = "The registry rejected the document.";
pub const MSG_LOADING: &str = "Loading documents…";
pub const MSG_LOAD_FAILED: &str = "Could not load documents. Check your connection and try again.";
pub const MSG_REMOVED: &str = "Document removed from the list.";
pub const MSG_EMPTY: &str = "No documents registered yet.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Module {
    #[default]
    Register,
    Table,
    TextSearch,
    VoiceSearch,
}

impl Module {
    pub const ALL: [Module; 4] = [
        Module::Register,
        Module::Table,
        Module::TextSearch,
        Module::VoiceSearch,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Module::Register => "Register",
            Module::Table => "Documents",
            Module::TextSearch => "Text search",
            Module::VoiceSearch => "Voice search",
        }
    }
}

/// Status lines that clear themselves after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSlot {
    Registration,
    Table,
}

/// A user-facing message stamped with a generation. Every change bumps the generation,
/// so a delayed clear scheduled for an older message is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatusLine {
    pub text: String,
    pub is_error: bool,
    generation: u64,
}

impl StatusLine {
    pub fn set(&mut self, text: impl Into<String>, is_error: bool) -> u64 {
        self.generation += 1;
        self.text = text.into();
        self.is_error = is_error;
        self.generation
    }

    pub fn clear(&mut self) {
        self.set(String::new(), false);
    }

    /// Clear only if nothing has been written since `generation`.
    pub fn clear_if_current(&mut self, generation: u64) -> bool {
        if self.generation != generation {
            return false;
        }
        self.clear();
        true
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub logged_in: bool,
    pub user: String,
    pub pass: String,
    pub status: StatusLine,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Code,
    Title,
    Description,
    Category,
    Link,
}

impl FormField {
    pub const ALL: [FormField; 5] = [
        FormField::Code,
        FormField::Title,
        FormField::Description,
        FormField::Category,
        FormField::Link,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormField::Code => "Code *",
            FormField::Title => "Title *",
            FormField::Description => "Description",
            FormField::Category => "Category",
            FormField::Link => "Link (Google Drive or URL) *",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub code: String,
    pub title: String,
    pub description: String,
    pub category: String,
    pub link: String,
}

impl RegistrationForm {
    pub fn field(&self, field: FormField) -> &str {
        match field {
            FormField::Code => &self.code,
            FormField::Title => &self.title,
            FormField::Description => &self.description,
            FormField::Category => &self.category,
            FormField::Link => &self.link,
        }
    }

    pub fn field_mut(&mut self, field: FormField) -> &mut String {
        match field {
            FormField::Code => &mut self.code,
            FormField::Title => &mut self.title,
            FormField::Description => &mut self.description,
            FormField::Category => &mut self.category,
            FormField::Link => &mut self.link,
        }
    }

    /// Trimmed payload, or `None` when a required field is blank.
    pub fn payload(&self) -> Option<SavePayload> {
        let payload = SavePayload {
            code: self.code.trim().to_string(),
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            category: self.category.trim().to_string(),
            link: self.link.trim().to_string(),
        };
        if payload.code.is_empty() || payload.title.is_empty() || payload.link.is_empty() {
            return None;
        }
        Some(payload)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSelection {
    pub record_id: u32,
    pub title: String,
    pub url: String,
    pub link: String,
}

/// Work the view layer has to carry out after a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { user: String, pass: String },
    FetchDocuments,
    Save(SavePayload),
    ClearStatus {
        slot: StatusSlot,
        generation: u64,
        after: Duration,
    },
}

/// Everything the UI renders. Transitions are plain methods so they can run without a DOM.
#[derive(Debug, Clone)]
pub struct AppState {
    pub storage: StorageMode,
    demo_user: String,
    demo_pass: String,
    status_delay: Duration,

    pub session: Session,
    pub module: Module,
    pub cache: DocumentCache,
    pub form: RegistrationForm,
    pub registration_status: StatusLine,
    pub table_status: StatusLine,
    pub search_text: String,
    pub text_results: Vec<DocumentRecord>,
    pub voice_results: Vec<DocumentRecord>,
    pub viewer: Option<ViewerSelection>,
}

impl AppState {
    pub fn new(settings: &ClientSettings) -> Self {
        Self {
            storage: settings.storage,
            demo_user: settings.demo_user.clone(),
            demo_pass: settings.demo_pass.clone(),
            status_delay: settings.status_delay(),
            session: Session::default(),
            module: Module::default(),
            cache: DocumentCache::default(),
            form: RegistrationForm::default(),
            registration_status: StatusLine::default(),
            table_status: StatusLine::default(),
            search_text: String::new(),
            text_results: Vec::new(),
            voice_results: Vec::new(),
            viewer: None,
        }
    }

    fn status_mut(&mut self, slot: StatusSlot) -> &mut StatusLine {
        match slot {
            StatusSlot::Registration => &mut self.registration_status,
            StatusSlot::Table => &mut self.table_status,
        }
    }

    fn transient(&mut self, slot: StatusSlot, text: impl Into<String>) -> Command {
        let generation = self.status_mut(slot).set(text, false);
        Command::ClearStatus {
            slot,
            generation,
            after: self.status_delay,
        }
    }

    pub fn clear_status(&mut self, slot: StatusSlot, generation: u64) {
        self.status_mut(slot).clear_if_current(generation);
    }

    // ---------- session ----------

    pub fn login(&mut self) -> Vec<Command> {
        match self.storage {
            StorageMode::Remote => {
                self.session.status.set(MSG_VERIFYING, false);
                vec![Command::Login {
                    user: self.session.user.clone(),
                    pass: self.session.pass.clone(),
                }]
            }
            StorageMode::Memory => {
                let accepted =
                    self.session.user == self.demo_user && self.session.pass == self.demo_pass;
                self.login_resolved(Ok(LoginResponse { ok: accepted }))
            }
        }
    }

    pub fn login_resolved(&mut self, result: Result<LoginResponse, StoreError>) -> Vec<Command> {
        match result {
            Ok(LoginResponse { ok: true }) => {
                self.session.logged_in = true;
                self.session.status.clear();
                self.reload()
            }
            Ok(LoginResponse { ok: false }) => {
                self.session.logged_in = false;
                self.session.status.set(MSG_BAD_CREDENTIALS, true);
                Vec::new()
            }
            Err(_) => {
                self.session.logged_in = false;
                self.session.status.set(MSG_LOGIN_FAILED, true);
                Vec::new()
            }
        }
    }

    pub fn logout(&mut self) {
        self.session.logged_in = false;
        self.session.user.clear();
        self.session.pass.clear();
        self.session.status.clear();
        self.module = Module::default();
        self.cache.clear();
        self.form = RegistrationForm::default();
        self.registration_status.clear();
        self.table_status.clear();
        self.search_text.clear();
        self.text_results.clear();
        self.voice_results.clear();
        self.viewer = None;
    }

    // ---------- loading ----------

    /// Ask for the full list again. The in-memory variant has nothing to fetch.
    pub fn reload(&mut self) -> Vec<Command> {
        match self.storage {
            StorageMode::Remote => {
                self.table_status.set(MSG_LOADING, false);
                vec![Command::FetchDocuments]
            }
            StorageMode::Memory => Vec::new(),
        }
    }

    pub fn documents_loaded(&mut self, result: Result<Vec<BackendDocument>, StoreError>) {
        // A list that lands after logout must not refill the cache.
        if !self.session.logged_in {
            return;
        }
        match result {
            Ok(docs) => {
                self.cache.replace_all(records_from_backend(docs));
                self.table_status.clear();
                // Ids are positional, so results from the previous list may point elsewhere now.
                self.text_results.clear();
                self.voice_results.clear();
                let stale = self.viewer.as_ref().is_some_and(|v| {
                    self.cache.find_by_id(v.record_id).map(|record| &record.link) != Some(&v.link)
                });
                if stale {
                    self.viewer = None;
                }
            }
            Err(_) => {
                self.table_status.set(MSG_LOAD_FAILED, true);
            }
        }
    }

    // ---------- registration ----------

    pub fn submit_registration(&mut self) -> Vec<Command> {
        let Some(payload) = self.form.payload() else {
            self.registration_status.set(MSG_REQUIRED_FIELDS, true);
            return Vec::new();
        };
        match self.storage {
            StorageMode::Remote => {
                self.registration_status.set(MSG_SAVING, false);
                vec![Command::Save(payload)]
            }
            StorageMode::Memory => {
                let record = DocumentRecord::from_payload(0, payload);
                let message = if record.file_id.is_some() {
                    "Document registered. Drive id detected."
                } else {
                    "Document registered. (Not a Drive link; the URL will be used as is.)"
                };
                self.cache.append(record);
                self.form = RegistrationForm::default();
                vec![self.transient(StatusSlot::Registration, message)]
            }
        }
    }

    pub fn save_resolved(&mut self, result: Result<SaveResponse, StoreError>) -> Vec<Command> {
        if !self.session.logged_in {
            return Vec::new();
        }
        match result {
            Ok(response) if response.ok => {
                self.form = RegistrationForm::default();
                let message = match response.file_id.as_deref().filter(|f| !f.is_empty()) {
                    Some(file_id) => format!("Document saved. Drive id: {file_id}"),
                    None => "Document saved.".to_string(),
                };
                let mut commands = vec![self.transient(StatusSlot::Registration, message)];
                commands.extend(self.reload());
                commands
            }
            Ok(response) => {
                let reason = response
                    .error
                    .filter(|e| !e.trim().is_empty())
                    .unwrap_or_else(|| MSG_SAVE_REJECTED.to_string());
                self.registration_status.set(reason, true);
                Vec::new()
            }
            Err(_) => {
                self.registration_status.set(MSG_SAVE_FAILED, true);
                Vec::new()
            }
        }
    }

    // ---------- table & viewer ----------

    /// Drop a record from the local list only; the registry keeps it.
    pub fn delete(&mut self, id: u32) -> Vec<Command> {
        if self.viewer.as_ref().is_some_and(|v| v.record_id == id) {
            self.viewer = None;
        }
        if self.cache.remove(id).is_none() {
            return Vec::new();
        }
        self.text_results.retain(|r| r.id != id);
        self.voice_results.retain(|r| r.id != id);
        vec![self.transient(StatusSlot::Table, MSG_REMOVED)]
    }

    pub fn empty_state(&self) -> Option<&'static str> {
        self.cache.is_empty().then_some(MSG_EMPTY)
    }

    pub fn view(&mut self, id: u32) {
        self.viewer = self.cache.find_by_id(id).map(|record| ViewerSelection {
            record_id: record.id,
            title: record.display_title().to_string(),
            url: preview_url(record),
            link: record.link.clone(),
        });
    }

    pub fn close_viewer(&mut self) {
        self.viewer = None;
    }

    // ---------- search ----------

    pub fn search_by_text(&mut self) {
        self.text_results = filter_documents(self.cache.all(), &self.search_text);
        if self.text_results.is_empty() {
            self.viewer = None;
        }
    }

    pub fn search_by_voice(&mut self, transcript: &str) {
        self.voice_results = filter_documents(self.cache.all(), transcript);
        if self.voice_results.is_empty() {
            self.viewer = None;
        }
    }
}
