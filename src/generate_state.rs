//! State manager for the generation view: template selection, the dynamic
//! input form, the render call, and the result actions.
//!
//! The view moves through three phases. Selecting a template builds the
//! form (FormReady); a successful render adds the result (ResultReady);
//! clearing the selection drops both.

use crate::api_client::{ApiClient, ApiError, Template};
use crate::async_bridge::{self, Slot};
use crate::form_model::{self, FormField};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeneratePhase {
    NoSelection,
    FormReady,
    ResultReady,
}

/// `(id, name)` pair for the template picker.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectableTemplate {
    pub id: i64,
    pub name: String,
}

pub struct GenerateState {
    client: Option<ApiClient>,

    pub phase: GeneratePhase,
    pub selectable: Vec<SelectableTemplate>,
    pub selected_id: Option<i64>,
    pub current: Option<Template>,
    pub fields: Vec<FormField>,
    pub result: Option<String>,
    pub scroll_to_result: bool,

    /// Modal notice; mirrors the blocking alerts of the original UI.
    pub alert: Option<String>,

    pub loading_selectable: bool,
    pub loading_template: bool,
    pub rendering: bool,

    // Async state bridges.
    selectable_slot: Option<Slot<Result<Vec<Template>, ApiError>>>,
    template_slot: Option<Slot<Result<Template, ApiError>>>,
    render_slot: Option<Slot<Result<String, ApiError>>>,
}

impl GenerateState {
    pub fn new(client: Option<ApiClient>) -> Self {
        Self {
            client,
            phase: GeneratePhase::NoSelection,
            selectable: Vec::new(),
            selected_id: None,
            current: None,
            fields: Vec::new(),
            result: None,
            scroll_to_result: false,
            alert: None,
            loading_selectable: false,
            loading_template: false,
            rendering: false,
            selectable_slot: None,
            template_slot: None,
            render_slot: None,
        }
    }

    /// Refill the template picker; runs at startup and after every
    /// successful create.
    pub fn load_selectable_templates(&mut self) {
        if self.loading_selectable {
            return;
        }
        let Some(client) = self.client.clone() else {
            return;
        };

        self.loading_selectable = true;
        let slot = async_bridge::new_slot();
        self.selectable_slot = Some(slot.clone());

        async_bridge::spawn_detached(async move {
            async_bridge::fill(&slot, client.list_templates().await);
        });
    }

    /// `None` clears the selection and hides form and result; `Some(id)`
    /// fetches the template and rebuilds the form on arrival.
    pub fn select_template(&mut self, selection: Option<i64>) {
        self.selected_id = selection;
        let Some(id) = selection else {
            self.phase = GeneratePhase::NoSelection;
            self.current = None;
            self.fields.clear();
            self.result = None;
            return;
        };
        let Some(client) = self.client.clone() else {
            self.alert = Some("Not connected to the API server".to_string());
            return;
        };

        self.loading_template = true;
        let slot = async_bridge::new_slot();
        self.template_slot = Some(slot.clone());

        async_bridge::spawn_detached(async move {
            async_bridge::fill(&slot, client.get_template(id).await);
        });
    }

    /// Collect the raw form values and submit them for rendering. Never
    /// touches the network without a selected template.
    pub fn generate_text(&mut self) {
        let Some(current) = &self.current else {
            self.alert = Some("No template selected".to_string());
            return;
        };
        if self.rendering {
            return;
        }
        let Some(client) = self.client.clone() else {
            self.alert = Some("Not connected to the API server".to_string());
            return;
        };

        let id = current.id;
        let inputs = form_model::collect_inputs(&self.fields);

        self.rendering = true;
        let slot = async_bridge::new_slot();
        self.render_slot = Some(slot.clone());

        async_bridge::spawn_detached(async move {
            async_bridge::fill(&slot, client.render_template(id, &inputs).await);
        });
    }

    pub fn update_from_async(&mut self) {
        if let Some(result) = async_bridge::poll(&mut self.selectable_slot) {
            self.apply_selectable_templates(result);
        }
        if let Some(result) = async_bridge::poll(&mut self.template_slot) {
            self.apply_loaded_template(result);
        }
        if let Some(result) = async_bridge::poll(&mut self.render_slot) {
            self.apply_render_result(result);
        }
    }

    pub fn apply_selectable_templates(&mut self, result: Result<Vec<Template>, ApiError>) {
        self.loading_selectable = false;
        match result {
            Ok(templates) => {
                self.selectable = templates
                    .into_iter()
                    .map(|t| SelectableTemplate { id: t.id, name: t.name })
                    .collect();
            }
            Err(e) => {
                self.alert = Some(format!("Failed to load templates: {e}"));
            }
        }
    }

    /// A freshly fetched template becomes current and gets a new form; any
    /// stale result is dropped. On failure the prior state is kept.
    pub fn apply_loaded_template(&mut self, result: Result<Template, ApiError>) {
        self.loading_template = false;
        match result {
            Ok(template) => {
                self.fields = form_model::build_form(&template.variables);
                self.selected_id = Some(template.id);
                self.current = Some(template);
                self.result = None;
                self.phase = GeneratePhase::FormReady;
            }
            Err(e) => {
                self.alert = Some(format!("Failed to load the template: {e}"));
            }
        }
    }

    pub fn apply_render_result(&mut self, result: Result<String, ApiError>) {
        self.rendering = false;
        match result {
            Ok(text) => {
                self.result = Some(text);
                self.scroll_to_result = true;
                self.phase = GeneratePhase::ResultReady;
            }
            Err(e) => {
                self.alert = Some(e.to_string());
            }
        }
    }

    /// Write the rendered text to `generated_<timestamp>.txt` in the
    /// working directory.
    pub fn download_result(&mut self) {
        let Some(text) = self.result.clone() else {
            return;
        };
        let timestamp = chrono::Utc::now().timestamp_millis();
        match write_download(Path::new("."), &text, timestamp) {
            Ok(path) => {
                self.alert = Some(format!("Saved to {}", path.display()));
            }
            Err(e) => {
                self.alert = Some(format!("Failed to save the file: {e}"));
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.loading_selectable || self.loading_template || self.rendering
    }
}

pub fn download_file_name(timestamp_millis: i64) -> String {
    format!("generated_{timestamp_millis}.txt")
}

pub fn write_download(dir: &Path, text: &str, timestamp_millis: i64) -> io::Result<PathBuf> {
    let path = dir.join(download_file_name(timestamp_millis));
    fs::write(&path, text)?;
    Ok(path)
}
