//! State manager for the template list view: load, inline edit, delete.
//! Pure state and transitions, no UI code; the panel renders from it.

use crate::api_client::{ApiClient, ApiError, Template};
use crate::async_bridge::{self, Slot};
use crate::banner::Banner;

/// Inline edit form contents, pre-filled from a fresh GET of the template.
#[derive(Debug, Clone, PartialEq)]
pub struct EditDraft {
    pub id: i64,
    pub name: String,
    pub template: String,
}

pub struct TemplateListState {
    client: Option<ApiClient>,

    pub templates: Vec<Template>,
    pub loaded: bool,
    pub loading: bool,
    pub mutating: bool,
    pub banner: Option<Banner>,

    pub edit: Option<EditDraft>,
    pub loading_edit: Option<i64>,
    pub pending_delete: Option<(i64, String)>,

    reloads_requested: u64,

    // Async state bridges.
    list_slot: Option<Slot<Result<Vec<Template>, ApiError>>>,
    edit_slot: Option<Slot<Result<Template, ApiError>>>,
    mutation_slot: Option<Slot<Result<String, String>>>,
}

impl TemplateListState {
    pub fn new(client: Option<ApiClient>) -> Self {
        Self {
            client,
            templates: Vec::new(),
            loaded: false,
            loading: false,
            mutating: false,
            banner: None,
            edit: None,
            loading_edit: None,
            pending_delete: None,
            reloads_requested: 0,
            list_slot: None,
            edit_slot: None,
            mutation_slot: None,
        }
    }

    /// Explicit refresh: every successful mutation triggers exactly one of
    /// these rather than patching the list locally.
    pub fn refresh(&mut self) {
        self.reloads_requested += 1;
        self.load_templates();
    }

    pub fn reloads_requested(&self) -> u64 {
        self.reloads_requested
    }

    pub fn load_templates(&mut self) {
        if self.loading {
            return;
        }
        let Some(client) = self.client.clone() else {
            self.banner = Some(Banner::error("Not connected to the API server"));
            return;
        };

        self.loading = true;
        let slot = async_bridge::new_slot();
        self.list_slot = Some(slot.clone());

        async_bridge::spawn_detached(async move {
            let result = client.list_templates().await;
            if let Err(e) = &result {
                log::warn!("failed to load templates: {e}");
            }
            async_bridge::fill(&slot, result);
        });
    }

    /// Fetch the template and swap its card for an inline edit form.
    pub fn begin_edit(&mut self, id: i64) {
        if self.loading_edit.is_some() {
            return;
        }
        let Some(client) = self.client.clone() else {
            self.banner = Some(Banner::error("Not connected to the API server"));
            return;
        };

        self.loading_edit = Some(id);
        let slot = async_bridge::new_slot();
        self.edit_slot = Some(slot.clone());

        async_bridge::spawn_detached(async move {
            async_bridge::fill(&slot, client.get_template(id).await);
        });
    }

    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    pub fn submit_edit(&mut self) {
        if self.mutating {
            return;
        }
        let Some(draft) = self.edit.clone() else {
            return;
        };
        let Some(client) = self.client.clone() else {
            self.banner = Some(Banner::error("Not connected to the API server"));
            return;
        };

        self.mutating = true;
        let slot = async_bridge::new_slot();
        self.mutation_slot = Some(slot.clone());

        async_bridge::spawn_detached(async move {
            let outcome = match client
                .update_template(draft.id, &draft.name, &draft.template)
                .await
            {
                Ok(saved) => Ok(format!("\"{}\" updated", saved.name)),
                Err(e) => Err(format!("Failed to update \"{}\": {}", draft.name, e)),
            };
            async_bridge::fill(&slot, outcome);
        });
    }

    /// Deletion is destructive, so it only arms a confirmation; nothing is
    /// sent until the user confirms.
    pub fn request_delete(&mut self, id: i64, name: &str) {
        self.pending_delete = Some((id, name.to_string()));
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn confirm_delete(&mut self) {
        if self.mutating {
            return;
        }
        let Some((id, name)) = self.pending_delete.take() else {
            return;
        };
        let Some(client) = self.client.clone() else {
            self.banner = Some(Banner::error("Not connected to the API server"));
            return;
        };

        self.mutating = true;
        let slot = async_bridge::new_slot();
        self.mutation_slot = Some(slot.clone());

        async_bridge::spawn_detached(async move {
            let outcome = match client.delete_template(id).await {
                Ok(deleted) => Ok(format!("\"{}\" deleted", deleted.name)),
                Err(e) => Err(format!("Failed to delete \"{}\": {}", name, e)),
            };
            async_bridge::fill(&slot, outcome);
        });
    }

    /// Poll async outcomes; called once per frame by the app.
    pub fn update_from_async(&mut self) {
        if let Some(result) = async_bridge::poll(&mut self.list_slot) {
            self.apply_list_result(result);
        }
        if let Some(result) = async_bridge::poll(&mut self.edit_slot) {
            self.apply_edit_template(result);
        }
        if let Some(result) = async_bridge::poll(&mut self.mutation_slot) {
            self.apply_mutation_result(result);
        }
    }

    pub fn apply_list_result(&mut self, result: Result<Vec<Template>, ApiError>) {
        self.loading = false;
        match result {
            Ok(templates) => {
                log::info!("loaded {} templates", templates.len());
                self.templates = templates;
                self.loaded = true;
            }
            Err(e) => {
                self.banner = Some(Banner::error(format!("Failed to load templates: {e}")));
            }
        }
    }

    pub fn apply_edit_template(&mut self, result: Result<Template, ApiError>) {
        self.loading_edit = None;
        match result {
            Ok(template) => {
                self.edit = Some(EditDraft {
                    id: template.id,
                    name: template.name,
                    template: template.template,
                });
            }
            Err(e) => {
                self.banner = Some(Banner::error(format!("Failed to load the template: {e}")));
            }
        }
    }

    pub fn apply_mutation_result(&mut self, result: Result<String, String>) {
        self.mutating = false;
        match result {
            Ok(message) => {
                self.banner = Some(Banner::info(message));
                self.edit = None;
                self.refresh();
            }
            Err(message) => {
                self.banner = Some(Banner::error(message));
            }
        }
    }

    pub fn is_busy(&self) -> bool {
        self.loading || self.mutating || self.loading_edit.is_some()
    }
}

/// Tag text shown on a card for one variable.
pub fn variable_tag(spec: &crate::api_client::VariableSpec) -> String {
    format!("{} ({})", spec.name, spec.var_type)
}
