//! State manager for the new-template form.

use crate::api_client::{ApiClient, ApiError, SavedTemplate};
use crate::async_bridge::{self, Slot};
use crate::banner::Banner;

pub struct CreateTemplateState {
    client: Option<ApiClient>,

    pub name: String,
    pub body: String,
    pub submitting: bool,
    pub banner: Option<Banner>,

    /// Set after a successful create; the generate view's template picker
    /// must be refreshed. Consumed by the app once per event.
    refresh_needed: bool,

    submit_slot: Option<Slot<Result<SavedTemplate, ApiError>>>,
}

impl CreateTemplateState {
    pub fn new(client: Option<ApiClient>) -> Self {
        Self {
            client,
            name: String::new(),
            body: String::new(),
            submitting: false,
            banner: None,
            refresh_needed: false,
            submit_slot: None,
        }
    }

    /// POST the form as-is; the server validates and reports back.
    pub fn submit(&mut self) {
        if self.submitting {
            return;
        }
        let Some(client) = self.client.clone() else {
            self.banner = Some(Banner::error("Not connected to the API server"));
            return;
        };

        self.submitting = true;
        let name = self.name.clone();
        let body = self.body.clone();
        let slot = async_bridge::new_slot();
        self.submit_slot = Some(slot.clone());

        async_bridge::spawn_detached(async move {
            async_bridge::fill(&slot, client.create_template(&name, &body).await);
        });
    }

    pub fn update_from_async(&mut self) {
        if let Some(result) = async_bridge::poll(&mut self.submit_slot) {
            self.apply_submit_result(result);
        }
    }

    pub fn apply_submit_result(&mut self, result: Result<SavedTemplate, ApiError>) {
        self.submitting = false;
        match result {
            Ok(saved) => {
                log::info!("registered template \"{}\" (id {})", saved.name, saved.id);
                self.banner = Some(Banner::info(format!(
                    "\"{}\" registered ({} variables)",
                    saved.name,
                    saved.variables.len()
                )));
                self.name.clear();
                self.body.clear();
                self.refresh_needed = true;
            }
            Err(e) => {
                self.banner = Some(Banner::error(e.to_string()));
            }
        }
    }

    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_needed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_client::{VariableSpec, VariableType};

    fn saved(name: &str, variable_names: &[&str]) -> SavedTemplate {
        SavedTemplate {
            id: 1,
            name: name.to_string(),
            variables: variable_names
                .iter()
                .map(|n| VariableSpec {
                    name: n.to_string(),
                    var_type: VariableType::String,
                    ..Default::default()
                })
                .collect(),
        }
    }

    #[test]
    fn successful_create_resets_form_and_requests_refresh() {
        let mut state = CreateTemplateState::new(None);
        state.name = "Greeting".to_string();
        state.body = "Hello {{ name }}".to_string();
        state.submitting = true;

        state.apply_submit_result(Ok(saved("Greeting", &["name", "time"])));

        assert!(!state.submitting);
        assert!(state.name.is_empty());
        assert!(state.body.is_empty());
        let banner = state.banner.take().unwrap();
        assert!(!banner.is_error());
        assert_eq!(banner.message(), "\"Greeting\" registered (2 variables)");
        // The refresh event fires once.
        assert!(state.take_refresh_request());
        assert!(!state.take_refresh_request());
    }

    #[test]
    fn server_error_keeps_the_form_contents() {
        let mut state = CreateTemplateState::new(None);
        state.name = "Greeting".to_string();
        state.body = "Hello".to_string();

        state.apply_submit_result(Err(ApiError::Api(
            "Name and template are required".to_string(),
        )));

        assert_eq!(state.name, "Greeting");
        assert_eq!(state.body, "Hello");
        assert!(!state.take_refresh_request());
        let banner = state.banner.take().unwrap();
        assert!(banner.is_error());
        // Validation errors are shown verbatim, without the generic prefix.
        assert_eq!(banner.message(), "Name and template are required");
    }

    #[test]
    fn communication_error_gets_the_generic_prefix() {
        let mut state = CreateTemplateState::new(None);
        state.apply_submit_result(Err(ApiError::Http { status: 503 }));
        let banner = state.banner.take().unwrap();
        assert!(banner.message().starts_with("communication error:"));
    }
}
