//! Generation view: template picker, the dynamic form synthesized from the
//! selected template's variables, and the rendered result with copy and
//! download actions.

use crate::form_model::{range_hint, FieldWidget, FormField, BLANK_CHOICE_LABEL};
use crate::generate_state::{GeneratePhase, GenerateState};

const PICKER_PLACEHOLDER: &str = "-- select a template --";

pub struct GeneratePanel;

impl GeneratePanel {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&mut self, ui: &mut egui::Ui, state: &mut GenerateState) {
        ui.heading("Generate text");
        ui.add_space(4.0);

        self.render_picker(ui, state);

        if state.loading_template {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label("Loading template...");
            });
        }

        if state.phase != GeneratePhase::NoSelection && state.current.is_some() {
            ui.separator();
            for field in &mut state.fields {
                render_field(ui, field);
            }

            ui.horizontal(|ui| {
                if ui
                    .add_enabled(!state.rendering, egui::Button::new("⚙ Generate"))
                    .clicked()
                {
                    state.generate_text();
                }
                if state.rendering {
                    ui.spinner();
                }
            });
        }

        self.render_result(ui, state);
        self.render_alert(ui, state);
    }

    fn render_picker(&self, ui: &mut egui::Ui, state: &mut GenerateState) {
        let mut selection = state.selected_id;
        let closed_text = state
            .selected_id
            .and_then(|id| state.selectable.iter().find(|t| t.id == id))
            .map(|t| t.name.clone())
            .unwrap_or_else(|| PICKER_PLACEHOLDER.to_string());

        ui.horizontal(|ui| {
            ui.label("Template:");
            egui::ComboBox::from_id_salt("template_picker")
                .width(280.0)
                .selected_text(closed_text)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut selection, None, PICKER_PLACEHOLDER);
                    for entry in &state.selectable {
                        ui.selectable_value(&mut selection, Some(entry.id), &entry.name);
                    }
                });
            if state.loading_selectable {
                ui.spinner();
            }
        });

        if selection != state.selected_id {
            state.select_template(selection);
        }
    }

    fn render_result(&self, ui: &mut egui::Ui, state: &mut GenerateState) {
        let Some(result) = state.result.clone() else {
            return;
        };

        ui.separator();
        ui.heading("Result");

        let mut copy = false;
        let mut download = false;
        ui.group(|ui| {
            // Rendered output is shown as plain text, never interpreted.
            let response = ui.label(egui::RichText::new(result.as_str()).monospace());
            if state.scroll_to_result {
                response.scroll_to_me(Some(egui::Align::Min));
                state.scroll_to_result = false;
            }
        });
        ui.horizontal(|ui| {
            copy = ui.button("📋 Copy").clicked();
            download = ui.button("💾 Download").clicked();
        });

        if copy {
            ui.ctx().copy_text(result);
            state.alert = Some("Copied to clipboard".to_string());
        }
        if download {
            state.download_result();
        }
    }

    fn render_alert(&self, ui: &mut egui::Ui, state: &mut GenerateState) {
        let Some(message) = state.alert.clone() else {
            return;
        };

        egui::Window::new("Notice")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ui.ctx(), |ui| {
                ui.label(message);
                ui.add_space(8.0);
                if ui.button("OK").clicked() {
                    state.alert = None;
                }
            });
    }
}

impl Default for GeneratePanel {
    fn default() -> Self {
        Self::new()
    }
}

/// One labeled control per form field, per the schema's widget mapping.
fn render_field(ui: &mut egui::Ui, field: &mut FormField) {
    let FormField {
        name,
        label,
        required,
        description,
        widget,
    } = field;

    ui.horizontal(|ui| {
        ui.label(egui::RichText::new(label.as_str()).strong());
        if *required {
            ui.colored_label(egui::Color32::RED, "*");
        }
    });

    match widget {
        FieldWidget::Checkbox { checked } => {
            ui.checkbox(checked, "");
        }
        FieldWidget::Select {
            options,
            selected,
            blank_option,
        } => {
            let closed_text = match selected {
                Some(choice) => choice.clone(),
                None if *blank_option => BLANK_CHOICE_LABEL.to_string(),
                None => String::new(),
            };
            egui::ComboBox::from_id_salt(("form_field", name.as_str()))
                .width(220.0)
                .selected_text(closed_text)
                .show_ui(ui, |ui| {
                    if *blank_option {
                        ui.selectable_value(selected, None, BLANK_CHOICE_LABEL);
                    }
                    for option in options.iter() {
                        ui.selectable_value(selected, Some(option.clone()), option);
                    }
                });
        }
        FieldWidget::Number {
            text,
            integer,
            min,
            max,
            placeholder,
        } => {
            ui.horizontal(|ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(text)
                        .hint_text(placeholder.clone().unwrap_or_default())
                        .desired_width(160.0),
                );
                // Integers step by whole units, so fractional characters
                // are rejected as they are typed.
                if response.changed() && *integer {
                    text.retain(|c| c.is_ascii_digit() || c == '-' || c == '+');
                }
                if let Some(hint) = range_hint(*min, *max) {
                    ui.small(hint);
                }
            });
        }
        FieldWidget::DateTime { text, placeholder } => {
            ui.add(
                egui::TextEdit::singleline(text)
                    .hint_text(placeholder.clone().unwrap_or_default())
                    .desired_width(220.0),
            );
        }
        FieldWidget::MultilineText { text, placeholder } => {
            ui.add(
                egui::TextEdit::multiline(text)
                    .hint_text(placeholder.as_str())
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );
        }
        FieldWidget::Text { text, placeholder } => {
            ui.add(
                egui::TextEdit::singleline(text)
                    .hint_text(placeholder.clone().unwrap_or_default())
                    .desired_width(f32::INFINITY),
            );
        }
    }

    if let Some(help) = description {
        ui.small(help.as_str());
    }
    ui.add_space(6.0);
}
