//! Template list view: one card per template with variable tags, a
//! collapsible body, inline editing, and confirmed deletion.

use crate::banner;
use crate::list_state::{variable_tag, TemplateListState};

pub struct TemplateListPanel;

impl TemplateListPanel {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&mut self, ui: &mut egui::Ui, state: &mut TemplateListState) {
        ui.horizontal(|ui| {
            ui.heading("Templates");
            if ui.button("🔄 Reload").clicked() {
                state.load_templates();
            }
            if state.is_busy() {
                ui.spinner();
            }
        });
        banner::show(ui, &mut state.banner);
        ui.separator();

        if state.loading && state.templates.is_empty() {
            ui.label("Loading templates...");
            return;
        }

        if state.loaded && state.templates.is_empty() {
            ui.vertical_centered(|ui| {
                ui.add_space(40.0);
                ui.label("No templates registered yet");
            });
            return;
        }

        // Cards are rendered from a snapshot so actions can mutate state.
        let templates = state.templates.clone();
        egui::ScrollArea::vertical()
            .id_salt("template_list")
            .show(ui, |ui| {
                for template in &templates {
                    ui.group(|ui| {
                        ui.heading(&template.name);

                        if state.edit.as_ref().map(|d| d.id) == Some(template.id) {
                            Self::render_edit_form(ui, state);
                            return;
                        }

                        ui.horizontal_wrapped(|ui| {
                            ui.small("Variables:");
                            if template.variables.is_empty() {
                                ui.small("(none)");
                            }
                            for spec in &template.variables {
                                ui.small(
                                    egui::RichText::new(variable_tag(spec))
                                        .background_color(ui.visuals().faint_bg_color),
                                );
                            }
                        });

                        egui::CollapsingHeader::new("Show template body")
                            .id_salt(("template_body", template.id))
                            .show(ui, |ui| {
                                ui.label(
                                    egui::RichText::new(template.template.as_str()).monospace(),
                                );
                            });

                        ui.horizontal(|ui| {
                            let idle = !state.is_busy() && state.edit.is_none();
                            if ui
                                .add_enabled(idle, egui::Button::new("✏ Edit"))
                                .clicked()
                            {
                                state.begin_edit(template.id);
                            }
                            if ui
                                .add_enabled(idle, egui::Button::new("🗑 Delete"))
                                .clicked()
                            {
                                state.request_delete(template.id, &template.name);
                            }
                        });
                    });
                    ui.add_space(6.0);
                }
            });

        self.render_delete_confirmation(ui, state);
    }

    fn render_edit_form(ui: &mut egui::Ui, state: &mut TemplateListState) {
        let mut save = false;
        let mut cancel = false;

        if let Some(draft) = state.edit.as_mut() {
            ui.label("Name");
            ui.add(egui::TextEdit::singleline(&mut draft.name).desired_width(300.0));

            ui.label("Template body");
            ui.add(
                egui::TextEdit::multiline(&mut draft.template)
                    .font(egui::TextStyle::Monospace)
                    .desired_rows(10)
                    .desired_width(f32::INFINITY),
            );

            ui.horizontal(|ui| {
                save = ui
                    .add_enabled(!state.mutating, egui::Button::new("💾 Update"))
                    .clicked();
                cancel = ui.button("Cancel").clicked();
                if state.mutating {
                    ui.spinner();
                }
            });
        }

        if save {
            state.submit_edit();
        } else if cancel {
            state.cancel_edit();
        }
    }

    fn render_delete_confirmation(&self, ui: &mut egui::Ui, state: &mut TemplateListState) {
        let Some((_, name)) = state.pending_delete.clone() else {
            return;
        };

        egui::Window::new("Confirm deletion")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ui.ctx(), |ui| {
                ui.label(format!("Delete \"{name}\"? This cannot be undone."));
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("🗑 Delete").clicked() {
                        state.confirm_delete();
                    }
                    if ui.button("Cancel").clicked() {
                        state.cancel_delete();
                    }
                });
            });
    }
}

impl Default for TemplateListPanel {
    fn default() -> Self {
        Self::new()
    }
}
