//! New-template form, shown above the generation form like the original
//! home page.

use crate::banner;
use crate::create_state::CreateTemplateState;

pub struct CreateTemplatePanel;

impl CreateTemplatePanel {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&mut self, ui: &mut egui::Ui, state: &mut CreateTemplateState) {
        ui.heading("Register a template");
        banner::show(ui, &mut state.banner);
        ui.add_space(4.0);

        ui.label("Name");
        ui.add(
            egui::TextEdit::singleline(&mut state.name)
                .hint_text("e.g. Greeting")
                .desired_width(300.0),
        );

        ui.add_space(4.0);
        ui.label("Template body");
        ui.add(
            egui::TextEdit::multiline(&mut state.body)
                .font(egui::TextStyle::Monospace)
                .desired_rows(8)
                .desired_width(f32::INFINITY)
                .hint_text("Hello {{ name }}!\n{#- @variable name: type=string, required=true -#}"),
        );

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            if ui
                .add_enabled(!state.submitting, egui::Button::new("➕ Register"))
                .clicked()
            {
                state.submit();
            }
            if state.submitting {
                ui.spinner();
                ui.label("Registering...");
            }
        });
    }
}

impl Default for CreateTemplatePanel {
    fn default() -> Self {
        Self::new()
    }
}
