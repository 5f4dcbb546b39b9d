//! Application shell: tab routing, theme toggle, and per-frame polling of
//! the state managers' async bridges.

use crate::api_client::ApiClient;
use crate::create_panel::CreateTemplatePanel;
use crate::create_state::CreateTemplateState;
use crate::generate_panel::GeneratePanel;
use crate::generate_state::GenerateState;
use crate::list_panel::TemplateListPanel;
use crate::list_state::TemplateListState;
use crate::theme::ThemePreference;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActiveView {
    Generate,
    Templates,
    Help,
}

pub struct TemplatorApp {
    active_view: ActiveView,
    theme: ThemePreference,
    api_url: String,

    // State managers - single source of truth per view.
    list_state: TemplateListState,
    create_state: CreateTemplateState,
    generate_state: GenerateState,

    // UI components.
    list_panel: TemplateListPanel,
    create_panel: CreateTemplatePanel,
    generate_panel: GeneratePanel,
}

impl TemplatorApp {
    pub fn new(cc: &eframe::CreationContext<'_>, api_url: String) -> Self {
        let theme = ThemePreference::load(cc.storage);
        cc.egui_ctx.set_visuals(theme.visuals());

        let client = ApiClient::new(&api_url);
        log::info!("using API server at {}", client.base_url());

        let mut list_state = TemplateListState::new(Some(client.clone()));
        let create_state = CreateTemplateState::new(Some(client.clone()));
        let mut generate_state = GenerateState::new(Some(client));

        list_state.load_templates();
        generate_state.load_selectable_templates();

        Self {
            active_view: ActiveView::Generate,
            theme,
            api_url,
            list_state,
            create_state,
            generate_state,
            list_panel: TemplateListPanel::new(),
            create_panel: CreateTemplatePanel::new(),
            generate_panel: GeneratePanel::new(),
        }
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("📝 Templator");
                ui.separator();

                for (view, label) in [
                    (ActiveView::Generate, "⚙ Generate"),
                    (ActiveView::Templates, "📋 Templates"),
                    (ActiveView::Help, "❓ Help"),
                ] {
                    if ui
                        .selectable_label(self.active_view == view, label)
                        .clicked()
                    {
                        self.active_view = view;
                        if view == ActiveView::Templates {
                            self.list_state.load_templates();
                        }
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui
                        .button(self.theme.toggle_icon())
                        .on_hover_text("Toggle light/dark theme")
                        .clicked()
                    {
                        self.theme = self.theme.toggled();
                        ctx.set_visuals(self.theme.visuals());
                    }
                });
            });
        });
    }

    fn render_status_bar(&self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("API:");
                ui.monospace(&self.api_url);
                if self.list_state.is_busy() || self.generate_state.is_busy() {
                    ui.separator();
                    ui.spinner();
                    ui.label("Working...");
                }
            });
        });
    }

    fn render_help(ui: &mut egui::Ui) {
        ui.heading("Writing templates");
        ui.add_space(4.0);
        ui.label(
            "Templates use Jinja-style placeholders. Declare each variable in a \
             comment so the generator can build an input form for it:",
        );
        ui.add_space(4.0);
        ui.monospace("{#- @variable name: type=string, label=\"Name\", required=true -#}");
        ui.monospace("Hello {{ name }}!");
        ui.add_space(8.0);
        ui.label("Supported types and their attributes:");
        egui::Grid::new("help_types").striped(true).show(ui, |ui| {
            ui.monospace("string");
            ui.label("single-line text; default, placeholder");
            ui.end_row();
            ui.monospace("integer / number");
            ui.label("numeric input; min, max, default, placeholder");
            ui.end_row();
            ui.monospace("boolean");
            ui.label("checkbox; default=true to pre-check");
            ui.end_row();
            ui.monospace("select");
            ui.label("dropdown; options=[a, b, c], default picks one");
            ui.end_row();
            ui.monospace("array");
            ui.label("multi-line text, split on newlines or commas when rendering");
            ui.end_row();
            ui.monospace("datetime");
            ui.label("ISO date-time text");
            ui.end_row();
        });
        ui.add_space(8.0);
        ui.label(
            "Every type also accepts label=\"...\", required=true and \
             description=\"...\" for the helper text under the control.",
        );
    }
}

impl eframe::App for TemplatorApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.theme.store(storage);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Pick up results of finished network tasks before rendering.
        self.list_state.update_from_async();
        self.create_state.update_from_async();
        self.generate_state.update_from_async();

        // A successful create must refresh the generate view's picker.
        if self.create_state.take_refresh_request() {
            self.generate_state.load_selectable_templates();
        }

        self.render_top_bar(ctx);
        self.render_status_bar(ctx);

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("main_content")
                .show(ui, |ui| match self.active_view {
                    ActiveView::Generate => {
                        self.create_panel.render(ui, &mut self.create_state);
                        ui.separator();
                        self.generate_panel.render(ui, &mut self.generate_state);
                    }
                    ActiveView::Templates => {
                        self.list_panel.render(ui, &mut self.list_state);
                    }
                    ActiveView::Help => {
                        Self::render_help(ui);
                    }
                });
        });

        // Polling-based async handoff needs frames while work is in flight;
        // banners need one to dismiss themselves.
        if self.list_state.is_busy()
            || self.generate_state.is_busy()
            || self.create_state.submitting
            || self.list_state.banner.is_some()
            || self.create_state.banner.is_some()
        {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}
