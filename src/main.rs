//! Demo host for glass-alert.
//!
//! Plays the role of the embedding application: opens representative
//! alerts through an AlertManager, toggles the dialog theme at runtime,
//! applies optional JSON theme overrides, and keeps a timestamped log
//! of every result the dialogs hand back.
//!
//! Run with `RUST_LOG=glass_alert=debug` to see the dialog's own
//! open/close lines on stderr.

use chrono::Local;
use eframe::egui;
use tracing_subscriber::EnvFilter;

use glass_alert::{AlertManager, AlertRequest, AlertTheme, ButtonSpec, DialogResult, ThemeOverrides};

struct DemoApp {
    alerts: AlertManager,

    // Theme selection ("dark" or "light") plus the raw overrides JSON
    // from the text box and the last parse error, if any.
    theme: String,
    overrides_input: String,
    overrides_error: Option<String>,

    // Timestamped results, newest last.
    result_log: Vec<String>,
}

impl DemoApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self {
            alerts: AlertManager::new(),
            theme: "dark".to_string(),
            overrides_input: String::new(),
            overrides_error: None,
            result_log: Vec::new(),
        }
    }

    fn base_theme(&self) -> AlertTheme {
        match self.theme.as_str() {
            "light" => AlertTheme::light(),
            _ => AlertTheme::dark(),
        }
    }

    /// Rebuild the manager's theme from the toggle and the overrides
    /// box. A parse failure keeps the base theme and surfaces the error
    /// next to the box.
    fn apply_theme(&mut self) {
        let mut theme = self.base_theme();
        self.overrides_error = None;
        let raw = self.overrides_input.trim();
        if !raw.is_empty() {
            match ThemeOverrides::from_json(raw) {
                Ok(overrides) => theme = theme.with_overrides(&overrides),
                Err(e) => self.overrides_error = Some(e.to_string()),
            }
        }
        self.alerts.set_theme(theme);
    }

    fn log_result(&mut self, result: &DialogResult) {
        let ts = Local::now().format("%H:%M:%S").to_string();
        let line = match result.action() {
            Some(id) => format!("[{}] selected '{}'", ts, id),
            None => format!("[{}] dismissed", ts),
        };
        self.result_log.push(line);
        // Keep log from growing too large
        if self.result_log.len() > 500 {
            self.result_log.remove(0);
        }
    }

    fn render_controls(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Theme:");
                if ui.selectable_label(self.theme == "dark", "Dark").clicked() {
                    self.theme = "dark".into();
                    ui.ctx().set_visuals(egui::Visuals::dark());
                    self.apply_theme();
                }
                if ui.selectable_label(self.theme == "light", "Light").clicked() {
                    self.theme = "light".into();
                    ui.ctx().set_visuals(egui::Visuals::light());
                    self.apply_theme();
                }

                ui.separator();

                ui.label("Overrides:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.overrides_input)
                        .desired_width(260.0)
                        .hint_text(r##"{"accent": "#ff8800"}"##),
                );
                if ui.button("Apply").clicked() {
                    self.apply_theme();
                }
                if let Some(ref err) = self.overrides_error {
                    ui.colored_label(egui::Color32::LIGHT_RED, err);
                }
            });
        });
    }

    fn render_alert_picker(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("alert_picker")
            .resizable(false)
            .default_width(190.0)
            .show(ctx, |ui| {
                ui.heading("Alerts");
                ui.separator();

                if ui.button("Message only").clicked() {
                    self.alerts.open(
                        AlertRequest::new("Model synchronized with central.")
                            .title("Sync Complete"),
                    );
                }
                if ui.button("OK / Cancel").clicked() {
                    self.alerts.open(
                        AlertRequest::ok_cancel("Purge 14 unused images from the model?")
                            .title("Purge Images"),
                    );
                }
                if ui.button("Yes / No").clicked() {
                    self.alerts.open(
                        AlertRequest::yes_no("Save changes before closing?")
                            .title("Unsaved Changes"),
                    );
                }
                if ui.button("Disabled option").clicked() {
                    self.alerts.open(
                        AlertRequest::new(
                            "A newer shared parameter file is available. \
                             Merging is not possible while another user holds the file.",
                        )
                        .title("Shared Parameters")
                        .button(ButtonSpec::new("Reload", "reload"))
                        .button(ButtonSpec::new("Merge", "merge").disabled())
                        .button(ButtonSpec::new("Ignore", "ignore")),
                    );
                }
                if ui.button("Many options").clicked() {
                    let options = [
                        ("Open", "open"),
                        ("Open Read-Only", "read-only"),
                        ("Detach from Central", "detach"),
                        ("Audit", "audit"),
                        ("New Local", "new-local"),
                        ("Cancel", "cancel"),
                    ];
                    self.alerts.open(
                        AlertRequest::new("How should the central model be opened?")
                            .title("Open Model")
                            .buttons(options.map(|(label, action)| ButtonSpec::new(label, action))),
                    );
                }
                if ui.button("Long message").clicked() {
                    self.alerts
                        .open(AlertRequest::ok(audit_report()).title("Audit Report"));
                }
            });
    }

    fn render_result_log(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Results");
            ui.separator();
            if self.result_log.is_empty() {
                ui.label("No results yet. Open an alert from the left.");
                return;
            }
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.result_log {
                        ui.label(line);
                    }
                });
        });
    }
}

impl eframe::App for DemoApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.render_controls(ctx);
        self.render_alert_picker(ctx);
        self.render_result_log(ctx);

        // The alert renders above the panels; the manager hands the
        // result back exactly once, on the frame the dialog closes.
        if let Some(result) = self.alerts.render(ctx) {
            self.log_result(&result);
        }
    }
}

/// A message long enough to push the dialog past its height cap.
fn audit_report() -> String {
    let mut message = String::from("Audit found the following issues:\n");
    for i in 1..=60 {
        message.push_str(&format!(
            "\n{i:>3}. Element {} has an unresolved reference.",
            100_000 + 37 * i
        ));
    }
    message
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 520.0])
            .with_min_inner_size([560.0, 380.0]),
        ..Default::default()
    };

    eframe::run_native(
        "glass-alert demo",
        options,
        Box::new(|cc| Ok(Box::new(DemoApp::new(cc)))),
    )
}
