#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::thread;

use clap::Parser;
use eframe::{egui, App, NativeOptions};

use codeweave_gui::client::generation::GenerationSlot;
use codeweave_gui::client::session::SessionContext;
use codeweave_gui::composing::meta_prompt::compose_meta_prompt;
use codeweave_gui::config::{self, Config};
use codeweave_gui::error::GenerateError;
use codeweave_gui::parsing::llm_parser::parse_model_response;
use codeweave_gui::render::cards::{CardKind, CardSet};
use codeweave_gui::types::llm_data::GenerationRequest;

#[derive(Parser, Debug)]
#[command(name = "codeweave", about = "Prompt-to-code mapping viewer")]
struct Cli {
    /// Path to an optional config.toml (model, endpoint, temperature).
    #[arg(long, default_value = "config.toml")]
    config: String,
}

enum Screen {
    ApiKey,
    Main,
}

// Validation errors block in a dialog; invocation/parse errors show inline
// in the output area.
fn error_goes_to_blocking_dialog(err: &GenerateError) -> bool {
    matches!(err, GenerateError::Validation(_))
}

struct CodeWeaveApp {
    screen: Screen,
    config: Config,
    config_error: Option<String>,

    // Credential screen
    api_key_input: String,
    start_error: Option<String>,

    // Main screen: inputs
    session: Option<SessionContext>,
    language_input: String,
    prompt_input: String,

    // One generation in flight at most; the button is disabled meanwhile.
    generation: GenerationSlot,
    active_language: String,

    // Output area
    validation_notice: Option<String>,
    generation_error: Option<String>,
    card_set: Option<CardSet>,
    generated_code: String,
}

impl CodeWeaveApp {
    fn new(_cc: &eframe::CreationContext<'_>, config_path: &str) -> Self {
        let mut config_error = None;
        let config = match config::load_config_from_file(config_path) {
            Ok(loaded) => loaded,
            Err(err_msg) => {
                log::warn!("Config load failed, using defaults: {}", err_msg);
                config_error = Some(err_msg);
                Config::default()
            }
        };

        Self {
            screen: Screen::ApiKey,
            config,
            config_error,
            api_key_input: String::new(),
            start_error: None,
            session: None,
            language_input: String::new(),
            prompt_input: String::new(),
            generation: GenerationSlot::new(),
            active_language: String::new(),
            validation_notice: None,
            generation_error: None,
            card_set: None,
            generated_code: String::new(),
        }
    }

    fn reset_output(&mut self) {
        self.generation_error = None;
        self.card_set = None;
        self.generated_code.clear();
    }

    fn report_error(&mut self, err: GenerateError) {
        if error_goes_to_blocking_dialog(&err) {
            self.validation_notice = Some(err.to_string());
        } else {
            log::error!("Generation failed: {}", err);
            self.generation_error = Some(err.to_string());
        }
    }

    // Credential validation gate: builds the session context that the rest
    // of the app holds for the remaining process lifetime.
    fn start_session(&mut self) {
        match SessionContext::new(&self.api_key_input, &self.config) {
            Ok(session) => {
                self.session = Some(session);
                self.api_key_input.clear();
                self.start_error = None;
                self.screen = Screen::Main;
            }
            Err(e) => {
                self.start_error = Some(e.to_string());
            }
        }
    }

    fn start_generation(&mut self, ctx: &egui::Context) {
        let request = match GenerationRequest::validated(&self.language_input, &self.prompt_input)
        {
            Ok(req) => req,
            Err(e) => {
                self.report_error(e);
                return;
            }
        };
        let session = match &self.session {
            Some(s) => s.clone(),
            None => {
                self.report_error(GenerateError::ModelInvocation(
                    "No active session.".to_string(),
                ));
                return;
            }
        };

        self.reset_output();
        self.active_language = request.target_language.clone();

        let tx = self.generation.begin();
        let repaint_ctx = ctx.clone();
        thread::spawn(move || {
            let instruction = compose_meta_prompt(&request);
            let outcome = session
                .submit(&instruction)
                .and_then(|raw| parse_model_response(&raw));
            // The receiver may already be gone if the app shut down.
            let _ = tx.send(outcome);
            repaint_ctx.request_repaint();
        });
    }

    // The slot clears its in-flight state on every finished poll, so the
    // generate button always comes back.
    fn poll_generation(&mut self) {
        if let Some(result) = self.generation.poll() {
            match result {
                Ok(response) => {
                    self.card_set =
                        Some(CardSet::from_mapping(&response.mapping, &self.active_language));
                    self.generated_code = response.code;
                }
                Err(e) => self.report_error(e),
            }
        }
    }

    fn draw_api_key_screen(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(120.0);
                ui.heading("CodeWeave");
                ui.label("Enter your Gemini API key to start. It is kept in memory only.");
                ui.add_space(10.0);
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.api_key_input)
                        .password(true)
                        .hint_text("API key")
                        .desired_width(320.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                ui.add_space(6.0);
                if ui.button("Start").clicked() || submitted {
                    self.start_session();
                }
                if let Some(err) = &self.start_error {
                    ui.add_space(6.0);
                    ui.colored_label(egui::Color32::RED, err);
                }
                if let Some(err) = &self.config_error {
                    ui.add_space(6.0);
                    ui.colored_label(egui::Color32::YELLOW, format!("Config: {}", err));
                }
            });
        });
    }

    fn draw_validation_dialog(&mut self, ctx: &egui::Context) {
        let message = match &self.validation_notice {
            Some(msg) => msg.clone(),
            None => return,
        };
        egui::Window::new("Check your input")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                ui.add_space(6.0);
                if ui.button("OK").clicked() {
                    self.validation_notice = None;
                }
            });
    }

    fn draw_main_screen(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("input_panel").show(ctx, |ui| {
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                ui.label("Language/Framework:");
                ui.add(
                    egui::TextEdit::singleline(&mut self.language_input)
                        .hint_text("e.g. Python, React")
                        .desired_width(200.0),
                );
                if let Some(session) = &self.session {
                    ui.weak(format!("model: {}", session.model()));
                }
            });
            ui.add_space(4.0);
            ui.label("Prompt:");
            ui.add(
                egui::TextEdit::multiline(&mut self.prompt_input)
                    .hint_text("Describe the code you want...")
                    .desired_rows(3)
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(4.0);
            let in_flight = self.generation.is_in_flight();
            let label = if in_flight { "⏳ Generating..." } else { "🚀 Generate" };
            if ui.add_enabled(!in_flight, egui::Button::new(label)).clicked() {
                self.start_generation(ctx);
            }
            ui.add_space(6.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            if let Some(err) = &self.generation_error {
                ui.colored_label(egui::Color32::RED, err);
                ui.separator();
            }

            if !self.generated_code.is_empty() {
                ui.collapsing("Full generated code", |ui| {
                    egui::ScrollArea::vertical()
                        .id_source("full_code_scroll")
                        .max_height(200.0)
                        .show(ui, |ui| {
                            let mut s_display = self.generated_code.clone();
                            ui.add(
                                egui::TextEdit::multiline(&mut s_display)
                                    .font(egui::TextStyle::Monospace)
                                    .desired_width(f32::INFINITY)
                                    .interactive(false)
                                    .frame(false),
                            );
                        });
                });
                ui.separator();
            }

            ui.columns(2, |columns| {
                Self::draw_card_column(
                    &mut columns[0],
                    "Your Prompt",
                    "prompt_cards_scroll",
                    &mut self.card_set,
                    CardKind::Prompt,
                );
                Self::draw_card_column(
                    &mut columns[1],
                    "Generated Code",
                    "code_cards_scroll",
                    &mut self.card_set,
                    CardKind::Code,
                );
            });
        });

        self.draw_validation_dialog(ctx);
    }

    fn draw_card_column(
        ui: &mut egui::Ui,
        heading: &str,
        scroll_id: &str,
        card_set: &mut Option<CardSet>,
        kind: CardKind,
    ) {
        ui.heading(heading);
        ui.separator();
        let set = match card_set {
            Some(set) if !set.is_empty() => set,
            _ => {
                ui.label("Generated segments appear here.");
                return;
            }
        };
        egui::ScrollArea::vertical()
            .id_source(scroll_id)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for idx in set.indices_of(kind) {
                    Self::draw_card(ui, set, idx);
                    ui.add_space(6.0);
                }
            });
    }

    fn draw_card(ui: &mut egui::Ui, set: &mut CardSet, idx: usize) {
        let (accent, linked, kind, text, syntax_tag) = {
            let card = set.card(idx);
            (
                card.color,
                card.is_linked(),
                card.kind,
                card.text.clone(),
                card.syntax_tag.clone(),
            )
        };
        let fill = if linked {
            ui.visuals().widgets.hovered.weak_bg_fill
        } else {
            ui.visuals().extreme_bg_color
        };
        let stroke_width = if linked { 2.5 } else { 1.5 };

        let frame = egui::Frame::group(ui.style())
            .fill(fill)
            .stroke(egui::Stroke::new(stroke_width, accent))
            .inner_margin(egui::Margin::same(8.0));
        let response = frame
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                match kind {
                    CardKind::Prompt => {
                        ui.label(&text);
                    }
                    CardKind::Code => {
                        if let Some(tag) = &syntax_tag {
                            ui.weak(tag);
                        }
                        ui.label(egui::RichText::new(&text).monospace());
                    }
                }
            })
            .response
            .interact(egui::Sense::hover());

        // Immediate, per-frame hover transitions; both calls are no-ops
        // unless they change the origin card.
        if response.hovered() {
            set.pointer_entered(idx);
        } else {
            set.pointer_left(idx);
        }
    }
}

impl App for CodeWeaveApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_generation();
        match self.screen {
            Screen::ApiKey => self.draw_api_key_screen(ctx),
            Screen::Main => self.draw_main_screen(ctx),
        }
    }
}

fn main() -> Result<(), eframe::Error> {
    env_logger::init();
    let cli = Cli::parse();
    let options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };
    eframe::run_native(
        "CodeWeave - Prompt to Code Mapper",
        options,
        Box::new(move |cc| Box::new(CodeWeaveApp::new(cc, &cli.config))),
    )
}
