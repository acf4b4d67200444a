/*!
 * Desktop front end for covid-hospi
 *
 * Loads the hospital feed in the background, offers the five series toggles as
 * checkboxes and redraws the chart whenever the selection changes.
 *
 * Platform support: Windows, macOS, Linux
 */

use anyhow::Result;
use covid_hospi::config::{DEFAULT_HEIGHT, DEFAULT_WIDTH};
use covid_hospi::selection::{PROMPT, Toggle};
use covid_hospi::viz::{self, ChartPlan};
use covid_hospi::{Client, DailyAggregate, SeriesSelection, Source, loader};
use eframe::egui;
use std::sync::mpsc;
use std::thread;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1100.0, 900.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("COVID-19 - données hospitalières"),
        ..Default::default()
    };

    eframe::run_native(
        "covid-hospi",
        options,
        Box::new(|_cc| Ok(Box::new(HospiApp::new()))),
    )
}

/// Main application state
struct HospiApp {
    source: String,
    toggles: [Toggle; 5],
    days: Option<Vec<DailyAggregate>>,
    chart: Option<egui::TextureHandle>,
    dirty: bool,

    is_loading: bool,
    status_message: String,
    error_message: String,

    load_receiver: Option<mpsc::Receiver<Result<Vec<DailyAggregate>, String>>>,
}

impl HospiApp {
    fn new() -> Self {
        let mut app = Self {
            source: Source::default().to_string(),
            toggles: SeriesSelection::default().toggles(),
            days: None,
            chart: None,
            dirty: false,
            is_loading: false,
            status_message: String::new(),
            error_message: String::new(),
            load_receiver: None,
        };
        app.start_loading();
        app
    }

    fn selection(&self) -> SeriesSelection {
        SeriesSelection::from_toggles(&self.toggles)
    }

    fn start_loading(&mut self) {
        self.is_loading = true;
        self.error_message.clear();
        self.status_message = format!("Téléchargement de {} ...", self.source);

        let (sender, receiver) = mpsc::channel();
        self.load_receiver = Some(receiver);
        let source: Source = match self.source.parse() {
            Ok(s) => s,
            Err(never) => match never {},
        };

        thread::spawn(move || {
            let result = Client::new()
                .and_then(|client| loader::load(&client, &source))
                .map_err(|e| format!("Échec du chargement : {}", error_chain(&e)));
            let _ = sender.send(result);
        });
    }

    fn check_load_result(&mut self) {
        if let Some(receiver) = &self.load_receiver
            && let Ok(result) = receiver.try_recv()
        {
            self.is_loading = false;
            self.load_receiver = None;
            match result {
                Ok(days) => {
                    self.status_message = match (days.first(), days.last()) {
                        (Some(a), Some(b)) => {
                            format!("{} jours chargés ({} → {})", days.len(), a.date, b.date)
                        }
                        _ => String::new(),
                    };
                    self.days = Some(days);
                    self.dirty = true;
                }
                Err(e) => {
                    self.error_message = e;
                    self.status_message.clear();
                }
            }
        }
    }

    fn plan(&self) -> Option<ChartPlan> {
        self.days
            .as_deref()
            .and_then(|days| viz::plan_chart(days, &self.selection()))
    }

    fn redraw(&mut self, ctx: &egui::Context) {
        self.dirty = false;
        let Some(plan) = self.plan() else {
            self.chart = None;
            return;
        };
        match viz::render_rgb(&plan, DEFAULT_WIDTH, DEFAULT_HEIGHT) {
            Ok(rgb) => {
                let image = egui::ColorImage::from_rgb(
                    [DEFAULT_WIDTH as usize, DEFAULT_HEIGHT as usize],
                    &rgb,
                );
                self.chart = Some(ctx.load_texture("chart", image, egui::TextureOptions::LINEAR));
            }
            Err(e) => {
                self.error_message = format!("Échec du rendu : {e}");
                self.chart = None;
            }
        }
    }

    fn save_chart(&mut self) {
        let Some(plan) = self.plan() else {
            return;
        };
        let mut dialog = rfd::FileDialog::new()
            .add_filter("PNG", &["png"])
            .add_filter("SVG", &["svg"])
            .set_file_name("covid-hospi.png");
        if let Some(dir) = dirs::picture_dir().or_else(dirs::home_dir) {
            dialog = dialog.set_directory(dir);
        }
        if let Some(path) = dialog.save_file() {
            match viz::render_chart(&plan, &path, DEFAULT_WIDTH, DEFAULT_HEIGHT) {
                Ok(()) => self.status_message = format!("Graphique enregistré : {}", path.display()),
                Err(e) => self.error_message = format!("Échec de l'enregistrement : {e}"),
            }
        }
    }
}

fn error_chain(e: &dyn std::error::Error) -> String {
    let mut msg = e.to_string();
    let mut cur = e.source();
    while let Some(inner) = cur {
        msg.push_str(": ");
        msg.push_str(&inner.to_string());
        cur = inner.source();
    }
    msg
}

impl eframe::App for HospiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.check_load_result();

        // Request repaint if loading (for spinner animation)
        if self.is_loading {
            ctx.request_repaint();
        }

        egui::SidePanel::left("controls").show(ctx, |ui| {
            ui.heading("Données hospitalières");
            ui.add_space(10.0);

            ui.label(PROMPT);
            ui.add_space(5.0);
            for t in self.toggles.iter_mut() {
                if ui.checkbox(&mut t.value, t.label).changed() {
                    self.dirty = true;
                }
            }

            ui.add_space(10.0);
            ui.collapsing("Source", |ui| {
                ui.text_edit_singleline(&mut self.source)
                    .on_hover_text("URL ou fichier CSV local");
                if ui
                    .add_enabled(!self.is_loading, egui::Button::new("Recharger"))
                    .clicked()
                {
                    self.start_loading();
                }
            });

            ui.add_space(10.0);
            ui.horizontal(|ui| {
                let can_save = self.chart.is_some() && !self.is_loading;
                if ui
                    .add_enabled(can_save, egui::Button::new("Enregistrer…"))
                    .clicked()
                {
                    self.save_chart();
                }
                if self.is_loading {
                    ui.spinner();
                }
            });

            ui.add_space(10.0);
            if !self.status_message.is_empty() {
                ui.colored_label(egui::Color32::DARK_GREEN, &self.status_message);
            }
            if !self.error_message.is_empty() {
                ui.colored_label(egui::Color32::RED, &self.error_message);
            }
        });

        if self.dirty {
            self.redraw(ctx);
        }

        egui::CentralPanel::default().show(ctx, |ui| match &self.chart {
            Some(tex) => {
                ui.add(
                    egui::Image::new(egui::load::SizedTexture::from_handle(tex)).shrink_to_fit(),
                );
            }
            None if self.days.is_some() => {
                ui.label("Aucun graphique : sélectionnez au moins une série de cas.");
            }
            None => {}
        });
    }
}
