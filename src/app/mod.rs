use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Vec2};
use tracing::{error, info};

use crate::config::LayoutConfig;
use crate::layout::RingPlan;
use crate::mobs::{MobDataset, MobId, load_dataset};
use crate::scales::Scales;

mod graph;
mod headless;
mod physics;
mod render_utils;
mod selection;
mod ui;

pub use headless::settled_layout_json;

use physics::{ForceResolver, LayoutNode, TickReport};
use selection::InteractionState;

#[derive(Clone, Debug)]
pub struct DataSource {
    pub data_path: PathBuf,
    pub config: LayoutConfig,
}

pub struct MobRingsApp {
    source: DataSource,
    state: AppState,
    reload_rx: Option<Receiver<Result<MobDataset, String>>>,
}

enum AppState {
    Loading {
        rx: Receiver<Result<MobDataset, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    dataset: MobDataset,
    config: LayoutConfig,
    plan: RingPlan,
    scales: Scales,
    nodes: Vec<LayoutNode>,
    resolver: ForceResolver,
    last_report: Option<TickReport>,
    interaction: InteractionState,
    search: String,
    search_match_cache: Option<SearchMatchCache>,
    pan: Vec2,
    zoom: f32,
    fit_pending: bool,
    live_physics: bool,
    show_labels: bool,
    show_damage_arcs: bool,
    visuals: Vec<graph::NodeVisual>,
}

struct SearchMatchCache {
    query: String,
    matches: Arc<HashSet<MobId>>,
}

impl MobRingsApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, source: DataSource) -> Self {
        let state = Self::start_load(&source);
        Self {
            source,
            state,
            reload_rx: None,
        }
    }

    fn spawn_load(source: &DataSource) -> Receiver<Result<MobDataset, String>> {
        let (tx, rx) = mpsc::channel();
        let path = source.data_path.clone();
        let policy = source.config.loader.missing_numeric;

        thread::spawn(move || {
            let result = load_dataset(&path, policy).map_err(|error| {
                error!(path = %path.display(), "failed to load mob table: {error:#}");
                format!("{error:#}")
            });
            let _ = tx.send(result);
        });

        rx
    }

    fn start_load(source: &DataSource) -> AppState {
        info!(path = %source.data_path.display(), "loading mob table");
        AppState::Loading {
            rx: Self::spawn_load(source),
        }
    }

    fn ready(&self, dataset: MobDataset) -> AppState {
        AppState::Ready(Box::new(ViewModel::new(dataset, self.source.config.clone())))
    }
}

impl eframe::App for MobRingsApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut transition = None;
        let mut retry = false;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(result) => transition = Some(result),
                    Err(TryRecvError::Empty) => ctx.request_repaint(),
                    Err(TryRecvError::Disconnected) => {
                        transition = Some(Err("Background load worker disconnected".to_owned()));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading mob table...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load the mob table");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    retry = ui.button("Retry").clicked();
                });
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let is_reloading = self.reload_rx.is_some();
                model.show(ctx, &self.source, &mut reload_requested, is_reloading);

                if reload_requested && self.reload_rx.is_none() {
                    info!(path = %self.source.data_path.display(), "reloading mob table");
                    self.reload_rx = Some(Self::spawn_load(&self.source));
                }

                if let Some(rx) = self.reload_rx.take() {
                    match rx.try_recv() {
                        Ok(result) => transition = Some(result),
                        Err(TryRecvError::Empty) => {
                            self.reload_rx = Some(rx);
                            ctx.request_repaint();
                        }
                        Err(TryRecvError::Disconnected) => {
                            transition =
                                Some(Err("Background load worker disconnected".to_owned()));
                        }
                    }
                }
            }
        }

        if retry {
            self.reload_rx = None;
            self.state = Self::start_load(&self.source);
            return;
        }

        if let Some(result) = transition {
            self.reload_rx = None;
            self.state = match result {
                Ok(dataset) => self.ready(dataset),
                Err(error) => AppState::Error(error),
            };
        }
    }
}
