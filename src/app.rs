use std::sync::mpsc::{channel, Receiver};
use std::thread;

use eframe::egui;

use crate::config::ViewerConfig;
use crate::data::loader::{load_dataset, LoadError};
use crate::data::model::Dataset;
use crate::state::{AppState, LoadStatus};
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct InflationApp {
    pub state: AppState,
    /// Receiver for the one background load; dropped once it has answered.
    load_rx: Option<Receiver<Result<Dataset, LoadError>>>,
}

impl InflationApp {
    /// Build the app and start the single dataset load.
    pub fn new(ctx: &egui::Context, config: ViewerConfig) -> Self {
        let (tx, rx) = channel();
        let worker_config = config.clone();
        let repaint = ctx.clone();

        thread::spawn(move || {
            let result = load_dataset(&worker_config);
            // The window may already be gone; nothing to do then.
            let _ = tx.send(result);
            repaint.request_repaint();
        });

        Self {
            state: AppState::new(config),
            load_rx: Some(rx),
        }
    }

    /// Hand a finished load over to the state, if one has arrived.
    fn poll_load(&mut self) {
        let Some(rx) = &self.load_rx else {
            return;
        };
        match rx.try_recv() {
            Ok(Ok(dataset)) => {
                log::info!(
                    "Loaded {} records across {} categories",
                    dataset.len(),
                    dataset.categories.len()
                );
                log::debug!("Columns: {:?}", dataset.headers);
                self.state.set_dataset(dataset);
                self.load_rx = None;
            }
            Ok(Err(e)) => {
                log::error!("Failed to load dataset: {e}");
                self.state.set_load_error(&e);
                self.load_rx = None;
            }
            Err(std::sync::mpsc::TryRecvError::Empty) => {}
            Err(std::sync::mpsc::TryRecvError::Disconnected) => {
                log::error!("Loader thread exited without a result");
                self.state.status =
                    LoadStatus::Failed("Error fetching data: loader stopped".into());
                self.load_rx = None;
            }
        }
    }
}

impl eframe::App for InflationApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_load();

        // ---- Top panel: title, selector, status ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: chart ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::inflation_chart(ui, &self.state);
        });
    }
}
