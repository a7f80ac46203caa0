//! Wave / Jump demo
//!
//! Loads the bundled character asset into a [`StageHost`] and drives it
//! with three buttons: "Wave" and "Jump" start the canned animations,
//! "Stop" clears the stage. The central panel stands in for a rendered
//! viewport and shows what is anchored and playing.

use eframe::egui;
use pantomime::{Selection, SelectionCell, StageHost, StageStatus};

/// The bundled character asset, resolved relative to this crate.
const STAGE_ASSET: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/assets/character_animations.gltf"
);

struct WaveJumpApp {
    host: StageHost,
    selection: SelectionCell,
    synced_version: u64,
    status: StageStatus,
}

impl WaveJumpApp {
    fn new() -> Self {
        let host = StageHost::from_file(STAGE_ASSET);
        let selection = SelectionCell::new();
        let synced_version = selection.version();

        Self {
            host,
            selection,
            synced_version,
            status: StageStatus::Idle,
        }
    }
}

impl eframe::App for WaveJumpApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. Selection changed (or re-set): re-sync the stage
        if self.selection.version() != self.synced_version {
            self.synced_version = self.selection.version();
            self.status = self.host.sync(self.selection.get());
            log::debug!("Stage sync -> {:?}", self.status);
        }

        // 2. Advance playback. Clamp dt so a dragged window does not warp time.
        let dt = ctx.input(|i| i.stable_dt).min(0.1);
        self.host.advance(dt);

        egui::TopBottomPanel::bottom("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.button("Wave").clicked() {
                    self.selection.set(Selection::Wave);
                }
                if ui.button("Jump").clicked() {
                    self.selection.set(Selection::Jump);
                }
                if ui.button("Stop").clicked() {
                    self.selection.set(Selection::None);
                }
            });
            ui.add_space(4.0);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Character stage");

            if !self.host.is_loaded() {
                ui.label("(empty stage: asset failed to load, see log)");
                return;
            }

            ui.label(format!("Selection: {}", self.selection.get().label()));
            ui.separator();

            if self.host.anchored().is_empty() {
                ui.label("Nothing on stage.");
            } else {
                for &handle in self.host.anchored() {
                    let name = self.host.scene().get_name(handle).unwrap_or("<unnamed>");
                    let position = self
                        .host
                        .scene()
                        .get_node(handle)
                        .map(|node| node.world_matrix().translation)
                        .unwrap_or_default();
                    ui.label(format!(
                        "{name}  @ ({:.2}, {:.2}, {:.2})",
                        position.x, position.y, position.z
                    ));
                }

                ui.separator();
                for action in self.host.active_actions() {
                    ui.label(format!(
                        "{}  {:.2}s / {:.2}s (looping)",
                        action.clip().name,
                        action.time,
                        action.clip().duration
                    ));
                }
            }
        });

        // Keep the playback clock ticking even without input events
        ctx.request_repaint();
    }
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([480.0, 400.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Wave / Jump",
        options,
        Box::new(|_cc| Ok(Box::new(WaveJumpApp::new()))),
    )
}
