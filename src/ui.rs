use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use chrono::Local;
use eframe::egui::{
    self, Color32, Frame, Margin, RichText, Rounding, ScrollArea, Stroke, style::Visuals,
};
use eframe::egui::epaint::Shadow;
use tracing::{error, warn};

use crate::period::Period;
use crate::stopwatch::TimerState;
use crate::tracker::FocusTracker;

const WINDOW_TITLE: &str = "Focus Mode";
const STATUS_TTL: Duration = Duration::from_secs(10);

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum FocusTab {
    Stopwatch,
    Highscores,
    Goal(Period),
}

impl FocusTab {
    const ALL: [FocusTab; 5] = [
        FocusTab::Stopwatch,
        FocusTab::Highscores,
        FocusTab::Goal(Period::Week),
        FocusTab::Goal(Period::Month),
        FocusTab::Goal(Period::Year),
    ];

    fn label(self) -> &'static str {
        match self {
            FocusTab::Stopwatch => "Stopwatch",
            FocusTab::Highscores => "Highscores",
            FocusTab::Goal(period) => period.title(),
        }
    }
}

/// Runs the window on its own thread and blocks until it closes. The thread owns the
/// tracker exclusively.
pub fn launch(tracker: FocusTracker) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        // Cocoa only allows the event loop on the main thread.
        run(tracker)
    }

    #[cfg(not(target_os = "macos"))]
    {
        let handle = std::thread::Builder::new()
            .name("focus-gui".into())
            .spawn(move || run(tracker))?;
        handle
            .join()
            .map_err(|_| anyhow!("GUI thread panicked"))?
    }
}

fn run(tracker: FocusTracker) -> Result<()> {
    #[cfg_attr(not(any(target_os = "linux", windows)), allow(unused_mut))]
    let mut native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(WINDOW_TITLE)
            .with_inner_size([460.0, 340.0]),
        ..Default::default()
    };

    #[cfg(target_os = "linux")]
    {
        native_options.event_loop_builder = Some(Box::new(|builder| {
            use winit::platform::x11::EventLoopBuilderExtX11;
            builder.with_any_thread(true);
        }));
    }
    #[cfg(windows)]
    {
        native_options.event_loop_builder = Some(Box::new(|builder| {
            use winit::platform::windows::EventLoopBuilderExtWindows;
            builder.with_any_thread(true);
        }));
    }

    eframe::run_native(
        WINDOW_TITLE,
        native_options,
        Box::new(move |_cc| Box::new(FocusApp::new(tracker))),
    )
    .map_err(|err| {
        warn!("GUI exited with an error: {err}");
        anyhow!("eframe error: {err}")
    })
}

struct FocusApp {
    tracker: FocusTracker,
    selected_tab: FocusTab,
    status_message: Option<String>,
    status_since: Option<Instant>,
    style_applied: bool,
}

impl FocusApp {
    fn new(tracker: FocusTracker) -> Self {
        Self {
            tracker,
            selected_tab: FocusTab::Stopwatch,
            status_message: None,
            status_since: None,
            style_applied: false,
        }
    }

    fn ensure_style(&mut self, ctx: &egui::Context) {
        if self.style_applied {
            return;
        }
        self.style_applied = true;

        let mut style = (*ctx.style()).clone();
        style.spacing.item_spacing = egui::vec2(10.0, 10.0);
        style.spacing.window_margin = Margin::symmetric(16.0, 12.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
        ctx.set_style(style);

        let mut visuals = Visuals::dark();
        visuals.window_rounding = Rounding::same(10.0);
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(26, 30, 39);
        visuals.widgets.inactive.bg_fill = Color32::from_rgb(36, 41, 52);
        visuals.widgets.hovered.bg_fill = Color32::from_rgb(46, 51, 64);
        visuals.widgets.active.bg_fill = Color32::from_rgb(56, 61, 74);
        visuals.window_shadow = Shadow::NONE;
        ctx.set_visuals(visuals);
    }

    fn render_tab_bar(&mut self, ui: &mut egui::Ui) {
        ui.horizontal_wrapped(|ui| {
            ui.spacing_mut().item_spacing.x = 8.0;
            for tab in FocusTab::ALL {
                let is_active = self.selected_tab == tab;
                let button = egui::Button::new(tab.label())
                    .min_size(egui::vec2(72.0, 28.0))
                    .fill(if is_active {
                        Color32::from_rgb(82, 96, 122)
                    } else {
                        Color32::from_rgb(36, 41, 52)
                    })
                    .stroke(Stroke::new(
                        1.0,
                        if is_active {
                            Color32::from_rgb(130, 180, 255)
                        } else {
                            Color32::from_rgb(60, 66, 80)
                        },
                    ))
                    .rounding(Rounding::same(8.0));
                if ui.add(button).clicked() {
                    self.selected_tab = tab;
                }
            }
        });
    }

    fn render_stopwatch_tab(&mut self, ui: &mut egui::Ui) {
        let accent = match self.tracker.state() {
            TimerState::Running => Color32::from_rgb(94, 201, 146),
            TimerState::Idle => Color32::from_rgb(210, 214, 222),
        };
        ui.vertical_centered(|ui| {
            ui.label(
                RichText::new(self.tracker.display())
                    .size(48.0)
                    .monospace()
                    .color(accent),
            );
        });
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if ui.button("Start").clicked() {
                self.tracker.start(Instant::now());
            }
            if ui.button("Stop").clicked() {
                self.stop_session();
            }
            if ui.button("Reset").clicked() {
                self.tracker.reset();
            }
        });
    }

    fn stop_session(&mut self) {
        match self.tracker.stop() {
            Ok(Some(record)) => self.set_status(format!(
                "Saved {} session at {}.",
                record.formatted,
                Local::now().format("%H:%M:%S")
            )),
            Ok(None) => {}
            Err(err) => {
                error!("failed to save session: {err:?}");
                self.set_status(format!("Failed to save session: {err}"));
            }
        }
    }

    fn render_highscores_tab(&mut self, ui: &mut egui::Ui) {
        let mut clicked = None;
        Frame::group(ui.style())
            .fill(Color32::from_rgb(33, 38, 49))
            .inner_margin(Margin::symmetric(10.0, 8.0))
            .show(ui, |ui| {
                ScrollArea::vertical()
                    .max_height(200.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        if self.tracker.highscores().is_empty() {
                            ui.label("No sessions recorded yet.");
                        }
                        for (idx, entry) in self.tracker.highscores().iter().enumerate() {
                            let selected = self.tracker.selected() == Some(idx);
                            if ui
                                .selectable_label(selected, RichText::new(entry).monospace())
                                .clicked()
                            {
                                clicked = Some(idx);
                            }
                        }
                    });
            });
        if clicked.is_some() {
            self.tracker.select(clicked);
        }

        if ui.button("Delete Selected").clicked() {
            match self.tracker.delete_selected() {
                Ok(Some(entry)) => self.set_status(format!("Deleted {entry}.")),
                Ok(None) => {}
                Err(err) => {
                    error!("failed to save highscores: {err:?}");
                    self.set_status(format!("Failed to save highscores: {err}"));
                }
            }
        }
    }

    fn render_goal_tab(&mut self, ui: &mut egui::Ui, period: Period) {
        ui.label(RichText::new(period.title()).size(24.0).strong());
        ui.horizontal(|ui| {
            ui.label("Goal (hours)");
            ui.add(egui::DragValue::new(self.tracker.goal_input_mut(period)).speed(1.0));
        });
        if ui.button("Set Goal").clicked() {
            match self.tracker.save_goals() {
                Ok(goals) => self.set_status(format!(
                    "Goals saved: {} h week, {} h month, {} h year.",
                    goals.week, goals.month, goals.year
                )),
                Err(err) => {
                    error!("failed to save goals: {err:?}");
                    self.set_status(format!("Failed to save goals: {err}"));
                }
            }
        }

        ui.add_space(6.0);
        ui.label("Progress");
        let progress = self.tracker.progress(period);
        ui.add(
            egui::ProgressBar::new(progress.fraction())
                .text(format!("{:.2} h", progress.value)),
        );
    }

    fn set_status<S: Into<String>>(&mut self, message: S) {
        self.status_message = Some(message.into());
        self.status_since = Some(Instant::now());
    }

    fn maybe_clear_status(&mut self) {
        if let Some(since) = self.status_since {
            if since.elapsed() > STATUS_TTL {
                self.status_message = None;
                self.status_since = None;
            }
        }
    }
}

impl eframe::App for FocusApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.maybe_clear_status();
        self.ensure_style(ctx);

        let now = Instant::now();
        self.tracker.tick(now);

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_tab_bar(ui);
            ui.separator();
            match self.selected_tab {
                FocusTab::Stopwatch => self.render_stopwatch_tab(ui),
                FocusTab::Highscores => self.render_highscores_tab(ui),
                FocusTab::Goal(period) => self.render_goal_tab(ui, period),
            }

            if let Some(message) = &self.status_message {
                ui.separator();
                ui.label(message);
            }
        });

        if let Some(wait) = self.tracker.stopwatch().until_next_tick(Instant::now()) {
            ctx.request_repaint_after(wait);
        } else if self.status_since.is_some() {
            ctx.request_repaint_after(Duration::from_secs(1));
        }
    }
}
