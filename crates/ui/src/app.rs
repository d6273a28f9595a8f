use eframe::egui;
use touchview_core::views::surface::render_surface;
use touchview_core::{
    ConfigError, ManualClock, Point, TouchPhase, TouchTracker, ViewportConfig, ViewportController,
};
use touchview_protocol::Viewport;

use crate::renderer;
use crate::theme::ThemeMode;

/// Demo application: a test-pattern surface driven by touch gestures.
pub struct TouchViewApp {
    /// Clock follows egui's input time, set once per frame.
    controller: ViewportController<ManualClock>,
    tracker: TouchTracker<egui::TouchId>,
    theme_mode: ThemeMode,
}

impl TouchViewApp {
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        config: ViewportConfig,
    ) -> Result<Self, ConfigError> {
        let theme_mode = ThemeMode::Dark;
        cc.egui_ctx.set_visuals(theme_mode.visuals());

        Ok(Self {
            controller: ViewportController::with_clock(config, ManualClock::new(0.0))?,
            tracker: TouchTracker::new(),
            theme_mode,
        })
    }

    /// Forward this frame's touch events inside `area` to the controller.
    fn handle_touches(&mut self, ctx: &egui::Context, area: egui::Rect) {
        let (time, events) = ctx.input(|i| (i.time, i.events.clone()));
        self.controller.clock().set(time * 1000.0);

        for event in events {
            let egui::Event::Touch { id, phase, pos, .. } = event else {
                continue;
            };
            let phase = match phase {
                egui::TouchPhase::Start => TouchPhase::Start,
                egui::TouchPhase::Move => TouchPhase::Move,
                egui::TouchPhase::End => TouchPhase::End,
                egui::TouchPhase::Cancel => TouchPhase::Cancel,
            };
            if phase == TouchPhase::Start && !area.contains(pos) {
                continue;
            }

            let local = pos - area.min;
            let point = Point::new(f64::from(local.x), f64::from(local.y));
            if let Some(phase) = self.tracker.update(id, phase, point) {
                self.controller.handle(phase, self.tracker.points());
            }
        }
    }
}

impl eframe::App for TouchViewApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("touchview");
                ui.separator();

                if ui.button("Reset").clicked() {
                    self.controller.reset();
                    self.tracker.clear();
                }

                let theme_label = match self.theme_mode {
                    ThemeMode::Dark => "Light",
                    ThemeMode::Light => "Dark",
                };
                if ui.button(theme_label).clicked() {
                    self.theme_mode = self.theme_mode.toggled();
                    ctx.set_visuals(self.theme_mode.visuals());
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let zoom_pct = self.controller.transform().scale * 100.0;
                    ui.label(format!("{zoom_pct:.0}%"));
                });
            });
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let gesture = self
                    .controller
                    .gesture()
                    .map_or_else(|| "-".to_string(), |g| format!("{g:?}"));
                ui.label(format!(
                    "Touches: {} | Gesture: {gesture} | Pan {}",
                    self.tracker.len(),
                    if self.controller.is_zoomed() {
                        "enabled"
                    } else {
                        "locked (double tap or pinch to zoom)"
                    },
                ));
            });
        });

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                let available = ui.available_rect_before_wrap();
                ui.allocate_rect(available, egui::Sense::hover());
                self.handle_touches(ctx, available);

                let viewport = Viewport::new(
                    f64::from(available.width()),
                    f64::from(available.height()),
                );
                let transform = self.controller.transform();
                let cmds = render_surface(&viewport, &transform, self.tracker.points());

                let mut painter = ui.painter_at(available);
                renderer::render_commands(&mut painter, &cmds, available.min, self.theme_mode);
            });
    }
}
