use std::path::PathBuf;

use anyhow::Result;
use egui::{Color32, RichText};
use nawyk_core::calendar::{self, DayCell, DayStatus, MonthGrid};
use nawyk_core::date;
use nawyk_core::habit::{self, DayState};
use nawyk_core::HabitTracker;
use tracing::{info, warn};

const WEEKDAY_HEADERS: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

const DONE_COLOR: Color32 = Color32::from_rgb(0x4c, 0xaf, 0x50);
const MISSED_COLOR: Color32 = Color32::from_rgb(0xe5, 0x73, 0x73);
const FUTURE_COLOR: Color32 = Color32::from_rgb(0x9e, 0x9e, 0x9e);
const PARTIAL_COLOR: Color32 = Color32::from_rgb(0xff, 0xb3, 0x00);
const BLANK_COLOR: Color32 = Color32::from_rgb(0x45, 0x45, 0x45);

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub(crate) data_path: PathBuf,
    pub(crate) window_days: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(path) = std::env::var("NAWYK_DATA_PATH") {
            if !path.trim().is_empty() {
                config.data_path = PathBuf::from(path);
            }
        }
        if let Ok(days) = std::env::var("NAWYK_WINDOW_DAYS") {
            if let Ok(value) = days.trim().parse::<usize>() {
                if value > 0 {
                    config.window_days = value;
                }
            }
        }
        config
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("data/habits.json"),
            window_days: 7,
        }
    }
}

enum HabitAction {
    Toggle(usize),
    Delete(usize),
}

pub struct HabitApp {
    tracker: HabitTracker,
    window_days: usize,
    name_input: String,
    displayed: (i32, u32),
    status: String,
}

impl HabitApp {
    pub fn new(config: AppConfig) -> Self {
        let tracker = HabitTracker::open(&config.data_path);
        let status = format!("{} habit(s) loaded", tracker.len());
        Self {
            tracker,
            window_days: config.window_days,
            name_input: String::new(),
            displayed: date::this_month(),
            status,
        }
    }

    fn set_status(&mut self, message: impl Into<String>) {
        self.status = message.into();
    }

    fn add_bar(&mut self, ui: &mut egui::Ui, today: &str) {
        ui.horizontal(|ui| {
            ui.heading("Nawyk");
            ui.separator();
            let response = ui.text_edit_singleline(&mut self.name_input);
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
            if ui.button("Add habit").clicked() || submitted {
                match self.tracker.add_habit(&self.name_input, today) {
                    Ok(true) => {
                        self.name_input.clear();
                        self.status = "Habit added".to_string();
                        response.request_focus();
                    }
                    Ok(false) => {
                        // Empty or whitespace-only name: drop it quietly.
                        self.name_input.clear();
                    }
                    Err(err) => {
                        warn!(%err, "failed to add habit");
                        self.status = format!("Unable to add habit: {err}");
                    }
                }
            }
        });
    }

    fn habit_list(&mut self, ui: &mut egui::Ui, today: &str) {
        if self.tracker.is_empty() {
            ui.label("No habits yet. Add one above to start tracking.");
            return;
        }

        let window_days = self.window_days;
        let mut action: Option<HabitAction> = None;

        for (index, habit) in self.tracker.habits().iter().enumerate() {
            let summary = habit::progress(habit, window_days, today);
            let done_today = habit.is_done(today);

            ui.horizontal(|ui| {
                ui.label(RichText::new(&habit.name).strong().size(16.0));
                let toggle_label = if done_today { "Done" } else { "Mark as done" };
                if ui.button(toggle_label).clicked() {
                    action = Some(HabitAction::Toggle(index));
                }
                if ui.button("Delete").clicked() {
                    action = Some(HabitAction::Delete(index));
                }
            });

            ui.horizontal(|ui| {
                ui.label(format!("Streak: {}", summary.streak_count));
                let fraction = summary.window_count as f32 / summary.window_total as f32;
                ui.add(
                    egui::ProgressBar::new(fraction)
                        .desired_width(140.0)
                        .text(format!("{}/{}", summary.window_count, summary.window_total)),
                );
                // Mini calendar: the habit's first days, oldest to newest.
                for day in &summary.days {
                    let (mark, color) = match day.state {
                        DayState::Done => ("●", DONE_COLOR),
                        DayState::Missed => ("●", MISSED_COLOR),
                        DayState::Future => ("○", FUTURE_COLOR),
                    };
                    ui.label(RichText::new(mark).color(color).monospace())
                        .on_hover_text(&day.date);
                }
            });
            ui.add_space(6.0);
        }

        match action {
            Some(HabitAction::Toggle(index)) => {
                if let Err(err) = self.tracker.toggle_done(index, today) {
                    warn!(%err, "failed to toggle habit");
                    self.set_status(format!("Unable to update habit: {err}"));
                } else {
                    self.set_status("Saved");
                }
            }
            Some(HabitAction::Delete(index)) => {
                if let Err(err) = self.tracker.remove_habit(index) {
                    warn!(%err, "failed to remove habit");
                    self.set_status(format!("Unable to delete habit: {err}"));
                } else {
                    self.set_status("Habit deleted");
                }
            }
            None => {}
        }
    }

    fn month_overview(&mut self, ui: &mut egui::Ui, today: &str) {
        ui.horizontal(|ui| {
            if ui.button("◀").clicked() {
                self.displayed = date::step_month(self.displayed.0, self.displayed.1, -1);
            }
            let grid_label = date::month_label(self.displayed.0, self.displayed.1);
            ui.label(RichText::new(grid_label).strong());
            if ui.button("▶").clicked() {
                self.displayed = date::step_month(self.displayed.0, self.displayed.1, 1);
            }
            if ui.button("Today").clicked() {
                self.displayed = date::this_month();
            }
        });

        let grid = calendar::month_grid(
            self.tracker.habits(),
            self.displayed.0,
            self.displayed.1,
            today,
        );
        render_month_grid(ui, &grid);
    }
}

impl eframe::App for HabitApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let today = date::today_key();

        egui::TopBottomPanel::top("add_bar").show(ctx, |ui| {
            ui.add_space(4.0);
            self.add_bar(ui, &today);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.label(&self.status);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.habit_list(ui, &today);
                ui.separator();
                self.month_overview(ui, &today);
            });
        });
    }
}

fn render_month_grid(ui: &mut egui::Ui, grid: &MonthGrid) {
    egui::Grid::new("month_overview")
        .min_col_width(30.0)
        .spacing([4.0, 4.0])
        .show(ui, |ui| {
            for header in WEEKDAY_HEADERS {
                ui.label(RichText::new(header).strong());
            }
            ui.end_row();

            let mut column = 0;
            for _ in 0..grid.leading_blanks {
                ui.label("");
                column += 1;
            }
            for cell in &grid.cells {
                let fill = match cell.status {
                    DayStatus::Full => DONE_COLOR,
                    DayStatus::Partial => PARTIAL_COLOR,
                    DayStatus::None => BLANK_COLOR,
                };
                let text = RichText::new(cell.day_of_month.to_string()).color(Color32::WHITE);
                let response = ui.add(
                    egui::Button::new(text)
                        .fill(fill)
                        .min_size(egui::vec2(28.0, 28.0)),
                );
                if !cell.breakdown.is_empty() {
                    response.on_hover_text(day_tooltip(cell));
                }
                column += 1;
                if column == 7 {
                    ui.end_row();
                    column = 0;
                }
            }
        });
}

fn day_tooltip(cell: &DayCell) -> String {
    let mut lines = Vec::with_capacity(cell.breakdown.len() + 1);
    lines.push(cell.date.clone());
    for entry in &cell.breakdown {
        let mark = match entry.state {
            DayState::Done => "✔",
            DayState::Missed => "✘",
            DayState::Future => "·",
        };
        lines.push(format!("{} {}", mark, entry.habit_name));
    }
    lines.join("\n")
}

pub fn run(config: AppConfig) -> Result<()> {
    info!(
        path = %config.data_path.display(),
        window_days = config.window_days,
        "starting habit tracker"
    );
    let app = HabitApp::new(config);
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Nawyk")
            .with_inner_size([540.0, 760.0])
            .with_min_inner_size([420.0, 560.0]),
        ..Default::default()
    };
    eframe::run_native("nawyk", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| anyhow::anyhow!("{e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_tracks_seven_days() {
        let config = AppConfig::default();
        assert_eq!(config.window_days, 7);
        assert_eq!(config.data_path, PathBuf::from("data/habits.json"));
    }

    #[test]
    fn tooltip_lists_every_applicable_habit() {
        use nawyk_core::calendar::HabitDayEntry;

        let cell = DayCell {
            date: "2024-01-10".to_string(),
            day_of_month: 10,
            status: DayStatus::Partial,
            breakdown: vec![
                HabitDayEntry {
                    habit_name: "Read".to_string(),
                    state: DayState::Done,
                },
                HabitDayEntry {
                    habit_name: "Run".to_string(),
                    state: DayState::Missed,
                },
            ],
        };
        let tooltip = day_tooltip(&cell);
        assert!(tooltip.starts_with("2024-01-10"));
        assert!(tooltip.contains("✔ Read"));
        assert!(tooltip.contains("✘ Run"));
    }
}
