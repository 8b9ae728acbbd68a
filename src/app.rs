use chrono::NaiveDate;
use log::{info, warn};
use uuid::Uuid;

use crate::config::PlannerSettings;
use crate::model::task::shift_days;
use crate::model::{Direction, Granularity, Project, Task, TimelineViewport};
use crate::timeline::{DragCommit, DragController};
use crate::ui;

/// Main application state.
pub struct PlannerApp {
    pub project: Project,
    pub viewport: TimelineViewport,
    pub settings: PlannerSettings,
    pub selected_task: Option<Uuid>,
    /// Sole owner of the in-progress drag, if any.
    pub drag: DragController,

    pub status_message: String,
    pub omitted_tasks: usize,
}

impl PlannerApp {
    /// Build the app around an injected project and initial window.
    pub fn new(project: Project, viewport: TimelineViewport, settings: PlannerSettings) -> Self {
        let status_message = format!("Loaded {} tasks", project.tasks.len());
        Self {
            project,
            viewport,
            settings,
            selected_task: None,
            drag: DragController::new(),
            status_message,
            omitted_tasks: 0,
        }
    }

    /// Generate a demo project: four stages staggered by a week, spread over
    /// three people, starting at `anchor`.
    pub fn sample_project(anchor: NaiveDate) -> Project {
        const OWNERS: [&str; 3] = ["Alice Johnson", "Bob Smith", "Carol Davis"];
        const STAGES: [(&str, &[(&str, i64, i64)]); 4] = [
            (
                "Design",
                &[("UI Mockup", 0, 3), ("UX Research", 1, 5), ("Wireframes", 4, 2)],
            ),
            (
                "Development",
                &[
                    ("API Integration", 7, 6),
                    ("Frontend Implementation", 8, 8),
                    ("Backend Development", 9, 5),
                ],
            ),
            ("Testing", &[("Unit Testing", 14, 4), ("UAT", 17, 5)]),
            (
                "Market Launch",
                &[("Marketing Prep", 21, 6), ("Launch Event", 26, 1)],
            ),
        ];

        let mut tasks = Vec::new();
        for (stage, items) in STAGES {
            for (name, offset, length) in items.iter() {
                let start = shift_days(anchor, *offset);
                let mut task = Task::new(
                    *name,
                    OWNERS[tasks.len() % OWNERS.len()],
                    start,
                    shift_days(start, length - 1),
                );
                task.metadata.insert("stage".into(), stage.into());
                tasks.push(task);
            }
        }
        Project::new("Project Alpha", tasks)
    }

    // --- Window navigation ---

    pub fn navigate(&mut self, direction: Direction) {
        self.cancel_active_drag();
        self.viewport = self.viewport.move_window(direction);
    }

    pub fn set_granularity(&mut self, granularity: Granularity) {
        self.cancel_active_drag();
        self.viewport = self.viewport.set_granularity(granularity);
    }

    /// Flip between week and month paging.
    pub fn toggle_granularity(&mut self) {
        let next = match self.viewport.granularity {
            Granularity::Week => Granularity::Month,
            Granularity::Month => Granularity::Week,
        };
        self.set_granularity(next);
    }

    /// Ctrl/Cmd + ←/→ pages the window, Ctrl/Cmd + T toggles week/month.
    pub fn handle_shortcuts(&mut self, ctx: &egui::Context) {
        let (previous, next, toggle) = ctx.input(|i| {
            let command = i.modifiers.command;
            (
                command && i.key_pressed(egui::Key::ArrowLeft),
                command && i.key_pressed(egui::Key::ArrowRight),
                command && i.key_pressed(egui::Key::T),
            )
        });
        if previous {
            self.navigate(Direction::Backward);
        }
        if next {
            self.navigate(Direction::Forward);
        }
        if toggle {
            self.toggle_granularity();
        }
    }

    pub fn fit_to_tasks(&mut self) {
        self.cancel_active_drag();
        match self
            .viewport
            .fit_to_tasks(&self.project.tasks, self.settings.fit_padding_days)
        {
            Some(viewport) => self.viewport = viewport,
            None => self.status_message = "No schedulable tasks to fit".to_string(),
        }
    }

    // --- Task updates ---

    /// Apply a released drag by replacing the project with an updated copy.
    pub fn apply_commit(&mut self, commit: &DragCommit) {
        if !commit.changed {
            return;
        }
        match self.project.with_commit(commit) {
            Some(project) => {
                let name = project
                    .task(commit.task_id)
                    .map(|t| t.name.clone())
                    .unwrap_or_default();
                info!(
                    "rescheduled {} to {} .. {}",
                    commit.task_id, commit.span.start, commit.span.end
                );
                self.status_message = format!(
                    "Updated '{}' ({} → {})",
                    name,
                    commit.span.start.format("%Y-%m-%d"),
                    commit.span.end.format("%Y-%m-%d")
                );
                self.project = project;
            }
            None => warn!("dropping commit for unknown task {}", commit.task_id),
        }
    }

    fn cancel_active_drag(&mut self) {
        if self.drag.cancel_drag() {
            self.status_message = "Drag cancelled".to_string();
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::apply_theme(ctx);
        self.handle_shortcuts(ctx);

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        let mut summary = format!("Tasks: {}", self.project.tasks.len());
                        if self.omitted_tasks > 0 {
                            let omitted = self.omitted_tasks;
                            summary.push_str(&format!(" · {omitted} with invalid dates"));
                        }
                        ui.label(
                            egui::RichText::new(summary)
                                .size(10.5)
                                .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        // Central panel: timeline
        let chart_frame = egui::Frame::default()
            .fill(ui::theme::BG_DARK)
            .inner_margin(egui::Margin::ZERO);
        let interaction = egui::CentralPanel::default()
            .frame(chart_frame)
            .show(ctx, |ui| {
                ui::gantt_chart::show_gantt_chart(
                    &self.project,
                    &mut self.viewport,
                    &mut self.drag,
                    &self.settings,
                    &mut self.selected_task,
                    ui,
                )
            })
            .inner;

        self.omitted_tasks = interaction.omitted;
        if interaction.cancelled {
            self.status_message = "Drag cancelled".to_string();
        }
        if let Some(commit) = interaction.commit {
            self.apply_commit(&commit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timeline::DragKind;

    fn day(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn app() -> PlannerApp {
        let project = PlannerApp::sample_project(day(1, 1));
        let viewport = TimelineViewport::for_granularity(day(1, 1), Granularity::Month);
        PlannerApp::new(project, viewport, PlannerSettings::default())
    }

    #[test]
    fn test_sample_project_is_valid() {
        let project = PlannerApp::sample_project(day(1, 1));
        assert_eq!(project.tasks.len(), 10);
        assert!(project.tasks.iter().all(|t| t.span().is_ok()));
        let launch = project.tasks.last().unwrap();
        assert_eq!(launch.start_date, launch.end_date);
    }

    #[test]
    fn test_drag_commit_updates_project() {
        let mut app = app();
        let task = app.project.tasks[0].clone();
        let axis = app.viewport.axis().unwrap();
        app.drag
            .begin_drag(&task, DragKind::Move, 0.0, &axis, 32.0)
            .unwrap();
        let commit = app.drag.end_drag(64.0).unwrap();
        app.apply_commit(&commit);

        let moved = app.project.task(task.id).unwrap();
        assert_eq!(moved.start_date, "2024-01-03");
        assert!(app.status_message.starts_with("Updated 'UI Mockup'"));
    }

    #[test]
    fn test_navigation_cancels_drag() {
        let mut app = app();
        let task = app.project.tasks[0].clone();
        let axis = app.viewport.axis().unwrap();
        app.drag
            .begin_drag(&task, DragKind::ResizeEnd, 0.0, &axis, 32.0)
            .unwrap();

        app.navigate(Direction::Forward);
        assert!(!app.drag.is_dragging());
        assert_eq!(app.viewport.start, day(1, 31));
        assert_eq!(app.project.tasks[0], task);
    }

    fn press(app: &mut PlannerApp, key: egui::Key) {
        let ctx = egui::Context::default();
        let input = egui::RawInput {
            modifiers: egui::Modifiers::COMMAND,
            events: vec![egui::Event::Key {
                key,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::COMMAND,
            }],
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.handle_shortcuts(ctx));
    }

    #[test]
    fn test_shortcuts_page_and_toggle() {
        let mut app = app();
        assert_eq!(app.viewport.start, day(1, 1));

        press(&mut app, egui::Key::ArrowRight);
        assert_eq!(app.viewport.start, day(1, 31));
        press(&mut app, egui::Key::ArrowLeft);
        assert_eq!(app.viewport.start, day(1, 1));

        press(&mut app, egui::Key::T);
        assert_eq!(app.viewport.granularity, Granularity::Week);
        press(&mut app, egui::Key::ArrowRight);
        assert_eq!(app.viewport.start, day(1, 8));
    }

    #[test]
    fn test_shortcut_cancels_active_drag() {
        let mut app = app();
        let task = app.project.tasks[0].clone();
        let axis = app.viewport.axis().unwrap();
        app.drag
            .begin_drag(&task, DragKind::Move, 0.0, &axis, 32.0)
            .unwrap();

        press(&mut app, egui::Key::T);
        assert!(!app.drag.is_dragging());
        assert_eq!(app.status_message, "Drag cancelled");
        assert_eq!(app.viewport.granularity, Granularity::Week);
    }

    #[test]
    fn test_keys_without_modifier_are_ignored() {
        let mut app = app();
        let ctx = egui::Context::default();
        let input = egui::RawInput {
            events: vec![egui::Event::Key {
                key: egui::Key::ArrowRight,
                physical_key: None,
                pressed: true,
                repeat: false,
                modifiers: egui::Modifiers::NONE,
            }],
            ..Default::default()
        };
        let _ = ctx.run(input, |ctx| app.handle_shortcuts(ctx));
        assert_eq!(app.viewport.start, day(1, 1));
    }

    #[test]
    fn test_fit_to_tasks_uses_settings_padding() {
        let mut app = app();
        app.fit_to_tasks();
        assert_eq!(app.viewport.start, day(1, 1) - chrono::Duration::days(4));
        // Launch Event ends on day 26 + 4 days of padding.
        assert_eq!(app.viewport.end, day(1, 31));
    }
}
