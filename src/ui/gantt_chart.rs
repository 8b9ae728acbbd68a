use crate::config::PlannerSettings;
use crate::model::{Project, Task, TimelineViewport};
use crate::timeline::{
    group_by_month, group_by_week, layout_rows, BarPosition, CalendarAxis, DragCommit,
    DragController, DragKind, RowLayout,
};
use crate::ui::theme;
use egui::{Color32, Pos2, Rect, Response, Rounding, Sense, Stroke, Ui, Vec2};
use log::debug;
use uuid::Uuid;

const HANDLE_WIDTH: f32 = theme::HANDLE_WIDTH;
const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const LABEL_WIDTH: f32 = theme::LABEL_WIDTH;

/// What happened in the chart this frame.
#[derive(Debug, Clone, Default)]
pub struct ChartInteraction {
    /// A drag was released; the caller applies it to the project.
    pub commit: Option<DragCommit>,
    /// An active drag was dropped (Escape or lost pointer).
    pub cancelled: bool,
    /// Tasks left off the chart because of unusable dates.
    pub omitted: usize,
}

/// Geometry shared by everything drawn on the canvas.
struct Canvas<'a> {
    origin: Pos2,
    axis: &'a CalendarAxis,
    day_width: f32,
    lane_height: f32,
    row_padding: f32,
}

impl Canvas<'_> {
    /// Screen x of the left edge of day column `offset`.
    fn day_x(&self, offset: i64) -> f32 {
        self.origin.x + LABEL_WIDTH + offset as f32 * self.day_width
    }

    fn bar_rect(&self, row_top: f32, lane: usize, position: &BarPosition) -> Rect {
        let (x, width) = position.to_pixels(self.day_width);
        let y = row_top + self.row_padding / 2.0 + lane as f32 * self.lane_height;
        Rect::from_min_size(
            Pos2::new(self.origin.x + LABEL_WIDTH + x, y + theme::BAR_INSET),
            Vec2::new(width.max(4.0), self.lane_height - theme::BAR_INSET * 2.0),
        )
    }
}

/// Render the timeline (central panel).
pub fn show_gantt_chart(
    project: &Project,
    viewport: &mut TimelineViewport,
    drag: &mut DragController,
    settings: &PlannerSettings,
    selected_task: &mut Option<Uuid>,
    ui: &mut Ui,
) -> ChartInteraction {
    let mut interaction = ChartInteraction::default();

    let axis = match viewport.axis() {
        Ok(axis) => axis,
        Err(e) => {
            ui.colored_label(theme::TODAY_LINE, e.to_string());
            return interaction;
        }
    };
    let rows = layout_rows(&project.tasks, &axis);
    interaction.omitted = rows.iter().map(|r| r.omitted).sum();

    if ui.rect_contains_pointer(ui.max_rect()) && ui.input(|i| i.modifiers.ctrl) {
        let scroll_y = ui.input(|i| i.smooth_scroll_delta.y);
        scroll_zoom(viewport, drag, scroll_y);
    }

    if ui.input(|i| i.key_pressed(egui::Key::Escape)) && drag.cancel_drag() {
        interaction.cancelled = true;
    }

    let row_heights: Vec<f32> = rows
        .iter()
        .map(|r| r.row_height(settings.lane_height, settings.row_padding))
        .collect();
    let available = ui.available_size();
    let chart_width = (LABEL_WIDTH + viewport.total_width()).max(available.x);
    let chart_height = HEADER_HEIGHT + row_heights.iter().sum::<f32>() + 40.0;

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) = ui.allocate_painter(
                Vec2::new(chart_width, chart_height.max(available.y)),
                Sense::click(),
            );
            let canvas = Canvas {
                origin: response.rect.min,
                axis: &axis,
                day_width: viewport.pixels_per_day,
                lane_height: settings.lane_height,
                row_padding: settings.row_padding,
            };
            let mut consumed_click = false;

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_day_columns(&painter, &canvas, response.rect.bottom());
            draw_timeline_header(&painter, &canvas, chart_width);
            let today = chrono::Local::now().date_naive();
            if axis.contains(today) {
                let offset_x = viewport.date_to_x(today);
                draw_today_line(&painter, &canvas, offset_x, response.rect.bottom());
            }

            let mut row_top = canvas.origin.y + HEADER_HEIGHT;
            for (index, (row, height)) in rows.iter().zip(&row_heights).enumerate() {
                draw_row_background(&painter, &canvas, row, row_top, *height, chart_width);

                for bar in &row.bars {
                    let Some(task) = project.task(bar.task_id) else {
                        continue;
                    };
                    let outcome = show_bar(
                        ui,
                        &painter,
                        &canvas,
                        drag,
                        task,
                        bar.lane,
                        bar.position,
                        row_top,
                        theme::owner_color(index),
                        *selected_task == Some(task.id),
                    );
                    if outcome.clicked {
                        *selected_task = Some(task.id);
                        consumed_click = true;
                    }
                    if let Some(commit) = outcome.commit {
                        interaction.commit = Some(commit);
                    }
                }

                row_top += height;
            }

            // Empty click on background clears selection
            if response.clicked() && !consumed_click {
                *selected_task = None;
            }
        });

    // Pointer released somewhere no bar saw it (capture lost): drop the drag.
    if drag.is_dragging() && interaction.commit.is_none() && !ui.input(|i| i.pointer.any_down()) {
        debug!("pointer released outside the dragged bar");
        interaction.cancelled |= drag.cancel_drag();
    }

    interaction
}

/// Ctrl+scroll zoom. Ignored while dragging: the session snaps at the day
/// width it started with.
fn scroll_zoom(viewport: &mut TimelineViewport, drag: &DragController, scroll_y: f32) {
    if drag.is_dragging() {
        return;
    }
    if scroll_y > 0.0 {
        viewport.zoom_in();
    } else if scroll_y < 0.0 {
        viewport.zoom_out();
    }
}

#[derive(Default)]
struct BarOutcome {
    clicked: bool,
    commit: Option<DragCommit>,
}

fn pointer_x(ui: &Ui, response: &Response) -> Option<f32> {
    response
        .interact_pointer_pos()
        .or_else(|| ui.input(|i| i.pointer.latest_pos()))
        .map(|p| p.x)
}

#[allow(clippy::too_many_arguments)]
fn show_bar(
    ui: &Ui,
    painter: &egui::Painter,
    canvas: &Canvas<'_>,
    drag: &mut DragController,
    task: &Task,
    lane: usize,
    position: BarPosition,
    row_top: f32,
    color: Color32,
    is_selected: bool,
) -> BarOutcome {
    let mut outcome = BarOutcome::default();
    let committed_rect = canvas.bar_rect(row_top, lane, &position);

    // While dragging, draw the live preview and leave a ghost at the original spot.
    let mut bar_rect = committed_rect;
    if drag.is_dragging_task(task.id) {
        let preview = ui
            .input(|i| i.pointer.latest_pos())
            .and_then(|p| drag.on_pointer_move(p.x));
        if let Some(preview) = preview {
            let preview_position = BarPosition::for_span(&preview.span, canvas.axis);
            painter.rect_filled(
                committed_rect,
                Rounding::same(theme::BAR_ROUNDING),
                theme::GHOST_BAR,
            );
            bar_rect = canvas.bar_rect(row_top, lane, &preview_position);
        }
    }

    draw_task_bar(painter, bar_rect, task, color, is_selected);

    let bar_response = ui.interact(
        committed_rect,
        ui.make_persistent_id(("task-bar", task.id)),
        Sense::click_and_drag(),
    );
    let left_response = ui.interact(
        Rect::from_center_size(
            Pos2::new(committed_rect.left(), committed_rect.center().y),
            Vec2::new(HANDLE_WIDTH, committed_rect.height()),
        )
        .expand(4.0),
        ui.make_persistent_id(("task-resize-start", task.id)),
        Sense::drag(),
    );
    let right_response = ui.interact(
        Rect::from_center_size(
            Pos2::new(committed_rect.right(), committed_rect.center().y),
            Vec2::new(HANDLE_WIDTH, committed_rect.height()),
        )
        .expand(4.0),
        ui.make_persistent_id(("task-resize-end", task.id)),
        Sense::drag(),
    );

    let handles = [
        (&left_response, DragKind::ResizeStart),
        (&right_response, DragKind::ResizeEnd),
        (&bar_response, DragKind::Move),
    ];

    for (response, kind) in handles {
        if response.drag_started() {
            if let Some(x) = pointer_x(ui, response) {
                if let Err(e) = drag.begin_drag(task, kind, x, canvas.axis, canvas.day_width) {
                    debug!("drag not started: {e}");
                }
            }
            outcome.clicked = true;
        }
        if response.drag_stopped() && drag.is_dragging_task(task.id) {
            outcome.commit = match pointer_x(ui, response) {
                Some(x) => drag.end_drag(x),
                None => {
                    drag.cancel_drag();
                    None
                }
            };
        }
    }

    if bar_response.clicked() {
        outcome.clicked = true;
    }

    if drag.is_dragging_task(task.id) {
        let icon = match drag.session().map(|s| s.kind) {
            Some(DragKind::Move) => egui::CursorIcon::Grabbing,
            _ => egui::CursorIcon::ResizeHorizontal,
        };
        ui.ctx().set_cursor_icon(icon);
    } else if left_response.hovered() || right_response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeHorizontal);
    } else if bar_response.hovered() {
        ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
    }

    if is_selected || left_response.hovered() || right_response.hovered() {
        draw_handles(painter, bar_rect);
    }

    if bar_response.hovered() && !drag.is_dragging() {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            egui::Id::new(("task-tip", task.id)),
            |ui| {
                ui.strong(&task.name);
                ui.label(format!("{} → {}", task.start_date, task.end_date));
                for (key, value) in &task.metadata {
                    match value {
                        serde_json::Value::String(text) => ui.label(format!("{key}: {text}")),
                        other => ui.label(format!("{key}: {other}")),
                    };
                }
            },
        );
    }

    outcome
}

fn draw_day_columns(painter: &egui::Painter, canvas: &Canvas<'_>, bottom: f32) {
    for (offset, cell) in canvas.axis.cells().iter().enumerate() {
        let x = canvas.day_x(offset as i64);
        if cell.is_weekend {
            painter.rect_filled(
                Rect::from_min_max(
                    Pos2::new(x, canvas.origin.y + HEADER_HEIGHT),
                    Pos2::new(x + canvas.day_width, bottom),
                ),
                0.0,
                theme::BG_WEEKEND,
            );
        }
        painter.line_segment(
            [
                Pos2::new(x, canvas.origin.y + HEADER_HEIGHT),
                Pos2::new(x, bottom),
            ],
            Stroke::new(0.5, theme::GRID_LINE),
        );
    }
}

fn draw_timeline_header(painter: &egui::Painter, canvas: &Canvas<'_>, width: f32) {
    let origin = canvas.origin;
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    // Top line: one label per month.
    let mut offset = 0i64;
    for group in group_by_month(canvas.axis.cells()) {
        let x = canvas.day_x(offset);
        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, origin.y + HEADER_HEIGHT)],
            Stroke::new(1.0, theme::BORDER_SUBTLE),
        );
        painter.text(
            Pos2::new(x + 4.0, origin.y + 12.0),
            egui::Align2::LEFT_CENTER,
            &group.label,
            theme::font_header(),
            theme::TEXT_PRIMARY,
        );
        offset += group.cell_count as i64;
    }

    // Bottom line: day numbers when there is room, ISO weeks otherwise.
    if canvas.day_width >= 20.0 {
        for (i, cell) in canvas.axis.cells().iter().enumerate() {
            let color = if cell.is_weekend {
                theme::TEXT_DIM
            } else {
                theme::TEXT_SECONDARY
            };
            painter.text(
                Pos2::new(canvas.day_x(i as i64) + canvas.day_width / 2.0, origin.y + 30.0),
                egui::Align2::CENTER_CENTER,
                cell.date.format("%d").to_string(),
                theme::font_sub(),
                color,
            );
        }
    } else {
        let mut offset = 0i64;
        for week in group_by_week(canvas.axis.cells()) {
            painter.text(
                Pos2::new(canvas.day_x(offset) + 3.0, origin.y + 30.0),
                egui::Align2::LEFT_CENTER,
                &week.label,
                theme::font_sub(),
                theme::TEXT_SECONDARY,
            );
            offset += week.cell_count as i64;
        }
    }
}

fn draw_today_line(painter: &egui::Painter, canvas: &Canvas<'_>, offset_x: f32, bottom: f32) {
    let x = canvas.origin.x + LABEL_WIDTH + offset_x + canvas.day_width / 2.0;
    painter.line_segment(
        [
            Pos2::new(x, canvas.origin.y + HEADER_HEIGHT),
            Pos2::new(x, bottom),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );
}

fn draw_row_background(
    painter: &egui::Painter,
    canvas: &Canvas<'_>,
    row: &RowLayout,
    top: f32,
    height: f32,
    width: f32,
) {
    let left = canvas.origin.x;
    painter.rect_filled(
        Rect::from_min_size(Pos2::new(left, top), Vec2::new(LABEL_WIDTH, height)),
        0.0,
        theme::BG_PANEL,
    );
    painter.line_segment(
        [
            Pos2::new(left, top + height),
            Pos2::new(left + width, top + height),
        ],
        Stroke::new(0.5, theme::BORDER_SUBTLE),
    );

    let label = if row.omitted > 0 {
        format!("{} ({} hidden)", row.owner_id, row.omitted)
    } else {
        row.owner_id.clone()
    };
    painter.text(
        Pos2::new(left + 10.0, top + canvas.row_padding / 2.0 + canvas.lane_height / 2.0),
        egui::Align2::LEFT_CENTER,
        label,
        theme::font_owner(),
        theme::TEXT_PRIMARY,
    );
}

fn draw_task_bar(
    painter: &egui::Painter,
    bar_rect: Rect,
    task: &Task,
    color: Color32,
    is_selected: bool,
) {
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    painter.rect_filled(
        bar_rect.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(35),
    );
    painter.rect_filled(bar_rect, rounding, color);

    if is_selected {
        painter.rect_stroke(
            bar_rect.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    // Task name on bar (single line, clipped to bar bounds)
    if bar_rect.width() > 30.0 {
        let galley =
            painter.layout_no_wrap(task.name.clone(), theme::font_bar(), theme::TEXT_ON_BAR);
        let text_y = bar_rect.top() + (bar_rect.height() - galley.size().y) / 2.0;
        painter.with_clip_rect(bar_rect).galley(
            Pos2::new(bar_rect.left() + 6.0, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

fn draw_handles(painter: &egui::Painter, bar_rect: Rect) {
    let handle_h = bar_rect.height() * 0.55;
    let handle_y = bar_rect.center().y - handle_h / 2.0;
    for x in [bar_rect.left() - 1.5, bar_rect.right() - 2.5] {
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(x, handle_y), Vec2::new(4.0, handle_h)),
            Rounding::same(2.0),
            theme::HANDLE_COLOR,
        );
    }
}
