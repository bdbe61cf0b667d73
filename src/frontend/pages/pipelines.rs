//! Pipelines page - flow graph of one pipeline topology
//!
//! Renders the transformed topology with custom egui painting. Supports
//! pan (drag), zoom (scroll) and node selection with a details panel.

use std::collections::HashMap;

use egui::{Color32, Context, Pos2, Rect, RichText, Shape, Stroke, Ui, Vec2};

use super::Page;
use crate::backend::{QueryKey, TopologySnapshot};
use crate::frontend::state::{AppAction, SharedState};
use crate::topology::{FlowEdge, TopologyReport};

const NODE_WIDTH: f32 = 160.0;
const NODE_HEIGHT: f32 = 44.0;
const CANVAS_MARGIN: Vec2 = Vec2::new(40.0, 40.0);

/// State specific to the pipelines page
pub struct PipelinesPageState {
    /// Text in the pipeline id field
    pub pipeline_input: String,
    /// Pipeline currently shown
    pub pipeline_id: Option<String>,
    pub pan_offset: Vec2,
    pub zoom: f32,
    pub selected_node: Option<String>,
}

impl Default for PipelinesPageState {
    fn default() -> Self {
        Self {
            pipeline_input: String::new(),
            pipeline_id: None,
            pan_offset: Vec2::ZERO,
            zoom: 1.0,
            selected_node: None,
        }
    }
}

impl PipelinesPageState {
    /// Switch to another pipeline, resetting the view.
    pub fn load(&mut self, pipeline_id: &str) {
        let id = pipeline_id.trim();
        if id.is_empty() {
            return;
        }
        self.pipeline_input = id.to_string();
        self.pipeline_id = Some(id.to_string());
        self.pan_offset = Vec2::ZERO;
        self.zoom = 1.0;
        self.selected_node = None;
    }
}

pub struct PipelinesPage;

impl Page for PipelinesPage {
    type State = PipelinesPageState;

    fn render(
        state: &mut Self::State,
        shared: &mut SharedState<'_>,
        ctx: &Context,
    ) -> Vec<AppAction> {
        let mut actions = Vec::new();

        if state.pipeline_id.is_none() {
            state.load(&shared.config.default_pipeline_id);
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label("Pipeline:");
                let response = ui.add(
                    egui::TextEdit::singleline(&mut state.pipeline_input).desired_width(180.0),
                );
                let submitted =
                    response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));
                if ui.button("Load").clicked() || submitted {
                    let input = state.pipeline_input.clone();
                    state.load(&input);
                }
                if let Some(id) = &state.pipeline_id {
                    if ui.button("Refresh").clicked() {
                        actions.push(AppAction::Fetch(QueryKey::Topology(id.clone())));
                    }
                }
                ui.separator();
                if ui.button("Reset view").clicked() {
                    state.pan_offset = Vec2::ZERO;
                    state.zoom = 1.0;
                }
            });
            ui.separator();

            let Some(pipeline_id) = state.pipeline_id.clone() else {
                ui.label("Enter a pipeline id to load its topology.");
                return;
            };
            let key = QueryKey::Topology(pipeline_id.clone());

            if shared.cache.needs_fetch(&key) {
                actions.push(AppAction::Fetch(key.clone()));
            }

            if let Some(error) = shared.cache.error(&key) {
                ui.horizontal(|ui| {
                    ui.colored_label(Color32::RED, format!("Failed to load topology: {}", error));
                    if ui.button("Retry").clicked() {
                        actions.push(AppAction::Fetch(key.clone()));
                    }
                });
            }

            let Some(snapshot) = shared.cache.topology(&pipeline_id) else {
                if shared.cache.is_loading(&key) {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label("Loading topology...");
                    });
                }
                return;
            };

            render_report(ui, &snapshot.report);

            if snapshot.flow_nodes.is_empty() {
                ui.label("This pipeline has no nodes.");
                return;
            }

            render_canvas(state, snapshot, ui);
            render_details(state, snapshot, ui);
        });

        actions
    }
}

fn render_report(ui: &mut Ui, report: &TopologyReport) {
    if report.is_clean() {
        return;
    }
    let count = report.duplicate_node_ids.len()
        + report.dangling_edges.len()
        + report.duplicate_edge_ids.len();
    egui::CollapsingHeader::new(
        RichText::new(format!("⚠ {} topology warning(s)", count)).color(Color32::YELLOW),
    )
    .id_salt("topology_warnings")
    .show(ui, |ui| {
        for id in &report.duplicate_node_ids {
            ui.label(format!("Duplicate node id {:?}", id));
        }
        for edge in &report.dangling_edges {
            ui.label(format!(
                "Edge {:?} targets unknown node {:?}",
                edge.id, edge.target
            ));
        }
        for id in &report.duplicate_edge_ids {
            ui.label(format!("Edge id {:?} is produced more than once", id));
        }
    });
}

fn render_canvas(state: &mut PipelinesPageState, snapshot: &TopologySnapshot, ui: &mut Ui) {
    let available = ui.available_rect_before_wrap();
    let canvas_height = if state.selected_node.is_some() {
        (available.height() * 0.65).max(200.0)
    } else {
        available.height()
    };
    let (response, painter) = ui.allocate_painter(
        Vec2::new(available.width(), canvas_height),
        egui::Sense::click_and_drag(),
    );
    let canvas_rect = response.rect;
    painter.rect_filled(canvas_rect, 0.0, Color32::from_gray(30));

    if response.dragged() {
        state.pan_offset += response.drag_delta();
    }
    if response.hovered() {
        let scroll_delta = ui.input(|i| i.smooth_scroll_delta.y);
        if scroll_delta != 0.0 {
            let factor = 1.0 + scroll_delta * 0.002;
            state.zoom = (state.zoom * factor).clamp(0.25, 4.0);
        }
    }

    let zoom = state.zoom;
    let origin = canvas_rect.min.to_vec2() + CANVAS_MARGIN + state.pan_offset;
    let painter = painter.with_clip_rect(canvas_rect);

    // Screen rects keyed by node id; the first node wins on duplicate ids
    let mut rects: HashMap<&str, (usize, Rect)> = HashMap::new();
    for (index, node) in snapshot.flow_nodes.iter().enumerate() {
        let pos = Pos2::new(node.position.x as f32, node.position.y as f32);
        let min = Pos2::new(pos.x * zoom + origin.x, pos.y * zoom + origin.y);
        let rect = Rect::from_min_size(min, Vec2::new(NODE_WIDTH, NODE_HEIGHT) * zoom);
        rects.entry(node.id.as_str()).or_insert((index, rect));
    }

    for edge in &snapshot.flow_edges {
        let (Some((from_index, from)), Some((to_index, to))) = (
            rects.get(edge.source.as_str()),
            rects.get(edge.target.as_str()),
        ) else {
            continue;
        };
        let adjacent = *to_index == from_index + 1;
        paint_edge(&painter, edge, *from, *to, adjacent, zoom);
    }

    let mut clicked_node: Option<String> = None;
    for node in &snapshot.flow_nodes {
        let Some((_, rect)) = rects.get(node.id.as_str()).copied() else {
            continue;
        };
        let is_selected = state.selected_node.as_deref() == Some(node.id.as_str());
        let stroke_color = if is_selected {
            Color32::WHITE
        } else {
            Color32::from_gray(80)
        };
        let stroke_width = if is_selected { 3.0 } else { 1.0 };

        painter.rect_filled(rect, 6.0 * zoom, node_color(&node.data.node_type));
        painter.rect_stroke(
            rect,
            6.0 * zoom,
            Stroke::new(stroke_width * zoom, stroke_color),
            egui::StrokeKind::Outside,
        );
        painter.text(
            rect.center() - Vec2::new(0.0, 7.0 * zoom),
            egui::Align2::CENTER_CENTER,
            &node.data.name,
            egui::FontId::proportional(13.0 * zoom),
            Color32::WHITE,
        );
        painter.text(
            rect.center() + Vec2::new(0.0, 9.0 * zoom),
            egui::Align2::CENTER_CENTER,
            &node.data.node_type,
            egui::FontId::proportional(10.0 * zoom),
            Color32::from_gray(200),
        );

        if response.clicked() {
            if let Some(pointer) = response.interact_pointer_pos() {
                if rect.contains(pointer) {
                    clicked_node = Some(node.id.clone());
                }
            }
        }
    }

    if response.clicked() {
        state.selected_node = clicked_node;
    }
}

fn paint_edge(
    painter: &egui::Painter,
    edge: &FlowEdge,
    from: Rect,
    to: Rect,
    adjacent: bool,
    zoom: f32,
) {
    let start = from.center_bottom();
    let end = to.center_top();
    // Edges that skip rows or run backwards bend out to the right so they
    // do not pass through the nodes in between.
    let bulge = if adjacent {
        0.0
    } else {
        (NODE_WIDTH * 0.5 + (end.y - start.y).abs() * 0.15) * zoom
    };
    let reach = 40.0 * zoom;
    let cp1 = Pos2::new(start.x + bulge, start.y + reach);
    let cp2 = Pos2::new(end.x + bulge, end.y - reach);
    let points = bezier_points(start, cp1, cp2, end, 32);

    let color = Color32::from_gray(150);
    let stroke = Stroke::new(2.0 * zoom, color);
    if edge.animated {
        painter.extend(Shape::dashed_line(&points, stroke, 6.0 * zoom, 4.0 * zoom));
    } else {
        painter.add(Shape::line(points, stroke));
    }

    let size = 6.0 * zoom;
    painter.add(Shape::convex_polygon(
        vec![
            end,
            Pos2::new(end.x - size, end.y - size * 1.5),
            Pos2::new(end.x + size, end.y - size * 1.5),
        ],
        color,
        Stroke::NONE,
    ));
}

fn render_details(state: &mut PipelinesPageState, snapshot: &TopologySnapshot, ui: &mut Ui) {
    let Some(selected) = state.selected_node.clone() else {
        return;
    };
    let Some(node) = snapshot.nodes.iter().find(|n| n.id == selected) else {
        state.selected_node = None;
        return;
    };

    ui.separator();
    ui.horizontal(|ui| {
        ui.strong(format!("Selected: {}", node.id));
        ui.label(format!("({})", node.node_type));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("✕").clicked() {
                state.selected_node = None;
            }
        });
    });

    let outgoing: Vec<&FlowEdge> = snapshot
        .flow_edges
        .iter()
        .filter(|e| e.source == node.id)
        .collect();
    if outgoing.is_empty() {
        ui.label(RichText::new("No outgoing wires").weak());
    } else {
        let targets: Vec<&str> = outgoing.iter().map(|e| e.target.as_str()).collect();
        ui.label(format!("Wired to: {}", targets.join(", ")));
    }

    egui::ScrollArea::vertical()
        .id_salt("node_details")
        .show(ui, |ui| {
            json_section(ui, "Capabilities", &node.capabilities);
            json_section(ui, "Properties", &node.properties);
        });
}

fn json_section(ui: &mut Ui, title: &str, value: &serde_json::Value) {
    if value.is_null() {
        return;
    }
    egui::CollapsingHeader::new(title)
        .default_open(true)
        .show(ui, |ui| {
            let text = serde_json::to_string_pretty(value).unwrap_or_else(|e| e.to_string());
            ui.label(RichText::new(text).monospace().small());
        });
}

fn node_color(node_type: &str) -> Color32 {
    // Stable hue per type
    let hash = node_type
        .bytes()
        .fold(0u32, |acc, b| acc.wrapping_mul(31).wrapping_add(b as u32));
    let palette = [
        Color32::from_rgb(60, 90, 140),
        Color32::from_rgb(70, 120, 80),
        Color32::from_rgb(130, 80, 60),
        Color32::from_rgb(110, 70, 130),
        Color32::from_rgb(60, 110, 120),
    ];
    palette[hash as usize % palette.len()]
}

fn bezier_points(p0: Pos2, p1: Pos2, p2: Pos2, p3: Pos2, segments: usize) -> Vec<Pos2> {
    (0..=segments)
        .map(|i| {
            let t = i as f32 / segments as f32;
            let u = 1.0 - t;
            let (uu, tt) = (u * u, t * t);
            Pos2::new(
                uu * u * p0.x + 3.0 * uu * t * p1.x + 3.0 * u * tt * p2.x + tt * t * p3.x,
                uu * u * p0.y + 3.0 * uu * t * p1.y + 3.0 * u * tt * p2.y + tt * t * p3.y,
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_trims_and_resets_view() {
        let mut state = PipelinesPageState {
            zoom: 2.0,
            selected_node: Some("n1".into()),
            ..PipelinesPageState::default()
        };
        state.load("  edge-01 ");
        assert_eq!(state.pipeline_id.as_deref(), Some("edge-01"));
        assert_eq!(state.zoom, 1.0);
        assert!(state.selected_node.is_none());

        state.load("   ");
        assert_eq!(state.pipeline_id.as_deref(), Some("edge-01"));
    }

    #[test]
    fn test_bezier_endpoints() {
        let a = Pos2::new(0.0, 0.0);
        let b = Pos2::new(10.0, 100.0);
        let points = bezier_points(a, a, b, b, 8);
        assert_eq!(points.len(), 9);
        assert_eq!(points[0], a);
        assert_eq!(points[8], b);
    }

    #[test]
    fn test_node_color_is_stable() {
        assert_eq!(node_color("mqtt-in"), node_color("mqtt-in"));
    }
}
