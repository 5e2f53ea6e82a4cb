use eframe::egui::{self, Pos2, Rect, Ui};

use crate::mobs::MobId;

use super::super::render_utils::screen_to_world;
use super::super::ViewModel;
use super::scene::NodeVisual;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let world_before = screen_to_world(rect, self.pan, self.zoom, pointer);

        let zoom_factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
        self.zoom = (self.zoom * zoom_factor).clamp(0.2, 6.0);
        self.pan = pointer - rect.center() - (world_before * self.zoom);
    }

    pub(in crate::app) fn handle_graph_pan(&mut self, response: &egui::Response) {
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }
    }
}

pub(in crate::app) fn node_under_pointer(
    pointer: Option<Pos2>,
    visuals: &[NodeVisual],
    screen_positions: &[Pos2],
    zoom: f32,
) -> Option<MobId> {
    let pointer = pointer?;
    visuals
        .iter()
        .zip(screen_positions)
        .rev()
        .find(|(visual, position)| position.distance(pointer) <= visual.radius * zoom)
        .map(|(visual, _)| visual.mob)
}

#[cfg(test)]
mod tests {
    use eframe::egui::{Color32, Vec2, pos2};

    use super::*;

    fn visual(index: usize, radius: f32) -> NodeVisual {
        NodeVisual {
            mob: MobId(index),
            center: Vec2::ZERO,
            radius,
            fill: Color32::WHITE,
            stroke: Color32::BLACK,
            stroke_width: 2.0,
            opacity: 1.0,
            arc: None,
            label: String::new(),
            search_hit: false,
        }
    }

    #[test]
    fn pointer_hits_node_within_scaled_radius() {
        let visuals = [visual(0, 10.0), visual(1, 10.0)];
        let positions = [pos2(100.0, 100.0), pos2(300.0, 100.0)];

        let hit = node_under_pointer(Some(pos2(305.0, 100.0)), &visuals, &positions, 1.0);
        assert_eq!(hit, Some(MobId(1)));

        let miss = node_under_pointer(Some(pos2(115.0, 100.0)), &visuals, &positions, 1.0);
        assert_eq!(miss, None);

        let zoomed = node_under_pointer(Some(pos2(115.0, 100.0)), &visuals, &positions, 2.0);
        assert_eq!(zoomed, Some(MobId(0)));
    }

    #[test]
    fn topmost_overlapping_node_wins() {
        let visuals = [visual(0, 20.0), visual(1, 20.0)];
        let positions = [pos2(100.0, 100.0), pos2(110.0, 100.0)];
        let hit = node_under_pointer(Some(pos2(105.0, 100.0)), &visuals, &positions, 1.0);
        assert_eq!(hit, Some(MobId(1)));
    }

    #[test]
    fn no_pointer_means_no_hover() {
        let visuals = [visual(0, 20.0)];
        assert_eq!(node_under_pointer(None, &visuals, &[pos2(0.0, 0.0)], 1.0), None);
    }
}
