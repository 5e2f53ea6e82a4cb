use eframe::egui::{Color32, Painter, Pos2, Rect, Vec2};

pub(super) const BACKGROUND: Color32 = Color32::from_rgb(11, 21, 29);
pub(super) const RING_STROKE: Color32 = Color32::from_rgb(0x1f, 0x33, 0x40);
pub(super) const RING_OPACITY: f32 = 0.9;
pub(super) const RING_LABEL_COLOR: Color32 = Color32::from_rgb(120, 150, 170);
pub(super) const NODE_LABEL_COLOR: Color32 = Color32::from_rgb(0xdb, 0xee, 0xff);
pub(super) const SEARCH_HIGHLIGHT: Color32 = Color32::from_rgb(103, 196, 255);

pub(super) fn with_opacity(color: Color32, opacity: f32) -> Color32 {
    color.gamma_multiply(opacity.clamp(0.0, 1.0))
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, BACKGROUND);
}

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

pub(super) fn fit_zoom(rect: Rect, world_radius: f32) -> f32 {
    if world_radius <= 0.0 {
        return 1.0;
    }
    let half = rect.width().min(rect.height()) * 0.5;
    (half / world_radius).clamp(0.2, 4.0)
}
