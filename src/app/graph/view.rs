use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, FontId, Pos2, Sense, Shape, Stroke, Ui, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;
use tracing::info;

use crate::mobs::MobId;
use crate::util::display_name;

use super::super::physics::Phase;
use super::super::render_utils::{
    NODE_LABEL_COLOR, RING_LABEL_COLOR, RING_OPACITY, RING_STROKE, SEARCH_HIGHLIGHT,
    draw_background, fit_zoom, with_opacity, world_to_screen,
};
use super::super::ui::show_mob_tooltip;
use super::super::{SearchMatchCache, ViewModel};
use super::interaction::node_under_pointer;
use super::scene::{ARC_OPACITY, LABEL_OFFSET, compose_node_visuals};

const RING_LABEL_GAP: f32 = 25.0;
const TOOLTIP_OFFSET: egui::Vec2 = vec2(14.0, 10.0);

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_ascii_lowercase(), &query.to_ascii_lowercase()))
}

impl ViewModel {
    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<MobId>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let matcher = SkimMatcherV2::default();
        let matches = self
            .dataset
            .ids()
            .zip(self.dataset.mobs.iter())
            .filter(|(_, mob)| fuzzy_match_score(&matcher, &display_name(&mob.name), query).is_some())
            .map(|(id, _)| id)
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            matches: Arc::clone(&matches),
        });
        Some(matches)
    }

    fn advance_layout(&mut self, ui: &Ui) {
        if !self.live_physics || self.resolver.is_settled() {
            return;
        }

        let report = self.resolver.tick(&mut self.nodes, &self.config.forces);
        if report.phase == Phase::Settled {
            info!(
                ticks = report.tick,
                worst_overlap = report.worst_overlap,
                "layout settled"
            );
        }
        self.last_report = Some(report);
        ui.ctx().request_repaint();
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);
        draw_background(&painter, rect);

        if self.fit_pending && rect.width() > 0.0 && rect.height() > 0.0 {
            self.zoom = fit_zoom(rect, self.plan.outer_radius() + RING_LABEL_GAP + 40.0);
            self.pan = egui::Vec2::ZERO;
            self.fit_pending = false;
        }

        self.handle_graph_zoom(ui, rect, &response);
        self.handle_graph_pan(&response);
        self.advance_layout(ui);

        let search_hits = self.cached_search_matches();
        compose_node_visuals(
            &self.nodes,
            &self.dataset,
            &self.scales,
            &self.interaction,
            search_hits.as_deref(),
            &mut self.visuals,
        );

        let pan = self.pan;
        let zoom = self.zoom;
        let center = world_to_screen(rect, pan, zoom, egui::Vec2::ZERO);

        for ring in &self.plan.rings {
            painter.circle_stroke(
                center,
                ring.radius * zoom,
                Stroke::new(1.0, with_opacity(RING_STROKE, RING_OPACITY)),
            );
            painter.text(
                world_to_screen(rect, pan, zoom, vec2(0.0, -ring.radius - RING_LABEL_GAP)),
                Align2::CENTER_CENTER,
                ring.era.label(),
                FontId::proportional(12.0),
                RING_LABEL_COLOR,
            );
        }

        let screen_positions = self
            .visuals
            .iter()
            .map(|visual| world_to_screen(rect, pan, zoom, visual.center))
            .collect::<Vec<Pos2>>();

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .filter(|pointer| rect.contains(*pointer));
        let hovered = node_under_pointer(pointer, &self.visuals, &screen_positions, zoom);
        self.interaction.hover(hovered);
        if self.interaction.hovered().is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        let label_font = FontId::proportional((10.0 * zoom.sqrt()).clamp(8.0, 16.0));
        for (visual, &position) in self.visuals.iter().zip(&screen_positions) {
            let radius = visual.radius * zoom;

            if self.show_damage_arcs
                && let Some(arc) = &visual.arc
            {
                let points = arc
                    .centerline(zoom)
                    .into_iter()
                    .map(|offset| position + offset)
                    .collect::<Vec<_>>();
                painter.add(Shape::line(
                    points,
                    Stroke::new(
                        arc.thickness() * zoom,
                        with_opacity(arc.color, ARC_OPACITY * visual.opacity),
                    ),
                ));
            }

            painter.circle_filled(position, radius, with_opacity(visual.fill, visual.opacity));
            painter.circle_stroke(
                position,
                radius,
                Stroke::new(
                    visual.stroke_width,
                    with_opacity(visual.stroke, visual.opacity),
                ),
            );

            if visual.search_hit {
                painter.circle_stroke(
                    position,
                    radius + 3.0,
                    Stroke::new(1.6, SEARCH_HIGHLIGHT),
                );
            }

            if self.show_labels {
                painter.text(
                    position + vec2(0.0, (visual.radius + LABEL_OFFSET) * zoom),
                    Align2::CENTER_CENTER,
                    visual.label.as_str(),
                    label_font.clone(),
                    NODE_LABEL_COLOR,
                );
            }
        }

        if let Some(report) = self.last_report {
            let status = match report.phase {
                Phase::Relaxing => format!("relaxing  |  tick {}  |  alpha {:.3}", report.tick, report.alpha),
                Phase::Settling => format!("settling collisions  |  tick {}", report.tick),
                Phase::Settled => format!("settled after {} ticks", report.tick),
            };
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                status,
                FontId::proportional(12.0),
                RING_LABEL_COLOR,
            );
        }

        if response.clicked_by(egui::PointerButton::Primary) {
            match hovered {
                Some(id) => self.interaction.click_node(id),
                None => self.interaction.click_outside(),
            }
        }

        if let Some(target) = self.interaction.tooltip_target()
            && let Some(pointer) = pointer
            && let Some(mob) = self.dataset.get(target)
        {
            show_mob_tooltip(ui.ctx(), pointer + TOOLTIP_OFFSET, mob);
        }
    }
}
