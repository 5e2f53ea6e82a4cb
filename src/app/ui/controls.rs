use eframe::egui::{self, Color32, RichText, Sense, Ui, vec2};

use crate::scales::FALLBACK_FILL;
use crate::util::display_name;

use super::super::ViewModel;
use super::super::physics::{ForceResolver, Phase};

fn legend_swatch(ui: &mut Ui, color: Color32, label: &str) {
    ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(vec2(14.0, 14.0), Sense::hover());
        ui.painter().circle_filled(rect.center(), 6.0, color);
        ui.label(label);
    });
}

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Ring Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search (mob name)")
            .on_hover_text("Fuzzy-highlight matching mobs without changing the layout.");
        let search_response = ui.text_edit_singleline(&mut self.search);
        if search_response.changed() {
            self.search_match_cache = None;
        }

        ui.separator();

        ui.checkbox(&mut self.live_physics, "Live physics simulation")
            .on_hover_text("Advance the force resolver once per frame until it settles.");
        ui.checkbox(&mut self.show_labels, "Show names");
        ui.checkbox(&mut self.show_damage_arcs, "Show damage arcs");

        ui.collapsing("Physics tuning", |ui| {
            let mut reheat = false;

            reheat |= ui
                .add(
                    egui::Slider::new(&mut self.config.forces.target_strength, 0.01..=0.5)
                        .text("Target pull")
                        .clamping(egui::SliderClamping::Always),
                )
                .on_hover_text("How strongly each mob is drawn back to its ring slot.")
                .changed();

            reheat |= ui
                .add(
                    egui::Slider::new(&mut self.config.forces.collision_padding, 0.0..=20.0)
                        .text("Collision padding")
                        .clamping(egui::SliderClamping::Always),
                )
                .on_hover_text("Extra clearance kept between neighbouring mobs.")
                .changed();

            reheat |= ui
                .add(
                    egui::Slider::new(&mut self.config.forces.collision_iterations, 1..=8)
                        .text("Collision passes"),
                )
                .on_hover_text("Collision projection passes per tick.")
                .changed();

            if reheat {
                self.resolver.reheat();
            }

            ui.horizontal(|ui| {
                if ui.button("Reheat").clicked() {
                    self.resolver.reheat();
                }
                if ui
                    .button("Reset to targets")
                    .on_hover_text("Snap every mob back onto its ring slot and restart.")
                    .clicked()
                {
                    self.resolver.reset(&mut self.nodes);
                    self.last_report = None;
                }
            });
        });

        ui.collapsing("Ring geometry", |ui| {
            let mut replan = false;
            replan |= ui
                .add(egui::Slider::new(&mut self.config.rings.base_radius, 20.0..=240.0).text("Base radius"))
                .changed();
            replan |= ui
                .add(egui::Slider::new(&mut self.config.rings.ring_gap, 20.0..=200.0).text("Ring gap"))
                .changed();
            replan |= ui
                .add(egui::Slider::new(&mut self.config.nodes.min_radius, 2.0..=20.0).text("Min body radius"))
                .changed();
            replan |= ui
                .add(egui::Slider::new(&mut self.config.nodes.max_radius, 10.0..=60.0).text("Max body radius"))
                .changed();

            if replan {
                self.config.nodes.max_radius =
                    self.config.nodes.max_radius.max(self.config.nodes.min_radius);
                self.rebuild_layout();
                self.fit_pending = true;
            }
        });

        ui.separator();
        ui.label(RichText::new("Resolver").strong());
        match self.last_report {
            Some(report) => {
                let phase = match report.phase {
                    Phase::Relaxing => "relaxing",
                    Phase::Settling => "settling collisions",
                    Phase::Settled => "settled",
                };
                ui.small(format!("{phase}  |  tick {}  |  alpha {:.3}", report.tick, report.alpha));
            }
            None => {
                ui.small(format!(
                    "idle  |  at most {} relaxation ticks before settling",
                    ForceResolver::relax_budget(&self.config.forces)
                ));
            }
        }

        ui.separator();
        ui.label(RichText::new("Behavior").strong());
        for (label, color) in self.scales.palette.legend() {
            legend_swatch(ui, color, label);
        }
        legend_swatch(ui, FALLBACK_FILL, "other");

        ui.separator();
        ui.label(RichText::new("Rings").strong());
        egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                for ring in &self.plan.rings {
                    let title = format!(
                        "{} ({})",
                        ring.era.label(),
                        self.dataset.era_count(ring.era)
                    );
                    egui::CollapsingHeader::new(title)
                        .id_salt(ring.era.key())
                        .default_open(false)
                        .show(ui, |ui| {
                            for &id in &ring.members {
                                let Some(mob) = self.dataset.get(id) else {
                                    continue;
                                };
                                let selected = self.interaction.selected() == Some(id);
                                if ui
                                    .selectable_label(selected, display_name(&mob.name))
                                    .clicked()
                                {
                                    self.interaction.click_node(id);
                                }
                            }
                        });
                }
            });
    }
}
