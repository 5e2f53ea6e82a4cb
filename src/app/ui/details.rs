use eframe::egui::{RichText, Ui};

use crate::util::{display_name, format_stat};

use super::super::ViewModel;
use super::tooltip::labelled;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Mob Details");
        ui.add_space(6.0);

        let Some(target) = self.interaction.detail_target(&self.dataset) else {
            ui.label("No mob selected.");
            return;
        };
        let Some(mob) = self.dataset.get(target) else {
            ui.label("No mob selected.");
            return;
        };
        let pinned = self.interaction.is_active(target);

        ui.label(RichText::new(display_name(&mob.name)).strong().size(16.0));
        if !pinned {
            ui.small("Click a mob to pin it here.");
        }
        ui.add_space(6.0);

        labelled(ui, "Name", &display_name(&mob.name));
        labelled(ui, "Behavior", mob.behavior.label());
        labelled(ui, "Spawn behavior", &mob.spawn_behavior);
        labelled(ui, "Health points", &format_stat(mob.health_points));
        labelled(ui, "Max damage", &format_stat(mob.max_damage));
        labelled(ui, "Version", &mob.version);
        labelled(ui, "Era", mob.era.label());
        if let Some(requirement) = &mob.reproductive_requirement {
            labelled(ui, "Reproductive Requirement", requirement);
        }

        if let Some(target) = self.plan.target(target) {
            ui.add_space(6.0);
            ui.small(format!(
                "ring slot {} of {}  |  target angle {:.0}°",
                target.ring_slot + 1,
                target.ring_size,
                target.angle.to_degrees()
            ));
        }

        if pinned {
            ui.add_space(10.0);
            if ui.button("Unpin or Clear").clicked() {
                self.interaction.unpin();
            }
        }
    }
}
