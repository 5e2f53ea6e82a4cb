use eframe::egui::{self, Context, Pos2, RichText};

use crate::mobs::Mob;
use crate::util::{display_name, format_stat};

pub(in crate::app) fn show_mob_tooltip(ctx: &Context, position: Pos2, mob: &Mob) {
    egui::Area::new(egui::Id::new("mob_tooltip"))
        .order(egui::Order::Tooltip)
        .fixed_pos(position)
        .interactable(false)
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(260.0);
                ui.label(RichText::new(display_name(&mob.name)).strong().size(14.0));
                ui.add_space(4.0);
                labelled(ui, "Behavior", mob.behavior.label());
                labelled(ui, "Spawn", &mob.spawn_behavior);
                labelled(ui, "Health", &format_stat(mob.health_points));
                labelled(ui, "Max damage", &format_stat(mob.max_damage));
                if let Some(requirement) = &mob.reproductive_requirement {
                    ui.add_space(4.0);
                    labelled(ui, "Reproductive Requirement", requirement);
                }
            });
        });
}

pub(super) fn labelled(ui: &mut egui::Ui, key: &str, value: &str) {
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new(format!("{key}:")).strong());
        ui.label(value);
    });
}
