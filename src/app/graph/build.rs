use eframe::egui::Vec2;
use tracing::info;

use crate::layout::{RingPlan, plan_rings};
use crate::mobs::MobDataset;
use crate::scales::Scales;

use super::super::physics::{ForceResolver, LayoutNode};
use super::super::ViewModel;

pub(in crate::app) fn build_layout_nodes(
    dataset: &MobDataset,
    plan: &RingPlan,
    scales: &Scales,
) -> Vec<LayoutNode> {
    dataset
        .ids()
        .zip(dataset.mobs.iter())
        .filter_map(|(id, mob)| {
            let target = plan.target(id)?.position();
            Some(LayoutNode {
                mob: id,
                target,
                position: target,
                velocity: Vec2::ZERO,
                radius: scales.radius.map(mob.health_points),
            })
        })
        .collect()
}

impl ViewModel {
    pub(in crate::app) fn rebuild_layout(&mut self) {
        self.plan = plan_rings(&self.dataset, self.config.rings);
        self.scales = Scales::build(&self.dataset, self.config.nodes);
        self.nodes = build_layout_nodes(&self.dataset, &self.plan, &self.scales);
        self.resolver = ForceResolver::default();
        self.last_report = None;
        self.interaction.retain_valid(&self.dataset);

        info!(
            mobs = self.nodes.len(),
            rings = self.plan.rings.len(),
            outer_radius = self.plan.outer_radius(),
            "planned era rings"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{NodeScaleConfig, RingConfig};
    use crate::mobs::fixtures::{dataset, mob};

    #[test]
    fn nodes_start_on_target_with_scaled_radius() {
        let data = dataset(vec![
            mob("enderman", "neutral", 40.0, 7.0, "1.0"),
            mob("silverfish", "hostile", 8.0, 1.0, "1.0"),
            mob("piglin", "neutral", 16.0, 5.0, "1.16"),
        ]);
        let plan = plan_rings(&data, RingConfig::default());
        let scales = Scales::build(&data, NodeScaleConfig::default());
        let nodes = build_layout_nodes(&data, &plan, &scales);

        assert_eq!(nodes.len(), 3);
        for node in &nodes {
            assert_eq!(node.position, node.target);
            assert_eq!(node.velocity, Vec2::ZERO);
        }
        assert_eq!(nodes[0].radius, 28.0);
        assert_eq!(nodes[1].radius, 6.0);
        assert!(nodes[2].radius > 6.0 && nodes[2].radius < 28.0);
    }
}
