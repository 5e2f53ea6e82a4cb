use std::collections::HashSet;
use std::f32::consts::TAU;

use eframe::egui::{Color32, Vec2, vec2};

use crate::mobs::{MobDataset, MobId};
use crate::scales::Scales;
use crate::util::display_name;

use super::super::physics::LayoutNode;
use super::super::selection::InteractionState;

pub(in crate::app) const ARC_INNER_OFFSET: f32 = 4.0;
pub(in crate::app) const ARC_OUTER_OFFSET: f32 = 9.0;
pub(in crate::app) const ARC_OPACITY: f32 = 0.95;
pub(in crate::app) const LABEL_OFFSET: f32 = 12.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub(in crate::app) struct DamageArc {
    pub(in crate::app) inner_radius: f32,
    pub(in crate::app) outer_radius: f32,
    pub(in crate::app) start_angle: f32,
    pub(in crate::app) end_angle: f32,
    pub(in crate::app) color: Color32,
}

impl DamageArc {
    pub(in crate::app) fn sweep(&self) -> f32 {
        self.end_angle - self.start_angle
    }

    pub(in crate::app) fn centerline(&self, scale: f32) -> Vec<Vec2> {
        let radius = (self.inner_radius + self.outer_radius) * 0.5 * scale;
        let segments = ((self.sweep() / TAU) * 64.0).ceil().max(2.0) as usize;
        (0..=segments)
            .map(|step| {
                let angle = self.start_angle + self.sweep() * (step as f32 / segments as f32);
                vec2(angle.sin(), -angle.cos()) * radius
            })
            .collect()
    }

    pub(in crate::app) fn thickness(&self) -> f32 {
        self.outer_radius - self.inner_radius
    }
}

#[derive(Clone, Debug, PartialEq)]
pub(in crate::app) struct NodeVisual {
    pub(in crate::app) mob: MobId,
    pub(in crate::app) center: Vec2,
    pub(in crate::app) radius: f32,
    pub(in crate::app) fill: Color32,
    pub(in crate::app) stroke: Color32,
    pub(in crate::app) stroke_width: f32,
    pub(in crate::app) opacity: f32,
    pub(in crate::app) arc: Option<DamageArc>,
    pub(in crate::app) label: String,
    pub(in crate::app) search_hit: bool,
}

pub(in crate::app) fn compose_node_visuals(
    nodes: &[LayoutNode],
    dataset: &MobDataset,
    scales: &Scales,
    interaction: &InteractionState,
    search_hits: Option<&HashSet<MobId>>,
    out: &mut Vec<NodeVisual>,
) {
    out.clear();
    out.reserve(nodes.len());

    for node in nodes {
        let Some(mob) = dataset.get(node.mob) else {
            continue;
        };

        let sweep = scales.damage.map(mob.max_damage);
        let arc = (sweep > 0.0).then(|| DamageArc {
            inner_radius: node.radius + ARC_INNER_OFFSET,
            outer_radius: node.radius + ARC_OUTER_OFFSET,
            start_angle: 0.0,
            end_angle: sweep,
            color: scales.palette.arc(&mob.behavior),
        });

        out.push(NodeVisual {
            mob: node.mob,
            center: node.position,
            radius: node.radius,
            fill: scales.palette.fill(&mob.behavior),
            stroke: scales.palette.stroke(&mob.behavior),
            stroke_width: interaction.stroke_width(node.mob),
            opacity: interaction.opacity(node.mob),
            arc,
            label: display_name(&mob.name),
            search_hit: interaction.selected().is_none()
                && search_hits.is_some_and(|hits| hits.contains(&node.mob)),
        });
    }
}
