use std::cmp::Ordering;
use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};
use serde::Serialize;

use crate::config::RingConfig;
use crate::mobs::{Era, Mob, MobDataset, MobId};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlannedTarget {
    pub angle: f32,
    pub ring_radius: f32,
    pub ring_slot: usize,
    pub ring_size: usize,
}

impl PlannedTarget {
    pub fn position(&self) -> Vec2 {
        polar(self.angle, self.ring_radius)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Ring {
    pub era: Era,
    pub radius: f32,
    pub members: Vec<MobId>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct RingPlan {
    pub rings: Vec<Ring>,
    targets: Vec<PlannedTarget>,
}

impl RingPlan {
    pub fn target(&self, id: MobId) -> Option<&PlannedTarget> {
        self.targets.get(id.0)
    }

    pub fn outer_radius(&self) -> f32 {
        self.rings
            .iter()
            .map(|ring| ring.radius)
            .fold(0.0, f32::max)
    }
}

pub fn polar(angle: f32, radius: f32) -> Vec2 {
    vec2(angle.cos(), angle.sin()) * radius
}

pub fn ring_radius(era: Era, config: RingConfig) -> f32 {
    config.base_radius + era.rank() as f32 * config.ring_gap
}

fn name_order(a: (MobId, &Mob), b: (MobId, &Mob)) -> Ordering {
    a.1.name
        .to_lowercase()
        .cmp(&b.1.name.to_lowercase())
        .then_with(|| a.1.name.cmp(&b.1.name))
        .then_with(|| a.0.cmp(&b.0))
}

pub fn plan_rings(dataset: &MobDataset, config: RingConfig) -> RingPlan {
    let mut targets = vec![
        PlannedTarget {
            angle: 0.0,
            ring_radius: config.base_radius,
            ring_slot: 0,
            ring_size: 0,
        };
        dataset.len()
    ];

    let rings = Era::RING_ORDER
        .iter()
        .map(|&era| {
            let radius = ring_radius(era, config);
            let mut members = dataset
                .ids()
                .zip(dataset.mobs.iter())
                .filter(|(_, mob)| mob.era == era)
                .collect::<Vec<_>>();
            members.sort_by(|a, b| name_order(*a, *b));

            let count = members.len();
            for (slot, (id, _)) in members.iter().enumerate() {
                targets[id.0] = PlannedTarget {
                    angle: (slot as f32 / count as f32) * TAU,
                    ring_radius: radius,
                    ring_slot: slot,
                    ring_size: count,
                };
            }

            Ring {
                era,
                radius,
                members: members.into_iter().map(|(id, _)| id).collect(),
            }
        })
        .collect();

    RingPlan { rings, targets }
}
