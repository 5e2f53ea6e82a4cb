use anyhow::{Context, Result, bail};
use serde::Serialize;
use tracing::info;

use crate::config::LayoutConfig;
use crate::layout::{Ring, plan_rings};
use crate::mobs::{Era, MobDataset, MobId};
use crate::scales::Scales;

use super::graph::build_layout_nodes;
use super::physics::{ForceResolver, TickReport};

#[derive(Debug, Serialize)]
struct SettledLayout<'a> {
    source: &'a str,
    rings: &'a [Ring],
    mobs: Vec<SettledMob<'a>>,
    report: TickReport,
}

#[derive(Debug, Serialize)]
struct SettledMob<'a> {
    index: MobId,
    id: i64,
    name: &'a str,
    behavior: &'a str,
    era: Era,
    angle: f32,
    ring_radius: f32,
    x: f32,
    y: f32,
    radius: f32,
    arc_sweep: f32,
}

pub fn settled_layout_json(dataset: &MobDataset, config: &LayoutConfig) -> Result<String> {
    if dataset.is_empty() {
        bail!("{} contains no mobs to lay out", dataset.source);
    }
    let plan = plan_rings(dataset, config.rings);
    let scales = Scales::build(dataset, config.nodes);
    let mut nodes = build_layout_nodes(dataset, &plan, &scales);

    let mut resolver = ForceResolver::default();
    let mut ticks = 0_usize;
    let report = resolver.run_to_completion(&mut nodes, &config.forces, |_, _| ticks += 1);
    info!(
        ticks,
        phase = ?resolver.phase(),
        worst_overlap = report.worst_overlap,
        "headless layout finished"
    );

    let mobs = nodes
        .iter()
        .filter_map(|node| {
            let mob = dataset.get(node.mob)?;
            let target = plan.target(node.mob)?;
            Some(SettledMob {
                index: node.mob,
                id: mob.id,
                name: &mob.name,
                behavior: mob.behavior.label(),
                era: mob.era,
                angle: target.angle,
                ring_radius: target.ring_radius,
                x: node.position.x,
                y: node.position.y,
                radius: node.radius,
                arc_sweep: scales.damage.map(mob.max_damage),
            })
        })
        .collect();

    let layout = SettledLayout {
        source: &dataset.source,
        rings: &plan.rings,
        mobs,
        report,
    };
    serde_json::to_string_pretty(&layout).context("failed to serialize settled layout")
}
