mod forces;
mod quadtree;

use eframe::egui::Vec2;
use serde::Serialize;
use tracing::debug;

use crate::config::ForceConfig;
use crate::mobs::MobId;

use forces::{CollisionParams, apply_target_pull, project_collisions, worst_overlap};

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct LayoutNode {
    pub(crate) mob: MobId,
    pub(crate) target: Vec2,
    pub(crate) position: Vec2,
    pub(crate) velocity: Vec2,
    pub(crate) radius: f32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Phase {
    Relaxing,
    Settling,
    Settled,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub(crate) struct TickReport {
    pub(crate) tick: usize,
    pub(crate) alpha: f32,
    pub(crate) mean_displacement: f32,
    pub(crate) worst_overlap: f32,
    pub(crate) phase: Phase,
}

#[derive(Clone, Debug)]
pub(crate) struct ForceResolver {
    alpha: f32,
    tick: usize,
    settle_passes: usize,
    phase: Phase,
    last_overlap: f32,
    previous: Vec<Vec2>,
    positions: Vec<Vec2>,
    pairs: Vec<(usize, usize)>,
}

impl Default for ForceResolver {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            tick: 0,
            settle_passes: 0,
            phase: Phase::Relaxing,
            last_overlap: 0.0,
            previous: Vec::new(),
            positions: Vec::new(),
            pairs: Vec::new(),
        }
    }
}

impl ForceResolver {
    pub(crate) fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn is_settled(&self) -> bool {
        self.phase == Phase::Settled
    }

    pub(crate) fn reheat(&mut self) {
        self.alpha = 1.0;
        self.settle_passes = 0;
        self.phase = Phase::Relaxing;
        debug!(tick = self.tick, "force resolver reheated");
    }

    pub(crate) fn reset(&mut self, nodes: &mut [LayoutNode]) {
        for node in nodes.iter_mut() {
            node.position = node.target;
            node.velocity = Vec2::ZERO;
        }
        self.tick = 0;
        self.reheat();
    }

    pub(crate) fn relax_budget(config: &ForceConfig) -> usize {
        let decay = config.alpha_decay().clamp(1e-6, 1.0 - 1e-6);
        (config.alpha_min.clamp(1e-6, 0.5).ln() / (1.0 - decay).ln()).ceil() as usize
    }

    pub(crate) fn tick_budget(config: &ForceConfig) -> usize {
        Self::relax_budget(config) + config.max_settle_passes + 2
    }

    fn report(&self, mean_displacement: f32) -> TickReport {
        TickReport {
            tick: self.tick,
            alpha: self.alpha,
            mean_displacement,
            worst_overlap: self.last_overlap,
            phase: self.phase,
        }
    }

    fn collision_params(config: &ForceConfig) -> CollisionParams {
        CollisionParams {
            padding: config.collision_padding.max(0.0),
            strength: config.collision_strength,
        }
    }

    pub(crate) fn tick(&mut self, nodes: &mut [LayoutNode], config: &ForceConfig) -> TickReport {
        match self.phase {
            Phase::Settled => self.report(0.0),
            Phase::Relaxing => self.relax_step(nodes, config),
            Phase::Settling => self.settle_step(nodes, config),
        }
    }

    fn relax_step(&mut self, nodes: &mut [LayoutNode], config: &ForceConfig) -> TickReport {
        self.tick += 1;
        self.previous.clear();
        self.previous.extend(nodes.iter().map(|node| node.position));

        self.alpha += (0.0 - self.alpha) * config.alpha_decay();
        apply_target_pull(nodes, config.target_strength, self.alpha);

        let keep = (1.0 - config.velocity_decay).clamp(0.0, 1.0);
        for node in nodes.iter_mut() {
            node.velocity *= keep;
            node.position += node.velocity;
        }

        let params = Self::collision_params(config);
        let mut overlap = 0.0_f32;
        for _ in 0..config.collision_iterations.max(1) {
            overlap = project_collisions(nodes, params, &mut self.positions, &mut self.pairs);
        }
        self.last_overlap = overlap;

        let mean_displacement = mean_displacement(&self.previous, nodes);
        let converged = self.tick > 1 && mean_displacement < config.convergence_threshold;
        if self.alpha < config.alpha_min || converged {
            for node in nodes.iter_mut() {
                node.velocity = Vec2::ZERO;
            }
            self.phase = Phase::Settling;
            self.settle_passes = 0;
            debug!(
                tick = self.tick,
                alpha = self.alpha,
                mean_displacement,
                "relaxation finished, settling collisions"
            );
        }

        self.report(mean_displacement)
    }

    fn settle_step(&mut self, nodes: &mut [LayoutNode], config: &ForceConfig) -> TickReport {
        self.tick += 1;
        self.previous.clear();
        self.previous.extend(nodes.iter().map(|node| node.position));

        let params = Self::collision_params(config);
        let mut passes_this_tick = 0;
        loop {
            let overlap = project_collisions(nodes, params, &mut self.positions, &mut self.pairs);
            passes_this_tick += 1;
            self.settle_passes += 1;
            if overlap <= config.settle_tolerance
                || self.settle_passes >= config.max_settle_passes
                || passes_this_tick >= config.collision_iterations.max(1)
            {
                break;
            }
        }

        let remaining = worst_overlap(nodes, config.margin());
        self.last_overlap = remaining.max(0.0);
        if remaining <= config.settle_tolerance || self.settle_passes >= config.max_settle_passes {
            self.phase = Phase::Settled;
            debug!(
                tick = self.tick,
                passes = self.settle_passes,
                worst_overlap = self.last_overlap,
                "layout settled"
            );
        }

        self.report(mean_displacement(&self.previous, nodes))
    }

    pub(crate) fn run_to_completion(
        &mut self,
        nodes: &mut [LayoutNode],
        config: &ForceConfig,
        mut observe: impl FnMut(&TickReport, &[LayoutNode]),
    ) -> TickReport {
        let budget = Self::tick_budget(config);
        let mut report = self.report(0.0);
        for _ in 0..budget {
            if self.is_settled() {
                break;
            }
            report = self.tick(nodes, config);
            observe(&report, nodes);
        }
        if !self.is_settled() {
            self.phase = Phase::Settled;
            report.phase = Phase::Settled;
        }
        report
    }
}

fn mean_displacement(previous: &[Vec2], nodes: &[LayoutNode]) -> f32 {
    if nodes.is_empty() {
        return 0.0;
    }
    let total = previous
        .iter()
        .zip(nodes)
        .map(|(before, node)| (node.position - *before).length())
        .sum::<f32>();
    total / nodes.len() as f32
}

#[cfg(test)]
mod tests {
    use std::f32::consts::TAU;

    use eframe::egui::vec2;

    use super::*;

    fn ring_of(count: usize, radius: f32, body: f32) -> Vec<LayoutNode> {
        (0..count)
            .map(|index| {
                let angle = index as f32 / count as f32 * TAU;
                let target = vec2(angle.cos(), angle.sin()) * radius;
                LayoutNode {
                    mob: MobId(index),
                    target,
                    position: target,
                    velocity: Vec2::ZERO,
                    radius: body,
                }
            })
            .collect()
    }

    fn assert_margin_kept(nodes: &[LayoutNode], config: &ForceConfig) {
        let slack = config.settle_tolerance + 1e-3;
        for (index, a) in nodes.iter().enumerate() {
            for b in &nodes[index + 1..] {
                let distance = (a.position - b.position).length();
                let required = a.radius + b.radius + config.margin();
                assert!(
                    distance + slack >= required,
                    "{:?} and {:?} too close: distance {distance}, required {required}",
                    a.mob,
                    b.mob
                );
            }
        }
    }

    #[test]
    fn spacious_ring_stays_on_target() {
        let config = ForceConfig::default();
        let mut nodes = ring_of(4, 200.0, 8.0);
        let mut resolver = ForceResolver::default();
        let report = resolver.run_to_completion(&mut nodes, &config, |_, _| {});

        assert_eq!(report.phase, Phase::Settled);
        for node in &nodes {
            assert!((node.position - node.target).length() < 1e-3);
        }
    }

    #[test]
    fn crowded_ring_is_separated() {
        let config = ForceConfig::default();
        let mut nodes = ring_of(40, 80.0, 14.0);
        let mut resolver = ForceResolver::default();
        resolver.run_to_completion(&mut nodes, &config, |_, _| {});

        assert!(resolver.is_settled());
        assert_margin_kept(&nodes, &config);
    }

    #[test]
    fn identical_starting_points_converge() {
        let config = ForceConfig::default();
        let mut nodes = (0..20)
            .map(|index| LayoutNode {
                mob: MobId(index),
                target: vec2(160.0, 0.0),
                position: vec2(160.0, 0.0),
                velocity: Vec2::ZERO,
                radius: 10.0,
            })
            .collect::<Vec<_>>();

        let mut resolver = ForceResolver::default();
        let mut ticks = 0usize;
        resolver.run_to_completion(&mut nodes, &config, |_, _| ticks += 1);

        assert!(resolver.is_settled());
        assert!(ticks <= ForceResolver::tick_budget(&config));
        assert_margin_kept(&nodes, &config);
        for node in &nodes {
            assert!(node.position.x.is_finite() && node.position.y.is_finite());
        }
    }

    #[test]
    fn every_tick_is_observable() {
        let config = ForceConfig::default();
        let mut nodes = ring_of(12, 80.0, 12.0);
        let mut resolver = ForceResolver::default();
        let mut reports = Vec::new();
        resolver.run_to_completion(&mut nodes, &config, |report, snapshot| {
            assert_eq!(snapshot.len(), 12);
            reports.push(*report);
        });

        assert!(!reports.is_empty());
        for (index, report) in reports.iter().enumerate() {
            assert_eq!(report.tick, index + 1);
        }
        assert_eq!(reports.last().map(|report| report.phase), Some(Phase::Settled));
    }

    #[test]
    fn settled_resolver_is_inert() {
        let config = ForceConfig::default();
        let mut nodes = ring_of(10, 80.0, 12.0);
        let mut resolver = ForceResolver::default();
        resolver.run_to_completion(&mut nodes, &config, |_, _| {});

        let snapshot = nodes.clone();
        let report = resolver.tick(&mut nodes, &config);
        assert_eq!(report.phase, Phase::Settled);
        assert_eq!(report.mean_displacement, 0.0);
        assert_eq!(nodes, snapshot);
    }

    #[test]
    fn reset_returns_nodes_to_targets() {
        let config = ForceConfig::default();
        let mut nodes = ring_of(30, 80.0, 14.0);
        let mut resolver = ForceResolver::default();
        resolver.run_to_completion(&mut nodes, &config, |_, _| {});

        resolver.reset(&mut nodes);
        assert_eq!(resolver.phase(), Phase::Relaxing);
        for node in &nodes {
            assert_eq!(node.position, node.target);
            assert_eq!(node.velocity, Vec2::ZERO);
        }
    }

    #[test]
    fn relax_budget_excludes_settle_passes() {
        let config = ForceConfig::default();
        let relax = ForceResolver::relax_budget(&config);
        assert!((295..=305).contains(&relax), "relax = {relax}");
        assert_eq!(
            ForceResolver::tick_budget(&config),
            relax + config.max_settle_passes + 2
        );
    }

    #[test]
    fn alpha_decays_monotonically_while_relaxing() {
        let config = ForceConfig::default();
        let mut nodes = ring_of(30, 80.0, 14.0);
        let mut resolver = ForceResolver::default();
        let mut last_alpha = 1.0;
        for _ in 0..50 {
            let report = resolver.tick(&mut nodes, &config);
            if report.phase != Phase::Relaxing {
                break;
            }
            assert!(report.alpha < last_alpha);
            last_alpha = report.alpha;
        }
    }
}
