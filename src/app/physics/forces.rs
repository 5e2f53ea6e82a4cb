use std::f32::consts::TAU;

use eframe::egui::{Vec2, vec2};

use super::LayoutNode;
use super::quadtree::QuadTree;

pub(super) fn apply_target_pull(nodes: &mut [LayoutNode], strength: f32, alpha: f32) {
    let scale = strength * alpha;
    for node in nodes {
        node.velocity += (node.target - node.position) * scale;
    }
}

fn fallback_direction(a: usize, b: usize) -> Vec2 {
    let angle = ((a as f32) * 0.618_034 + (b as f32) * 0.414_214) * TAU;
    vec2(angle.cos(), angle.sin())
}

#[derive(Clone, Copy, Debug)]
pub(super) struct CollisionParams {
    pub(super) padding: f32,
    pub(super) strength: f32,
}

pub(super) fn project_collisions(
    nodes: &mut [LayoutNode],
    params: CollisionParams,
    positions: &mut Vec<Vec2>,
    pairs: &mut Vec<(usize, usize)>,
) -> f32 {
    if nodes.len() < 2 {
        return 0.0;
    }

    positions.clear();
    positions.extend(nodes.iter().map(|node| node.position));
    let Some(tree) = QuadTree::build(positions) else {
        return 0.0;
    };

    let max_radius = nodes.iter().map(|node| node.radius).fold(0.0, f32::max);
    let reach = (max_radius + params.padding) * 2.0;
    tree.candidate_pairs(reach, pairs);

    let strength = params.strength.clamp(0.0, 1.0);
    let mut worst = 0.0_f32;
    for &(a, b) in pairs.iter() {
        let min_distance = nodes[a].radius + nodes[b].radius + params.padding * 2.0;
        let delta = nodes[a].position - nodes[b].position;
        let distance = delta.length();
        if distance >= min_distance {
            continue;
        }

        let overlap = min_distance - distance;
        worst = worst.max(overlap);

        let direction = if distance > 1e-4 {
            delta / distance
        } else {
            fallback_direction(a, b)
        };

        // The heavier node gives way less.
        let mass_a = nodes[a].radius * nodes[a].radius;
        let mass_b = nodes[b].radius * nodes[b].radius;
        let total = mass_a + mass_b;
        let share_a = if total > 0.0 { mass_b / total } else { 0.5 };

        let push = overlap * strength;
        nodes[a].position += direction * push * share_a;
        nodes[b].position -= direction * push * (1.0 - share_a);
    }

    worst
}

pub(super) fn worst_overlap(nodes: &[LayoutNode], margin: f32) -> f32 {
    let mut worst = 0.0_f32;
    for (index, a) in nodes.iter().enumerate() {
        for b in &nodes[index + 1..] {
            let min_distance = a.radius + b.radius + margin;
            let distance = (a.position - b.position).length();
            worst = worst.max(min_distance - distance);
        }
    }
    worst
}
