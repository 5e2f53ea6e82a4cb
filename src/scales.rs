use std::f32::consts::TAU;

use eframe::egui::Color32;

use crate::config::NodeScaleConfig;
use crate::mobs::{Behavior, MobDataset};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SqrtScale {
    domain: (f64, f64),
    range: (f32, f32),
}

impl SqrtScale {
    pub fn new(domain: (f64, f64), range: (f32, f32)) -> Self {
        Self { domain, range }
    }

    fn transform(value: f64) -> f64 {
        value.signum() * value.abs().sqrt()
    }

    pub fn map(&self, value: f64) -> f32 {
        let (r0, r1) = self.range;
        let low = r0.min(r1);
        let high = r0.max(r1);

        let d0 = Self::transform(self.domain.0);
        let d1 = Self::transform(self.domain.1);
        let span = d1 - d0;
        let t = if span.abs() < f64::EPSILON || !span.is_finite() {
            0.5
        } else if value.is_finite() {
            (Self::transform(value) - d0) / span
        } else {
            0.0
        };

        (r0 + (t as f32) * (r1 - r0)).clamp(low, high)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArcScale {
    max: f64,
}

impl ArcScale {
    pub fn new(max_observed: Option<f64>) -> Self {
        let max = max_observed
            .filter(|max| max.is_finite() && *max > 0.0)
            .unwrap_or(1.0);
        Self { max }
    }

    pub fn map(&self, value: f64) -> f32 {
        if !value.is_finite() {
            return 0.0;
        }
        ((value / self.max) as f32 * TAU).clamp(0.0, TAU)
    }
}

pub const HOSTILE_COLOR: Color32 = Color32::from_rgb(0x7b, 0xd3, 0x89);
pub const PASSIVE_COLOR: Color32 = Color32::from_rgb(0xff, 0x6b, 0x6b);
pub const NEUTRAL_COLOR: Color32 = Color32::from_rgb(0x8e, 0xc5, 0xff);
pub const FALLBACK_FILL: Color32 = Color32::from_rgb(0x88, 0x88, 0x88);
pub const FALLBACK_ARC: Color32 = Color32::from_rgb(0xaa, 0xaa, 0xaa);

pub fn darker(color: Color32, k: f32) -> Color32 {
    let factor = 0.7_f32.powf(k);
    let channel = |value: u8| ((value as f32 * factor).round()).clamp(0.0, 255.0) as u8;
    Color32::from_rgba_unmultiplied(
        channel(color.r()),
        channel(color.g()),
        channel(color.b()),
        color.a(),
    )
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CategoryPalette;

impl CategoryPalette {
    pub fn known(&self, behavior: &Behavior) -> Option<Color32> {
        match behavior {
            Behavior::Hostile => Some(HOSTILE_COLOR),
            Behavior::Passive => Some(PASSIVE_COLOR),
            Behavior::Neutral => Some(NEUTRAL_COLOR),
            Behavior::Other(_) => None,
        }
    }

    pub fn fill(&self, behavior: &Behavior) -> Color32 {
        self.known(behavior).unwrap_or(FALLBACK_FILL)
    }

    pub fn stroke(&self, behavior: &Behavior) -> Color32 {
        darker(self.fill(behavior), 0.8)
    }

    pub fn arc(&self, behavior: &Behavior) -> Color32 {
        darker(self.known(behavior).unwrap_or(FALLBACK_ARC), 0.6)
    }

    pub fn legend(&self) -> [(&'static str, Color32); 3] {
        [
            ("hostile", HOSTILE_COLOR),
            ("passive", PASSIVE_COLOR),
            ("neutral", NEUTRAL_COLOR),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    pub radius: SqrtScale,
    pub damage: ArcScale,
    pub palette: CategoryPalette,
}

impl Scales {
    pub fn build(dataset: &MobDataset, nodes: NodeScaleConfig) -> Self {
        let health = dataset.health_extent().unwrap_or((0.0, 1.0));
        Self {
            radius: SqrtScale::new(health, (nodes.min_radius, nodes.max_radius)),
            damage: ArcScale::new(dataset.max_damage()),
            palette: CategoryPalette,
        }
    }
}
