use serde::Serialize;

use super::era::Era;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct MobId(pub usize);

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Behavior {
    Hostile,
    Passive,
    Neutral,
    Other(String),
}

impl Behavior {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "hostile" => Self::Hostile,
            "passive" => Self::Passive,
            "neutral" => Self::Neutral,
            _ => Self::Other(trimmed.to_owned()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Hostile => "hostile",
            Self::Passive => "passive",
            Self::Neutral => "neutral",
            Self::Other(raw) => raw.as_str(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct Mob {
    pub id: i64,
    pub name: String,
    pub behavior: Behavior,
    pub spawn_behavior: String,
    pub health_points: f64,
    pub max_damage: f64,
    pub version: String,
    pub reproductive_requirement: Option<String>,
    pub era: Era,
}

#[derive(Clone, Debug)]
pub struct MobDataset {
    pub source: String,
    pub mobs: Vec<Mob>,
}

impl MobDataset {
    pub fn new(source: impl Into<String>, mobs: Vec<Mob>) -> Self {
        Self {
            source: source.into(),
            mobs,
        }
    }

    pub fn len(&self) -> usize {
        self.mobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mobs.is_empty()
    }

    pub fn get(&self, id: MobId) -> Option<&Mob> {
        self.mobs.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = MobId> + '_ {
        (0..self.mobs.len()).map(MobId)
    }

    pub fn health_extent(&self) -> Option<(f64, f64)> {
        extent(self.mobs.iter().map(|mob| mob.health_points))
    }

    pub fn max_damage(&self) -> Option<f64> {
        extent(self.mobs.iter().map(|mob| mob.max_damage)).map(|(_, max)| max)
    }

    pub fn era_count(&self, era: Era) -> usize {
        self.mobs.iter().filter(|mob| mob.era == era).count()
    }
}

fn extent(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .filter(|value| value.is_finite())
        .fold(None, |acc, value| match acc {
            None => Some((value, value)),
            Some((min, max)) => Some((min.min(value), max.max(value))),
        })
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn mob(name: &str, behavior: &str, health: f64, damage: f64, version: &str) -> Mob {
        Mob {
            id: 0,
            name: name.to_owned(),
            behavior: Behavior::parse(behavior),
            spawn_behavior: "natural".to_owned(),
            health_points: health,
            max_damage: damage,
            version: version.to_owned(),
            reproductive_requirement: None,
            era: Era::from_version(version),
        }
    }

    pub(crate) fn dataset(mobs: Vec<Mob>) -> MobDataset {
        let mobs = mobs
            .into_iter()
            .enumerate()
            .map(|(index, mut mob)| {
                mob.id = index as i64 + 1;
                mob
            })
            .collect();
        MobDataset::new("fixture", mobs)
    }
}
