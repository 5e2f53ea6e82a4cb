use anyhow::{Result, bail};
use serde::Deserialize;
use tracing::warn;

use crate::config::MissingNumeric;

use super::dataset::{Behavior, Mob};
use super::era::Era;

#[derive(Clone, Debug, Default, Deserialize)]
pub(super) struct RawMobRow {
    #[serde(default, rename = "ID")]
    pub(super) id: Option<String>,
    #[serde(default)]
    pub(super) name: Option<String>,
    #[serde(default, rename = "behaviorTypes")]
    pub(super) behavior_types: Option<String>,
    #[serde(default, rename = "spawnBehavior")]
    pub(super) spawn_behavior: Option<String>,
    #[serde(default, rename = "healthPoints")]
    pub(super) health_points: Option<String>,
    #[serde(default, rename = "maxDamage")]
    pub(super) max_damage: Option<String>,
    #[serde(default, rename = "minecraftVersion")]
    pub(super) minecraft_version: Option<String>,
    #[serde(default, rename = "reproductiveRequirement")]
    pub(super) reproductive_requirement: Option<String>,
}

enum Coerced<T> {
    Value(T),
    SkipRow,
}

fn parse_number(raw: Option<&str>) -> Option<f64> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

fn coerce_number(
    raw: Option<&str>,
    column: &str,
    row: usize,
    policy: MissingNumeric,
) -> Result<Coerced<f64>> {
    if let Some(value) = parse_number(raw) {
        return Ok(Coerced::Value(value));
    }

    let shown = raw.unwrap_or("").trim();
    match policy {
        MissingNumeric::Zero => {
            warn!(row, column, value = shown, "non-numeric cell treated as 0");
            Ok(Coerced::Value(0.0))
        }
        MissingNumeric::Skip => {
            warn!(row, column, value = shown, "skipping row with non-numeric cell");
            Ok(Coerced::SkipRow)
        }
        MissingNumeric::Fail => {
            bail!("row {row}: column {column} is not a number ({shown:?})")
        }
    }
}

fn non_empty(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_owned())
        .filter(|value| !value.is_empty())
}

pub(super) fn mob_from_row(raw: RawMobRow, row: usize, policy: MissingNumeric) -> Result<Option<Mob>> {
    let id = match coerce_number(raw.id.as_deref(), "ID", row, policy)? {
        Coerced::Value(value) => value as i64,
        Coerced::SkipRow => return Ok(None),
    };
    let health_points = match coerce_number(raw.health_points.as_deref(), "healthPoints", row, policy)? {
        Coerced::Value(value) => value,
        Coerced::SkipRow => return Ok(None),
    };
    let max_damage = match coerce_number(raw.max_damage.as_deref(), "maxDamage", row, policy)? {
        Coerced::Value(value) => value,
        Coerced::SkipRow => return Ok(None),
    };

    let era = Era::from_version(raw.minecraft_version.as_deref().unwrap_or(""));
    let version = non_empty(raw.minecraft_version).unwrap_or_default();

    Ok(Some(Mob {
        id,
        name: non_empty(raw.name).unwrap_or_else(|| format!("mob_{row}")),
        behavior: Behavior::parse(raw.behavior_types.as_deref().unwrap_or("")),
        spawn_behavior: non_empty(raw.spawn_behavior).unwrap_or_default(),
        health_points,
        max_damage,
        version,
        reproductive_requirement: non_empty(raw.reproductive_requirement),
        era,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(health: Option<&str>, damage: Option<&str>) -> RawMobRow {
        RawMobRow {
            id: Some("7".to_owned()),
            name: Some("cave_spider".to_owned()),
            behavior_types: Some("hostile".to_owned()),
            spawn_behavior: Some("spawner".to_owned()),
            health_points: health.map(str::to_owned),
            max_damage: damage.map(str::to_owned),
            minecraft_version: Some("1.0".to_owned()),
            reproductive_requirement: Some("   ".to_owned()),
        }
    }

    #[test]
    fn well_formed_row_converts() {
        let mob = mob_from_row(row(Some("12"), Some("3.5")), 1, MissingNumeric::Fail)
            .expect("converts")
            .expect("kept");
        assert_eq!(mob.id, 7);
        assert_eq!(mob.health_points, 12.0);
        assert_eq!(mob.max_damage, 3.5);
        assert_eq!(mob.era, Era::Debut);
        assert_eq!(mob.reproductive_requirement, None);
    }

    #[test]
    fn zero_policy_replaces_missing_numbers() {
        let mob = mob_from_row(row(None, Some("n/a")), 1, MissingNumeric::Zero)
            .expect("converts")
            .expect("kept");
        assert_eq!(mob.health_points, 0.0);
        assert_eq!(mob.max_damage, 0.0);
    }

    #[test]
    fn skip_policy_drops_the_row() {
        let result = mob_from_row(row(Some(""), Some("2")), 4, MissingNumeric::Skip).expect("ok");
        assert!(result.is_none());
    }

    #[test]
    fn fail_policy_names_row_and_column() {
        let error = mob_from_row(row(Some("12"), Some("NaN")), 9, MissingNumeric::Fail)
            .expect_err("fails");
        let message = error.to_string();
        assert!(message.contains("row 9"), "{message}");
        assert!(message.contains("maxDamage"), "{message}");
    }

    #[test]
    fn era_comes_from_the_untrimmed_version_cell() {
        let mut raw = row(Some("1"), Some("1"));
        raw.minecraft_version = Some(" 1.16".to_owned());
        let mob = mob_from_row(raw, 1, MissingNumeric::Zero)
            .expect("converts")
            .expect("kept");
        assert_eq!(mob.era, Era::Modern);
        assert_eq!(mob.version, "1.16");
    }

    #[test]
    fn missing_version_defaults_to_modern() {
        let mut raw = row(Some("1"), Some("1"));
        raw.minecraft_version = None;
        let mob = mob_from_row(raw, 1, MissingNumeric::Zero)
            .expect("converts")
            .expect("kept");
        assert_eq!(mob.era, Era::Modern);
        assert!(mob.version.is_empty());
    }
}
