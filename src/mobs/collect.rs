use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use tracing::info;

use crate::config::MissingNumeric;

use super::dataset::MobDataset;
use super::parse::{RawMobRow, mob_from_row};

pub fn load_dataset(path: &Path, policy: MissingNumeric) -> Result<MobDataset> {
    let file = File::open(path)
        .with_context(|| format!("failed to open mob table {}", path.display()))?;
    load_dataset_from_reader(file, &path.display().to_string(), policy)
}

pub fn load_dataset_from_reader<R: Read>(
    reader: R,
    source: &str,
    policy: MissingNumeric,
) -> Result<MobDataset> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let mut mobs = Vec::new();
    let mut skipped = 0usize;
    for (index, record) in csv_reader.deserialize::<RawMobRow>().enumerate() {
        let row = index + 1;
        let raw = record.with_context(|| format!("malformed CSV data at row {row} of {source}"))?;
        match mob_from_row(raw, row, policy).with_context(|| format!("invalid mob in {source}"))? {
            Some(mob) => mobs.push(mob),
            None => skipped += 1,
        }
    }

    if mobs.is_empty() {
        return Err(anyhow!("no usable mob rows found in {source}"));
    }

    info!(source, mobs = mobs.len(), skipped, "loaded mob table");
    Ok(MobDataset::new(source, mobs))
}
