mod collect;
mod dataset;
mod era;
mod parse;

pub use collect::load_dataset;
pub use dataset::{Behavior, Mob, MobDataset, MobId};
pub use era::Era;

#[cfg(test)]
pub(crate) use dataset::fixtures;
