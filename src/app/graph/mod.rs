mod build;
mod interaction;
mod scene;
mod view;

pub(in crate::app) use build::build_layout_nodes;
pub(in crate::app) use scene::NodeVisual;
