mod controls;
mod details;
mod panels;
mod tooltip;

pub(in crate::app) use tooltip::show_mob_tooltip;
