use eframe::egui::{self, Align, Context, Layout, Sense, Ui, Vec2};

use crate::config::LayoutConfig;
use crate::layout::plan_rings;
use crate::mobs::MobDataset;
use crate::scales::Scales;

use super::super::graph::build_layout_nodes;
use super::super::physics::ForceResolver;
use super::super::selection::InteractionState;
use super::super::{DataSource, ViewModel};

impl ViewModel {
    pub(in crate::app) fn new(dataset: MobDataset, config: LayoutConfig) -> Self {
        let plan = plan_rings(&dataset, config.rings);
        let scales = Scales::build(&dataset, config.nodes);
        let nodes = build_layout_nodes(&dataset, &plan, &scales);

        Self {
            dataset,
            config,
            plan,
            scales,
            nodes,
            resolver: ForceResolver::default(),
            last_report: None,
            interaction: InteractionState::default(),
            search: String::new(),
            search_match_cache: None,
            pan: Vec2::ZERO,
            zoom: 1.0,
            fit_pending: true,
            live_physics: true,
            show_labels: true,
            show_damage_arcs: true,
            visuals: Vec::new(),
        }
    }

    fn deselect_on_background_click(&mut self, ui: &mut Ui, draw: fn(&mut Self, &mut Ui)) {
        let background = ui.interact(
            ui.max_rect(),
            ui.id().with("background_click"),
            Sense::click(),
        );
        draw(self, ui);
        if background.clicked() {
            self.interaction.click_outside();
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        source: &DataSource,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("mob rings");
                    ui.separator();
                    ui.label(format!("data: {}", source.data_path.display()));
                    ui.label(format!("mobs: {}", self.dataset.len()));
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload data"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Fit view").clicked() {
                        self.fit_pending = true;
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if let Some(report) = self.last_report {
                            ui.label(format!(
                                "worst overlap {:.2} px  |  mean step {:.3} px",
                                report.worst_overlap.max(0.0),
                                report.mean_displacement
                            ));
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.deselect_on_background_click(ui, Self::draw_controls));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.deselect_on_background_click(ui, Self::draw_details));

        egui::CentralPanel::default().show(ctx, |ui| {
            if is_loading {
                ui.vertical_centered(|ui| {
                    ui.add_space(120.0);
                    ui.heading("Reloading mob table...");
                    ui.add_space(8.0);
                    ui.spinner();
                });
            } else {
                self.draw_graph(ui);
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use eframe::egui::{Event, Modifiers, PointerButton, Pos2, RawInput, Rect, pos2, vec2};

    use super::*;
    use crate::mobs::MobId;
    use crate::mobs::fixtures::{dataset, mob};

    fn frame(events: Vec<Event>) -> RawInput {
        RawInput {
            screen_rect: Some(Rect::from_min_size(Pos2::ZERO, vec2(1200.0, 800.0))),
            events,
            ..Default::default()
        }
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::default(),
        }
    }

    #[test]
    fn clicking_empty_panel_space_clears_the_selection() {
        let data = dataset(vec![
            mob("cow", "passive", 10.0, 0.0, "1.0"),
            mob("zombie", "hostile", 20.0, 3.0, "1.0"),
        ]);
        let source = DataSource {
            data_path: PathBuf::from("fixture.csv"),
            config: LayoutConfig::default(),
        };
        let mut model = ViewModel::new(data, LayoutConfig::default());
        model.interaction.click_node(MobId(1));

        let ctx = Context::default();
        let empty_detail_space = pos2(1150.0, 780.0);
        let frames = [
            vec![Event::PointerMoved(empty_detail_space)],
            vec![button(empty_detail_space, true)],
            vec![button(empty_detail_space, false)],
            Vec::new(),
        ];
        for events in frames {
            let _ = ctx.run(frame(events), |ctx| {
                let mut reload = false;
                model.show(ctx, &source, &mut reload, false);
            });
        }

        assert_eq!(model.interaction.selected(), None);
    }

    #[test]
    fn frames_without_clicks_keep_the_selection() {
        let data = dataset(vec![mob("cow", "passive", 10.0, 0.0, "1.0")]);
        let source = DataSource {
            data_path: PathBuf::from("fixture.csv"),
            config: LayoutConfig::default(),
        };
        let mut model = ViewModel::new(data, LayoutConfig::default());
        model.interaction.click_node(MobId(0));

        let ctx = Context::default();
        for _ in 0..3 {
            let _ = ctx.run(frame(Vec::new()), |ctx| {
                let mut reload = false;
                model.show(ctx, &source, &mut reload, false);
            });
        }

        assert_eq!(model.interaction.selected(), Some(MobId(0)));
    }
}
