use crate::mobs::{MobDataset, MobId};

pub(super) const DIMMED_OPACITY: f32 = 0.35;
pub(super) const BASE_STROKE_WIDTH: f32 = 2.0;
pub(super) const SELECTED_STROKE_WIDTH: f32 = 3.2;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(super) enum Focus {
    #[default]
    NoSelection,
    Selected(MobId),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct InteractionState {
    focus: Focus,
    hovered: Option<MobId>,
}

impl InteractionState {
    pub(super) fn selected(&self) -> Option<MobId> {
        match self.focus {
            Focus::NoSelection => None,
            Focus::Selected(id) => Some(id),
        }
    }

    pub(super) fn hovered(&self) -> Option<MobId> {
        self.hovered
    }

    pub(super) fn hover(&mut self, hovered: Option<MobId>) {
        self.hovered = hovered;
    }

    pub(super) fn tooltip_target(&self) -> Option<MobId> {
        self.hovered.filter(|id| self.selected() != Some(*id))
    }

    pub(super) fn click_node(&mut self, id: MobId) {
        self.focus = Focus::Selected(id);
    }

    pub(super) fn click_outside(&mut self) {
        self.focus = Focus::NoSelection;
        self.hovered = None;
    }

    pub(super) fn unpin(&mut self) {
        self.click_outside();
    }

    pub(super) fn retain_valid(&mut self, dataset: &MobDataset) {
        if let Focus::Selected(id) = self.focus
            && dataset.get(id).is_none()
        {
            self.focus = Focus::NoSelection;
        }
        if self.hovered.is_some_and(|id| dataset.get(id).is_none()) {
            self.hovered = None;
        }
    }

    pub(super) fn detail_target(&self, dataset: &MobDataset) -> Option<MobId> {
        self.selected()
            .filter(|id| dataset.get(*id).is_some())
            .or_else(|| dataset.ids().next())
    }

    pub(super) fn is_active(&self, id: MobId) -> bool {
        self.selected() == Some(id)
    }

    pub(super) fn opacity(&self, id: MobId) -> f32 {
        match self.focus {
            Focus::NoSelection => 1.0,
            Focus::Selected(selected) if selected == id => 1.0,
            Focus::Selected(_) => DIMMED_OPACITY,
        }
    }

    pub(super) fn stroke_width(&self, id: MobId) -> f32 {
        if self.is_active(id) {
            SELECTED_STROKE_WIDTH
        } else {
            BASE_STROKE_WIDTH
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mobs::fixtures::{dataset, mob};

    fn three_mobs() -> MobDataset {
        dataset(vec![
            mob("cow", "passive", 10.0, 0.0, "1.0"),
            mob("zombie", "hostile", 20.0, 3.0, "1.0"),
            mob("wolf", "neutral", 8.0, 4.0, "1.0"),
        ])
    }

    #[test]
    fn starts_without_selection_showing_first_record() {
        let data = three_mobs();
        let state = InteractionState::default();
        assert_eq!(state.selected(), None);
        assert_eq!(state.detail_target(&data), Some(MobId(0)));
        for id in data.ids() {
            assert_eq!(state.opacity(id), 1.0);
            assert_eq!(state.stroke_width(id), BASE_STROKE_WIDTH);
        }
    }

    #[test]
    fn selecting_activates_exactly_one_record() {
        let data = three_mobs();
        let mut state = InteractionState::default();
        state.click_node(MobId(1));

        let active = data.ids().filter(|id| state.is_active(*id)).count();
        assert_eq!(active, 1);
        assert_eq!(state.opacity(MobId(1)), 1.0);
        assert_eq!(state.opacity(MobId(0)), DIMMED_OPACITY);
        assert_eq!(state.opacity(MobId(2)), DIMMED_OPACITY);
        assert_eq!(state.stroke_width(MobId(1)), SELECTED_STROKE_WIDTH);
        assert_eq!(state.detail_target(&data), Some(MobId(1)));
    }

    #[test]
    fn clicking_another_node_moves_the_selection() {
        let mut state = InteractionState::default();
        state.click_node(MobId(1));
        state.click_node(MobId(2));
        assert_eq!(state.selected(), Some(MobId(2)));
        assert_eq!(state.opacity(MobId(1)), DIMMED_OPACITY);
    }

    #[test]
    fn click_outside_and_unpin_restore_uniform_opacity() {
        let data = three_mobs();
        for deselect in [InteractionState::click_outside, InteractionState::unpin] {
            let mut state = InteractionState::default();
            state.click_node(MobId(2));
            deselect(&mut state);

            assert_eq!(state.selected(), None);
            assert!(data.ids().all(|id| state.opacity(id) == 1.0));
            assert_eq!(state.detail_target(&data), Some(MobId(0)));
        }
    }

    #[test]
    fn tooltip_is_suppressed_for_the_pinned_record() {
        let mut state = InteractionState::default();
        state.hover(Some(MobId(1)));
        assert_eq!(state.tooltip_target(), Some(MobId(1)));

        state.click_node(MobId(1));
        assert_eq!(state.tooltip_target(), None);

        state.hover(Some(MobId(0)));
        assert_eq!(state.tooltip_target(), Some(MobId(0)));

        state.hover(None);
        assert_eq!(state.tooltip_target(), None);
    }

    #[test]
    fn stale_selection_is_dropped() {
        let data = three_mobs();
        let mut state = InteractionState::default();
        state.click_node(MobId(9));
        state.hover(Some(MobId(7)));
        state.retain_valid(&data);
        assert_eq!(state.selected(), None);
        assert_eq!(state.hovered(), None);
    }

    #[test]
    fn empty_dataset_has_no_detail() {
        let data = dataset(Vec::new());
        assert_eq!(InteractionState::default().detail_target(&data), None);
    }
}
