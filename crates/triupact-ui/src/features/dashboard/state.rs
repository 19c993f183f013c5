//! Dashboard view state: summary data, group filter, card visibility, and theme.
//!
//! # Design
//! - Visibility is stored per card key; keys absent from storage are visible.
//! - `reload` bumps on retry so the fetch effect re-runs.

use std::collections::BTreeMap;
use std::rc::Rc;

use triupact_core::format::format_count;
use triupact_core::summary::{HIGHLIGHTS, Summary, SummaryGroup};
use yew::functional::Reducible;

use crate::features::LoadStatus;
use crate::theme::ThemeMode;

/// Storage key for per-card visibility.
pub const SECTIONS_KEY: &str = "dashboard:sections:v1";

/// Card visibility map persisted as a JSON object of key to bool.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SectionVisibility {
    sections: BTreeMap<String, bool>,
}

impl SectionVisibility {
    /// Parse a stored value; malformed JSON yields all-visible.
    #[must_use]
    pub fn from_stored(value: Option<&str>) -> Self {
        let sections = value
            .and_then(|text| serde_json::from_str(text).ok())
            .unwrap_or_default();
        Self { sections }
    }

    /// JSON written under [`SECTIONS_KEY`].
    ///
    /// # Errors
    ///
    /// Propagates serialization failures.
    pub fn to_stored(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.sections)
    }

    /// Whether the card for `key` is shown.
    #[must_use]
    pub fn is_visible(&self, key: &str) -> bool {
        self.sections.get(key).copied().unwrap_or(true)
    }

    /// Flip one card.
    pub fn toggle(&mut self, key: &str) {
        let visible = self.is_visible(key);
        self.sections.insert(key.to_string(), !visible);
    }

    /// Number of hidden cards.
    #[must_use]
    pub fn hidden_count(&self) -> usize {
        self.sections.values().filter(|visible| !**visible).count()
    }

    /// Show every card again.
    pub fn show_all(&mut self) {
        self.sections.clear();
    }
}

/// One KPI card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KpiCard {
    /// Server key, also the visibility key.
    pub key: String,
    /// Card title.
    pub label: String,
    /// Formatted count.
    pub value: String,
}

/// Headline counts shown above the group grid.
#[must_use]
pub fn highlight_cards(summary: &Summary) -> Vec<KpiCard> {
    HIGHLIGHTS
        .iter()
        .map(|(key, label)| KpiCard {
            key: (*key).to_string(),
            label: (*label).to_string(),
            value: format_count(summary.count(key).unwrap_or(0)),
        })
        .collect()
}

/// Visible cards of `group`, in server order.
#[must_use]
pub fn group_cards(
    summary: &Summary,
    group: SummaryGroup,
    sections: &SectionVisibility,
) -> Vec<KpiCard> {
    summary
        .group(group)
        .iter()
        .filter(|entry| sections.is_visible(&entry.key))
        .map(|entry| KpiCard {
            key: entry.key.clone(),
            label: entry.label.clone(),
            value: format_count(entry.count),
        })
        .collect()
}

/// Header line totalling the selected group.
#[must_use]
pub fn group_total_line(summary: &Summary, group: SummaryGroup) -> String {
    format!(
        "{}: {} records",
        group.label(),
        format_count(summary.total(group))
    )
}

/// Everything the dashboard view renders.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DashboardState {
    /// Last fetched summary.
    pub summary: Summary,
    /// Fetch status.
    pub status: LoadStatus,
    /// Selected group filter.
    pub group: SummaryGroup,
    /// Card visibility.
    pub sections: SectionVisibility,
    /// Colour scheme of the dashboard surface.
    pub theme: ThemeMode,
    /// Retry counter.
    pub reload: u32,
}

impl DashboardState {
    /// Initial state from persisted preferences.
    #[must_use]
    pub fn restore(sections: SectionVisibility, theme: ThemeMode) -> Self {
        Self {
            summary: Summary::default(),
            status: LoadStatus::Loading,
            group: SummaryGroup::All,
            sections,
            theme,
            reload: 0,
        }
    }
}

/// Dashboard transitions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardAction {
    /// Summary arrived.
    Loaded(Summary),
    /// Summary request failed.
    Failed(String),
    /// Group filter changed.
    SelectGroup(SummaryGroup),
    /// A card was hidden or shown.
    ToggleSection(String),
    /// All cards shown again.
    ShowAll,
    /// Light/dark switch.
    ToggleTheme,
    /// Fetch again.
    Retry,
}

impl Reducible for DashboardState {
    type Action = DashboardAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            DashboardAction::Loaded(summary) => {
                next.summary = summary;
                next.status = LoadStatus::Ready;
            }
            DashboardAction::Failed(message) => next.status = LoadStatus::Failed(message),
            DashboardAction::SelectGroup(group) => next.group = group,
            DashboardAction::ToggleSection(key) => next.sections.toggle(&key),
            DashboardAction::ShowAll => next.sections.show_all(),
            DashboardAction::ToggleTheme => next.theme = next.theme.toggled(),
            DashboardAction::Retry => {
                next.status = LoadStatus::Loading;
                next.reload = next.reload.wrapping_add(1);
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triupact_test_support::fixtures;

    fn summary() -> Summary {
        Summary::from_body(&fixtures::dashboard_summary()).unwrap_or_default()
    }

    #[test]
    fn visibility_round_trips_through_storage() -> Result<(), serde_json::Error> {
        let mut sections = SectionVisibility::from_stored(None);
        assert!(sections.is_visible("province"));
        sections.toggle("province");
        let stored = sections.to_stored()?;
        assert_eq!(stored, r#"{"province":false}"#);
        let restored = SectionVisibility::from_stored(Some(&stored));
        assert!(!restored.is_visible("province"));
        assert_eq!(restored.hidden_count(), 1);
        assert_eq!(SectionVisibility::from_stored(Some("[1,2")), SectionVisibility::default());
        Ok(())
    }

    #[test]
    fn hidden_cards_drop_out_of_the_group() {
        let summary = summary();
        let mut sections = SectionVisibility::default();
        assert_eq!(group_cards(&summary, SummaryGroup::Forms, &sections).len(), 7);
        sections.toggle("formResearchPlan");
        let forms = group_cards(&summary, SummaryGroup::Forms, &sections);
        assert_eq!(forms.len(), 6);
        assert!(forms.iter().all(|card| card.key != "formResearchPlan"));
        sections.show_all();
        assert_eq!(sections.hidden_count(), 0);
    }

    #[test]
    fn total_line_covers_selected_group() {
        assert_eq!(
            group_total_line(&summary(), SummaryGroup::Forms),
            "Forms: 276 records"
        );
        let highlights = highlight_cards(&summary());
        assert_eq!(highlights[0].key, "province");
        assert_eq!(highlights[0].value, "77");
    }

    #[test]
    fn reducer_tracks_fetch_and_preferences() {
        let state = Rc::new(DashboardState::restore(
            SectionVisibility::default(),
            ThemeMode::Light,
        ));
        assert!(state.status.is_loading());
        let state = state.reduce(DashboardAction::Loaded(summary()));
        assert_eq!(state.status, LoadStatus::Ready);
        let state = state
            .reduce(DashboardAction::SelectGroup(SummaryGroup::People))
            .reduce(DashboardAction::ToggleTheme)
            .reduce(DashboardAction::Failed("HTTP 502".into()));
        assert_eq!(state.group, SummaryGroup::People);
        assert_eq!(state.theme, ThemeMode::Dark);
        assert_eq!(state.status.error(), Some("HTTP 502"));
        let state = state.reduce(DashboardAction::Retry);
        assert_eq!(state.reload, 1);
        assert!(state.status.is_loading());
    }
}
