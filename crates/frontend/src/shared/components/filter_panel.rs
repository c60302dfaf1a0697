use crate::shared::icons::icon;
use contracts::shared::filter::{FilterState, FilterValue};
use leptos::prelude::*;

pub const PANEL_TITLE: &str = "Filters";

/// One active filter as shown in the chip row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    pub field: String,
    pub label: String,
}

/// Chips for every non-empty field, in key order.
pub fn filter_chips(filter: &FilterState) -> Vec<FilterChip> {
    filter
        .iter()
        .filter(|(_, value)| !value.is_empty())
        .map(|(field, value)| {
            let text = match value {
                FilterValue::Null => String::new(),
                FilterValue::Scalar(v) => v.clone(),
                FilterValue::List(values) => values.join(", "),
                FilterValue::Map(entries) => entries
                    .iter()
                    .map(|(k, v)| format!("{k}={v}"))
                    .collect::<Vec<_>>()
                    .join(", "),
            };
            FilterChip {
                field: field.clone(),
                label: format!("{field}: {text}"),
            }
        })
        .collect()
}

/// FilterPanel component - collapsible filter panel with pagination
#[component]
pub fn FilterPanel(
    /// Whether the filter panel is expanded
    #[prop(into)]
    is_expanded: RwSignal<bool>,

    /// Number of active filters (for badge display)
    #[prop(into)]
    active_filters_count: Signal<usize>,

    /// Pagination controls shown in the header
    #[prop(into)]
    pagination_controls: ViewFn,

    /// Filter tags (active filter chips) - optional
    #[prop(optional, into)]
    filter_tags: Option<ViewFn>,

    /// Header actions (refresh etc.) - optional
    #[prop(optional, into)]
    actions: Option<ViewFn>,

    /// Filter content (form fields)
    children: Children,
) -> impl IntoView {
    let toggle_expanded = move |_| {
        is_expanded.update(|e| *e = !*e);
    };

    view! {
        <div class="filter-panel">
            <div class="filter-panel-header">
                <div
                    class="filter-panel-header__left"
                    on:click=toggle_expanded
                >
                    <span class=move || {
                        if is_expanded.get() {
                            "filter-panel__chevron filter-panel__chevron--expanded"
                        } else {
                            "filter-panel__chevron"
                        }
                    }>
                        {icon("chevron-down")}
                    </span>
                    {icon("filter")}
                    <span class="filter-panel__title">{PANEL_TITLE}</span>
                    {move || {
                        let count = active_filters_count.get();
                        (count > 0).then(|| view! {
                            <span class="badge badge--primary">{count}</span>
                        })
                    }}
                </div>
                <div class="filter-panel-header__center">
                    {pagination_controls.run()}
                </div>
                {actions.map(|actions| view! {
                    <div class="filter-panel-header__right">{actions.run()}</div>
                })}
            </div>

            <div class=move || {
                if is_expanded.get() {
                    "filter-panel__collapsible filter-panel__collapsible--expanded"
                } else {
                    "filter-panel__collapsible filter-panel__collapsible--collapsed"
                }
            }>
                <div class="filter-panel-content">
                    {children()}
                    {filter_tags.map(|tags| view! {
                        <div class="filter-tags">{move || tags.run()}</div>
                    })}
                </div>
            </div>
        </div>
    }
}

/// FilterTag component - individual filter tag/chip
#[component]
pub fn FilterTag(
    /// Tag label
    #[prop(into)]
    label: String,

    /// Callback when remove is clicked
    on_remove: Callback<()>,
) -> impl IntoView {
    view! {
        <div class="filter-tag">
            <span>{label}</span>
            <span
                class="filter-tag__remove"
                on:click=move |e| {
                    e.stop_propagation();
                    on_remove.run(());
                }
            >
                {icon("x")}
            </span>
        </div>
    }
}
