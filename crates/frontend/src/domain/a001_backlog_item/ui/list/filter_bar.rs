use contracts::domain::a001_backlog_item::list::{ASSIGNED_USER_ID, CURRENT_USER_RELATION, TAGS, TYPE};
use contracts::enums::{BacklogItemType, CurrentUserRelation};
use contracts::shared::filter::{FilterState, FilterValue};
use leptos::prelude::*;
use thaw::*;

/// Значение `<select>`: пустая строка означает "все"
pub fn select_value(raw: &str) -> FilterValue {
    if raw.is_empty() {
        FilterValue::Null
    } else {
        FilterValue::scalar(raw)
    }
}

/// "ui, urgent ,, api" → ["ui", "urgent", "api"]
pub fn parse_tags(raw: &str) -> FilterValue {
    FilterValue::list(raw.split(',').map(str::trim).filter(|tag| !tag.is_empty()))
}

fn scalar_of(filter: &FilterState, field: &str) -> String {
    filter
        .get(field)
        .and_then(|v| v.as_scalar())
        .unwrap_or_default()
        .to_string()
}

#[component]
pub fn BacklogFilterBar(
    /// Значение формы фильтров
    #[prop(into)]
    value: Signal<FilterState>,
    /// Текст поиска, как его видит пользователь
    search_text: RwSignal<String>,
    on_patch: Callback<(String, FilterValue)>,
    on_search: Callback<String>,
    on_clear: Callback<()>,
) -> impl IntoView {
    let patch = move |field: &'static str, v: FilterValue| on_patch.run((field.to_string(), v));

    view! {
        <Flex gap=FlexGap::Small align=FlexAlign::End>
            <Flex vertical=true gap=FlexGap::Small>
                <Label>"Search"</Label>
                <input
                    type="text"
                    class="filter-input"
                    placeholder="Title, description..."
                    prop:value=move || search_text.get()
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        search_text.set(text.clone());
                        on_search.run(text);
                    }
                />
            </Flex>

            <Flex vertical=true gap=FlexGap::Small>
                <Label>"Mode"</Label>
                <select
                    class="filter-select"
                    prop:value=move || value.with(|f| scalar_of(f, CURRENT_USER_RELATION))
                    on:change=move |ev| patch(CURRENT_USER_RELATION, select_value(&event_target_value(&ev)))
                >
                    <option value="">"Everything"</option>
                    {CurrentUserRelation::all().into_iter().map(|relation| view! {
                        <option value=relation.code()>{relation.display_name()}</option>
                    }).collect_view()}
                </select>
            </Flex>

            <Flex vertical=true gap=FlexGap::Small>
                <Label>"Type"</Label>
                <select
                    class="filter-select"
                    prop:value=move || value.with(|f| scalar_of(f, TYPE))
                    on:change=move |ev| patch(TYPE, select_value(&event_target_value(&ev)))
                >
                    <option value="">"All types"</option>
                    {BacklogItemType::all().into_iter().map(|item_type| view! {
                        <option value=item_type.code()>{item_type.display_name()}</option>
                    }).collect_view()}
                </select>
            </Flex>

            <Flex vertical=true gap=FlexGap::Small>
                <Label>"Tags"</Label>
                <input
                    type="text"
                    class="filter-input"
                    placeholder="ui, urgent"
                    prop:value=move || value.with(|f| {
                        f.get(TAGS).map(|v| v.as_list().join(", ")).unwrap_or_default()
                    })
                    on:change=move |ev| patch(TAGS, parse_tags(&event_target_value(&ev)))
                />
            </Flex>

            <Flex vertical=true gap=FlexGap::Small>
                <Label>"Assignee id"</Label>
                <input
                    type="text"
                    class="filter-input"
                    prop:value=move || value.with(|f| scalar_of(f, ASSIGNED_USER_ID))
                    on:change=move |ev| {
                        let raw = event_target_value(&ev);
                        patch(ASSIGNED_USER_ID, select_value(raw.trim()))
                    }
                />
            </Flex>

            <Button
                appearance=ButtonAppearance::Secondary
                on_click=move |_| on_clear.run(())
            >
                "Clear filters"
            </Button>
        </Flex>
    }
}
