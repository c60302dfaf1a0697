pub mod filter_bar;
pub mod state;

use chrono::{DateTime, Utc};
use contracts::domain::a001_backlog_item::dto::BacklogItemListItemDto;
use contracts::domain::a001_backlog_item::list::{COLUMNS, SEARCH};
use contracts::shared::filter::{FilterState, FilterValue};
use contracts::shared::list_request::ListRequest;
use gloo_timers::future::TimeoutFuture;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use self::filter_bar::BacklogFilterBar;
use self::state::{create_session, VIEW_CONFIG};
use crate::shared::components::filter_panel::{filter_chips, FilterPanel, FilterTag};
use crate::shared::components::pagination_controls::PaginationControls;
use crate::shared::components::table::SortableHeaderCell;
use crate::shared::icons::icon;
use crate::shared::list_state::{current_query, ListViewConfig, PageView, PendingFetch, SortChange};
use crate::shared::list_utils::next_sort;

const TABLE_ID: &str = "a001-backlog-item-table";

/// "15.03.2024 14:02"
pub fn format_datetime(value: &DateTime<Utc>) -> String {
    value.format("%d.%m.%Y %H:%M").to_string()
}

fn assignee_name(item: &BacklogItemListItemDto) -> String {
    item.assignee
        .as_ref()
        .map(|user| user.name.clone())
        .unwrap_or_else(|| "—".to_string())
}

#[component]
pub fn BacklogItemList() -> impl IntoView {
    let config = ListViewConfig::load(VIEW_CONFIG);
    let debounce_ms = config.search_debounce_ms;
    let page_size_options = config.page_size_options.clone();
    let session = StoredValue::new_local(create_session(&config));

    let page = RwSignal::new(PageView::<BacklogItemListItemDto>::default());
    let request = RwSignal::new(ListRequest::new(config.page_size));
    let form_value = RwSignal::new(FilterState::new());
    let search_text = RwSignal::new(String::new());
    let is_filter_expanded = RwSignal::new(false);

    // Переносит состояние сессии в сигналы
    let publish = move || {
        session.try_with_value(|s| {
            page.set(s.view());
            request.set(s.controller().current_request().list);

            let value = s.form().value().clone();
            let search = value
                .get(SEARCH)
                .and_then(|v| v.as_scalar())
                .unwrap_or_default()
                .to_string();
            // не затираем пробелы, которые пользователь ещё печатает
            if search_text.get_untracked().trim() != search.trim() {
                search_text.set(search);
            }
            form_value.set(value);
        });
    };

    let run = move |fetch: Option<PendingFetch>| {
        publish();
        if let Some(fetch) = fetch {
            spawn_local(async move {
                let outcome = fetch.await;
                log::debug!("backlog list: fetch finished: {outcome:?}");
                publish();
            });
        }
    };

    let navigate = move || {
        let query = current_query();
        run(session.try_update_value(|s| s.navigate(&query)).flatten());
    };

    // первичная загрузка по адресной строке
    Effect::new(move |_| navigate());

    // назад/вперёд в истории браузера
    let popstate = window_event_listener(ev::popstate, move |_| navigate());
    on_cleanup(move || popstate.remove());

    let go_to_page = move |index: u32| {
        let size = request.with_untracked(|r| r.page_size);
        run(session.try_update_value(|s| s.page(index, size)).flatten());
    };

    let change_page_size = move |size: u32| {
        let index = request.with_untracked(|r| r.page_index);
        run(session.try_update_value(|s| s.page(index, size)).flatten());
    };

    let toggle_sort = move |field: String| {
        let current = request.with_untracked(|r| SortChange::new(r.order_by.clone(), r.order_direction));
        let sort = next_sort(&current, &field);
        run(session.try_update_value(|s| s.sort(sort)).flatten());
    };

    let patch_field = move |(field, value): (String, FilterValue)| {
        run(session.try_update_value(|s| s.patch_field(&field, value)).flatten());
    };

    let clear_filters = move |_: ()| {
        run(session.try_update_value(|s| s.clear_filters()).flatten());
    };

    let edit_search = move |text: String| {
        let Some(ticket) = session.try_update_value(|s| s.edit_search(&text)) else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(debounce_ms).await;
            run(session.try_update_value(|s| s.search_idle(ticket)).flatten());
        });
    };

    let refresh = move || run(session.try_update_value(|s| s.refresh()));

    let dismiss_error = move || {
        session.try_with_value(|s| s.dismiss_error());
        publish();
    };

    let loading = Signal::derive(move || page.with(|p| p.loading));
    let active_filters_count = Signal::derive(move || form_value.with(|f| f.active_count()));

    view! {
        <div class="page" id="a001_backlog_item--list">
            <div class="page__header">
                <div class="page__header-left">
                    <h1 class="page__title">"Backlog"</h1>
                    <span class="badge badge--primary">
                        {move || page.with(|p| p.total_count.to_string())}
                    </span>
                </div>
            </div>

            <div class="page__content">
                <FilterPanel
                    is_expanded=is_filter_expanded
                    active_filters_count=active_filters_count
                    pagination_controls=move || view! {
                        <PaginationControls
                            current_page=Signal::derive(move || request.with(|r| r.page_index))
                            total_pages=Signal::derive(move || page.with(|p| p.total_pages()))
                            total_count=Signal::derive(move || page.with(|p| p.total_count))
                            page_size=Signal::derive(move || request.with(|r| r.page_size))
                            on_page_change=Callback::new(go_to_page)
                            on_page_size_change=Callback::new(change_page_size)
                            page_size_options=page_size_options.clone()
                            disabled=loading
                        />
                    }
                    actions=move || view! {
                        <Button
                            appearance=ButtonAppearance::Primary
                            on_click=move |_| refresh()
                            disabled=loading
                        >
                            {move || if loading.get() { "Loading..." } else { "Refresh" }}
                        </Button>
                    }
                    filter_tags=move || view! {
                        {move || {
                            form_value
                                .with(filter_chips)
                                .into_iter()
                                .map(|chip| {
                                    let field = chip.field.clone();
                                    let empty = session
                                        .try_with_value(|s| s.form().stub().shape_of(&field))
                                        .flatten()
                                        .map(|shape| shape.empty_value())
                                        .unwrap_or(FilterValue::Null);
                                    view! {
                                        <FilterTag
                                            label=chip.label
                                            on_remove=Callback::new(move |_| {
                                                patch_field((field.clone(), empty.clone()))
                                            })
                                        />
                                    }
                                })
                                .collect_view()
                        }}
                    }
                >
                    <BacklogFilterBar
                        value=form_value
                        search_text=search_text
                        on_patch=Callback::new(patch_field)
                        on_search=Callback::new(edit_search)
                        on_clear=Callback::new(clear_filters)
                    />
                </FilterPanel>

                {move || {
                    page.with(|p| p.error.clone()).map(|err| view! {
                        <div class="alert alert--error">
                            <span>{format!("Failed to load backlog items: {err}")}</span>
                            <Button
                                appearance=ButtonAppearance::Secondary
                                on_click=move |_| refresh()
                            >
                                "Retry"
                            </Button>
                            <Button
                                appearance=ButtonAppearance::Subtle
                                on_click=move |_| dismiss_error()
                            >
                                {icon("x")}
                            </Button>
                        </div>
                    })
                }}

                <div class="table-wrapper">
                    <Table attr:id=TABLE_ID attr:style="width: 100%; min-width: 900px;">
                        <TableHeader>
                            <TableRow>
                                {COLUMNS
                                    .iter()
                                    .map(|&(field, label)| view! {
                                        <SortableHeaderCell
                                            label=label
                                            sort_field=field
                                            current_sort_field=Signal::derive(move || request.with(|r| r.order_by.clone()))
                                            sort_direction=Signal::derive(move || request.with(|r| r.order_direction))
                                            on_sort=Callback::new(toggle_sort)
                                            min_width=if field == "title" { 240.0 } else { 90.0 }
                                        />
                                    })
                                    .collect_view()}
                            </TableRow>
                        </TableHeader>
                        <TableBody>
                            <For
                                each=move || page.with(|p| p.items.clone())
                                key=|item| item.id
                                children=move |item| {
                                    let assignee = assignee_name(&item);
                                    let tags = item.tags.join(", ");
                                    let created = format_datetime(&item.created);
                                    let updated = item
                                        .last_updated
                                        .as_ref()
                                        .map(format_datetime)
                                        .unwrap_or_default();
                                    view! {
                                        <TableRow>
                                            <TableCell>
                                                <TableCellLayout>{item.number}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>
                                                    <span class="backlog-item__type">{item.item_type.display_name()}</span>
                                                    " "
                                                    {item.title.clone()}
                                                </TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{assignee}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{item.state.clone()}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout truncate=true>{tags}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{created}</TableCellLayout>
                                            </TableCell>
                                            <TableCell>
                                                <TableCellLayout>{updated}</TableCellLayout>
                                            </TableCell>
                                        </TableRow>
                                    }
                                }
                            />
                        </TableBody>
                    </Table>

                    <Show when=move || page.with(|p| p.items.is_empty() && !p.loading && p.error.is_none())>
                        <div class="table__empty">"No backlog items match the current filters"</div>
                    </Show>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_datetime() {
        let value = Utc.with_ymd_and_hms(2024, 3, 15, 14, 2, 26).unwrap();
        assert_eq!(format_datetime(&value), "15.03.2024 14:02");
    }
}
