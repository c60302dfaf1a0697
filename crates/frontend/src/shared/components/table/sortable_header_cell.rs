//! Компонент сортируемой ячейки заголовка таблицы
//!
//! ```text
//! <SortableHeaderCell
//!     label="Title"
//!     sort_field="title"
//!     current_sort_field=Signal::derive(move || sort.get().order_by)
//!     sort_direction=Signal::derive(move || sort.get().direction)
//!     on_sort=Callback::new(move |field| toggle_sort(field))
//! />
//! ```

use crate::shared::list_utils::{get_sort_class, get_sort_indicator};
use contracts::shared::list_request::SortDirection;
use leptos::prelude::*;
use thaw::*;

/// Заголовок с индикатором сортировки (▲▼); клик отдаёт `sort_field` в `on_sort`
#[component]
pub fn SortableHeaderCell(
    /// Текст заголовка
    #[prop(into)]
    label: String,

    /// Поле для сортировки
    #[prop(into)]
    sort_field: String,

    /// Текущее поле сортировки
    #[prop(into)]
    current_sort_field: Signal<String>,

    /// Текущее направление сортировки
    #[prop(into)]
    sort_direction: Signal<SortDirection>,

    /// Callback при клике на заголовок
    on_sort: Callback<String>,

    /// Минимальная ширина колонки
    #[prop(optional, default = 100.0)]
    min_width: f64,

    /// Выравнивание заголовка (left/right)
    #[prop(optional, default = "left")]
    align: &'static str,
) -> impl IntoView {
    let field_for_click = sort_field.clone();
    let field_for_indicator = sort_field.clone();

    let header_style = if align == "right" {
        "cursor: pointer; justify-content: flex-end; padding-right: 12px;"
    } else {
        "cursor: pointer; padding-right: 12px;"
    };

    view! {
        <TableHeaderCell resizable=true min_width=min_width class="resizable">
            <div
                class="table__sortable-header"
                style=header_style
                on:click=move |_| on_sort.run(field_for_click.clone())
            >
                {label}
                <span class=move || get_sort_class(&current_sort_field.get(), &sort_field)>
                    {move || {
                        get_sort_indicator(
                            &current_sort_field.get(),
                            &field_for_indicator,
                            sort_direction.get(),
                        )
                    }}
                </span>
            </div>
        </TableHeaderCell>
    }
}
