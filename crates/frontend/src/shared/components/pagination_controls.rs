use crate::shared::icons::icon;
use leptos::prelude::*;

/// "3 / 12 (231)"; an empty list still reads as one page
pub fn page_summary(page_index: u32, total_pages: u64, total_count: u64) -> String {
    format!("{} / {} ({})", u64::from(page_index) + 1, total_pages.max(1), total_count)
}

/// PaginationControls component - first/prev/next/last and page size picker
#[component]
pub fn PaginationControls(
    /// Current page (0-indexed)
    #[prop(into)]
    current_page: Signal<u32>,

    /// Total number of pages
    #[prop(into)]
    total_pages: Signal<u64>,

    /// Total count of items
    #[prop(into)]
    total_count: Signal<u64>,

    /// Current page size
    #[prop(into)]
    page_size: Signal<u32>,

    /// Callback when page changes
    on_page_change: Callback<u32>,

    /// Callback when page size changes
    on_page_size_change: Callback<u32>,

    /// Available page sizes
    page_size_options: Vec<u32>,

    /// Disables navigation while a page is loading
    #[prop(optional, into)]
    disabled: Signal<bool>,
) -> impl IntoView {
    let is_last = move || u64::from(current_page.get()) + 1 >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(0)
                disabled=move || disabled.get() || current_page.get() == 0
                title="First page"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let page = current_page.get();
                    if page > 0 {
                        on_page_change.run(page - 1);
                    }
                }
                disabled=move || disabled.get() || current_page.get() == 0
                title="Previous page"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || page_summary(current_page.get(), total_pages.get(), total_count.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    if !is_last() {
                        on_page_change.run(current_page.get() + 1);
                    }
                }
                disabled=move || disabled.get() || is_last()
                title="Next page"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| {
                    let last = total_pages.get().saturating_sub(1);
                    if let Ok(last) = u32::try_from(last) {
                        on_page_change.run(last);
                    }
                }
                disabled=move || disabled.get() || is_last()
                title="Last page"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    match event_target_value(&ev).parse::<u32>() {
                        Ok(size) => on_page_size_change.run(size),
                        Err(e) => log::warn!("pagination: bad page size: {e}"),
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {page_size_options.into_iter().map(|size| {
                    view! {
                        <option value={size.to_string()} selected=move || page_size.get() == size>
                            {size.to_string()}
                        </option>
                    }
                }).collect_view()}
            </select>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_summary() {
        assert_eq!(page_summary(2, 3, 45), "3 / 3 (45)");
        assert_eq!(page_summary(0, 0, 0), "1 / 1 (0)");
    }
}
