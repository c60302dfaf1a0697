use crate::domain::a001_backlog_item::ui::list::BacklogItemList;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    view! {
        <BacklogItemList />
    }
}
