use shared::{ListFilter, Lookup, SortDirection};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::use_lookup::use_lookup;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct FilterBarProps {
    pub filter: ListFilter,
    /// Resource offered as the parent filter, if any
    pub parent: Option<Lookup>,
    pub api_client: ApiClient,
    pub on_query_change: Callback<String>,
    pub on_parent_change: Callback<Option<i64>>,
    pub on_sort_change: Callback<Option<SortDirection>>,
}

#[function_component(FilterBar)]
pub fn filter_bar(props: &FilterBarProps) -> Html {
    let options = use_lookup(props.parent, &props.api_client);

    let on_query_input = {
        let on_query_change = props.on_query_change.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_query_change.emit(input.value());
        })
    };

    let on_parent_select = {
        let on_parent_change = props.on_parent_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_parent_change.emit(select.value().parse::<i64>().ok());
        })
    };

    // Unsorted -> ascending -> descending -> ascending ...
    let on_sort_click = {
        let on_sort_change = props.on_sort_change.clone();
        let sort = props.filter.sort;
        Callback::from(move |_: MouseEvent| {
            let next = sort.map_or(SortDirection::Ascending, SortDirection::toggled);
            on_sort_change.emit(Some(next));
        })
    };

    let on_clear_click = {
        let on_query_change = props.on_query_change.clone();
        let on_parent_change = props.on_parent_change.clone();
        let on_sort_change = props.on_sort_change.clone();
        Callback::from(move |_: MouseEvent| {
            on_query_change.emit(String::new());
            on_parent_change.emit(None);
            on_sort_change.emit(None);
        })
    };

    let sort_label = match props.filter.sort {
        None => "Sort",
        Some(SortDirection::Ascending) => "Sort A→Z",
        Some(SortDirection::Descending) => "Sort Z→A",
    };

    html! {
        <div class="filter-bar">
            <input
                type="search"
                class="filter-query"
                placeholder="Search..."
                value={props.filter.query.clone()}
                oninput={on_query_input}
            />

            {if let Some(parent) = props.parent {
                let selected = props.filter.parent_id;
                html! {
                    <select class="filter-parent" onchange={on_parent_select}>
                        <option value="" selected={selected.is_none()}>
                            {format!("All ({})", parent.label())}
                        </option>
                        {for options.iter().map(|option| html! {
                            <option value={option.id.to_string()} selected={selected == Some(option.id)}>
                                {&option.label}
                            </option>
                        })}
                    </select>
                }
            } else {
                html! {}
            }}

            <button type="button" class="btn btn-secondary" onclick={on_sort_click}>{sort_label}</button>
            {if props.filter.is_active() {
                html! {
                    <button type="button" class="btn btn-link" onclick={on_clear_click}>{"Clear filters"}</button>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
