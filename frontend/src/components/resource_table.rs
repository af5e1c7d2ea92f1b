use shared::Resource;
use yew::prelude::*;

/// Column layout of a resource in the list table
pub trait TableRow: Resource {
    fn headers() -> &'static [&'static str];

    /// Cell text in the same order as [`TableRow::headers`]
    fn cells(&self, currency_symbol: &str) -> Vec<String>;
}

#[derive(Properties, PartialEq)]
pub struct ResourceTableProps<R: TableRow> {
    pub items: Vec<R>,
    pub loading: bool,
    /// Whether a filter is narrowing the list, to word the empty state
    pub filtered: bool,
    pub currency_symbol: String,
    /// Row buttons are disabled while a request is in flight
    pub busy: bool,
    pub on_edit: Callback<i64>,
    pub on_delete: Callback<i64>,
}

#[function_component(ResourceTable)]
pub fn resource_table<R: TableRow>(props: &ResourceTableProps<R>) -> Html {
    let columns = R::headers().len() + usize::from(R::MUTABLE);

    html! {
        <section class="records-section">
            <h3 class="records-count">{format!("{} shown", props.items.len())}</h3>

            {if props.loading {
                html! { <div class="loading">{format!("Loading {}...", R::TITLE.to_lowercase())}</div> }
            } else {
                html! {
                    <div class="table-container">
                        <table class="records-table">
                            <thead>
                                <tr>
                                    {for R::headers().iter().map(|header| html! { <th>{*header}</th> })}
                                    {if R::MUTABLE {
                                        html! { <th class="actions">{"Actions"}</th> }
                                    } else {
                                        html! {}
                                    }}
                                </tr>
                            </thead>
                            <tbody>
                                {if props.items.is_empty() {
                                    html! {
                                        <tr>
                                            <td class="empty" colspan={columns.to_string()}>
                                                {if props.filtered {
                                                    "No records match the current filter"
                                                } else {
                                                    "No records yet"
                                                }}
                                            </td>
                                        </tr>
                                    }
                                } else {
                                    html! {
                                        <>
                                        {for props.items.iter().map(|item| {
                                            let id = item.id();
                                            let on_edit = {
                                                let on_edit = props.on_edit.clone();
                                                Callback::from(move |_: MouseEvent| on_edit.emit(id))
                                            };
                                            let on_delete = {
                                                let on_delete = props.on_delete.clone();
                                                Callback::from(move |_: MouseEvent| on_delete.emit(id))
                                            };

                                            html! {
                                                <tr key={id}>
                                                    {for item.cells(&props.currency_symbol).into_iter().map(|cell| html! {
                                                        <td>{cell}</td>
                                                    })}
                                                    {if R::MUTABLE {
                                                        html! {
                                                            <td class="actions">
                                                                <button class="btn btn-small" onclick={on_edit} disabled={props.busy}>
                                                                    {"Edit"}
                                                                </button>
                                                                <button class="btn btn-small btn-danger" onclick={on_delete} disabled={props.busy}>
                                                                    {"Delete"}
                                                                </button>
                                                            </td>
                                                        }
                                                    } else {
                                                        html! {}
                                                    }}
                                                </tr>
                                            }
                                        })}
                                        </>
                                    }
                                }}
                            </tbody>
                        </table>
                    </div>
                }
            }}
        </section>
    }
}
