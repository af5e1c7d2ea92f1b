use shared::{ConsoleConfig, Resource};
use yew::prelude::*;

use crate::components::confirm_modal::ConfirmModal;
use crate::components::filter_bar::FilterBar;
use crate::components::resource_form::ResourceForm;
use crate::components::resource_table::{ResourceTable, TableRow};
use crate::components::toast::Toast;
use crate::hooks::use_crud::use_crud;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct CrudPageProps {
    pub api_client: ApiClient,
    pub config: ConsoleConfig,
}

/// List, filter, create, edit and delete the records of one resource
#[function_component(CrudPage)]
pub fn crud_page<R: TableRow>(props: &CrudPageProps) -> Html {
    let crud = use_crud::<R>(&props.api_client, props.config.notice_duration_ms);
    let state = &crud.state;
    let actions = &crud.actions;

    let delete_message = state
        .pending_delete
        .map(|id| match state.find(id) {
            Some(item) => format!("Delete \"{}\"? This cannot be undone.", item.label()),
            None => format!("Delete record #{}? This cannot be undone.", id),
        })
        .unwrap_or_default();

    let on_reload_click = {
        let reload = actions.reload.clone();
        Callback::from(move |_: MouseEvent| reload.emit(()))
    };

    let on_new_click = {
        let new_record = actions.new_record.clone();
        Callback::from(move |_: MouseEvent| new_record.emit(()))
    };

    html! {
        <div class="crud-page">
            <Toast notice={state.notice.clone()} on_dismiss={actions.dismiss_notice.clone()} />

            <div class="page-toolbar">
                <h2 class="page-title">{R::TITLE}</h2>
                <div class="page-toolbar-buttons">
                    <button class="btn btn-secondary" onclick={on_reload_click} disabled={state.loading}>
                        {if state.loading { "Loading..." } else { "Reload" }}
                    </button>
                    <button class="btn btn-primary" onclick={on_new_click} disabled={state.saving}>
                        {"New"}
                    </button>
                </div>
            </div>

            <div class="page-body">
                <ResourceForm<R>
                    form={state.form.clone()}
                    validation={state.validation.clone()}
                    saving={state.saving}
                    api_client={props.api_client.clone()}
                    on_field_change={actions.field_changed.clone()}
                    on_submit={actions.save.clone()}
                    on_cancel={actions.cancel_edit.clone()}
                />

                <div class="list-panel">
                    <FilterBar
                        filter={state.filter.clone()}
                        parent={R::parent_lookup()}
                        api_client={props.api_client.clone()}
                        on_query_change={actions.query_changed.clone()}
                        on_parent_change={actions.parent_filter_changed.clone()}
                        on_sort_change={actions.sort_changed.clone()}
                    />
                    <ResourceTable<R>
                        items={state.visible()}
                        loading={state.loading && state.items.is_empty()}
                        filtered={state.filter.is_active()}
                        currency_symbol={props.config.currency_symbol.clone()}
                        busy={state.saving}
                        on_edit={actions.edit.clone()}
                        on_delete={actions.request_delete.clone()}
                    />
                </div>
            </div>

            <ConfirmModal
                is_open={state.pending_delete.is_some()}
                title={format!("Delete from {}", R::TITLE)}
                message={delete_message}
                busy={state.saving}
                on_confirm={actions.confirm_delete.clone()}
                on_close={actions.cancel_delete.clone()}
            />
        </div>
    }
}
