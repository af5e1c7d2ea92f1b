use std::rc::Rc;

use gloo::timers::callback::Timeout;
use shared::{CrudAction, CrudState, Resource, SaveCommand, SaveKind, SortDirection};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Reducer wrapper so completions of concurrent requests are applied to the
/// latest state instead of the snapshot captured when they were spawned.
#[derive(PartialEq)]
pub struct CrudStore<R: Resource>(pub CrudState<R>);

impl<R: Resource> Default for CrudStore<R> {
    fn default() -> Self {
        Self(CrudState::default())
    }
}

impl<R: Resource> Reducible for CrudStore<R> {
    type Action = CrudAction<R>;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let state = match Rc::try_unwrap(self) {
            Ok(store) => store.0,
            Err(shared) => shared.0.clone(),
        };
        Rc::new(CrudStore(state.apply(action)))
    }
}

pub struct UseCrudResult<R: Resource> {
    pub state: CrudState<R>,
    pub actions: UseCrudActions,
}

#[derive(Clone, PartialEq)]
pub struct UseCrudActions {
    pub reload: Callback<()>,
    pub save: Callback<()>,
    pub new_record: Callback<()>,
    pub edit: Callback<i64>,
    pub cancel_edit: Callback<()>,
    pub field_changed: Callback<(String, String)>,
    pub request_delete: Callback<i64>,
    pub confirm_delete: Callback<()>,
    pub cancel_delete: Callback<()>,
    pub query_changed: Callback<String>,
    pub parent_filter_changed: Callback<Option<i64>>,
    pub sort_changed: Callback<Option<SortDirection>>,
    pub dismiss_notice: Callback<()>,
}

/// Load, filter, save and delete records of one resource.
///
/// The list is fetched on mount and refetched after every successful
/// mutation. Notices dismiss themselves after `notice_duration_ms`.
#[hook]
pub fn use_crud<R: Resource>(api_client: &ApiClient, notice_duration_ms: u32) -> UseCrudResult<R> {
    let store = use_reducer(CrudStore::<R>::default);
    let component = R::TITLE;

    let reload = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            dispatcher.dispatch(CrudAction::LoadStarted);

            spawn_local(async move {
                match api_client.list::<R>().await {
                    Ok(items) => {
                        Logger::debug_with_component(
                            component,
                            &format!("Loaded {} records", items.len()),
                        );
                        dispatcher.dispatch(CrudAction::Loaded(items));
                    }
                    Err(e) => {
                        Logger::error_with_component(
                            component,
                            &format!("Failed to load records: {}", e),
                        );
                        dispatcher.dispatch(CrudAction::LoadFailed(e));
                    }
                }
            });
        })
    };

    let save = {
        let api_client = api_client.clone();
        let store = store.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            let command = match store.0.prepare_save() {
                Ok(Some(command)) => command,
                Ok(None) => return,
                Err(validation) => {
                    Logger::debug_with_component(component, "Form rejected by validation");
                    store.dispatch(CrudAction::SaveRejected(validation));
                    return;
                }
            };

            store.dispatch(CrudAction::SaveStarted);
            let api_client = api_client.clone();
            let dispatcher = store.dispatcher();
            let reload = reload.clone();

            spawn_local(async move {
                let result = match command {
                    SaveCommand::Create(request) => api_client
                        .create::<R>(&request)
                        .await
                        .map(|_| SaveKind::Created),
                    SaveCommand::Update(id, request) => api_client
                        .update::<R>(id, &request)
                        .await
                        .map(|_| SaveKind::Updated),
                };

                let succeeded = result.is_ok();
                if let Err(e) = &result {
                    Logger::error_with_component(
                        component,
                        &format!("Failed to save record: {}", e),
                    );
                }
                dispatcher.dispatch(CrudAction::SaveFinished(result));
                if succeeded {
                    reload.emit(());
                }
            });
        })
    };

    let confirm_delete = {
        let api_client = api_client.clone();
        let store = store.clone();
        let reload = reload.clone();
        Callback::from(move |_: ()| {
            let Some(id) = store.0.confirm_delete() else {
                return;
            };

            store.dispatch(CrudAction::DeleteStarted);
            let api_client = api_client.clone();
            let dispatcher = store.dispatcher();
            let reload = reload.clone();

            spawn_local(async move {
                let result = api_client.delete::<R>(id).await;
                let succeeded = result.is_ok();
                if let Err(e) = &result {
                    Logger::error_with_component(
                        component,
                        &format!("Failed to delete record {}: {}", id, e),
                    );
                }
                dispatcher.dispatch(CrudAction::DeleteFinished(result));
                if succeeded {
                    reload.emit(());
                }
            });
        })
    };

    let new_record = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(CrudAction::NewRecord))
    };

    let cancel_edit = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(CrudAction::CancelEdit))
    };

    let cancel_delete = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(CrudAction::DeleteCancelled))
    };

    let dismiss_notice = {
        let dispatcher = store.dispatcher();
        Callback::from(move |_: ()| dispatcher.dispatch(CrudAction::DismissNotice))
    };

    // Edit from the cached row right away, then swap in the server's current copy
    let edit = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        Callback::from(move |id: i64| {
            dispatcher.dispatch(CrudAction::EditRecord(id));
            if !R::MUTABLE {
                return;
            }

            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            spawn_local(async move {
                match api_client.get::<R>(id).await {
                    Ok(record) => dispatcher.dispatch(CrudAction::RecordRefreshed(record)),
                    Err(e) => {
                        Logger::warn_with_component(
                            component,
                            &format!("Could not refresh record {}: {}", id, e),
                        );
                    }
                }
            });
        })
    };

    let request_delete = {
        let dispatcher = store.dispatcher();
        Callback::from(move |id: i64| dispatcher.dispatch(CrudAction::DeleteRequested(id)))
    };

    let field_changed = {
        let dispatcher = store.dispatcher();
        Callback::from(move |(field, value): (String, String)| {
            dispatcher.dispatch(CrudAction::FieldChanged { field, value })
        })
    };

    let query_changed = {
        let dispatcher = store.dispatcher();
        Callback::from(move |query: String| {
            dispatcher.dispatch(CrudAction::FilterQueryChanged(query))
        })
    };

    let parent_filter_changed = {
        let dispatcher = store.dispatcher();
        Callback::from(move |parent_id: Option<i64>| {
            dispatcher.dispatch(CrudAction::ParentFilterChanged(parent_id))
        })
    };

    let sort_changed = {
        let dispatcher = store.dispatcher();
        Callback::from(move |sort: Option<SortDirection>| {
            dispatcher.dispatch(CrudAction::SortChanged(sort))
        })
    };

    // Load initial records
    use_effect_with((), {
        let reload = reload.clone();
        move |_| {
            reload.emit(());
            || ()
        }
    });

    // Auto-dismiss notices; a newer notice cancels the previous timer
    use_effect_with(store.0.notice.clone(), {
        let dispatcher = store.dispatcher();
        move |notice| {
            let timeout = notice.as_ref().map(|_| {
                Timeout::new(notice_duration_ms, move || {
                    dispatcher.dispatch(CrudAction::DismissNotice)
                })
            });
            move || drop(timeout)
        }
    });

    let actions = UseCrudActions {
        reload,
        save,
        new_record,
        edit,
        cancel_edit,
        field_changed,
        request_delete,
        confirm_delete,
        cancel_delete,
        query_changed,
        parent_filter_changed,
        sort_changed,
        dismiss_notice,
    };

    UseCrudResult {
        state: store.0.clone(),
        actions,
    }
}
