use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ConfirmModalProps {
    pub is_open: bool,
    pub title: String,
    pub message: String,
    /// A delete request is in flight
    pub busy: bool,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

/// Asks before an irreversible action such as deleting a record
#[function_component(ConfirmModal)]
pub fn confirm_modal(props: &ConfirmModalProps) -> Html {
    let on_confirm_click = {
        let on_confirm = props.on_confirm.clone();
        Callback::from(move |_: MouseEvent| on_confirm.emit(()))
    };

    let on_cancel_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        let busy = props.busy;
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            if !busy {
                on_close.emit(());
            }
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| {
        e.stop_propagation();
    });

    if !props.is_open {
        return html! {};
    }

    html! {
        <div class="confirm-modal-backdrop" onclick={on_backdrop_click}>
            <div class="confirm-modal" onclick={on_modal_click}>
                <div class="confirm-modal-content">
                    <h3 class="confirm-title">{&props.title}</h3>
                    <p class="confirm-message">{&props.message}</p>
                    <div class="confirm-buttons">
                        <button class="btn btn-danger" onclick={on_confirm_click} disabled={props.busy}>
                            {if props.busy { "Deleting..." } else { "Delete" }}
                        </button>
                        <button class="btn btn-secondary" onclick={on_cancel_click} disabled={props.busy}>
                            {"Cancel"}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
