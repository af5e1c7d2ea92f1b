use shared::{Notice, NoticeKind};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ToastProps {
    pub notice: Option<Notice>,
    pub on_dismiss: Callback<()>,
}

#[function_component(Toast)]
pub fn toast(props: &ToastProps) -> Html {
    let Some(notice) = props.notice.as_ref() else {
        return html! {};
    };

    let class = match notice.kind {
        NoticeKind::Success => "toast success",
        NoticeKind::Error => "toast error",
    };

    let on_dismiss = {
        let on_dismiss = props.on_dismiss.clone();
        Callback::from(move |_: MouseEvent| on_dismiss.emit(()))
    };

    html! {
        <div class={class} role="status">
            <span class="toast-message">{&notice.message}</span>
            <button class="toast-close" onclick={on_dismiss} aria-label="Dismiss">{"×"}</button>
        </div>
    }
}
