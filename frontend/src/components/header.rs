use yew::prelude::*;

use crate::pages::{Page, Section};

#[derive(Properties, PartialEq)]
pub struct HeaderProps {
    pub current_page: Page,
    pub api_base_url: String,
    pub on_navigate: Callback<Page>,
}

#[function_component(Header)]
pub fn header(props: &HeaderProps) -> Html {
    html! {
        <header class="header">
            <div class="container">
                <h1>{"Hotel Chain Console"}</h1>
                <div class="header-right">
                    <span class="backend-label">{"Backend: "}</span>
                    <span class="backend-url">{&props.api_base_url}</span>
                </div>
            </div>
            <nav class="main-nav">
                {for Section::ALL.iter().map(|section| html! {
                    <div class="nav-group">
                        <span class="nav-group-title">{section.title()}</span>
                        {for section.pages().iter().map(|page| {
                            let page = *page;
                            let onclick = {
                                let on_navigate = props.on_navigate.clone();
                                Callback::from(move |_: MouseEvent| on_navigate.emit(page))
                            };
                            let class = if page == props.current_page {
                                "nav-link active"
                            } else {
                                "nav-link"
                            };
                            html! {
                                <button type="button" class={class} onclick={onclick}>{page.title()}</button>
                            }
                        })}
                    </div>
                })}
            </nav>
        </header>
    }
}
