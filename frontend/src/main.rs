use shared::{
    Account, Category, City, ConsoleConfig, Hotel, Province, Region, Reservation, Role, Room,
    RoomType, Transfer, User,
};
use yew::prelude::*;

mod components;
mod hooks;
mod pages;
mod services;

use components::header::Header;
use components::resource_table::TableRow;
use pages::crud_page::CrudPage;
use pages::Page;
use services::api::ApiClient;
use services::config::load_config;
use services::logging::Logger;

fn crud_page<R: TableRow>(api_client: ApiClient, config: ConsoleConfig) -> Html {
    html! { <CrudPage<R> api_client={api_client} config={config} /> }
}

#[function_component(App)]
fn app() -> Html {
    let config = use_memo((), |_| {
        let config = load_config();
        Logger::set_debug_enabled(config.enable_debug_logging);
        Logger::info_with_component("app", &format!("Using backend at {}", config.api_base_url));
        config
    });
    let api_client = use_memo((), {
        let config = config.clone();
        move |_| ApiClient::from_config(&config)
    });
    let current_page = use_state(Page::default);

    let on_navigate = {
        let current_page = current_page.clone();
        Callback::from(move |page: Page| {
            Logger::debug_with_component("app", &format!("Navigating to {}", page.title()));
            current_page.set(page);
        })
    };

    let api_client = (*api_client).clone();
    let api_base_url = api_client.base_url().to_string();
    let page_config = (*config).clone();

    let content = match *current_page {
        Page::Regions => crud_page::<Region>(api_client, page_config),
        Page::Provinces => crud_page::<Province>(api_client, page_config),
        Page::Cities => crud_page::<City>(api_client, page_config),
        Page::Categories => crud_page::<Category>(api_client, page_config),
        Page::Hotels => crud_page::<Hotel>(api_client, page_config),
        Page::RoomTypes => crud_page::<RoomType>(api_client, page_config),
        Page::Rooms => crud_page::<Room>(api_client, page_config),
        Page::Reservations => crud_page::<Reservation>(api_client, page_config),
        Page::Roles => crud_page::<Role>(api_client, page_config),
        Page::Users => crud_page::<User>(api_client, page_config),
        Page::Accounts => crud_page::<Account>(api_client, page_config),
        Page::Transfers => crud_page::<Transfer>(api_client, page_config),
    };

    html! {
        <div class="app">
            <Header
                current_page={*current_page}
                api_base_url={api_base_url}
                on_navigate={on_navigate}
            />
            <main class="main">
                <div class="container">
                    {content}
                </div>
            </main>
        </div>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
