use shared::filter::sort_items;
use shared::{
    Account, ApiError, Category, City, Hotel, Lookup, Province, Region, Resource, Role, Room,
    RoomType, SortDirection, User,
};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// One entry of a foreign-key select
#[derive(Debug, Clone, PartialEq)]
pub struct LookupOption {
    pub id: i64,
    pub label: String,
}

async fn options_of<R: Resource>(api_client: &ApiClient) -> Result<Vec<LookupOption>, ApiError> {
    let mut items = api_client.list::<R>().await?;
    sort_items(&mut items, SortDirection::Ascending);
    Ok(items
        .iter()
        .map(|item| LookupOption {
            id: item.id(),
            label: item.label(),
        })
        .collect())
}

pub async fn fetch_options(
    api_client: &ApiClient,
    lookup: Lookup,
) -> Result<Vec<LookupOption>, ApiError> {
    match lookup {
        Lookup::Regions => options_of::<Region>(api_client).await,
        Lookup::Provinces => options_of::<Province>(api_client).await,
        Lookup::Cities => options_of::<City>(api_client).await,
        Lookup::Categories => options_of::<Category>(api_client).await,
        Lookup::Hotels => options_of::<Hotel>(api_client).await,
        Lookup::RoomTypes => options_of::<RoomType>(api_client).await,
        Lookup::Rooms => options_of::<Room>(api_client).await,
        Lookup::Roles => options_of::<Role>(api_client).await,
        Lookup::Users => options_of::<User>(api_client).await,
        Lookup::Accounts => options_of::<Account>(api_client).await,
    }
}

/// Options for a select bound to another resource; empty until loaded or
/// when `lookup` is `None`.
#[hook]
pub fn use_lookup(lookup: Option<Lookup>, api_client: &ApiClient) -> Vec<LookupOption> {
    let options = use_state(Vec::<LookupOption>::new);

    use_effect_with(lookup, {
        let options = options.clone();
        let api_client = api_client.clone();
        move |lookup| {
            if let Some(lookup) = *lookup {
                spawn_local(async move {
                    match fetch_options(&api_client, lookup).await {
                        Ok(data) => options.set(data),
                        Err(e) => {
                            Logger::warn_with_component(
                                "lookup",
                                &format!("Failed to load {} options: {}", lookup.label(), e),
                            );
                        }
                    }
                });
            }
            || ()
        }
    });

    (*options).clone()
}
