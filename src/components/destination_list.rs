use yew::prelude::*;

use crate::model::{Destination, destinations};
use crate::state::MapStatus;

#[derive(Properties, PartialEq, Clone)]
pub struct DestinationListProps {
    pub status: MapStatus,
    pub on_select: Callback<&'static Destination>,
}

/// Entries that get a clickable row: the whole registry once the map is ready, none otherwise.
pub fn activatable(status: &MapStatus) -> Vec<&'static Destination> {
    match status {
        MapStatus::Ready => destinations().collect(),
        MapStatus::Loading | MapStatus::Failed(_) => Vec::new(),
    }
}

#[function_component(DestinationList)]
pub fn destination_list(props: &DestinationListProps) -> Html {
    {
        let ready = matches!(props.status, MapStatus::Ready);
        use_effect_with(ready, move |ready| {
            if *ready {
                log::info!("Destination list populated.");
            }
            || ()
        });
    }

    let items = activatable(&props.status);
    let body = match &props.status {
        MapStatus::Loading => html! { <li style="opacity:0.6; cursor:default;">{"Loading..."}</li> },
        MapStatus::Failed(_) => html! {},
        MapStatus::Ready => items
            .into_iter()
            .map(|dest| {
                let onclick = {
                    let cb = props.on_select.clone();
                    Callback::from(move |_: MouseEvent| cb.emit(dest))
                };
                html! { <li key={dest.name} {onclick} style="padding:8px 10px; margin:2px 0; border-radius:6px; cursor:pointer; background:#1c2128; border:1px solid #30363d;">{ dest.name }</li> }
            })
            .collect::<Html>(),
    };

    html! { <ul id="destination-list" style="list-style:none; margin:0; padding:0; display:flex; flex-direction:column; gap:4px;">{ body }</ul> }
}
