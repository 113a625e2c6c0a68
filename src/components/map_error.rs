use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct MapErrorMessageProps {
    pub message: String,
}

/// Shown in place of the map once it has failed; there is no way back from here.
#[function_component(MapErrorMessage)]
pub fn map_error_message(props: &MapErrorMessageProps) -> Html {
    html! {<div id="map-error" role="alert" style="position:absolute; inset:0; display:flex; align-items:center; justify-content:center; background:#0e1116;">
        <p style="padding:20px; text-align:center; color:#f85149; max-width:420px; line-height:1.4;">{ props.message.clone() }</p>
    </div>}
}
