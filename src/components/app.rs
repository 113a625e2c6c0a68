use std::cell::RefCell;
use std::rc::Rc;

use web_sys::HtmlElement;
use yew::prelude::*;

use super::{destination_list::DestinationList, map_error::MapErrorMessage};
use crate::config::Config;
use crate::error::MapError;
use crate::map::{MapEvent, MapLifecycle, MapboxMap, setup};
use crate::model::Destination;
use crate::selection::SelectionHandler;
use crate::state::{MapAction, MapState};

/// Log the real cause, then collapse it into the one message the user sees.
fn failure(err: MapError) -> MapAction {
    log::error!("{}", err);
    MapAction::Failed(MapError::USER_MESSAGE.to_string())
}

/// Add controls and react to the map's `load`/`error` notifications.
/// On load the selection handler is installed and `Loaded` is emitted; any failure
/// removes the map, drops the handler and emits `Failed`.
fn attach_map<M: MapLifecycle + 'static>(
    map: Rc<M>,
    config: Rc<Config>,
    handler: Rc<RefCell<Option<SelectionHandler>>>,
    on_action: Callback<MapAction>,
) -> Result<Rc<M>, MapError> {
    if let Err(e) = setup::add_controls(&*map, &config.controls) {
        map.remove();
        return Err(e);
    }

    // the listener holds a weak handle; the map owns the listener
    let weak = Rc::downgrade(&map);
    map.subscribe(Rc::new(move |event: MapEvent| match event {
        MapEvent::Loaded => {
            let Some(map) = weak.upgrade() else { return };
            match setup::on_style_loaded(&*map, &config) {
                Ok(report) => {
                    log::debug!("setup finished: {:?}", report);
                    *handler.borrow_mut() =
                        Some(SelectionHandler::new(map.clone(), config.flight.clone()));
                    on_action.emit(MapAction::Loaded);
                }
                Err(e) => {
                    map.remove();
                    on_action.emit(failure(e));
                }
            }
        }
        MapEvent::Error(detail) => {
            if let Some(map) = weak.upgrade() {
                map.remove();
            }
            handler.borrow_mut().take();
            on_action.emit(failure(MapError::Sdk(detail)));
        }
    }));
    Ok(map)
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| Config::from_build_env());
    let map_state = use_reducer(MapState::default);
    let map_ref = use_node_ref();
    let map_handle = use_mut_ref(|| None::<Rc<MapboxMap>>);
    let handler = use_mut_ref(|| None::<SelectionHandler>);

    // Create the map once the container div is in the DOM
    {
        let config = config.clone();
        let map_ref = map_ref.clone();
        let map_handle = map_handle.clone();
        let handler = handler.clone();
        let on_action = {
            let map_state = map_state.clone();
            Callback::from(move |action: MapAction| map_state.dispatch(action))
        };
        use_effect_with((), move |_| {
            let mounted = match map_ref.cast::<HtmlElement>() {
                Some(container) => MapboxMap::create(&container, &config).and_then(|map| {
                    attach_map(map, config.clone(), handler.clone(), on_action.clone())
                }),
                None => Err(MapError::Js("map container is not attached".to_string())),
            };
            match mounted {
                Ok(map) => *map_handle.borrow_mut() = Some(map),
                Err(e) => on_action.emit(failure(e)),
            }
            move || {
                handler.borrow_mut().take();
                if let Some(map) = map_handle.borrow_mut().take() {
                    map.remove();
                }
            }
        });
    }

    let on_select = {
        let handler = handler.clone();
        let can_fly = map_state.can_fly();
        Callback::from(move |dest: &'static Destination| {
            if !can_fly {
                return;
            }
            if let Some(h) = handler.borrow().as_ref() {
                h.activate(dest);
            }
        })
    };

    let map_area = match map_state.error_message() {
        Some(message) => html! { <MapErrorMessage message={message.to_string()} /> },
        None => html! {
            <div id={config.map.container_id.clone()} ref={map_ref.clone()} style="position:absolute; inset:0;"></div>
        },
    };

    html! {
        <div id="root" style="display:flex; width:100vw; height:100vh; background:#0e1116; color:#e6edf3; font-family:system-ui, sans-serif;">
            <aside id="sidebar" style="width:260px; flex:0 0 auto; padding:12px; border-right:1px solid #30363d; background:#161b22; overflow-y:auto;">
                <h2 style="margin:0 0 10px 0; font-size:18px;">{"Destinations"}</h2>
                <DestinationList status={map_state.status.clone()} {on_select} />
            </aside>
            <main style="position:relative; flex:1;">{ map_area }</main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::testing::RecordingMap;
    use crate::model::find;
    use crate::state::MapStatus;
    use yew::Reducible;

    struct Harness {
        map: Rc<RecordingMap>,
        handler: Rc<RefCell<Option<SelectionHandler>>>,
        actions: Rc<RefCell<Vec<MapAction>>>,
    }

    impl Harness {
        fn attach(map: RecordingMap) -> (Self, Result<Rc<RecordingMap>, MapError>) {
            let map = Rc::new(map);
            let handler = Rc::new(RefCell::new(None));
            let actions = Rc::new(RefCell::new(Vec::new()));
            let on_action = {
                let actions = actions.clone();
                Callback::from(move |a: MapAction| actions.borrow_mut().push(a))
            };
            let config = Rc::new(Config {
                access_token: "pk.test".to_string(),
                ..Default::default()
            });
            let attached = attach_map(map.clone(), config, handler.clone(), on_action);
            (
                Self {
                    map,
                    handler,
                    actions,
                },
                attached,
            )
        }

        /// Run the emitted actions through the reducer, as the app does.
        fn state(&self) -> Rc<MapState> {
            self.actions
                .borrow()
                .iter()
                .cloned()
                .fold(Rc::new(MapState::default()), |s, a| s.reduce(a))
        }
    }

    fn labelled_map() -> RecordingMap {
        RecordingMap::with_layers(&[("water", "fill"), ("place-label", "symbol")])
    }

    #[test]
    fn load_installs_handler_and_marks_ready() {
        let (h, attached) = Harness::attach(labelled_map());
        assert!(attached.is_ok());
        assert!(h.actions.borrow().is_empty());
        assert!(h.handler.borrow().is_none());

        h.map.emit(MapEvent::Loaded);
        assert_eq!(*h.actions.borrow(), vec![MapAction::Loaded]);
        assert!(h.state().can_fly());

        let handler = h.handler.borrow();
        let handler = handler.as_ref().unwrap();
        handler.activate(find("Intel Museum").unwrap());
        assert_eq!(h.map.flights.borrow().len(), 1);
        assert_eq!(h.map.flights.borrow()[0].bearing, -30.0);
        assert!(!h.map.removed.get());
    }

    #[test]
    fn error_notification_removes_map_and_blocks_flights() {
        let (h, _) = Harness::attach(labelled_map());
        h.map.emit(MapEvent::Loaded);
        h.map.emit(MapEvent::Error("401 Unauthorized".to_string()));

        assert!(h.map.removed.get());
        assert!(h.handler.borrow().is_none());
        assert_eq!(
            h.actions.borrow().last(),
            Some(&MapAction::Failed(MapError::USER_MESSAGE.to_string()))
        );
        let state = h.state();
        assert!(!state.can_fly());
        assert_eq!(state.status, MapStatus::Failed(MapError::USER_MESSAGE.to_string()));
    }

    #[test]
    fn error_before_load_stays_failed_after_late_load() {
        let (h, _) = Harness::attach(labelled_map());
        h.map.emit(MapEvent::Error("network".to_string()));
        h.map.emit(MapEvent::Loaded);
        assert!(!h.state().can_fly());
        assert!(h.state().error_message().is_some());
    }

    #[test]
    fn setup_error_on_load_removes_map() {
        let (h, _) = Harness::attach(RecordingMap {
            fail_terrain: true,
            ..labelled_map()
        });
        h.map.emit(MapEvent::Loaded);

        assert!(h.map.removed.get());
        assert!(h.handler.borrow().is_none());
        assert!(matches!(h.actions.borrow()[..], [MapAction::Failed(_)]));
    }

    #[test]
    fn control_failure_removes_map_before_returning() {
        let (h, attached) = Harness::attach(RecordingMap {
            fail_controls: true,
            ..labelled_map()
        });
        assert!(matches!(attached, Err(MapError::Js(_))));
        assert!(h.map.removed.get());
        assert!(h.map.listeners.borrow().is_empty());
    }

    #[test]
    fn failure_always_carries_the_user_message() {
        let action = failure(MapError::SdkUnavailable);
        assert_eq!(action, MapAction::Failed(MapError::USER_MESSAGE.to_string()));
    }
}
