// Map lifecycle state, driven by the SDK's load/error notifications
use std::rc::Rc;
use yew::Reducible;

#[derive(Clone, Debug, PartialEq)]
pub enum MapStatus {
    Loading,
    Ready,
    /// Terminal. Holds the message shown in place of the map.
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub enum MapAction {
    Loaded,
    Failed(String),
}

#[derive(Clone, Debug, PartialEq)]
pub struct MapState {
    pub status: MapStatus,
}

impl Default for MapState {
    fn default() -> Self {
        Self {
            status: MapStatus::Loading,
        }
    }
}

impl MapState {
    /// Flights may only be requested once the map is up and has not failed.
    pub fn can_fly(&self) -> bool {
        matches!(self.status, MapStatus::Ready)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            MapStatus::Failed(msg) => Some(msg),
            _ => None,
        }
    }
}

impl Reducible for MapState {
    type Action = MapAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        use MapAction::*;
        if let MapStatus::Failed(_) = self.status {
            return self;
        }
        let status = match action {
            Loaded => MapStatus::Ready,
            Failed(msg) => MapStatus::Failed(msg),
        };
        Rc::new(MapState { status })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reduce(state: Rc<MapState>, action: MapAction) -> Rc<MapState> {
        state.reduce(action)
    }

    #[test]
    fn starts_loading_and_cannot_fly() {
        let s = MapState::default();
        assert_eq!(s.status, MapStatus::Loading);
        assert!(!s.can_fly());
    }

    #[test]
    fn load_enables_flights() {
        let s = reduce(Rc::new(MapState::default()), MapAction::Loaded);
        assert!(s.can_fly());
        assert!(s.error_message().is_none());
    }

    #[test]
    fn failure_after_load_disables_flights() {
        let s = reduce(Rc::new(MapState::default()), MapAction::Loaded);
        let s = reduce(s, MapAction::Failed("Could not load map.".to_string()));
        assert!(!s.can_fly());
        assert_eq!(s.error_message(), Some("Could not load map."));
    }

    #[test]
    fn failure_is_terminal_and_keeps_first_message() {
        let s = reduce(Rc::new(MapState::default()), MapAction::Failed("first".into()));
        let s = reduce(s, MapAction::Loaded);
        let s = reduce(s, MapAction::Failed("second".into()));
        assert_eq!(s.status, MapStatus::Failed("first".into()));
        assert!(!s.can_fly());
    }
}
