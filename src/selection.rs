use std::rc::Rc;

use crate::map::CameraControl;
use crate::model::{Destination, FlightDefaults, TransitionRequest};

/// Turns a sidebar click into a camera flight on the map it was built with.
#[derive(Clone)]
pub struct SelectionHandler {
    map: Rc<dyn CameraControl>,
    defaults: FlightDefaults,
}

impl SelectionHandler {
    pub fn new(map: Rc<dyn CameraControl>, defaults: FlightDefaults) -> Self {
        Self { map, defaults }
    }

    /// Send one flight request for `dest` and return what was sent.
    pub fn activate(&self, dest: &Destination) -> TransitionRequest {
        log::info!("Flying to: {}", dest.name);
        let request = TransitionRequest::for_destination(dest, &self.defaults);
        self.map.fly_to(&request);
        request
    }
}

impl PartialEq for SelectionHandler {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.map, &other.map) && self.defaults == other.defaults
    }
}
