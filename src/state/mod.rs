pub mod map_status;

pub use map_status::{MapAction, MapState, MapStatus};
