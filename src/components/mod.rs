pub mod app;
pub mod destination_list;
pub mod map_error;

pub use app::App;
