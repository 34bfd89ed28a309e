pub mod app;
pub mod form;
pub mod input;
pub mod render;
pub mod row;
pub mod theme;
pub mod timer;

pub use app::run;
