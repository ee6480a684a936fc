pub mod event_loop;
pub mod rendering;
pub mod state;
pub mod state_render;
pub mod theme;

pub use state::TuiApp;
pub use theme::Theme;
