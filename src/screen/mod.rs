mod commands;
mod info_panel;
mod reducer;
mod runtime;
mod state;
mod view;

pub use commands::UiCommand;
pub use runtime::Screen;
pub use state::ScreenState;
pub use view::render_view;
