use crate::map::placeholder;
use crate::screen::info_panel::{connectivity_line, position_lines};
use crate::screen::state::{MapState, PositionState, ScreenState};

/// Text rendering of the whole screen.
pub fn render_view(state: &ScreenState) -> String {
    let mut lines = Vec::new();

    if let Some(error) = state.connectivity_error() {
        lines.push(format!("⚠ {}", error));
    }

    match &state.position {
        PositionState::Loading => lines.push("Obteniendo ubicación...".to_string()),
        PositionState::Failed(error) => lines.push(format!("Error: {}", error)),
        PositionState::Ready(position) => {
            match state.map {
                MapState::Placeholder => lines.push(placeholder(Some(position))),
                MapState::Interactive => lines.push("[ Mapa ]".to_string()),
                MapState::Hidden => {}
            }
            lines.extend(position_lines(position));
        }
    }

    lines.push(format!("Seguimiento: {}", if state.tracking { "activo" } else { "inactivo" }));
    if let Some(error) = &state.tracking_error {
        lines.push(format!("Error: {}", error));
    }
    lines.push(connectivity_line(&state.connectivity));

    lines.join("\n")
}
