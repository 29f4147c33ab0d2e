use crate::domain::Position;
use crate::map::DISPLAY_PRECISION;

/// Non-interactive stand-in for a map that could not be rendered.
pub fn placeholder(position: Option<&Position>) -> String {
    match position {
        Some(position) => format!(
            "[ Mapa no disponible | {:.prec$}, {:.prec$} ]",
            position.latitude(),
            position.longitude(),
            prec = DISPLAY_PRECISION
        ),
        None => "[ Mapa no disponible ]".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shows_the_coordinates() {
        let position = Position::new(40.4168, -3.7038, None).unwrap();

        assert_eq!(placeholder(Some(&position)), "[ Mapa no disponible | 40.416800, -3.703800 ]");
    }

    #[test]
    fn works_without_a_position() {
        assert_eq!(placeholder(None), "[ Mapa no disponible ]");
    }
}
