use crate::domain::{ConnectivityReport, ConnectivityStatus, Position};
use crate::map::DISPLAY_PRECISION;

/// The lines under the map describing the current reading.
pub fn position_lines(position: &Position) -> [String; 3] {
    [
        format!("Latitud: {:.prec$}", position.latitude(), prec = DISPLAY_PRECISION),
        format!("Longitud: {:.prec$}", position.longitude(), prec = DISPLAY_PRECISION),
        match position.accuracy() {
            Some(accuracy) => format!("Precisión: ±{} metros", accuracy.round()),
            None => "Precisión: desconocida".to_string(),
        },
    ]
}

pub fn connectivity_line(report: &ConnectivityReport) -> String {
    let checked_at = report
        .checked_at()
        .map(|at| format!(" (comprobado {})", at.format("%H:%M:%S")))
        .unwrap_or_default();

    match report.status() {
        ConnectivityStatus::Unknown => "Red: comprobando...".to_string(),
        ConnectivityStatus::Connected => format!("Red: conectado{}", checked_at),
        ConnectivityStatus::Disconnected => format!("Red: sin conexión{}", checked_at),
    }
}
