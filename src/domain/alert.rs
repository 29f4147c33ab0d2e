use std::fmt::{Display, Formatter};

/// One-off, user-visible notification. Nobody acknowledges them.
#[derive(Clone, Debug, PartialEq)]
pub enum Alert {
    PermissionDenied,
    PositionUnavailable(String),
    TrackingStarted,
    TrackingStopped,
    TrackingStartFailed(String),
    ConnectionRestored,
    ConnectionLost,
    MapUnavailable(String),
}

impl Alert {
    pub fn title(&self) -> &'static str {
        match self {
            Alert::PermissionDenied => "Permiso denegado",
            Alert::PositionUnavailable(_) => "Error",
            Alert::TrackingStarted => "Seguimiento activado",
            Alert::TrackingStopped => "Seguimiento desactivado",
            Alert::TrackingStartFailed(_) => "Error",
            Alert::ConnectionRestored => "Conexión restaurada",
            Alert::ConnectionLost => "Sin conexión",
            Alert::MapUnavailable(_) => "Mapa no disponible",
        }
    }

    pub fn message(&self) -> String {
        match self {
            Alert::PermissionDenied => "Se necesita permiso de ubicación para mostrar tu posición".to_string(),
            Alert::PositionUnavailable(reason) => format!("No se pudo obtener la ubicación: {}", reason),
            Alert::TrackingStarted => "Tu ubicación se actualizará automáticamente".to_string(),
            Alert::TrackingStopped => "Ya no se actualizará tu ubicación".to_string(),
            Alert::TrackingStartFailed(reason) => format!("No se pudo iniciar el seguimiento: {}", reason),
            Alert::ConnectionRestored => "La conexión a internet se ha restablecido".to_string(),
            Alert::ConnectionLost => "Se ha perdido la conexión a internet".to_string(),
            Alert::MapUnavailable(reason) => format!("Mostrando solo las coordenadas: {}", reason),
        }
    }
}

impl Display for Alert {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.title(), self.message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_title_and_message() {
        assert_eq!(
            Alert::PositionUnavailable("timeout".to_string()).to_string(),
            "Error: No se pudo obtener la ubicación: timeout"
        );
    }
}
