mod accuracy;
mod alert;
mod connectivity_status;
mod position;
mod position_deserializer;
mod screen_error;

pub use accuracy::AccuracyHint;
pub use alert::Alert;
pub use connectivity_status::{ConnectivityReport, ConnectivityStatus};
pub use position::Position;
pub use screen_error::ScreenError;
