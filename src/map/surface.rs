use crate::domain::Position;
use async_trait::async_trait;
use std::fmt::Debug;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Something that shows one marker on a map. A failed render means the caller should fall
/// back to the placeholder.
#[async_trait]
pub trait MapSurface: Debug + Send + Sync {
    fn kind(&self) -> &'static str;

    /// Shows a single marker at the position and centers the viewport on it.
    async fn render(&mut self, position: &Position) -> Result<(), MapError>;

    /// Moves the viewport to the position, the marker stays where it is.
    async fn recenter(&mut self, position: &Position) -> Result<(), MapError>;

    fn marker(&self) -> Option<Position>;
}

#[derive(Error, Debug)]
pub enum MapError {
    #[error("nothing has been rendered yet")]
    NotRendered,
    #[error("unable to write map document '{}': {}", path.display(), source)]
    Io { source: io::Error, path: PathBuf },
}
