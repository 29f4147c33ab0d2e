use crate::app_config::Map;
use crate::domain::Position;
use crate::map::surface::{MapError, MapSurface};
use crate::map::web_template::MapDocument;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

/// Map shown in a browser view. Every change writes a freshly generated document to
/// `output_path`, which the view reloads.
#[derive(Debug)]
pub struct WebMapSurface {
    zoom: u8,
    tile_url: String,
    attribution: String,
    output_path: PathBuf,
    marker: Option<Position>,
}

impl WebMapSurface {
    pub fn new(config: &Map) -> Self {
        WebMapSurface {
            zoom: config.zoom(),
            tile_url: config.tile_url().to_string(),
            attribution: config.attribution().to_string(),
            output_path: config.output_path().to_path_buf(),
            marker: None,
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }

    async fn write(&self, center: &Position, marker: &Position) -> Result<(), MapError> {
        let html = MapDocument {
            center: *center,
            marker: *marker,
            zoom: self.zoom,
            tile_url: &self.tile_url,
            attribution: &self.attribution,
        }
        .to_html();

        fs::write(&self.output_path, html).await.map_err(|e| MapError::Io {
            source: e,
            path: self.output_path.clone(),
        })?;
        debug!(path = %self.output_path.display(), "🗺️ Wrote map document");
        Ok(())
    }
}

#[async_trait]
impl MapSurface for WebMapSurface {
    fn kind(&self) -> &'static str {
        "web"
    }

    #[instrument(skip_all)]
    async fn render(&mut self, position: &Position) -> Result<(), MapError> {
        self.write(position, position).await?;
        self.marker = Some(*position);
        info!(latitude = position.latitude(), longitude = position.longitude(), "🗺️ Rendered map");
        Ok(())
    }

    #[instrument(skip_all)]
    async fn recenter(&mut self, position: &Position) -> Result<(), MapError> {
        let marker = self.marker.ok_or(MapError::NotRendered)?;
        self.write(position, &marker).await?;
        info!(latitude = position.latitude(), longitude = position.longitude(), "🗺️ Recentered map");
        Ok(())
    }

    fn marker(&self) -> Option<Position> {
        self.marker
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app_config::AppConfigBuilder;
    use std::env::temp_dir;

    fn surface(file_name: &str) -> WebMapSurface {
        let config = AppConfigBuilder::new().output_path(temp_dir().join(file_name)).build();
        WebMapSurface::new(config.map())
    }

    #[tokio::test]
    async fn render_writes_a_document_with_the_marker() -> Result<(), MapError> {
        let mut surface = surface("pinpoint_render_test.html");
        let position = Position::new(40.4168, -3.7038, Some(5.0)).unwrap();

        surface.render(&position).await?;

        let html = fs::read_to_string(surface.output_path()).await.unwrap();
        assert!(html.contains("L.marker([40.4168, -3.7038])"));
        assert_eq!(surface.marker(), Some(position));
        Ok(())
    }

    #[tokio::test]
    async fn recenter_regenerates_the_document_and_keeps_the_marker() -> Result<(), MapError> {
        let mut surface = surface("pinpoint_recenter_test.html");
        let marker = Position::new(40.4168, -3.7038, None).unwrap();
        let center = Position::new(40.5, -3.5, None).unwrap();

        surface.render(&marker).await?;
        surface.recenter(&center).await?;

        let html = fs::read_to_string(surface.output_path()).await.unwrap();
        assert!(html.contains("setView([40.5, -3.5], 15)"));
        assert!(html.contains("L.marker([40.4168, -3.7038])"));
        assert_eq!(surface.marker(), Some(marker));
        Ok(())
    }

    #[tokio::test]
    async fn recenter_fails_before_anything_is_rendered() {
        let mut surface = surface("pinpoint_unrendered_test.html");

        let result = surface.recenter(&Position::new(1.0, 1.0, None).unwrap()).await;

        assert!(matches!(result, Err(MapError::NotRendered)));
    }

    #[tokio::test]
    async fn render_fails_when_the_document_cannot_be_written() {
        let config = AppConfigBuilder::new().output_path(temp_dir().join("missing_dir/nested/map.html")).build();
        let mut surface = WebMapSurface::new(config.map());

        let result = surface.render(&Position::new(1.0, 1.0, None).unwrap()).await;

        assert!(matches!(result, Err(MapError::Io { .. })));
        assert_eq!(surface.marker(), None);
    }
}
