use crate::domain::Position;
use crate::map::surface::{MapError, MapSurface};
use async_trait::async_trait;
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Number of recent camera animations kept for inspection.
const ANIMATION_HISTORY: usize = 8;

/// Visible area of a native map view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Region {
    pub latitude: f64,
    pub longitude: f64,
    pub latitude_delta: f64,
    pub longitude_delta: f64,
}

impl Region {
    pub fn around(position: &Position, zoom: u8) -> Self {
        let longitude_delta = 360.0 / 2f64.powi(zoom as i32);
        Region {
            latitude: position.latitude(),
            longitude: position.longitude(),
            latitude_delta: longitude_delta / 2.0,
            longitude_delta,
        }
    }
}

/// Native map widget, driven with imperative camera animations.
#[derive(Debug)]
pub struct NativeMapSurface {
    zoom: u8,
    marker: Option<Position>,
    camera: Option<Region>,
    animations: VecDeque<Region>,
}

impl NativeMapSurface {
    pub fn new(zoom: u8) -> Self {
        NativeMapSurface {
            zoom,
            marker: None,
            camera: None,
            animations: VecDeque::with_capacity(ANIMATION_HISTORY),
        }
    }

    pub fn camera(&self) -> Option<Region> {
        self.camera
    }

    /// The most recent camera animations, oldest first.
    pub fn animations(&self) -> Vec<Region> {
        self.animations.iter().copied().collect()
    }

    fn animate_to_region(&mut self, region: Region) {
        debug!(latitude = region.latitude, longitude = region.longitude, "🎥 Animating camera");
        if self.animations.len() == ANIMATION_HISTORY {
            self.animations.pop_front();
        }
        self.animations.push_back(region);
        self.camera = Some(region);
    }
}

#[async_trait]
impl MapSurface for NativeMapSurface {
    fn kind(&self) -> &'static str {
        "native"
    }

    #[instrument(skip_all)]
    async fn render(&mut self, position: &Position) -> Result<(), MapError> {
        self.marker = Some(*position);
        self.animate_to_region(Region::around(position, self.zoom));
        Ok(())
    }

    #[instrument(skip_all)]
    async fn recenter(&mut self, position: &Position) -> Result<(), MapError> {
        if self.marker.is_none() {
            return Err(MapError::NotRendered);
        }

        self.animate_to_region(Region::around(position, self.zoom));
        Ok(())
    }

    fn marker(&self) -> Option<Position> {
        self.marker
    }
}
