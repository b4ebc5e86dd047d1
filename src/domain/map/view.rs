//! Map view descriptors handed to the presentation layer.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{MapInfo, MapKind};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::region::BarrierCatalog;

/// Pixel size of the static map image.
pub const STATIC_MAP_WIDTH: u32 = 473;
pub const STATIC_MAP_HEIGHT: u32 = 533;

/// Pixel size of the tiled map figure.
pub const TILED_MAP_WIDTH: u32 = 400;
pub const TILED_MAP_HEIGHT: u32 = 900;

/// Fraction of each coordinate added around the full barrier extent.
const OUTER_PADDING: f64 = 0.003;

/// Smallest span, in map units, a zoomed view covers.
const MIN_ZOOM_SPAN: f64 = 5000.0;

/// Extra horizontal margin, in map units, on each side of a zoomed view.
const ZOOM_MARGIN: f64 = 5000.0;

/// Axis-aligned rectangle in map coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Extent {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Extent {
    fn point(x: f64, y: f64) -> Self {
        Self {
            x_min: x,
            x_max: x,
            y_min: y,
            y_max: y,
        }
    }

    fn union(self, other: Extent) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            x_max: self.x_max.max(other.x_max),
            y_min: self.y_min.min(other.y_min),
            y_max: self.y_max.max(other.y_max),
        }
    }

    /// Grows each edge by a fraction of its own magnitude.
    fn padded(self, fraction: f64) -> Self {
        Self {
            x_min: self.x_min - self.x_min.abs() * fraction,
            x_max: self.x_max + self.x_max.abs() * fraction,
            y_min: self.y_min - self.y_min.abs() * fraction,
            y_max: self.y_max + self.y_max.abs() * fraction,
        }
    }
}

/// A map drawn from a single image served by the project.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticMap {
    pub title: String,
    pub image_url: String,
    pub width: u32,
    pub height: u32,
}

/// A map drawn over background tiles.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TiledMap {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Every barrier, padded.
    pub outer: Extent,
    pub regions: BTreeMap<String, Extent>,
}

impl TiledMap {
    /// The view to show for the selected regions.
    ///
    /// With nothing selected the whole project is shown. Otherwise the
    /// selected regions are framed, widened to at least
    /// [`MIN_ZOOM_SPAN`] and stretched to the figure's aspect ratio.
    pub fn zoom<S: AsRef<str>>(&self, selected: &[S]) -> Extent {
        let Some(bounds) = selected
            .iter()
            .filter_map(|r| self.regions.get(r.as_ref()).copied())
            .reduce(Extent::union)
        else {
            return self.outer;
        };

        let mx = (bounds.x_max + bounds.x_min) / 2.0;
        let my = (bounds.y_max + bounds.y_min) / 2.0;
        let mut dx = (bounds.x_max - bounds.x_min).max(MIN_ZOOM_SPAN);
        let mut dy = (bounds.y_max - bounds.y_min).max(MIN_ZOOM_SPAN);
        let aspect = f64::from(self.height) / f64::from(self.width);

        if dy / dx > aspect {
            dx = dy / aspect;
        } else {
            dy = dx * aspect;
        }

        Extent {
            x_min: mx - dx / 2.0 - ZOOM_MARGIN,
            x_max: mx + dx / 2.0 + ZOOM_MARGIN,
            y_min: my - dy / 2.0,
            y_max: my + dy / 2.0,
        }
    }
}

/// What the presentation layer needs to draw the project map.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum MapView {
    Static(StaticMap),
    Tiled(TiledMap),
}

type MapConstructor = fn(&MapInfo, &str, &str, &BarrierCatalog) -> Result<MapView, DomainError>;

fn constructor(kind: MapKind) -> MapConstructor {
    match kind {
        MapKind::StaticMap => static_map,
        MapKind::TiledMap => tiled_map,
    }
}

impl MapView {
    /// Builds the view declared by the project's map info.
    ///
    /// # Errors
    ///
    /// `UnknownMapType` for a missing or unrecognized type, and
    /// `MalformedCatalog` when the chosen strategy lacks the data it needs.
    pub fn build(
        info: &MapInfo,
        server_url: &str,
        project: &str,
        barriers: &BarrierCatalog,
    ) -> Result<Self, DomainError> {
        let kind = info.kind()?;
        constructor(kind)(info, server_url, project, barriers)
    }

    pub fn kind(&self) -> MapKind {
        match self {
            MapView::Static(_) => MapKind::StaticMap,
            MapView::Tiled(_) => MapKind::TiledMap,
        }
    }
}

fn static_map(
    info: &MapInfo,
    server_url: &str,
    project: &str,
    _barriers: &BarrierCatalog,
) -> Result<MapView, DomainError> {
    let file = info.map_file.as_deref().ok_or_else(|| {
        DomainError::new(ErrorCode::MalformedCatalog, "static map needs a map_file")
            .with_detail("catalog", "mapinfo")
    })?;
    Ok(MapView::Static(StaticMap {
        title: info.map_title.clone().unwrap_or_default(),
        image_url: format!(
            "{}/map/{}/{}",
            server_url.trim_end_matches('/'),
            project,
            file
        ),
        width: STATIC_MAP_WIDTH,
        height: STATIC_MAP_HEIGHT,
    }))
}

fn tiled_map(
    info: &MapInfo,
    _server_url: &str,
    _project: &str,
    barriers: &BarrierCatalog,
) -> Result<MapView, DomainError> {
    let mut regions: BTreeMap<String, Extent> = BTreeMap::new();
    for barrier in barriers.barriers() {
        let (Some(x), Some(y)) = (barrier.x, barrier.y) else {
            continue;
        };
        let point = Extent::point(x, y);
        regions
            .entry(barrier.region.clone())
            .and_modify(|e| *e = e.union(point))
            .or_insert(point);
    }

    let outer = regions
        .values()
        .copied()
        .reduce(Extent::union)
        .ok_or_else(|| {
            DomainError::new(
                ErrorCode::MalformedCatalog,
                "tiled map needs barrier coordinates",
            )
            .with_detail("catalog", "barriers")
        })?
        .padded(OUTER_PADDING);

    Ok(MapView::Tiled(TiledMap {
        title: info.map_title.clone().unwrap_or_default(),
        width: TILED_MAP_WIDTH,
        height: TILED_MAP_HEIGHT,
        outer,
        regions,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::region::BARRIERS_CSV;

    fn info(map_type: &str) -> MapInfo {
        MapInfo {
            map_type: Some(map_type.to_string()),
            map_file: Some("coast.png".to_string()),
            map_title: Some("Oregon Coast".to_string()),
        }
    }

    fn catalog() -> BarrierCatalog {
        BarrierCatalog::from_csv(BARRIERS_CSV).unwrap()
    }

    #[test]
    fn static_map_points_at_server_image() {
        let view = MapView::build(&info("StaticMap"), "http://localhost:8000/", "demo", &catalog())
            .unwrap();
        let MapView::Static(map) = view else {
            panic!("expected static map");
        };
        assert_eq!(map.image_url, "http://localhost:8000/map/demo/coast.png");
        assert_eq!((map.width, map.height), (473, 533));
        assert_eq!(map.title, "Oregon Coast");
    }

    #[test]
    fn static_map_without_file_is_malformed() {
        let mut info = info("StaticMap");
        info.map_file = None;
        let err = MapView::build(&info, "http://x", "demo", &catalog()).unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedCatalog);
    }

    #[test]
    fn unknown_type_fails_instead_of_defaulting() {
        let err = MapView::build(&info("Atlas"), "http://x", "demo", &catalog()).unwrap_err();
        assert_eq!(err.code, ErrorCode::UnknownMapType);
    }

    #[test]
    fn tiled_map_pads_full_extent() {
        let view = MapView::build(&info("TiledMap"), "http://x", "demo", &catalog()).unwrap();
        let MapView::Tiled(map) = view else {
            panic!("expected tiled map");
        };
        assert!((map.outer.x_min - 120.5 * 0.997).abs() < 1e-9);
        assert!((map.outer.x_max - 210.0 * 1.003).abs() < 1e-9);
        assert!((map.outer.y_min - 80.25 * 0.997).abs() < 1e-9);
        assert!((map.outer.y_max - 97.0 * 1.003).abs() < 1e-9);
        assert_eq!(map.regions.len(), 2);
    }

    #[test]
    fn tiled_map_needs_coordinates() {
        let catalog = BarrierCatalog::from_csv("ID,region,cost\nA,North,1\n").unwrap();
        let err = MapView::build(&info("TiledMap"), "http://x", "demo", &catalog).unwrap_err();
        assert_eq!(err.code, ErrorCode::MalformedCatalog);
    }

    #[test]
    fn zoom_without_selection_shows_everything() {
        let MapView::Tiled(map) =
            MapView::build(&info("TiledMap"), "http://x", "demo", &catalog()).unwrap()
        else {
            panic!("expected tiled map");
        };
        assert_eq!(map.zoom::<&str>(&[]), map.outer);
        assert_eq!(map.zoom(&["Nowhere"]), map.outer);
    }

    #[test]
    fn zoom_frames_selected_region_at_figure_aspect() {
        let MapView::Tiled(map) =
            MapView::build(&info("TiledMap"), "http://x", "demo", &catalog()).unwrap()
        else {
            panic!("expected tiled map");
        };
        let view = map.zoom(&["Coos"]);

        let width = view.x_max - view.x_min - 2.0 * ZOOM_MARGIN;
        let height = view.y_max - view.y_min;
        assert!((height / width - 900.0 / 400.0).abs() < 1e-9);
        assert!(width >= MIN_ZOOM_SPAN);

        let cx = (view.x_max + view.x_min) / 2.0;
        assert!((cx - (120.5 + 130.0) / 2.0).abs() < 1e-9);
    }
}
