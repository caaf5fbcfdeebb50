//! Static data for the map view.
//!
//! The core only knows the viewport, the marker set and where tiles come
//! from; rendering, tile fetching and widget lifecycle belong to the
//! presentation layer and the tile service itself.

use crate::location::Position;

/// Map viewport: a center position and a zoom level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: Position,
    pub zoom: u8,
}

/// A named marker shown on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointOfInterest {
    pub name: &'static str,
    pub position: Position,
}

/// Default view: Dubai city.
pub const DEFAULT_VIEWPORT: Viewport = Viewport {
    center: Position::new(25.2048, 55.2708),
    zoom: 11,
};

/// Fixed markers shown on every visit to the map view.
pub const POINTS_OF_INTEREST: [PointOfInterest; 2] = [
    PointOfInterest {
        name: "Embassy Dubai",
        position: Position::new(25.2582, 55.3047),
    },
    PointOfInterest {
        name: "Police Station",
        position: Position::new(25.2697, 55.3094),
    },
];

/// OpenStreetMap raster tile URL template.
pub const OSM_TILE_TEMPLATE: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// Attribution required by the tile service.
pub const OSM_ATTRIBUTION: &str = "© OpenStreetMap contributors";

impl Viewport {
    /// Browser link showing this viewport, used by `map --open`.
    pub fn maps_link(&self) -> String {
        crate::dispatch::maps_url(self.center)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_viewport_is_dubai() {
        assert_eq!(DEFAULT_VIEWPORT.center, Position::new(25.2048, 55.2708));
        assert_eq!(DEFAULT_VIEWPORT.zoom, 11);
    }

    #[test]
    fn test_poi_markers() {
        assert_eq!(POINTS_OF_INTEREST.len(), 2);
        let embassy = POINTS_OF_INTEREST
            .iter()
            .find(|p| p.name == "Embassy Dubai")
            .unwrap();
        assert_eq!(embassy.position, Position::new(25.2582, 55.3047));
    }

    #[test]
    fn test_viewport_maps_link() {
        assert_eq!(
            DEFAULT_VIEWPORT.maps_link(),
            "https://maps.google.com/?q=25.2048,55.2708"
        );
    }

    #[test]
    fn test_tile_template_placeholders() {
        for placeholder in ["{s}", "{z}", "{x}", "{y}"] {
            assert!(OSM_TILE_TEMPLATE.contains(placeholder));
        }
    }
}
