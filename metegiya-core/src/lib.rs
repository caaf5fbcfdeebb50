//! Metegiya Core
//!
//! This library holds the behavioral components of the Metegiya
//! emergency-assistance application: localized content for the three
//! supported languages, the persisted trusted-numbers list, position
//! resolution, emergency-message composition, the simulated offline
//! map-pack cache, and the connectivity monitor. The presentation shell
//! lives in `metegiya-cli` and only wires these pieces together.

pub mod connectivity;
pub mod contacts;
pub mod dispatch;
pub mod locale;
pub mod location;
pub mod map;
pub mod packs;
pub mod prefs;

mod error;

pub use connectivity::{ConnectivityMonitor, ConnectivityProbe, TcpProbe};
pub use contacts::{find_contact, EmergencyContact, TrustedNumbers, EMERGENCY_CONTACTS};
pub use dispatch::{
    alert_message, compose, encode_component, failure_notice, maps_url, tel_uri, Dispatch,
    DispatchChannel,
};
pub use error::{Error, Result};
pub use locale::{content, Locale, LocaleContent};
pub use location::{
    FixedLocationProvider, IpLocationProvider, LocationFailure, LocationProvider, Position,
};
pub use map::{
    PointOfInterest, Viewport, DEFAULT_VIEWPORT, OSM_ATTRIBUTION, OSM_TILE_TEMPLATE,
    POINTS_OF_INTEREST,
};
pub use packs::{DownloadStart, MapPackCache, PackState};
pub use prefs::PreferenceStore;
