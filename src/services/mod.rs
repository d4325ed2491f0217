pub mod geocode_cache;
pub mod geocoder;
pub mod upstream;

pub use geocode_cache::GeocodeCache;
pub use geocoder::{Geocoder, NominatimGeocoder};
pub use upstream::{Collections, UpstreamService};
