mod geo_provider;

pub use geo_provider::GeoProvider;
