//! External collaborator abstraction trait definitions.

mod geo_provider;
mod record_resolver;
mod whois_source;

pub use geo_provider::GeoProvider;
pub use record_resolver::RecordResolver;
pub use whois_source::WhoisSource;
