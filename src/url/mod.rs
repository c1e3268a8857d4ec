//! URL handling module for Listing-Harvester
//!
//! Links in the site markup are mostly site-relative; this module resolves
//! them against the configured site origin.

mod origin;

pub use origin::SiteOrigin;
