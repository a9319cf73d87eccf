//! URL handling for sitezip
//!
//! This module validates the origin URL before any network activity and
//! derives archive filenames from resource URLs.

mod filename;
mod origin;

pub use filename::file_name;
pub use origin::Origin;
