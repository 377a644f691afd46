//! Read-only catalogs: guidance stages and universities.

pub mod guidance;
pub mod universities;
