//! Template set adapters.

mod tera;

pub use self::tera::TeraTemplateSet;
