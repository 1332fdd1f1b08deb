//! Marker traits separating writes from reads
//!
//! Commands change stored state, queries only read it. Handlers and layers can
//! bound on these to treat the two kinds differently.

pub trait Command {}

pub trait Query {}
