// Maven repository layout: coordinates and snapshot builds

pub mod coordinate;
pub mod snapshot;

pub use snapshot::latest_snapshots;
