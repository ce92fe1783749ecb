//! Photo records and the photo entity
//!
//! A capture produces a `PhotoInfo`: the parameters it was taken with, its
//! render targets, one `ActorRecord` per captured actor and the union of the
//! captured geometry. A placement produces a `PlacementRecord` carrying the
//! handles needed to undo it.

mod params;
mod photo_info;
mod photo;
mod placement_record;

pub use params::{pyramid_scale, PhotoTakeParams};
pub use photo_info::{ActorRecord, PhotoInfo};
pub use photo::{Photo, PhotoKey};
pub use placement_record::{PlacementRecord, PlacementUndo};
