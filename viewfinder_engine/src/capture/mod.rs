//! Capture and placement
//!
//! The pyramid volume (`PhotoTakerPlacer`) queries what it overlaps,
//! captures it into a photo through a `CaptureBackend`, and places photos
//! back into the world, cutting destination and content geometry.

mod backend;
mod capture_service;
mod frustum_query;
mod mock_backend;
mod photo_taker;
mod placement_service;
#[cfg(test)]
pub(crate) mod test_scene;

pub use backend::{renderable_components, CaptureBackend, CaptureView};
pub use capture_service::capture_frustum_photo;
pub use frustum_query::{query_overlaps, Overlaps, NON_CAPTURE_TAG};
pub use mock_backend::{MockCaptureBackend, MockRender};
pub use photo_taker::{PhotoTakerPlacer, TAKER_VOLUME};
pub use placement_service::place_photo;
