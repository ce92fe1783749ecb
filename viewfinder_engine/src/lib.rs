/*!
# Viewfinder Engine

Capture and placement geometry for photo-driven level manipulation.

A pyramid-shaped capture volume records the part of the scene it overlaps
into a photo. Placing the photo elsewhere cuts the destination with the
view pyramid, re-instantiates the captured actors relative to the new
frame and trims them to the captured volume. Every capture and placement
is tagged in a bounded history so it can be rewound.

## Architecture

- **World**: arena of actors, primitive components, classes and mesh assets
- **Geometry**: triangle meshes, the view pyramid and BSP mesh booleans
- **PhotoTakerPlacer**: the capture volume; overlap queries, capture, placement
- **CaptureBackend**: renders the scene into render targets (mock included)
- **ViewfinderController**: player-side driver with the photo collection and rewind
*/

// Internal modules
mod error;
mod engine;
pub mod log;
pub mod config;
pub mod math;
pub mod geometry;
pub mod target;
pub mod scene;
pub mod photo;
pub mod capture;
pub mod rewind;
pub mod controller;

// Main viewfinder namespace module
pub mod viewfinder {
    // Error types
    pub use crate::error::{Error, Result};

    // Engine singleton (logger)
    pub use crate::engine::Engine;

    pub use crate::config::ViewfinderConfig;
    pub use crate::controller::{InputGate, NoOpInputGate, ViewfinderController};
    pub use crate::math::Transform;

    // Logging sub-module (types only, macros live at crate root)
    pub mod log {
        pub use crate::log::{Logger, LogEntry, LogSeverity, DefaultLogger};
    }

    pub mod geometry {
        pub use crate::geometry::*;
    }

    pub mod target {
        pub use crate::target::*;
    }

    pub mod scene {
        pub use crate::scene::*;
    }

    pub mod photo {
        pub use crate::photo::*;
    }

    pub mod capture {
        pub use crate::capture::*;
    }

    pub mod rewind {
        pub use crate::rewind::*;
    }
}

// Re-export math library at crate root
pub use glam;
