//! Scene module
//!
//! The world the viewfinder captures from and places into: actors spawned
//! from classes, their primitive components, shared mesh assets and the
//! photo entities.

mod actor;
mod actor_class;
mod component;
mod mesh_slots;
mod world;

pub use actor::{Actor, ActorKey};
pub use actor_class::{ActorClass, ActorClassKey, ActorKind, ClassComponent, PHOTO_MESH, STATIC_MESH_SLOT};
pub use component::{
    CollisionChannel, CollisionEnabled, CollisionResponse, CollisionResponses,
    ComponentDesc, ComponentFlags, ComponentKey, ComponentState, Geometry, Material,
    PrimitiveComponent,
};
pub use mesh_slots::{ActorMeshSlots, MeshSlots, MultiMeshActor, SingleMeshActor};
pub use world::{MeshAsset, MeshAssetKey, World};
