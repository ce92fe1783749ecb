/// Mesh slots: named static-mesh bindings of an actor.
///
/// Captures record the mesh of every slot so a placement can respawn the
/// actor from its class and reapply per-instance mesh overrides.

use rustc_hash::FxHashMap;
use super::actor::ActorKey;
use super::actor_class::{ActorKind, STATIC_MESH_SLOT};
use super::component::{ComponentFlags, Geometry};
use super::world::{MeshAssetKey, World};

/// Capability of actors whose meshes can be recorded and reapplied
pub trait MeshSlots {
    /// Mesh asset bound to every slot
    fn slot_meshes(&self, world: &World) -> FxHashMap<String, MeshAssetKey>;

    /// Rebind slots found in `meshes`, returns the number of slots updated.
    ///
    /// Updated components also start generating overlaps so the placement
    /// cut can find them.
    fn apply_slot_meshes(&self, world: &mut World, meshes: &FxHashMap<String, MeshAssetKey>) -> usize;
}

/// Actor with one mesh on its root component
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleMeshActor(pub ActorKey);

/// Actor with one slot per static-mesh component, keyed by component name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultiMeshActor(pub ActorKey);

impl MeshSlots for SingleMeshActor {
    fn slot_meshes(&self, world: &World) -> FxHashMap<String, MeshAssetKey> {
        let mut meshes = FxHashMap::default();
        let mesh = world
            .actor(self.0)
            .and_then(|a| a.root())
            .and_then(|root| world.component(root))
            .and_then(|c| c.geometry().static_mesh());
        if let Some(mesh) = mesh {
            meshes.insert(STATIC_MESH_SLOT.to_string(), mesh);
        }
        meshes
    }

    fn apply_slot_meshes(&self, world: &mut World, meshes: &FxHashMap<String, MeshAssetKey>) -> usize {
        let Some(mesh) = meshes.get(STATIC_MESH_SLOT) else {
            return 0;
        };
        let Some(root) = world.actor(self.0).and_then(|a| a.root()) else {
            return 0;
        };
        match world.component_mut(root) {
            Some(component) => {
                component.set_geometry(Geometry::Static(*mesh));
                component.set_flag(ComponentFlags::GENERATE_OVERLAPS, true);
                1
            }
            None => 0,
        }
    }
}

impl MeshSlots for MultiMeshActor {
    fn slot_meshes(&self, world: &World) -> FxHashMap<String, MeshAssetKey> {
        let Some(actor) = world.actor(self.0) else {
            return FxHashMap::default();
        };
        actor
            .components()
            .iter()
            .filter_map(|key| world.component(*key))
            .filter_map(|c| Some((c.name().to_string(), c.geometry().static_mesh()?)))
            .collect()
    }

    fn apply_slot_meshes(&self, world: &mut World, meshes: &FxHashMap<String, MeshAssetKey>) -> usize {
        let Some(actor) = world.actor(self.0) else {
            return 0;
        };
        let components = actor.components().to_vec();

        let mut updated = 0;
        for key in components {
            let Some(component) = world.component_mut(key) else {
                continue;
            };
            if component.geometry().static_mesh().is_none() {
                continue;
            }
            if let Some(mesh) = meshes.get(component.name()) {
                component.set_geometry(Geometry::Static(*mesh));
                component.set_flag(ComponentFlags::GENERATE_OVERLAPS, true);
                updated += 1;
            }
        }
        updated
    }
}

/// Mesh-slot view of an actor, chosen from its class kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorMeshSlots {
    Single(SingleMeshActor),
    Multi(MultiMeshActor),
}

impl ActorMeshSlots {
    /// Actors without a class are treated as multi-mesh actors
    pub fn of(world: &World, actor: ActorKey) -> Option<Self> {
        let kind = world
            .actor(actor)?
            .class()
            .and_then(|c| world.class(c))
            .map(|c| c.kind)
            .unwrap_or(ActorKind::MultiMesh);
        Some(match kind {
            ActorKind::SingleMesh => ActorMeshSlots::Single(SingleMeshActor(actor)),
            ActorKind::MultiMesh => ActorMeshSlots::Multi(MultiMeshActor(actor)),
        })
    }
}

impl MeshSlots for ActorMeshSlots {
    fn slot_meshes(&self, world: &World) -> FxHashMap<String, MeshAssetKey> {
        match self {
            ActorMeshSlots::Single(a) => a.slot_meshes(world),
            ActorMeshSlots::Multi(a) => a.slot_meshes(world),
        }
    }

    fn apply_slot_meshes(&self, world: &mut World, meshes: &FxHashMap<String, MeshAssetKey>) -> usize {
        match self {
            ActorMeshSlots::Single(a) => a.apply_slot_meshes(world, meshes),
            ActorMeshSlots::Multi(a) => a.apply_slot_meshes(world, meshes),
        }
    }
}

#[cfg(test)]
#[path = "mesh_slots_tests.rs"]
mod tests;
