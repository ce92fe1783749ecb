/// World: arena of actors, components, classes, mesh assets and photos.
///
/// Every object is addressed by a slot-map key. Keys stay valid until
/// their own object is destroyed, so records holding keys of destroyed
/// objects see `None` instead of dangling.
///
/// The world implements the collaborator side of capture and placement:
/// spawning actors from classes, attaching and destroying components,
/// deriving world transforms through the attach hierarchy, and flattening
/// component geometry into mutable meshes.

use std::sync::Arc;
use slotmap::{new_key_type, SlotMap};
use crate::error::Result;
use crate::geometry::{MeshData, AABB};
use crate::math::Transform;
use crate::photo::{Photo, PhotoInfo, PhotoKey};
use crate::{vf_bail, vf_debug, vf_err};
use super::actor::{Actor, ActorKey};
use super::actor_class::{ActorClass, ActorClassKey};
use super::component::{ComponentDesc, ComponentKey, Geometry, Material, PrimitiveComponent};

const SOURCE: &str = "viewfinder::World";

/// Deepest attach chain walked before giving up (guards corrupted links)
const MAX_ATTACH_DEPTH: usize = 256;

new_key_type! {
    /// Stable key for a mesh asset within a World.
    pub struct MeshAssetKey;
}

/// Named, shared, immutable mesh
#[derive(Debug, Clone)]
pub struct MeshAsset {
    name: String,
    mesh: Arc<MeshData>,
}

impl MeshAsset {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mesh(&self) -> &Arc<MeshData> {
        &self.mesh
    }
}

#[derive(Debug, Default)]
pub struct World {
    actors: SlotMap<ActorKey, Actor>,
    components: SlotMap<ComponentKey, PrimitiveComponent>,
    classes: SlotMap<ActorClassKey, ActorClass>,
    mesh_assets: SlotMap<MeshAssetKey, MeshAsset>,
    photos: SlotMap<PhotoKey, Photo>,
    next_serial: u64,
}

impl World {
    pub fn new() -> Self {
        Self::default()
    }

    // ===== ASSETS / CLASSES =====

    pub fn add_mesh_asset(&mut self, name: &str, mesh: MeshData) -> MeshAssetKey {
        self.mesh_assets.insert(MeshAsset { name: name.to_string(), mesh: Arc::new(mesh) })
    }

    pub fn mesh_asset(&self, key: MeshAssetKey) -> Option<&MeshAsset> {
        self.mesh_assets.get(key)
    }

    pub fn register_class(&mut self, class: ActorClass) -> ActorClassKey {
        self.classes.insert(class)
    }

    pub fn class(&self, key: ActorClassKey) -> Option<&ActorClass> {
        self.classes.get(key)
    }

    // ===== ACTORS =====

    /// Spawn an actor from its class at `transform` (entity-placement provider).
    ///
    /// The class is validated before anything is created, so a failed
    /// spawn leaves the world untouched.
    pub fn spawn_actor(&mut self, class_key: ActorClassKey, transform: &Transform) -> Result<ActorKey> {
        let Some(class) = self.classes.get(class_key) else {
            vf_bail!(InvalidHandle, SOURCE, "Actor class {:?} not registered", class_key);
        };
        if class.components.is_empty() {
            vf_bail!(SpawnFailed, SOURCE, "Actor class '{}' has no components", class.name);
        }
        for (index, template) in class.components.iter().enumerate() {
            if let Some(parent) = template.parent {
                if parent >= index {
                    vf_bail!(SpawnFailed, SOURCE,
                        "Actor class '{}': component {} attaches to later component {}",
                        class.name, index, parent);
                }
            }
            if let Some(mesh) = template.desc.geometry.static_mesh() {
                if !self.mesh_assets.contains_key(mesh) {
                    vf_bail!(SpawnFailed, SOURCE,
                        "Actor class '{}': component '{}' uses a missing mesh asset",
                        class.name, template.desc.name);
                }
            }
        }

        let class = class.clone();
        let serial = self.next_serial;
        let actor_key = self.actors.insert(Actor::new(
            &format!("{}_{}", class.name, serial),
            Some(class_key),
            class.tags.clone(),
        ));

        let mut spawned: Vec<ComponentKey> = Vec::with_capacity(class.components.len());
        for (index, template) in class.components.into_iter().enumerate() {
            let mut desc = template.desc;
            let parent = if index == 0 {
                desc.relative_transform = transform.mul_transform(&desc.relative_transform);
                None
            } else {
                Some(spawned[template.parent.unwrap_or(0)])
            };
            let key = self.insert_component(actor_key, parent, desc);
            spawned.push(key);
        }

        vf_debug!(SOURCE, "Spawned actor {:?} with {} components", actor_key, spawned.len());
        Ok(actor_key)
    }

    /// Actor with a single transform-only root component
    pub fn spawn_empty_actor(&mut self, name: &str, transform: &Transform, tags: &[&str]) -> ActorKey {
        let actor_key = self.actors.insert(Actor::new(
            name,
            None,
            tags.iter().map(|t| t.to_string()).collect(),
        ));
        let desc = ComponentDesc::scene_root("Root").with_relative_transform(*transform);
        self.insert_component(actor_key, None, desc);
        actor_key
    }

    /// Destroy an actor and all its components.
    ///
    /// Components of other actors attached to it are detached and keep
    /// their world transform. Photo entries backed by the actor go too.
    pub fn destroy_actor(&mut self, key: ActorKey) -> bool {
        let Some(actor) = self.actors.get(key) else {
            return false;
        };
        let owned = actor.components.clone();

        let mut foreign: Vec<(ComponentKey, Transform)> = Vec::new();
        for component in &owned {
            if let Some(c) = self.components.get(*component) {
                for child in &c.children {
                    let foreign_child = self.components.get(*child).is_some_and(|cc| cc.owner() != key);
                    if foreign_child {
                        if let Some(world) = self.component_world_transform(*child) {
                            foreign.push((*child, world));
                        }
                    }
                }
            }
        }
        for (child, world) in foreign {
            if let Some(c) = self.components.get_mut(child) {
                c.parent = None;
                c.set_relative_transform(world);
            }
        }

        for component in &owned {
            let foreign_parent = self
                .components
                .get(*component)
                .and_then(|c| c.parent)
                .and_then(|p| self.components.get(p))
                .is_some_and(|p| p.owner() != key);
            if foreign_parent {
                self.unlink_from_parent(*component);
            }
        }
        for component in owned {
            self.components.remove(component);
        }
        self.photos.retain(|_, photo| photo.actor() != key);
        self.actors.remove(key);

        vf_debug!(SOURCE, "Destroyed actor {:?}", key);
        true
    }

    pub fn actor(&self, key: ActorKey) -> Option<&Actor> {
        self.actors.get(key)
    }

    pub fn actor_mut(&mut self, key: ActorKey) -> Option<&mut Actor> {
        self.actors.get_mut(key)
    }

    pub fn is_actor_alive(&self, key: ActorKey) -> bool {
        self.actors.contains_key(key)
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    pub fn actor_keys(&self) -> impl Iterator<Item = ActorKey> + '_ {
        self.actors.keys()
    }

    /// World transform of the actor's root (identity without a root)
    pub fn actor_transform(&self, key: ActorKey) -> Option<Transform> {
        let actor = self.actors.get(key)?;
        match actor.root {
            Some(root) => self.component_world_transform(root),
            None => Some(Transform::IDENTITY),
        }
    }

    pub fn set_actor_transform(&mut self, key: ActorKey, transform: &Transform) -> bool {
        match self.actors.get(key).and_then(|a| a.root) {
            Some(root) => self.set_component_world_transform(root, transform),
            None => false,
        }
    }

    // ===== COMPONENTS =====

    /// Add a component to an existing actor.
    ///
    /// `desc.relative_transform` is relative to `parent`, or to the world
    /// when `parent` is `None`. The first component becomes the root.
    pub fn add_component(
        &mut self,
        owner: ActorKey,
        parent: Option<ComponentKey>,
        desc: ComponentDesc,
    ) -> Result<ComponentKey> {
        if !self.actors.contains_key(owner) {
            vf_bail!(InvalidHandle, SOURCE, "Cannot add component '{}': actor {:?} is gone", desc.name, owner);
        }
        if let Some(parent) = parent {
            if !self.components.contains_key(parent) {
                vf_bail!(InvalidHandle, SOURCE, "Cannot add component '{}': parent {:?} is gone", desc.name, parent);
            }
        }
        Ok(self.insert_component(owner, parent, desc))
    }

    fn insert_component(&mut self, owner: ActorKey, parent: Option<ComponentKey>, desc: ComponentDesc) -> ComponentKey {
        let serial = self.next_serial;
        self.next_serial += 1;

        let mut component = PrimitiveComponent::from_desc(desc, owner, serial);
        component.parent = parent;
        let key = self.components.insert(component);

        if let Some(parent) = parent {
            if let Some(p) = self.components.get_mut(parent) {
                p.children.push(key);
            }
        }
        if let Some(actor) = self.actors.get_mut(owner) {
            actor.components.push(key);
            if actor.root.is_none() {
                actor.root = Some(key);
            }
        }
        key
    }

    /// Attach `child` under `parent`, keeping its world transform
    pub fn attach_component(&mut self, child: ComponentKey, parent: ComponentKey) -> Result<()> {
        if !self.components.contains_key(parent) {
            vf_bail!(InvalidHandle, SOURCE, "Attach parent {:?} is gone", parent);
        }
        let Some(world) = self.component_world_transform(child) else {
            vf_bail!(InvalidHandle, SOURCE, "Attach child {:?} is gone", child);
        };
        if self.is_ancestor_or_self(child, parent) {
            vf_bail!(InvalidConfig, SOURCE, "Attaching {:?} under {:?} would create a cycle", child, parent);
        }

        self.unlink_from_parent(child);
        let parent_world = self.component_world_transform(parent).unwrap_or_default();
        if let Some(p) = self.components.get_mut(parent) {
            p.children.push(child);
        }
        if let Some(c) = self.components.get_mut(child) {
            c.parent = Some(parent);
            c.set_relative_transform(world.relative_to(&parent_world));
        }
        Ok(())
    }

    /// Destroy one component.
    ///
    /// Its children move up to its parent keeping their world transform.
    /// When it was its actor's root, its first same-actor child takes over.
    pub fn destroy_component(&mut self, key: ComponentKey) -> bool {
        let Some(component) = self.components.get(key) else {
            return false;
        };
        let owner = component.owner();
        let parent = component.parent;
        let children = component.children.clone();

        let worlds: Vec<(ComponentKey, Transform)> = children
            .iter()
            .filter_map(|c| Some((*c, self.component_world_transform(*c)?)))
            .collect();
        let parent_world = parent.and_then(|p| self.component_world_transform(p));

        self.unlink_from_parent(key);
        for (child, world) in worlds {
            if let Some(c) = self.components.get_mut(child) {
                c.parent = parent;
                let relative = match &parent_world {
                    Some(pw) => world.relative_to(pw),
                    None => world,
                };
                c.set_relative_transform(relative);
            }
            if let Some(p) = parent.and_then(|p| self.components.get_mut(p)) {
                p.children.push(child);
            }
        }
        self.components.remove(key);

        let new_root = children
            .iter()
            .copied()
            .find(|c| self.components.get(*c).is_some_and(|cc| cc.owner() == owner));
        if let Some(actor) = self.actors.get_mut(owner) {
            actor.components.retain(|c| *c != key);
            if actor.root == Some(key) {
                actor.root = new_root;
            }
        }
        true
    }

    pub fn component(&self, key: ComponentKey) -> Option<&PrimitiveComponent> {
        self.components.get(key)
    }

    pub fn component_mut(&mut self, key: ComponentKey) -> Option<&mut PrimitiveComponent> {
        self.components.get_mut(key)
    }

    pub fn is_component_alive(&self, key: ComponentKey) -> bool {
        self.components.contains_key(key)
    }

    pub fn component_count(&self) -> usize {
        self.components.len()
    }

    /// All component keys, oldest first
    pub fn component_keys(&self) -> Vec<ComponentKey> {
        let mut keys: Vec<(u64, ComponentKey)> =
            self.components.iter().map(|(k, c)| (c.serial, k)).collect();
        keys.sort_unstable_by_key(|(serial, _)| *serial);
        keys.into_iter().map(|(_, k)| k).collect()
    }

    /// First component of `owner` with this name
    pub fn find_component(&self, owner: ActorKey, name: &str) -> Option<ComponentKey> {
        self.actors.get(owner)?.components.iter().copied().find(|c| {
            self.components.get(*c).is_some_and(|cc| cc.name() == name)
        })
    }

    /// World transform derived through the attach chain
    pub fn component_world_transform(&self, key: ComponentKey) -> Option<Transform> {
        let mut chain: Vec<&Transform> = Vec::new();
        let mut current = Some(key);
        while let Some(k) = current {
            if chain.len() >= MAX_ATTACH_DEPTH {
                break;
            }
            let component = self.components.get(k)?;
            chain.push(component.relative_transform());
            current = component.parent;
        }
        Some(
            chain
                .into_iter()
                .rev()
                .fold(Transform::IDENTITY, |acc, rel| acc.mul_transform(rel)),
        )
    }

    pub fn set_component_world_transform(&mut self, key: ComponentKey, transform: &Transform) -> bool {
        let Some(component) = self.components.get(key) else {
            return false;
        };
        let relative = match component.parent.and_then(|p| self.component_world_transform(p)) {
            Some(parent_world) => transform.relative_to(&parent_world),
            None => *transform,
        };
        if let Some(c) = self.components.get_mut(key) {
            c.set_relative_transform(relative);
        }
        true
    }

    /// Mesh rendered by the component, in its local frame
    pub fn component_mesh(&self, key: ComponentKey) -> Option<Arc<MeshData>> {
        match self.components.get(key)?.geometry() {
            Geometry::None => None,
            Geometry::Static(asset) => self.mesh_assets.get(*asset).map(|a| Arc::clone(&a.mesh)),
            Geometry::Dynamic(mesh) => Some(Arc::clone(mesh)),
        }
    }

    /// Flatten the component's geometry into a mutable mesh.
    ///
    /// A component without geometry yields an empty mesh.
    pub fn copy_from_source_geometry(&self, key: ComponentKey) -> Result<MeshData> {
        let Some(component) = self.components.get(key) else {
            vf_bail!(InvalidHandle, SOURCE, "Component {:?} is gone", key);
        };
        match component.geometry() {
            Geometry::None => Ok(MeshData::empty()),
            Geometry::Static(asset) => self
                .mesh_assets
                .get(*asset)
                .map(|a| (*a.mesh).clone())
                .ok_or_else(|| vf_err!(InvalidHandle, SOURCE,
                    "Component '{}' uses a missing mesh asset", component.name())),
            Geometry::Dynamic(mesh) => Ok((**mesh).clone()),
        }
    }

    /// World-space bounds of the component's geometry
    pub fn component_world_bounds(&self, key: ComponentKey) -> Option<AABB> {
        let local = self.component_mesh(key)?.bounds()?;
        let world = self.component_world_transform(key)?;
        Some(local.transformed(&world.to_mat4()))
    }

    fn unlink_from_parent(&mut self, key: ComponentKey) {
        let parent = self.components.get(key).and_then(|c| c.parent);
        if let Some(p) = parent.and_then(|p| self.components.get_mut(p)) {
            p.children.retain(|c| *c != key);
        }
    }

    fn is_ancestor_or_self(&self, ancestor: ComponentKey, key: ComponentKey) -> bool {
        let mut current = Some(key);
        let mut depth = 0;
        while let Some(k) = current {
            if k == ancestor {
                return true;
            }
            depth += 1;
            if depth > MAX_ATTACH_DEPTH {
                return true;
            }
            current = self.components.get(k).and_then(|c| c.parent);
        }
        false
    }

    // ===== PHOTOS =====

    /// Spawn a photo entity from a photo class and bind its render target
    /// to the display mesh (material slot 0).
    pub fn spawn_photo(&mut self, class: ActorClassKey, transform: &Transform, info: PhotoInfo) -> Result<PhotoKey> {
        let actor = self.spawn_actor(class, transform)?;
        let Some(mesh) = self.actors.get(actor).and_then(|a| a.root) else {
            self.destroy_actor(actor);
            vf_bail!(SpawnFailed, SOURCE, "Photo class {:?} has no display mesh", class);
        };
        if let Some(c) = self.components.get_mut(mesh) {
            c.set_material(0, Material::RenderTarget(info.render_target));
        }
        Ok(self.photos.insert(Photo::new(actor, info)))
    }

    pub fn destroy_photo(&mut self, key: PhotoKey) -> bool {
        match self.photos.remove(key) {
            Some(photo) => {
                self.destroy_actor(photo.actor());
                true
            }
            None => false,
        }
    }

    pub fn photo(&self, key: PhotoKey) -> Option<&Photo> {
        self.photos.get(key)
    }

    pub fn photo_mut(&mut self, key: PhotoKey) -> Option<&mut Photo> {
        self.photos.get_mut(key)
    }

    pub fn photo_count(&self) -> usize {
        self.photos.len()
    }

    pub fn photo_keys(&self) -> impl Iterator<Item = PhotoKey> + '_ {
        self.photos.keys()
    }

    /// Display mesh component of a photo (its actor's root)
    pub fn photo_mesh(&self, key: PhotoKey) -> Option<ComponentKey> {
        let photo = self.photos.get(key)?;
        self.actors.get(photo.actor())?.root
    }
}

#[cfg(test)]
#[path = "world_tests.rs"]
mod tests;
