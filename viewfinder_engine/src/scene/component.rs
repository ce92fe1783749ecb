/// Primitive components: the geometry-bearing parts of an actor.
///
/// A component has a transform relative to its attach parent (or to the
/// world when detached), optional geometry, render/overlap flags, a
/// collision state and material slots. Hierarchy links are maintained by
/// `World`; everything else can be edited through `World::component_mut`.

use std::sync::Arc;
use bitflags::bitflags;
use slotmap::new_key_type;
use crate::geometry::MeshData;
use crate::math::Transform;
use crate::target::RenderTargetKey;
use super::actor::ActorKey;
use super::world::MeshAssetKey;

new_key_type! {
    /// Stable key for a PrimitiveComponent within a World.
    pub struct ComponentKey;
}

// ===== FLAGS =====

bitflags! {
    /// Per-component render and query flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ComponentFlags: u32 {
        /// Rendered by the main view and by captures
        const VISIBLE            = 1 << 0;
        /// Reported by overlap queries
        const GENERATE_OVERLAPS  = 1 << 1;
        /// Skipped by capture renders only
        const HIDDEN_IN_CAPTURE  = 1 << 2;
        const SIMULATE_PHYSICS   = 1 << 3;
        const CAST_SHADOW        = 1 << 4;
        /// Collision uses the render mesh instead of a simple hull
        const COMPLEX_AS_SIMPLE  = 1 << 5;
    }
}

impl Default for ComponentFlags {
    fn default() -> Self {
        ComponentFlags::VISIBLE | ComponentFlags::GENERATE_OVERLAPS | ComponentFlags::CAST_SHADOW
    }
}

// ===== COLLISION =====

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CollisionEnabled {
    NoCollision,
    QueryOnly,
    PhysicsOnly,
    #[default]
    QueryAndPhysics,
}

impl CollisionEnabled {
    /// Takes part in overlap queries
    pub fn has_query(self) -> bool {
        matches!(self, CollisionEnabled::QueryOnly | CollisionEnabled::QueryAndPhysics)
    }

    pub fn has_physics(self) -> bool {
        matches!(self, CollisionEnabled::PhysicsOnly | CollisionEnabled::QueryAndPhysics)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionChannel {
    WorldStatic,
    WorldDynamic,
    Pawn,
    Visibility,
    Camera,
    PhysicsBody,
}

impl CollisionChannel {
    pub const COUNT: usize = 6;

    fn index(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionResponse {
    Ignore,
    Overlap,
    Block,
}

/// Response to every collision channel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionResponses([CollisionResponse; CollisionChannel::COUNT]);

impl Default for CollisionResponses {
    fn default() -> Self {
        Self::all(CollisionResponse::Block)
    }
}

impl CollisionResponses {
    pub fn all(response: CollisionResponse) -> Self {
        Self([response; CollisionChannel::COUNT])
    }

    pub fn get(&self, channel: CollisionChannel) -> CollisionResponse {
        self.0[channel.index()]
    }

    pub fn set(&mut self, channel: CollisionChannel, response: CollisionResponse) {
        self.0[channel.index()] = response;
    }

    pub fn with(mut self, channel: CollisionChannel, response: CollisionResponse) -> Self {
        self.set(channel, response);
        self
    }
}

// ===== GEOMETRY / MATERIAL =====

/// Geometry carried by a component
#[derive(Debug, Clone, Default)]
pub enum Geometry {
    #[default]
    None,
    /// Shared mesh asset (baked static mesh)
    Static(MeshAssetKey),
    /// Mesh generated at runtime (boolean results)
    Dynamic(Arc<MeshData>),
}

impl Geometry {
    pub fn is_none(&self) -> bool {
        matches!(self, Geometry::None)
    }

    pub fn static_mesh(&self) -> Option<MeshAssetKey> {
        match self {
            Geometry::Static(key) => Some(*key),
            _ => None,
        }
    }
}

/// Material bound to a component slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Material {
    /// Named material asset
    Asset(String),
    /// Material sampling a capture render target
    RenderTarget(RenderTargetKey),
}

/// Flags and collision state, saved when a component is hidden by a placement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentState {
    pub flags: ComponentFlags,
    pub collision: CollisionEnabled,
}

// ===== DESCRIPTOR =====

/// Describes a component to create
#[derive(Debug, Clone, Default)]
pub struct ComponentDesc {
    pub name: String,
    pub relative_transform: Transform,
    pub geometry: Geometry,
    pub flags: ComponentFlags,
    pub collision: CollisionEnabled,
    pub responses: CollisionResponses,
    pub materials: Vec<Material>,
    pub tags: Vec<String>,
}

impl ComponentDesc {
    /// Transform-only component (no geometry, no collision)
    pub fn scene_root(name: &str) -> Self {
        Self {
            name: name.to_string(),
            flags: ComponentFlags::empty(),
            collision: CollisionEnabled::NoCollision,
            ..Default::default()
        }
    }

    /// Visible, colliding component rendering a mesh asset
    pub fn static_mesh(name: &str, mesh: MeshAssetKey) -> Self {
        Self {
            name: name.to_string(),
            geometry: Geometry::Static(mesh),
            ..Default::default()
        }
    }

    pub fn with_relative_transform(mut self, transform: Transform) -> Self {
        self.relative_transform = transform;
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }

    pub fn with_material(mut self, material: Material) -> Self {
        self.materials.push(material);
        self
    }
}

// ===== COMPONENT =====

#[derive(Debug, Clone)]
pub struct PrimitiveComponent {
    name: String,
    owner: ActorKey,
    pub(super) parent: Option<ComponentKey>,
    pub(super) children: Vec<ComponentKey>,
    /// Creation order, used for stable query results
    pub(super) serial: u64,
    relative_transform: Transform,
    geometry: Geometry,
    flags: ComponentFlags,
    collision: CollisionEnabled,
    responses: CollisionResponses,
    materials: Vec<Material>,
    tags: Vec<String>,
}

impl PrimitiveComponent {
    pub(super) fn from_desc(desc: ComponentDesc, owner: ActorKey, serial: u64) -> Self {
        Self {
            name: desc.name,
            owner,
            parent: None,
            children: Vec::new(),
            serial,
            relative_transform: desc.relative_transform,
            geometry: desc.geometry,
            flags: desc.flags,
            collision: desc.collision,
            responses: desc.responses,
            materials: desc.materials,
            tags: desc.tags,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn owner(&self) -> ActorKey {
        self.owner
    }

    pub fn parent(&self) -> Option<ComponentKey> {
        self.parent
    }

    pub fn children(&self) -> &[ComponentKey] {
        &self.children
    }

    pub fn serial(&self) -> u64 {
        self.serial
    }

    pub fn relative_transform(&self) -> &Transform {
        &self.relative_transform
    }

    pub fn set_relative_transform(&mut self, transform: Transform) {
        self.relative_transform = transform;
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    pub fn flags(&self) -> ComponentFlags {
        self.flags
    }

    pub fn set_flags(&mut self, flags: ComponentFlags) {
        self.flags = flags;
    }

    pub fn set_flag(&mut self, flag: ComponentFlags, enabled: bool) {
        self.flags.set(flag, enabled);
    }

    pub fn is_visible(&self) -> bool {
        self.flags.contains(ComponentFlags::VISIBLE)
    }

    pub fn is_hidden_in_capture(&self) -> bool {
        self.flags.contains(ComponentFlags::HIDDEN_IN_CAPTURE)
    }

    pub fn generates_overlaps(&self) -> bool {
        self.flags.contains(ComponentFlags::GENERATE_OVERLAPS)
    }

    pub fn is_simulating_physics(&self) -> bool {
        self.flags.contains(ComponentFlags::SIMULATE_PHYSICS)
    }

    pub fn collision(&self) -> CollisionEnabled {
        self.collision
    }

    pub fn set_collision(&mut self, collision: CollisionEnabled) {
        self.collision = collision;
    }

    pub fn responses(&self) -> &CollisionResponses {
        &self.responses
    }

    pub fn set_responses(&mut self, responses: CollisionResponses) {
        self.responses = responses;
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn set_material(&mut self, slot: usize, material: Material) {
        if slot < self.materials.len() {
            self.materials[slot] = material;
        } else {
            self.materials.resize(slot, Material::Asset(String::new()));
            self.materials.push(material);
        }
    }

    pub fn set_materials(&mut self, materials: Vec<Material>) {
        self.materials = materials;
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn state(&self) -> ComponentState {
        ComponentState { flags: self.flags, collision: self.collision }
    }

    pub fn restore_state(&mut self, state: ComponentState) {
        self.flags = state.flags;
        self.collision = state.collision;
    }
}
