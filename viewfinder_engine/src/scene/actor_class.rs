/// Actor classes: templates the world spawns actors from.
///
/// The first component of a class is the root; every later component is
/// attached to the component at `parent` (an index into the same list) or
/// to the root.

use slotmap::new_key_type;
use super::component::{CollisionEnabled, ComponentDesc, ComponentFlags, Material};
use super::world::MeshAssetKey;

new_key_type! {
    /// Stable key for an ActorClass within a World.
    pub struct ActorClassKey;
}

/// Name of the single mesh slot of a `SingleMesh` actor
pub const STATIC_MESH_SLOT: &str = "StaticMeshComponent";
/// Name of the display mesh component of photo classes
pub const PHOTO_MESH: &str = "PhotoMesh";

/// How mesh slots of the spawned actor are addressed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActorKind {
    /// One mesh on the root component, slot `STATIC_MESH_SLOT`
    SingleMesh,
    /// One slot per static-mesh component, keyed by component name
    MultiMesh,
}

#[derive(Debug, Clone)]
pub struct ClassComponent {
    pub desc: ComponentDesc,
    /// Index of the parent template, `None` to attach to the root
    pub parent: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct ActorClass {
    pub name: String,
    pub kind: ActorKind,
    pub tags: Vec<String>,
    pub components: Vec<ClassComponent>,
}

impl ActorClass {
    /// Empty multi-mesh class; add components with `with_component`
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: ActorKind::MultiMesh,
            tags: Vec::new(),
            components: Vec::new(),
        }
    }

    /// Class whose root renders a single mesh asset
    pub fn single_mesh(name: &str, mesh: MeshAssetKey) -> Self {
        Self {
            name: name.to_string(),
            kind: ActorKind::SingleMesh,
            tags: Vec::new(),
            components: vec![ClassComponent {
                desc: ComponentDesc::static_mesh(STATIC_MESH_SLOT, mesh),
                parent: None,
            }],
        }
    }

    /// Photo class: a display plane that never collides, casts no shadow
    /// and stays out of captures
    pub fn photo(name: &str, plane: MeshAssetKey) -> Self {
        let mut desc = ComponentDesc::static_mesh(PHOTO_MESH, plane)
            .with_material(Material::Asset("PhotoMaterial".to_string()));
        desc.collision = CollisionEnabled::NoCollision;
        desc.flags = ComponentFlags::VISIBLE | ComponentFlags::HIDDEN_IN_CAPTURE;
        Self {
            name: name.to_string(),
            kind: ActorKind::MultiMesh,
            tags: Vec::new(),
            components: vec![ClassComponent { desc, parent: None }],
        }
    }

    pub fn with_component(mut self, desc: ComponentDesc, parent: Option<usize>) -> Self {
        self.components.push(ClassComponent { desc, parent });
        self
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.tags.push(tag.to_string());
        self
    }
}
