/// Shared scene for capture and placement tests (no GPU required)
///
/// A player actor tagged `NonCapture` carries the pyramid volume at its
/// root, looking along +X from the origin. Crates are 100 units wide.

use glam::Vec3;
use crate::geometry::primitives::{centered_cuboid, photo_plane, view_pyramid};
use crate::math::Transform;
use crate::photo::PhotoTakeParams;
use crate::scene::{ActorClass, ActorClassKey, ActorKey, ComponentKey, MeshAssetKey, World};
use super::frustum_query::NON_CAPTURE_TAG;
use super::mock_backend::MockCaptureBackend;
use super::photo_taker::PhotoTakerPlacer;

pub(crate) const CRATE_HALF: f32 = 50.0;

pub(crate) struct TestScene {
    pub world: World,
    pub backend: MockCaptureBackend,
    pub taker: PhotoTakerPlacer,
    pub player: ActorKey,
    pub crate_mesh: MeshAssetKey,
    pub crate_class: ActorClassKey,
    pub photo_class: ActorClassKey,
}

impl TestScene {
    pub fn new() -> Self {
        let mut world = World::new();
        let pyramid = world.add_mesh_asset("Pyramid", view_pyramid());
        let plane = world.add_mesh_asset("PhotoPlane", photo_plane());
        let crate_mesh = world.add_mesh_asset("Crate", centered_cuboid(Vec3::splat(CRATE_HALF)));
        let photo_class = world.register_class(ActorClass::photo("Photo", plane));
        let crate_class = world.register_class(ActorClass::single_mesh("Crate", crate_mesh));

        let player = world.spawn_empty_actor("Player", &Transform::IDENTITY, &[NON_CAPTURE_TAG]);
        let params = PhotoTakeParams::default().with_photo_class(photo_class);
        let taker = PhotoTakerPlacer::new(&mut world, player, None, Transform::IDENTITY, pyramid, params)
            .unwrap();

        Self {
            world,
            backend: MockCaptureBackend::new(),
            taker,
            player,
            crate_mesh,
            crate_class,
            photo_class,
        }
    }

    /// Spawn a crate and return its actor and root component
    pub fn spawn_crate(&mut self, transform: Transform) -> (ActorKey, ComponentKey) {
        let actor = self.world.spawn_actor(self.crate_class, &transform).unwrap();
        let root = self.world.actor(actor).unwrap().root().unwrap();
        (actor, root)
    }

    pub fn crate_at(&mut self, x: f32, y: f32, z: f32) -> (ActorKey, ComponentKey) {
        self.spawn_crate(Transform::from_translation(Vec3::new(x, y, z)))
    }

    pub fn move_player(&mut self, transform: Transform) {
        self.world.set_actor_transform(self.player, &transform);
    }
}
