/// Frustum query: components and actors overlapping a pyramid volume.
///
/// The volume is a component rendering the unit view pyramid. It does not
/// collide outside queries: `query_overlaps` switches it to query-only
/// collision for the duration of the query and a guard restores the
/// previous state on every exit path.

use rustc_hash::FxHashSet;
use crate::error::Result;
use crate::geometry::Frustum;
use crate::scene::{
    ActorKey, CollisionChannel, CollisionEnabled, CollisionResponse, ComponentKey, World,
};
use crate::{vf_bail, vf_trace};

const SOURCE: &str = "viewfinder::FrustumQuery";

/// Tag keeping the capture apparatus out of its own captures
pub const NON_CAPTURE_TAG: &str = "NonCapture";

/// Result of an overlap query, ordered by component creation
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overlaps {
    pub components: Vec<ComponentKey>,
    pub actors: Vec<ActorKey>,
}

/// Holds the volume in query-only collision while alive
struct QueryCollisionGuard<'w> {
    world: &'w mut World,
    volume: ComponentKey,
    previous: CollisionEnabled,
}

impl<'w> QueryCollisionGuard<'w> {
    fn acquire(world: &'w mut World, volume: ComponentKey) -> Result<Self> {
        let Some(component) = world.component_mut(volume) else {
            vf_bail!(InvalidHandle, SOURCE, "Query volume {:?} is gone", volume);
        };
        let previous = component.collision();
        component.set_collision(CollisionEnabled::QueryOnly);
        Ok(Self { world, volume, previous })
    }

    fn world(&self) -> &World {
        self.world
    }
}

impl Drop for QueryCollisionGuard<'_> {
    fn drop(&mut self) {
        if let Some(component) = self.world.component_mut(self.volume) {
            component.set_collision(self.previous);
        }
    }
}

/// Components and actors overlapping the pyramid `volume`.
///
/// Components carrying `exclude_tag`, or owned by an actor carrying it, are
/// left out of `components`; actors carrying it are left out of `actors`.
pub fn query_overlaps(world: &mut World, volume: ComponentKey, exclude_tag: &str) -> Result<Overlaps> {
    let guard = QueryCollisionGuard::acquire(world, volume)?;
    let world = guard.world();

    let Some(frame) = world.component_world_transform(volume) else {
        vf_bail!(InvalidHandle, SOURCE, "Query volume {:?} is gone", volume);
    };
    let frustum = Frustum::from_transform(&frame);
    let query_enabled = world.component(volume).is_some_and(|c| c.collision().has_query());

    let mut overlaps = Overlaps::default();
    if !query_enabled {
        return Ok(overlaps);
    }

    let mut seen_actors: FxHashSet<ActorKey> = FxHashSet::default();
    for key in world.component_keys() {
        if key == volume || !overlaps_volume(world, key, &frustum) {
            continue;
        }
        let Some(component) = world.component(key) else {
            continue;
        };
        let owner = component.owner();
        let owner_excluded = world.actor(owner).map_or(true, |a| a.has_tag(exclude_tag));

        if !owner_excluded && seen_actors.insert(owner) {
            overlaps.actors.push(owner);
        }
        if !owner_excluded && !component.has_tag(exclude_tag) {
            overlaps.components.push(key);
        }
    }

    vf_trace!(SOURCE, "Volume {:?}: {} components, {} actors",
        volume, overlaps.components.len(), overlaps.actors.len());
    Ok(overlaps)
}

fn overlaps_volume(world: &World, key: ComponentKey, frustum: &Frustum) -> bool {
    let Some(component) = world.component(key) else {
        return false;
    };
    if !component.generates_overlaps()
        || !component.collision().has_query()
        || component.responses().get(CollisionChannel::WorldDynamic) == CollisionResponse::Ignore
    {
        return false;
    }
    match world.component_world_bounds(key) {
        Some(bounds) => frustum.overlaps_aabb(&bounds),
        None => false,
    }
}

#[cfg(test)]
#[path = "frustum_query_tests.rs"]
mod tests;
