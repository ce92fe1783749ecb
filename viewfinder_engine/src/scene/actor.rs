/// Actors: named groups of components spawned from a class.
///
/// An actor's transform is the world transform of its root component.

use slotmap::new_key_type;
use super::actor_class::ActorClassKey;
use super::component::ComponentKey;

new_key_type! {
    /// Stable key for an Actor within a World.
    pub struct ActorKey;
}

#[derive(Debug, Clone)]
pub struct Actor {
    name: String,
    class: Option<ActorClassKey>,
    tags: Vec<String>,
    pub(super) root: Option<ComponentKey>,
    pub(super) components: Vec<ComponentKey>,
}

impl Actor {
    pub(super) fn new(name: &str, class: Option<ActorClassKey>, tags: Vec<String>) -> Self {
        Self {
            name: name.to_string(),
            class,
            tags,
            root: None,
            components: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Class this actor was spawned from (`None` for hand-built actors)
    pub fn class(&self) -> Option<ActorClassKey> {
        self.class
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn add_tag(&mut self, tag: &str) {
        if !self.has_tag(tag) {
            self.tags.push(tag.to_string());
        }
    }

    pub fn root(&self) -> Option<ComponentKey> {
        self.root
    }

    /// Components in creation order
    pub fn components(&self) -> &[ComponentKey] {
        &self.components
    }
}
