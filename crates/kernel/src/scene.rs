use glam::DVec3;
use std::collections::BTreeMap;

use startrack_common::ObjectId;

use crate::error::WorldObjectError;
use crate::world_object::WorldObject;

/// A named world object held by a scene.
#[derive(Debug)]
pub struct SceneEntry {
    pub name: String,
    pub object: WorldObject,
}

/// The set of objects an observer looks at.
///
/// Uses BTreeMap so iteration order is stable across runs and platforms.
#[derive(Debug, Default)]
pub struct Scene {
    objects: BTreeMap<ObjectId, SceneEntry>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of objects in the scene.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Add an object. Returns its id.
    pub fn add(&mut self, name: impl Into<String>, object: WorldObject) -> ObjectId {
        let id = ObjectId::new();
        self.add_with_id(id, name, object);
        id
    }

    /// Add an object under a specific id, replacing any object already there.
    pub fn add_with_id(&mut self, id: ObjectId, name: impl Into<String>, object: WorldObject) {
        let name = name.into();
        tracing::debug!(?id, %name, "object added to scene");
        self.objects.insert(id, SceneEntry { name, object });
    }

    /// Remove an object. Returns it if it existed.
    pub fn remove(&mut self, id: ObjectId) -> Option<SceneEntry> {
        let entry = self.objects.remove(&id);
        if entry.is_some() {
            tracing::debug!(?id, "object removed from scene");
        }
        entry
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneEntry> {
        self.objects.get(&id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneEntry> {
        self.objects.get_mut(&id)
    }

    /// Id of the first object with the given name.
    pub fn find(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, entry)| entry.name == name)
            .map(|(id, _)| *id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ObjectId, &SceneEntry)> {
        self.objects.iter()
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ObjectId, &mut SceneEntry)> {
        self.objects.iter_mut()
    }

    /// Positions of every object with position dynamics, in the observer's
    /// body frame at time `t`.
    pub fn observe(
        &mut self,
        observer: &mut WorldObject,
        t: f64,
    ) -> Result<Vec<(ObjectId, DVec3)>, WorldObjectError> {
        let _span = tracing::debug_span!("observe", t, objects = self.objects.len()).entered();
        let mut seen = Vec::with_capacity(self.objects.len());
        for (id, entry) in &mut self.objects {
            if !entry.object.model_position() {
                continue;
            }
            seen.push((*id, entry.object.relative_position(observer, t)?));
        }
        Ok(seen)
    }
}
