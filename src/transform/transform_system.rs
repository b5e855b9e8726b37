use cgmath::Matrix4;
use log::debug;
use specs::prelude::*;
use specs::BitSet;
use specs_hierarchy::HierarchyEvent;

use super::{anchor_matrix, local_matrix, GlobalTransform, Parent, ParentHierarchy};
use crate::node::Node;

/// Keeps every node's [`GlobalTransform`] in sync with its own state and the
/// globals of its ancestors.
pub struct TransformSystem {
    local_modified: BitSet,
    global_modified: BitSet,

    locals_events_id: Option<ReaderId<ComponentEvent>>,

    parent_events_id: Option<ReaderId<HierarchyEvent>>,

    scratch: Vec<Entity>,

    relinked: Vec<Entity>,
}

impl TransformSystem {
    /// Creates a new transform processor.
    pub fn new() -> TransformSystem {
        TransformSystem {
            locals_events_id: None,
            parent_events_id: None,
            local_modified: BitSet::default(),
            global_modified: BitSet::default(),
            scratch: Vec::new(),
            relinked: Vec::new(),
        }
    }
}

impl Default for TransformSystem {
    fn default() -> Self {
        TransformSystem::new()
    }
}

impl<'a> System<'a> for TransformSystem {
    type SystemData = (
        Entities<'a>,
        ReadExpect<'a, ParentHierarchy>,
        ReadStorage<'a, Node>,
        WriteStorage<'a, Parent>,
        WriteStorage<'a, GlobalTransform>,
    );

    fn run(&mut self, (entities, hierarchy, nodes, mut parents, mut globals): Self::SystemData) {
        self.scratch.clear();
        self.scratch
            .extend((&*entities, &nodes, !&globals).join().map(|d| d.0));
        for entity in &self.scratch {
            globals
                .insert(*entity, GlobalTransform::default())
                .expect("unreachable");
        }

        self.local_modified.clear();
        self.global_modified.clear();

        nodes
            .channel()
            .read(
                self.locals_events_id.as_mut().expect(
                    "`TransformSystem::setup` was not called before `TransformSystem::run`",
                ),
            )
            .for_each(|event| match event {
                ComponentEvent::Inserted(id) | ComponentEvent::Modified(id) => {
                    self.local_modified.add(*id);
                }
                ComponentEvent::Removed(_id) => {}
            });

        self.relinked.clear();
        for event in hierarchy.changed().read(
            self.parent_events_id
                .as_mut()
                .expect("`TransformSystem::setup` was not called before `TransformSystem::run`"),
        ) {
            match *event {
                HierarchyEvent::Removed(entity) => {
                    // Sent for every descendant of a removed node. Only the
                    // direct children of a dead node lose their link; deeper
                    // nodes keep their live parent.
                    if !entities.is_alive(entity) {
                        continue;
                    }
                    self.local_modified.add(entity.id());
                    match parents.get(entity).map(|p| entities.is_alive(p.entity)) {
                        Some(true) => self.relinked.push(entity),
                        Some(false) => {
                            parents.remove(entity);
                            debug!("orphaned {:?}", entity);
                        }
                        None => {}
                    }
                }
                HierarchyEvent::Modified(entity) => {
                    self.local_modified.add(entity.id());
                }
            }
        }

        // Touch the link again so the hierarchy picks the node back up.
        for entity in &self.relinked {
            if let Some(parent) = parents.get(*entity).cloned() {
                let _ = parents.insert(*entity, parent);
            }
        }

        // Parents deleted behind the hierarchy's back.
        self.scratch.clear();
        self.scratch.extend(
            (&*entities, &parents)
                .join()
                .filter(|(_, parent)| !entities.is_alive(parent.entity))
                .map(|(entity, _)| entity),
        );
        for entity in &self.scratch {
            parents.remove(*entity);
            self.local_modified.add(entity.id());
            debug!("orphaned {:?}", entity);
        }

        // Compute transforms without parents.
        for (entity, _, node, global, _) in (
            &*entities,
            &self.local_modified,
            &nodes,
            &mut globals,
            !&parents,
        )
            .join()
        {
            self.global_modified.add(entity.id());
            global.0 = local_matrix(&**node);
            debug_assert!(
                global.is_finite(),
                "Entity {:?} had a non-finite transform",
                entity
            );
        }

        // Compute transforms with parents.
        for entity in hierarchy.all() {
            let self_dirty = self.local_modified.contains(entity.id());
            if let (Some(parent), Some(node)) = (parents.get(*entity), nodes.get(*entity)) {
                let parent_dirty = self.global_modified.contains(parent.entity.id());
                if parent_dirty || self_dirty {
                    let combined_transform = parented_matrix(node, parent.entity, &nodes, &globals);
                    if let Some(global) = globals.get_mut(*entity) {
                        self.global_modified.add(entity.id());
                        global.0 = combined_transform;
                    }
                }
            }
        }

        // Relinked nodes are back in the hierarchy on the next run only.
        // Place them now, parents first.
        let mut waiting = BitSet::new();
        for entity in &self.relinked {
            waiting.add(entity.id());
        }
        loop {
            let mut progressed = false;
            for entity in &self.relinked {
                if !waiting.contains(entity.id()) {
                    continue;
                }
                let parent = match parents.get(*entity) {
                    Some(parent) => parent.entity,
                    None => {
                        waiting.remove(entity.id());
                        continue;
                    }
                };
                if waiting.contains(parent.id()) {
                    continue;
                }
                if let Some(node) = nodes.get(*entity) {
                    let combined_transform = parented_matrix(node, parent, &nodes, &globals);
                    if let Some(global) = globals.get_mut(*entity) {
                        global.0 = combined_transform;
                    }
                }
                self.global_modified.add(entity.id());
                waiting.remove(entity.id());
                progressed = true;
            }
            if !progressed {
                break;
            }
        }
    }

    fn setup(&mut self, res: &mut Resources) {
        use specs::prelude::SystemData;
        Self::SystemData::setup(res);
        let mut hierarchy = res.fetch_mut::<ParentHierarchy>();
        let mut nodes = WriteStorage::<Node>::fetch(res);
        self.parent_events_id = Some(hierarchy.track());
        self.locals_events_id = Some(nodes.register_reader());
    }
}

fn parented_matrix(
    node: &Node,
    parent: Entity,
    nodes: &ReadStorage<'_, Node>,
    globals: &WriteStorage<'_, GlobalTransform>,
) -> Matrix4<f32> {
    match (globals.get(parent), nodes.get(parent)) {
        (Some(parent_global), Some(parent_node)) => {
            parent_global.0 * anchor_matrix(&**parent_node) * local_matrix(&**node)
        }
        _ => local_matrix(&**node),
    }
}
