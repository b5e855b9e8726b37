use std::sync::Arc;

use hashbrown::HashMap;
use log::{debug, warn};
use specs::prelude::*;
use specs_hierarchy::HierarchySystem;

use crate::error::{Error, Result};
use crate::node::{IdGenerator, Node, NodeId, Surface, TouchNode};
use crate::transform::{GlobalTransform, Parent, TransformSystem};

/// One surface placed on screen by the compositor.
#[derive(Debug, Clone)]
pub struct DrawItem {
    pub entity: Entity,
    pub id: NodeId,
    pub surface: Surface,
    pub transform: GlobalTransform,
}

/// Every node of an overlay, their hierarchy and their screen transforms.
pub struct Scene {
    world: World,
    dispatcher: Dispatcher<'static, 'static>,
    ids: Arc<IdGenerator>,
    index: HashMap<NodeId, Entity>,
}

impl Default for Scene {
    fn default() -> Self {
        Scene::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Scene::with_ids(Arc::new(IdGenerator::new()))
    }

    /// Scene drawing node ids from a generator shared with other scenes.
    pub fn with_ids(ids: Arc<IdGenerator>) -> Self {
        let mut world = World::new();
        world.register::<Node>();
        world.register::<Parent>();
        world.register::<GlobalTransform>();

        let mut dispatcher = DispatcherBuilder::new()
            .with(
                HierarchySystem::<Parent>::new(),
                "parent_hierarchy_system",
                &[],
            )
            .with(
                TransformSystem::new(),
                "transform_system",
                &["parent_hierarchy_system"],
            )
            .build();
        dispatcher.setup(&mut world.res);

        Scene {
            world,
            dispatcher,
            ids,
            index: HashMap::new(),
        }
    }

    /// Construction context for new nodes.
    pub fn ids(&self) -> &IdGenerator {
        &self.ids
    }

    pub fn shared_ids(&self) -> Arc<IdGenerator> {
        self.ids.clone()
    }

    /// Adds a node. Its parent handle, if any, must point at a live node.
    pub fn spawn<N: TouchNode>(&mut self, node: N) -> Result<Entity> {
        let parent = node.parent();
        if let Some(p) = parent {
            if !self.world.is_alive(p) {
                warn!("{} refers to dead parent {:?}", node.qualified_id(), p);
                return Err(Error::DeadParent(p));
            }
            if !self.world.read_storage::<Node>().contains(p) {
                return Err(Error::NotANode(p));
            }
        }

        let id = node.id();
        let name = node.qualified_id();
        let mut builder = self
            .world
            .create_entity()
            .with(Node::new(node))
            .with(GlobalTransform::default());
        if let Some(p) = parent {
            builder = builder.with(Parent::of(p));
        }
        let entity = builder.build();
        self.index.insert(id, entity);
        debug!("spawned {} as {:?}", name, entity);
        Ok(entity)
    }

    /// Removes a node. Its children stay in the scene and become roots on the
    /// next [`update`](Scene::update).
    pub fn despawn(&mut self, entity: Entity) -> Result<()> {
        let id = self.with_node(entity, |n| n.id())?;
        self.world
            .delete_entity(entity)
            .map_err(|_| Error::DeadEntity(entity))?;
        self.index.remove(&id);
        debug!("despawned {:?}", entity);
        Ok(())
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.world.is_alive(entity) && self.world.read_storage::<Node>().contains(entity)
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn find(&self, id: NodeId) -> Option<Entity> {
        self.index.get(&id).cloned().filter(|e| self.contains(*e))
    }

    pub fn with_node<R, F>(&self, entity: Entity, f: F) -> Result<R>
    where
        F: FnOnce(&dyn TouchNode) -> R,
    {
        if !self.world.is_alive(entity) {
            return Err(Error::DeadEntity(entity));
        }
        let nodes = self.world.read_storage::<Node>();
        let result = nodes.get(entity).map(|n| f(&**n));
        result.ok_or(Error::NotANode(entity))
    }

    /// Mutable access to a node. Its transform is recomputed on the next
    /// [`update`](Scene::update).
    pub fn with_node_mut<R, F>(&mut self, entity: Entity, f: F) -> Result<R>
    where
        F: FnOnce(&mut dyn TouchNode) -> R,
    {
        if !self.world.is_alive(entity) {
            return Err(Error::DeadEntity(entity));
        }
        let mut nodes = self.world.write_storage::<Node>();
        let result = nodes.get_mut(entity).map(|n| f(&mut **n));
        result.ok_or(Error::NotANode(entity))
    }

    /// Runs the hierarchy and transform systems.
    pub fn update(&mut self) {
        self.dispatcher.dispatch(&self.world.res);
        self.world.maintain();
    }

    /// Parent the compositor currently places the node on. `None` for roots
    /// and for children whose parent was despawned.
    pub fn linked_parent(&self, entity: Entity) -> Result<Option<Entity>> {
        self.with_node(entity, |_| ())?;
        let parents = self.world.read_storage::<Parent>();
        let result = parents.get(entity).map(|p| p.entity);
        Ok(result)
    }

    /// Surface-to-screen transform as of the last update.
    pub fn global_transform(&self, entity: Entity) -> Result<GlobalTransform> {
        if !self.world.is_alive(entity) {
            return Err(Error::DeadEntity(entity));
        }
        let globals = self.world.read_storage::<GlobalTransform>();
        let result = globals.get(entity).cloned();
        result.ok_or(Error::NotANode(entity))
    }

    /// Surfaces in painting order: each root, then its descendants depth
    /// first. Links come from the `Parent` components, so nodes spawned since
    /// the last update are listed too; their transforms are those of the
    /// last update (identity for brand new nodes).
    pub fn draw_list(&self) -> Vec<DrawItem> {
        let entities = self.world.entities();
        let nodes = self.world.read_storage::<Node>();
        let parents = self.world.read_storage::<Parent>();
        let globals = self.world.read_storage::<GlobalTransform>();

        let mut roots = Vec::new();
        let mut children: HashMap<Entity, Vec<Entity>> = HashMap::new();
        for (entity, _) in (&*entities, &nodes).join() {
            match parents.get(entity) {
                Some(p) if entities.is_alive(p.entity) && nodes.contains(p.entity) => {
                    children.entry(p.entity).or_insert_with(Vec::new).push(entity)
                }
                _ => roots.push(entity),
            }
        }

        let mut order = Vec::new();
        for root in roots {
            visit(root, &children, &mut order);
        }

        order
            .into_iter()
            .filter_map(|entity| {
                let node = nodes.get(entity)?;
                let transform = *globals.get(entity)?;
                Some(DrawItem {
                    entity,
                    id: node.id(),
                    surface: node.renderable(),
                    transform,
                })
            })
            .collect()
    }

    /// Topmost node whose surface covers the screen point.
    pub fn pick(&self, x: f32, y: f32) -> Option<Entity> {
        self.draw_list().into_iter().rev().find_map(|item| {
            let p = item.transform.to_surface(x, y)?;
            let (w, h) = item.surface.dimensions();
            if p.x >= 0.0 && p.y >= 0.0 && p.x < w as f32 && p.y < h as f32 {
                Some(item.entity)
            } else {
                None
            }
        })
    }
}

fn visit(entity: Entity, children: &HashMap<Entity, Vec<Entity>>, order: &mut Vec<Entity>) {
    order.push(entity);
    if let Some(list) = children.get(&entity) {
        for child in list {
            visit(*child, children, order);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::{surface, MarkerNode, TestNode, SiteMapNode};
    use cgmath::Point2;

    fn close(a: Point2<f32>, b: (f32, f32)) -> bool {
        (a.x - b.0).abs() < 1e-3 && (a.y - b.1).abs() < 1e-3
    }

    fn map_with_marker(scene: &mut Scene) -> (Entity, Entity) {
        let mut map = SiteMapNode::blank(scene.ids(), 200, 100);
        map.set_relative_position(100.0, 100.0);
        let map = scene.spawn(map).unwrap();
        let mut marker = MarkerNode::new(scene.ids(), map, surface::rgba(0, 0, 255, 255));
        marker.set_relative_position(10.0, 0.0);
        let marker = scene.spawn(marker).unwrap();
        scene.update();
        (map, marker)
    }

    #[test]
    fn child_is_placed_from_parent_pivot() {
        let mut scene = Scene::new();
        let (map, marker) = map_with_marker(&mut scene);

        let g = scene.global_transform(map).unwrap();
        assert!(close(g.to_screen(100.0, 50.0), (100.0, 100.0)));
        let g = scene.global_transform(marker).unwrap();
        assert!(close(g.to_screen(12.0, 12.0), (110.0, 100.0)));
    }

    #[test]
    fn child_follows_parent_rotation() {
        let mut scene = Scene::new();
        let (map, marker) = map_with_marker(&mut scene);

        scene.with_node_mut(map, |n| n.set_angle(90.0)).unwrap();
        scene.update();

        let g = scene.global_transform(marker).unwrap();
        assert!(close(g.to_screen(12.0, 12.0), (100.0, 110.0)));
    }

    #[test]
    fn child_follows_parent_scale() {
        let mut scene = Scene::new();
        let (map, marker) = map_with_marker(&mut scene);

        scene.with_node_mut(map, |n| n.set_scale(2.0, 2.0)).unwrap();
        scene.update();

        let g = scene.global_transform(marker).unwrap();
        assert!(close(g.to_screen(12.0, 12.0), (120.0, 100.0)));
    }

    #[test]
    fn draw_list_puts_parents_first() {
        let mut scene = Scene::new();
        let (map, marker) = map_with_marker(&mut scene);
        let other = scene.spawn(TestNode::new(scene.ids(), 5, 5)).unwrap();
        scene.update();

        let order: Vec<Entity> = scene.draw_list().iter().map(|i| i.entity).collect();
        assert_eq!(vec![map, marker, other], order);
    }

    #[test]
    fn pick_returns_topmost() {
        let mut scene = Scene::new();
        let (map, marker) = map_with_marker(&mut scene);

        assert_eq!(Some(marker), scene.pick(110.0, 100.0));
        assert_eq!(Some(map), scene.pick(20.0, 60.0));
        assert_eq!(None, scene.pick(0.0, 0.0));
        assert_eq!(None, scene.pick(300.0, 100.0));
    }

    #[test]
    fn despawned_parent_orphans_children() {
        let mut scene = Scene::new();
        let (map, marker) = map_with_marker(&mut scene);

        scene.despawn(map).unwrap();
        scene.update();

        assert!(!scene.contains(map));
        assert!(scene.contains(marker));
        assert_eq!(Ok(Some(map)), scene.with_node(marker, |n| n.parent()));
        let g = scene.global_transform(marker).unwrap();
        assert!(close(g.to_screen(12.0, 12.0), (10.0, 0.0)));
        let order: Vec<Entity> = scene.draw_list().iter().map(|i| i.entity).collect();
        assert_eq!(vec![marker], order);
    }

    #[test]
    fn despawning_root_keeps_grandchild_on_its_parent() {
        let mut scene = Scene::new();
        let (root, _) = map_with_marker(&mut scene);
        let mut mid = TestNode::child(scene.ids(), root, 20, 20);
        mid.set_relative_position(10.0, 0.0);
        let mid = scene.spawn(mid).unwrap();
        let mut leaf = TestNode::child(scene.ids(), mid, 4, 4);
        leaf.set_relative_position(3.0, 0.0);
        let leaf = scene.spawn(leaf).unwrap();
        scene.update();

        scene.despawn(root).unwrap();
        scene.update();

        assert_eq!(Ok(None), scene.linked_parent(mid));
        assert_eq!(Ok(Some(mid)), scene.linked_parent(leaf));
        let g = scene.global_transform(leaf).unwrap();
        assert!(close(g.to_screen(2.0, 2.0), (13.0, 0.0)));

        scene
            .with_node_mut(mid, |n| n.set_relative_position(100.0, 0.0))
            .unwrap();
        scene.update();
        let g = scene.global_transform(leaf).unwrap();
        assert!(close(g.to_screen(2.0, 2.0), (103.0, 0.0)));

        scene.update();
        assert_eq!(Ok(Some(mid)), scene.linked_parent(leaf));
        let order: Vec<Entity> = scene.draw_list().iter().map(|i| i.entity).collect();
        assert_eq!(3, order.len());
        let mid_at = order.iter().position(|e| *e == mid).unwrap();
        assert_eq!(Some(&leaf), order.get(mid_at + 1));
    }

    #[test]
    fn fresh_children_are_listed_before_update() {
        let mut scene = Scene::new();
        let mut map = SiteMapNode::blank(scene.ids(), 200, 100);
        map.set_relative_position(100.0, 100.0);
        let map = scene.spawn(map).unwrap();
        let other = scene.spawn(TestNode::new(scene.ids(), 5, 5)).unwrap();
        scene.update();

        let marker = MarkerNode::new(scene.ids(), map, surface::rgba(0, 0, 255, 255));
        let marker = scene.spawn(marker).unwrap();

        let order: Vec<Entity> = scene.draw_list().iter().map(|i| i.entity).collect();
        assert_eq!(vec![map, marker, other], order);
        assert_eq!(Ok(Some(map)), scene.linked_parent(marker));
    }

    #[test]
    fn spawn_rejects_dead_parent() {
        let mut scene = Scene::new();
        let (map, _) = map_with_marker(&mut scene);
        scene.despawn(map).unwrap();

        let marker = MarkerNode::new(scene.ids(), map, surface::rgba(0, 0, 0, 255));
        assert_eq!(Err(Error::DeadParent(map)), scene.spawn(marker));
    }

    #[test]
    fn dead_entities_are_reported() {
        let mut scene = Scene::new();
        let (map, _) = map_with_marker(&mut scene);
        scene.despawn(map).unwrap();

        assert_eq!(Err(Error::DeadEntity(map)), scene.despawn(map));
        assert_eq!(Err(Error::DeadEntity(map)), scene.with_node(map, |n| n.id()));
        assert!(scene.global_transform(map).is_err());
    }

    #[test]
    fn find_by_id() {
        let mut scene = Scene::new();
        let (map, marker) = map_with_marker(&mut scene);
        let id = scene.with_node(marker, |n| n.id()).unwrap();

        assert_eq!(Some(marker), scene.find(id));
        assert_eq!(2, scene.len());
        scene.despawn(map).unwrap();
        assert_eq!(1, scene.len());
    }

    #[test]
    fn shared_generator_keeps_ids_unique() {
        let a = Scene::new();
        let b = Scene::with_ids(a.shared_ids());
        let x = TestNode::new(a.ids(), 1, 1);
        let y = TestNode::new(b.ids(), 1, 1);
        assert_ne!(x.id(), y.id());
    }

    #[test]
    fn draw_items_share_surfaces() {
        let mut scene = Scene::new();
        let (map, _) = map_with_marker(&mut scene);
        let first = scene.draw_list();
        let second = scene.draw_list();
        assert_eq!(map, first[0].entity);
        assert!(Arc::ptr_eq(&first[0].surface, &second[0].surface));
    }
}
