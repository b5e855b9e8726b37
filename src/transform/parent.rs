use specs::prelude::*;
use specs_hierarchy::Hierarchy;

/// Links a node to the node it is positioned on.
///
/// Mirrors the handle kept in the child's [`NodeState`](crate::NodeState).
/// The transform system drops it once the parent dies; the child's own
/// handle is left untouched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parent {
    pub entity: Entity,
}

impl Parent {
    pub fn of(entity: Entity) -> Self {
        Parent { entity }
    }
}

/// Parent-before-child ordering of every linked node.
pub type ParentHierarchy = Hierarchy<Parent>;

impl Component for Parent {
    type Storage = FlaggedStorage<Self, DenseVecStorage<Self>>;
}

impl specs_hierarchy::Parent for Parent {
    fn parent_entity(&self) -> Entity {
        self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use specs_hierarchy::HierarchySystem;

    #[test]
    fn hierarchy_orders_parents_first() {
        let mut w = World::new();
        let mut hierarchy = HierarchySystem::<Parent>::new();
        System::setup(&mut hierarchy, &mut w.res);

        let a = w.create_entity().build();
        let b = w.create_entity().with(Parent::of(a)).build();
        let c = w.create_entity().with(Parent::of(b)).build();
        hierarchy.run_now(&w.res);

        let h = w.read_resource::<ParentHierarchy>();
        assert_eq!(&[b, c], h.all());
        assert_eq!(&[b], h.children(a));
        assert_eq!(Some(b), h.parent(c));
    }
}
