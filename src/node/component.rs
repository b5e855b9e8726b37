use std::ops::{Deref, DerefMut};

use specs::prelude::*;

use super::touch_node::TouchNode;

/// ECS storage slot of a scene node.
pub struct Node(pub Box<dyn TouchNode>);

impl Node {
    pub fn new<N: TouchNode>(node: N) -> Self {
        Node(Box::new(node))
    }
}

impl Deref for Node {
    type Target = dyn TouchNode;

    fn deref(&self) -> &Self::Target {
        &*self.0
    }
}

impl DerefMut for Node {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.0
    }
}

impl Component for Node {
    type Storage = FlaggedStorage<Self, DenseVecStorage<Self>>;
}
