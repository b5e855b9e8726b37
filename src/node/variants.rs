//! Nodes of the compass overlay.

use std::sync::Arc;

use image::{Rgba, RgbaImage};
use log::trace;
use specs::Entity;

use super::id::IdGenerator;
use super::state::NodeState;
use super::surface::{self, Surface};
use super::touch_node::TouchNode;
use crate::touch::{PointInfo, TouchAction};

/// Floor plan the rest of the overlay is placed on.
pub struct SiteMapNode {
    state: NodeState,
    surface: Surface,
}

impl SiteMapNode {
    pub fn new(ids: &IdGenerator, image: RgbaImage) -> Self {
        SiteMapNode {
            state: NodeState::new(ids),
            surface: Arc::new(image),
        }
    }

    /// Plain white plan of the given size.
    pub fn blank(ids: &IdGenerator, width: u32, height: u32) -> Self {
        SiteMapNode {
            state: NodeState::new(ids),
            surface: surface::solid(width, height, surface::rgba(255, 255, 255, 255)),
        }
    }
}

impl TouchNode for SiteMapNode {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn renderable(&self) -> Surface {
        self.surface.clone()
    }

    fn width(&self) -> u32 {
        self.surface.width()
    }

    fn height(&self) -> u32 {
        self.surface.height()
    }

    fn on_touch(&mut self, _point: &PointInfo) -> bool {
        false
    }

    fn is_scalable(&self) -> bool {
        true
    }

    fn is_rotatable(&self) -> bool {
        true
    }

    fn is_draggable(&self) -> bool {
        true
    }

    fn is_parent_locked(&self) -> bool {
        false
    }
}

pub const MARKER_DIAMETER: u32 = 24;

/// Position marker (access point, user) pinned on a site map.
pub struct MarkerNode {
    state: NodeState,
    color: Rgba<u8>,
    surface: Surface,
    locked: bool,
    selected: bool,
}

impl MarkerNode {
    pub fn new(ids: &IdGenerator, parent: Entity, color: Rgba<u8>) -> Self {
        MarkerNode {
            state: NodeState::with_parent(ids, parent),
            color,
            surface: surface::disc(MARKER_DIAMETER, color),
            locked: false,
            selected: false,
        }
    }

    /// A locked marker swallows every touch, so the host never moves it.
    pub fn locked(self) -> Self {
        Self {
            locked: true,
            ..self
        }
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn is_selected(&self) -> bool {
        self.selected
    }

    pub fn color(&self) -> Rgba<u8> {
        self.color
    }
}

impl TouchNode for MarkerNode {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn renderable(&self) -> Surface {
        self.surface.clone()
    }

    fn width(&self) -> u32 {
        MARKER_DIAMETER
    }

    fn height(&self) -> u32 {
        MARKER_DIAMETER
    }

    fn on_touch(&mut self, point: &PointInfo) -> bool {
        if point.action() == TouchAction::Down {
            self.selected = !self.selected;
            trace!("{} selected: {}", self.qualified_id(), self.selected);
        }
        self.locked
    }

    fn is_scalable(&self) -> bool {
        false
    }

    fn is_rotatable(&self) -> bool {
        false
    }

    fn is_draggable(&self) -> bool {
        true
    }

    fn is_parent_locked(&self) -> bool {
        true
    }
}

/// Compass needle. Its angle follows the heading, never the fingers.
pub struct NorthNode {
    state: NodeState,
    surface: Surface,
}

impl NorthNode {
    pub fn new(ids: &IdGenerator, width: u32, height: u32) -> Self {
        NorthNode {
            state: NodeState::new(ids),
            surface: surface::needle(width, height, surface::rgba(200, 30, 30, 255)),
        }
    }

    /// Needle drawn on top of `parent`, e.g. in a corner of the site map.
    pub fn on(ids: &IdGenerator, parent: Entity, width: u32, height: u32) -> Self {
        NorthNode {
            state: NodeState::with_parent(ids, parent),
            surface: surface::needle(width, height, surface::rgba(200, 30, 30, 255)),
        }
    }
}

impl TouchNode for NorthNode {
    fn state(&self) -> &NodeState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut NodeState {
        &mut self.state
    }

    fn renderable(&self) -> Surface {
        self.surface.clone()
    }

    fn width(&self) -> u32 {
        self.surface.width()
    }

    fn height(&self) -> u32 {
        self.surface.height()
    }

    fn on_touch(&mut self, _point: &PointInfo) -> bool {
        true
    }

    fn is_scalable(&self) -> bool {
        false
    }

    fn is_rotatable(&self) -> bool {
        true
    }

    fn is_draggable(&self) -> bool {
        false
    }

    fn is_parent_locked(&self) -> bool {
        false
    }
}
