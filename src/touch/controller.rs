use cgmath::{Matrix4, Point2, SquareMatrix, Vector2, Vector4};
use log::trace;
use specs::Entity;

use super::{ControllerConfig, PointInfo, TouchAction};
use crate::node::TouchNode;
use crate::scene::Scene;
use crate::transform::anchor_matrix;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TouchOutcome {
    /// No node under the finger, or no gesture in progress.
    Missed,
    /// The node handled the sample itself.
    Consumed(Entity),
    /// A gesture started on the node.
    Grabbed(Entity),
    /// Default drag/scale/rotate was applied to the node.
    Transformed(Entity),
    /// The gesture on the node ended.
    Released(Entity),
}

/// Node state captured when a gesture starts, or when the number of
/// pointers changes.
#[derive(Debug)]
struct Gesture {
    entity: Entity,
    /// The node handled the last sample itself; the snapshot is stale.
    captured: bool,
    start: PointInfo,
    relative: Point2<f32>,
    scale: Vector2<f32>,
    angle: f32,
    to_parent: Matrix4<f32>,
    bounds: Option<(Point2<f32>, Point2<f32>)>,
}

impl Gesture {
    fn anchor(scene: &Scene, entity: Entity, point: &PointInfo) -> Option<Gesture> {
        let (relative, scale, angle, parent, locked) = scene
            .with_node(entity, |n| {
                let s = n.state();
                (
                    s.relative_position(),
                    s.scale(),
                    s.angle(),
                    n.parent(),
                    n.is_parent_locked(),
                )
            })
            .ok()?;

        let mut to_parent = Matrix4::identity();
        let mut bounds = None;
        if let Some(parent) = parent.filter(|p| scene.contains(*p)) {
            let global = scene.global_transform(parent).ok()?;
            let anchor = scene.with_node(parent, anchor_matrix).ok()?;
            to_parent = (global.0 * anchor).invert()?;
            if locked {
                bounds = scene
                    .with_node(parent, |p| {
                        let (px, py) = p.effective_pivot();
                        (
                            Point2::new(-px, -py),
                            Point2::new(p.width() as f32 - px, p.height() as f32 - py),
                        )
                    })
                    .ok();
            }
        }

        Some(Gesture {
            entity,
            captured: false,
            start: point.clone(),
            relative,
            scale,
            angle,
            to_parent,
            bounds,
        })
    }

    fn apply(&self, config: &ControllerConfig, point: &PointInfo, node: &mut dyn TouchNode) {
        if config.drag && node.is_draggable() {
            let delta = self.to_parent
                * Vector4::new(point.x() - self.start.x(), point.y() - self.start.y(), 0.0, 0.0);
            let mut x = self.relative.x + delta.x;
            let mut y = self.relative.y + delta.y;
            if let Some((min, max)) = self.bounds {
                x = x.max(min.x).min(max.x);
                y = y.max(min.y).min(max.y);
            }
            node.set_relative_position(x, y);
        }

        if !point.is_multi_touch() {
            return;
        }

        let start_span = self.start.multi_touch_diameter();
        let span = point.multi_touch_diameter();
        if config.scale
            && node.is_scalable()
            && start_span >= config.min_separation
            && span >= config.min_separation
        {
            let factor = span / start_span;
            node.set_scale(
                config.clamp_scale(self.scale.x * factor),
                config.clamp_scale(self.scale.y * factor),
            );
        }

        if config.rotate && node.is_rotatable() {
            node.set_angle(self.angle + point.multi_touch_angle() - self.start.multi_touch_angle());
        }
    }
}

/// Routes touch samples to nodes and applies the default gestures the nodes
/// leave to it.
#[derive(Debug, Default)]
pub struct TouchController {
    config: ControllerConfig,
    active: Option<Gesture>,
}

impl TouchController {
    pub fn new(config: ControllerConfig) -> Self {
        TouchController {
            config,
            active: None,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Node of the gesture in progress.
    pub fn active(&self) -> Option<Entity> {
        self.active.as_ref().map(|g| g.entity)
    }

    pub fn handle(&mut self, scene: &mut Scene, point: &PointInfo) -> TouchOutcome {
        trace!(
            "{:?} at ({}, {}) with {} points",
            point.action(),
            point.x(),
            point.y(),
            point.num_points()
        );
        match point.action() {
            TouchAction::Down => self.press(scene, point),
            TouchAction::Move => self.drag(scene, point),
            TouchAction::Up => self.release(scene, point),
        }
    }

    fn press(&mut self, scene: &mut Scene, point: &PointInfo) -> TouchOutcome {
        scene.update();
        self.active = None;

        let entity = match scene.pick(point.x(), point.y()) {
            Some(entity) => entity,
            None => return TouchOutcome::Missed,
        };
        let consumed = scene.with_node_mut(entity, |n| n.on_touch(point)).unwrap_or(true);

        // The node keeps receiving the rest of the sequence even when it
        // handles this sample itself.
        self.active = Gesture::anchor(scene, entity, point).map(|g| Gesture {
            captured: consumed,
            ..g
        });
        match self.active {
            Some(_) if consumed => TouchOutcome::Consumed(entity),
            Some(_) => TouchOutcome::Grabbed(entity),
            None => TouchOutcome::Missed,
        }
    }

    fn drag(&mut self, scene: &mut Scene, point: &PointInfo) -> TouchOutcome {
        let (entity, pointers, captured) = match &self.active {
            Some(g) => (g.entity, g.start.num_points(), g.captured),
            None => return TouchOutcome::Missed,
        };
        if !scene.contains(entity) {
            self.active = None;
            return TouchOutcome::Missed;
        }
        if scene.with_node_mut(entity, |n| n.on_touch(point)).unwrap_or(true) {
            if let Some(gesture) = &mut self.active {
                gesture.captured = true;
            }
            return TouchOutcome::Consumed(entity);
        }

        if captured || pointers != point.num_points() {
            // A finger was added or lifted, or the node stopped handling the
            // samples itself: restart from the current state.
            scene.update();
            self.active = Gesture::anchor(scene, entity, point);
            trace!("re-anchored {:?} on {} points", entity, point.num_points());
            return TouchOutcome::Transformed(entity);
        }

        let config = &self.config;
        if let Some(gesture) = &self.active {
            let _ = scene.with_node_mut(entity, |n| gesture.apply(config, point, n));
            trace!("moved {:?}", entity);
        }
        scene.update();
        TouchOutcome::Transformed(entity)
    }

    fn release(&mut self, scene: &mut Scene, point: &PointInfo) -> TouchOutcome {
        let gesture = match self.active.take() {
            Some(g) => g,
            None => return TouchOutcome::Missed,
        };
        let _ = scene.with_node_mut(gesture.entity, |n| n.on_touch(point));
        scene.update();
        TouchOutcome::Released(gesture.entity)
    }
}
