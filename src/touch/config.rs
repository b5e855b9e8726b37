/// Tuning of the default gestures applied by the
/// [`TouchController`](super::TouchController).
#[derive(Clone, Debug, PartialEq)]
pub struct ControllerConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    /// Pointer span, in pixels, under which pinch scaling is not applied.
    pub min_separation: f32,
    pub drag: bool,
    pub scale: bool,
    pub rotate: bool,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        ControllerConfig {
            min_scale: 0.1,
            max_scale: 10.0,
            min_separation: 30.0,
            drag: true,
            scale: true,
            rotate: true,
        }
    }
}

impl ControllerConfig {
    pub fn with_scale_limits(self, min_scale: f32, max_scale: f32) -> Self {
        Self {
            min_scale,
            max_scale,
            ..self
        }
    }

    pub fn with_min_separation(self, min_separation: f32) -> Self {
        Self {
            min_separation,
            ..self
        }
    }

    pub fn with_drag(self, drag: bool) -> Self {
        Self { drag, ..self }
    }

    pub fn with_scale(self, scale: bool) -> Self {
        Self { scale, ..self }
    }

    pub fn with_rotate(self, rotate: bool) -> Self {
        Self { rotate, ..self }
    }

    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.max(self.min_scale).min(self.max_scale)
    }
}
