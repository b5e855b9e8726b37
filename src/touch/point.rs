use cgmath::Point2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

/// One raw gesture sample: every pointer currently on the screen.
#[derive(Clone, Debug, PartialEq)]
pub struct PointInfo {
    action: TouchAction,
    points: Vec<Point2<f32>>,
    pressures: Vec<f32>,
    event_time: u64,
}

impl PointInfo {
    pub fn new(action: TouchAction, points: &[(f32, f32)]) -> Self {
        PointInfo {
            action,
            points: points.iter().map(|&p| p.into()).collect(),
            pressures: vec![1.0; points.len()],
            event_time: 0,
        }
    }

    pub fn down(x: f32, y: f32) -> Self {
        PointInfo::new(TouchAction::Down, &[(x, y)])
    }

    pub fn moved(points: &[(f32, f32)]) -> Self {
        PointInfo::new(TouchAction::Move, points)
    }

    pub fn up(x: f32, y: f32) -> Self {
        PointInfo::new(TouchAction::Up, &[(x, y)])
    }

    /// Pressure of each pointer, in pointer order. Missing entries keep 1.0.
    pub fn with_pressures(mut self, pressures: &[f32]) -> Self {
        for (slot, p) in self.pressures.iter_mut().zip(pressures) {
            *slot = *p;
        }
        self
    }

    /// Event timestamp, in milliseconds.
    pub fn with_event_time(self, event_time: u64) -> Self {
        Self { event_time, ..self }
    }

    pub fn action(&self) -> TouchAction {
        self.action
    }

    pub fn event_time(&self) -> u64 {
        self.event_time
    }

    pub fn points(&self) -> &[Point2<f32>] {
        &self.points
    }

    pub fn num_points(&self) -> usize {
        self.points.len()
    }

    pub fn is_down(&self) -> bool {
        self.action != TouchAction::Up
    }

    pub fn is_multi_touch(&self) -> bool {
        self.points.len() >= 2
    }

    /// X of the first pointer, or the midpoint of the first two.
    pub fn x(&self) -> f32 {
        self.mid().x
    }

    pub fn y(&self) -> f32 {
        self.mid().y
    }

    fn mid(&self) -> Point2<f32> {
        match self.points.as_slice() {
            [] => Point2::new(0.0, 0.0),
            [p] => *p,
            [a, b, ..] => Point2::new((a.x + b.x) / 2.0, (a.y + b.y) / 2.0),
        }
    }

    fn span(&self) -> (f32, f32) {
        match self.points.as_slice() {
            [a, b, ..] => (b.x - a.x, b.y - a.y),
            _ => (0.0, 0.0),
        }
    }

    pub fn multi_touch_width(&self) -> f32 {
        self.span().0.abs()
    }

    pub fn multi_touch_height(&self) -> f32 {
        self.span().1.abs()
    }

    pub fn multi_touch_diameter(&self) -> f32 {
        let (dx, dy) = self.span();
        (dx * dx + dy * dy).sqrt()
    }

    /// Angle of the line from the first to the second pointer, in degrees.
    pub fn multi_touch_angle(&self) -> f32 {
        if !self.is_multi_touch() {
            return 0.0;
        }
        let (dx, dy) = self.span();
        dy.atan2(dx).to_degrees()
    }

    /// Mean pressure over all pointers.
    pub fn pressure(&self) -> f32 {
        if self.pressures.is_empty() {
            return 0.0;
        }
        self.pressures.iter().sum::<f32>() / self.pressures.len() as f32
    }
}
