/// Commands handed down by the autonomy stack
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutonomyControl {
    /// Autonomy drives the throttle
    pub active: bool,
    /// Throttle requested by autonomy
    pub velocity: f32,
}

impl AutonomyControl {
    pub fn new(velocity: f32) -> Self {
        AutonomyControl {
            active: false,
            velocity,
        }
    }

    /// Fall back to the idle creep velocity
    pub fn idle(&mut self, idle_velocity: f32) {
        self.velocity = idle_velocity;
    }
}
