use macroquad::math::{vec2, Rect, Vec2};

use crate::tiles::{TileIndex, EXIT_FRAMES, HOSTILE_FRAMES, PLAYER_FRAMES};

/// What an actor is, fixed at spawn time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActorKind {
    Player,
    Hostile,
    Exit,
}

/// A dynamic entity with velocity-driven motion against the static grid.
///
/// `movement` is the desired-direction intent for the current frame, set by
/// input or AI before integration. It must be unit-length or zero; the
/// integrator does not re-normalize, so an unnormalized diagonal would exceed
/// `speed_cap` on the diagonal.
#[derive(Debug, Clone)]
pub struct Actor {
    pub kind: ActorKind,
    /// World-space position (top-left of the sprite cell)
    pub position: Vec2,
    pub velocity: Vec2,
    pub movement: Vec2,
    /// Per-axis speed limit in world units per second
    pub speed_cap: f32,
    /// Solid footprint relative to `position`, smaller than the full sprite
    pub shape: Rect,
    /// Hostiles seek the player when within the activation radius
    pub aggressive: bool,
    /// Cursor into the appearance frame sequence
    pub frame_index: usize,
}

// Solid footprint covers the feet of a sprite cell: a walking actor can
// overlap wall tops with its upper body without colliding.
const BODY_SHAPE: Rect = Rect {
    x: 8.0,
    y: 48.0,
    w: 48.0,
    h: 16.0,
};

const EXIT_SHAPE: Rect = Rect {
    x: 8.0,
    y: 8.0,
    w: 48.0,
    h: 48.0,
};

impl Actor {
    pub fn new(kind: ActorKind, position: Vec2, speed_cap: f32) -> Self {
        let (shape, aggressive) = match kind {
            ActorKind::Player => (BODY_SHAPE, false),
            ActorKind::Hostile => (BODY_SHAPE, true),
            ActorKind::Exit => (EXIT_SHAPE, false),
        };

        Actor {
            kind,
            position,
            velocity: Vec2::ZERO,
            movement: Vec2::ZERO,
            speed_cap,
            shape,
            aggressive,
            frame_index: 0,
        }
    }

    /// Acceleration rate, derived from the speed cap
    pub fn acceleration(&self) -> f32 {
        self.speed_cap * 5.0
    }

    /// Deceleration rate, derived from the speed cap
    pub fn deceleration(&self) -> f32 {
        self.speed_cap * 6.0
    }

    /// Solid footprint in world space
    pub fn world_shape(&self) -> Rect {
        Rect::new(
            self.position.x + self.shape.x,
            self.position.y + self.shape.y,
            self.shape.w,
            self.shape.h,
        )
    }

    /// Center of the solid footprint, used for distance triggers and AI
    pub fn center(&self) -> Vec2 {
        let shape = self.world_shape();
        vec2(shape.x + shape.w / 2.0, shape.y + shape.h / 2.0)
    }

    /// Convert this frame's movement intent into velocity, per axis.
    ///
    /// Acceleration scales with `dt`; deceleration is a flat per-frame
    /// subtraction unless `scale_deceleration_by_dt` is set. The flat variant
    /// reproduces the reference behavior (frame-rate-dependent stops); the
    /// scaled variant is the corrected one.
    pub fn integrate(&mut self, dt: f32, scale_deceleration_by_dt: bool) {
        let acceleration = self.acceleration();
        self.velocity += self.movement * acceleration * dt;

        // Each axis clamps independently
        self.velocity.x = self.velocity.x.clamp(-self.speed_cap, self.speed_cap);
        self.velocity.y = self.velocity.y.clamp(-self.speed_cap, self.speed_cap);

        let step = if scale_deceleration_by_dt {
            self.deceleration() * dt
        } else {
            self.deceleration()
        };

        // Axes without movement intent decay toward zero, never past it
        if self.movement.x == 0.0 {
            let speed = (self.velocity.x.abs() - step).max(0.0);
            self.velocity.x = self.velocity.x.signum() * speed;
        }
        if self.movement.y == 0.0 {
            let speed = (self.velocity.y.abs() - step).max(0.0);
            self.velocity.y = self.velocity.y.signum() * speed;
        }
    }

    /// Appearance frame sequence for this actor's kind
    pub fn frames(&self) -> &'static [TileIndex] {
        match self.kind {
            ActorKind::Player => &PLAYER_FRAMES,
            ActorKind::Hostile => &HOSTILE_FRAMES,
            ActorKind::Exit => &EXIT_FRAMES,
        }
    }

    /// Current appearance frame
    pub fn frame(&self) -> TileIndex {
        self.frames()[self.frame_index % self.frames().len()]
    }

    /// Advance the frame cursor, wrapping at the sequence length
    pub fn advance_frame(&mut self) {
        self.frame_index = (self.frame_index + 1) % self.frames().len();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rates_derive_from_speed_cap() {
        let actor = Actor::new(ActorKind::Player, vec2(0.0, 0.0), 100.0);
        assert_eq!(actor.acceleration(), 500.0);
        assert_eq!(actor.deceleration(), 600.0);
    }

    #[test]
    fn test_acceleration_ramps_and_clamps() {
        let mut actor = Actor::new(ActorKind::Player, vec2(0.0, 0.0), 100.0);
        actor.movement = vec2(1.0, 0.0);

        actor.integrate(0.1, false);
        assert_eq!(actor.velocity.x, 50.0);
        assert_eq!(actor.velocity.y, 0.0);

        // A long-held key saturates at the cap, never beyond
        for _ in 0..20 {
            actor.integrate(0.1, false);
        }
        assert_eq!(actor.velocity.x, 100.0);
    }

    #[test]
    fn test_flat_deceleration_stops_in_one_frame() {
        // Reference behavior: the flat per-frame subtraction exceeds any
        // clamped speed, so releasing input stops the actor in a single step.
        let mut actor = Actor::new(ActorKind::Player, vec2(0.0, 0.0), 100.0);
        actor.velocity = vec2(100.0, -40.0);

        actor.integrate(0.016, false);
        assert_eq!(actor.velocity, vec2(0.0, 0.0));
    }

    #[test]
    fn test_scaled_deceleration_converges_without_overshoot() {
        let mut actor = Actor::new(ActorKind::Player, vec2(0.0, 0.0), 100.0);
        actor.velocity = vec2(100.0, 0.0);

        let mut steps = 0;
        while actor.velocity.x != 0.0 {
            let before = actor.velocity.x;
            actor.integrate(0.016, true);
            // Decays monotonically, never flips sign
            assert!(actor.velocity.x >= 0.0);
            assert!(actor.velocity.x < before);
            steps += 1;
            assert!(steps < 100, "deceleration did not converge");
        }
        // Exact zero in a bounded number of steps, not asymptotic
        assert_eq!(actor.velocity.x, 0.0);
    }

    #[test]
    fn test_deceleration_only_affects_idle_axes() {
        let mut actor = Actor::new(ActorKind::Player, vec2(0.0, 0.0), 100.0);
        actor.movement = vec2(1.0, 0.0);
        actor.velocity = vec2(50.0, 80.0);

        actor.integrate(0.1, false);
        // X keeps accelerating, Y decays
        assert_eq!(actor.velocity.x, 100.0);
        assert_eq!(actor.velocity.y, 0.0);
    }

    #[test]
    fn test_integrate_zero_dt() {
        let mut actor = Actor::new(ActorKind::Player, vec2(0.0, 0.0), 100.0);
        actor.movement = vec2(1.0, 0.0);
        actor.velocity = vec2(25.0, 0.0);

        actor.integrate(0.0, false);
        // No acceleration at dt 0; intent on X shields it from deceleration
        assert_eq!(actor.velocity.x, 25.0);
    }

    #[test]
    fn test_world_shape_tracks_position() {
        let mut actor = Actor::new(ActorKind::Player, vec2(70.0, 70.0), 100.0);
        let shape = actor.world_shape();
        assert_eq!((shape.x, shape.y), (78.0, 118.0));
        assert_eq!((shape.w, shape.h), (48.0, 16.0));

        actor.position = vec2(0.0, 0.0);
        let shape = actor.world_shape();
        assert_eq!((shape.x, shape.y), (8.0, 48.0));
    }

    #[test]
    fn test_frame_cursor_wraps() {
        let mut actor = Actor::new(ActorKind::Player, vec2(0.0, 0.0), 100.0);
        let len = actor.frames().len();
        for _ in 0..len {
            actor.advance_frame();
        }
        assert_eq!(actor.frame_index, 0);
    }
}
