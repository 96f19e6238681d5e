use macroquad::math::{vec2, Vec2};

/// Scrolling viewport that keeps a target inside a fixed margin of its edges
#[derive(Debug, Clone)]
pub struct Camera {
    /// World-space position of the viewport's top-left corner
    pub origin: Vec2,
    pub view_size: Vec2,
    pub margin: f32,
}

impl Camera {
    pub fn new(view_size: Vec2, margin: f32) -> Self {
        Camera {
            origin: Vec2::ZERO,
            view_size,
            margin,
        }
    }

    /// Follow `target`, scrolling only when it presses into the margin band,
    /// then clamp so the map edges stay on-screen.
    pub fn follow(&mut self, target: Vec2, map_size: Vec2) {
        if target.x - self.origin.x < self.margin {
            self.origin.x = target.x - self.margin;
        }
        if target.x - self.origin.x > self.view_size.x - self.margin {
            self.origin.x = target.x - (self.view_size.x - self.margin);
        }
        if target.y - self.origin.y < self.margin {
            self.origin.y = target.y - self.margin;
        }
        if target.y - self.origin.y > self.view_size.y - self.margin {
            self.origin.y = target.y - (self.view_size.y - self.margin);
        }

        // Maps smaller than the view pin to the top-left corner
        let max_origin = (map_size - self.view_size).max(Vec2::ZERO);
        self.origin.x = self.origin.x.clamp(0.0, max_origin.x);
        self.origin.y = self.origin.y.clamp(0.0, max_origin.y);
    }

    /// Translate a world position into viewport coordinates
    pub fn to_view(&self, world: Vec2) -> Vec2 {
        world - self.origin
    }
}
