use macroquad::math::{Rect, Vec2};

use crate::grid::Grid;

/// Chebyshev radius, in cells, of the obstacle neighborhood scanned around
/// the mover each frame. Bounds the broad phase to a 5x5 block regardless of
/// map size. The implied speed contract: `speed_cap * dt` must stay well
/// under `2 * cell_size`, or a fast mover can tunnel past the neighborhood.
const BROAD_PHASE_RADIUS: i32 = 2;

/// Compute a collision-safe position for one frame of motion.
///
/// `shape` is the mover's solid footprint relative to `position`. The two
/// axes resolve independently: X first against the unmoved Y, then Y against
/// the already-resolved X. That ordering is what stops a diagonal mover from
/// cutting through the corner where two walls meet.
///
/// Stateless and total: any valid `dt >= 0` produces a position, and probes
/// outside the grid are open boundary.
pub fn resolve_movement(
    grid: &Grid,
    cell_size: f32,
    shape: Rect,
    position: Vec2,
    velocity: Vec2,
    dt: f32,
) -> Vec2 {
    let motion = velocity * dt;

    // Degenerate footprints never collide
    if shape.w <= 0.0 || shape.h <= 0.0 {
        return position + motion;
    }

    let cell_x = (position.x / cell_size).floor() as i32;
    let cell_y = (position.y / cell_size).floor() as i32;

    // Broad phase: expanded bounds of every obstacle cell in the neighborhood
    let mut blockers: Vec<Rect> = Vec::new();
    for row in (cell_y - BROAD_PHASE_RADIUS)..=(cell_y + BROAD_PHASE_RADIUS) {
        for column in (cell_x - BROAD_PHASE_RADIUS)..=(cell_x + BROAD_PHASE_RADIUS) {
            if grid.is_obstacle(column, row) {
                let obstacle = Rect::new(
                    column as f32 * cell_size,
                    row as f32 * cell_size,
                    cell_size,
                    cell_size,
                );
                blockers.push(expand_by_shape(obstacle, shape));
            }
        }
    }

    let mut resolved = position;

    // X axis: gate with the unmoved Y, clamp against each blocker in turn.
    // Sequential clamps compose because every clamp only pulls the candidate
    // back toward the starting position.
    let mut x = position.x + motion.x;
    for blocker in &blockers {
        if position.y > blocker.y && position.y < blocker.y + blocker.h {
            let right = blocker.x + blocker.w;
            if motion.x < 0.0 && position.x >= right && x < right {
                x = right;
            } else if motion.x > 0.0 && position.x <= blocker.x && x > blocker.x {
                x = blocker.x;
            }
        }
    }
    resolved.x = x;

    // Y axis: same procedure, re-gated with the resolved X
    let mut y = position.y + motion.y;
    for blocker in &blockers {
        if resolved.x > blocker.x && resolved.x < blocker.x + blocker.w {
            let bottom = blocker.y + blocker.h;
            if motion.y < 0.0 && position.y >= bottom && y < bottom {
                y = bottom;
            } else if motion.y > 0.0 && position.y <= blocker.y && y > blocker.y {
                y = blocker.y;
            }
        }
    }
    resolved.y = y;

    resolved
}

/// Minkowski expansion: grow an obstacle's bounds by the mover's footprint so
/// swept box-vs-box reduces to testing the mover's position point against the
/// expanded bounds.
fn expand_by_shape(obstacle: Rect, shape: Rect) -> Rect {
    let min_x = obstacle.x - (shape.x + shape.w);
    let min_y = obstacle.y - (shape.y + shape.h);
    let max_x = obstacle.x + obstacle.w - shape.x;
    let max_y = obstacle.y + obstacle.h - shape.y;
    Rect::new(min_x, min_y, max_x - min_x, max_y - min_y)
}
