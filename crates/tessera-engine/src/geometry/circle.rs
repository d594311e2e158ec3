use core::f32::consts::TAU;

use crate::coords::Vec2;

/// Generates `precision` points on a circle.
///
/// Points advance by `2π / precision` and the first one sits at one step past
/// angle 0, not at angle 0. Existing content depends on this phase.
pub fn circle_points(center: Vec2, radius: f32, precision: u32) -> Vec<Vec2> {
    if precision == 0 {
        return Vec::new();
    }
    let step = TAU / precision as f32;
    let mut angle = 0.0f32;

    (0..precision)
        .map(|_| {
            angle += step;
            Vec2::new(angle.cos() * radius + center.x, angle.sin() * radius + center.y)
        })
        .collect()
}
