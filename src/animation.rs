//! Per-frame parallax motion
//!
//! Each band scrolls its texture at its own fixed rate and the lonely clouds
//! drift by a fixed step. Rates are per frame, not per second.

use crate::scene::{GameBackground, LonelyClouds};

/// Tile scroll per frame for each tiling layer (texture pixels)
pub const BKG_SCROLL: f64 = -0.25;
pub const FORE_3_SCROLL: f64 = 0.4;
pub const FORE_2_SCROLL: f64 = -0.5;
pub const FORE_1_SCROLL: f64 = 0.25;

/// Drift per frame for each lonely cloud (screen pixels)
pub const CLOUD_ONE_DRIFT: (f64, f64) = (0.1, 0.0);
pub const CLOUD_TWO_DRIFT: (f64, f64) = (-0.05, 0.0);
pub const CLOUD_THREE_DRIFT: (f64, f64) = (0.025, 0.005);
pub const CLOUD_FOUR_DRIFT: (f64, f64) = (-0.35, 0.0);

/// Advance the scene by one frame
///
/// Offsets are never wrapped or clamped.
pub fn tick(background: &mut GameBackground, clouds: &mut LonelyClouds) {
    background.bkg.tile_position.0 += BKG_SCROLL;
    background.fore_3.tile_position.0 += FORE_3_SCROLL;
    background.fore_2.tile_position.0 += FORE_2_SCROLL;
    background.fore_1.tile_position.0 += FORE_1_SCROLL;

    let drifts = [
        (&mut clouds.one, CLOUD_ONE_DRIFT),
        (&mut clouds.two, CLOUD_TWO_DRIFT),
        (&mut clouds.three, CLOUD_THREE_DRIFT),
        (&mut clouds.four, CLOUD_FOUR_DRIFT),
    ];
    for (cloud, (dx, dy)) in drifts {
        cloud.position.x += dx;
        cloud.position.y += dy;
    }
}
