//! Viewport-relative layout
//!
//! Every layer spans the full viewport width and hangs from a fixed offset
//! above (or below) the bottom edge. The lonely clouds are placed at fixed
//! fractions of the viewport, measured up from the top of the mountains.
//! The offsets are tuned by eye; there is no rule behind them.

use crate::scene::{GameBackground, LonelyClouds};

const DEFAULT_X: f64 = 0.0;
const Y_OFFSET: f64 = 10.0;
const BKG_Y_OFFSET: f64 = 50.0;

/// Current size of the render surface in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }
}

/// Recompute every absolute position for `viewport`
///
/// Tile offsets are left alone so scrolling carries on across a resize.
pub fn resize(background: &mut GameBackground, clouds: &mut LonelyClouds, viewport: Viewport) {
    let w = viewport.width as f64;
    let h = viewport.height as f64;

    background.sky.set_width(w);
    background.sky.set_height(h);

    let layers = [
        (&mut background.bkg, h - BKG_Y_OFFSET),
        (&mut background.mountains, h - Y_OFFSET),
        (&mut background.fore_3, h + Y_OFFSET),
        (&mut background.fore_2, h - Y_OFFSET),
        (&mut background.fore_1, h),
    ];
    for (layer, y) in layers {
        layer.width = w;
        layer.position.set(DEFAULT_X, y);
    }

    let mountain_top = background.mountains.position.y - background.mountains.height;

    clouds.one.position.set(w / 8.0, mountain_top - h * 0.145);
    clouds.two.position.set(w - w * 0.2, mountain_top - h * 0.495);
    clouds.three.position.set(w * 0.05, mountain_top - h * 0.365);
    clouds.four.position.set(w - w * 0.025, mountain_top - h * 0.075);
}
