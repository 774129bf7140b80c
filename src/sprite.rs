//! Display objects for the background stage
//!
//! Two kinds of objects make up the scene:
//! - `Sprite`: one texture drawn once, optionally mirrored through a negative scale
//! - `TilingSprite`: a texture repeated across an explicit width/height and
//!   scrolled through `tile_position`
//!
//! Both only hold geometry plus the alias of the texture they draw. Texture
//! lookup and blitting happen in `render.rs`, so everything here can be tested
//! without an SDL context.

use crate::assets::AssetError;

/// A 2D point/vector in screen pixels (or texture space for anchors)
///
/// `f64` so per-frame drift keeps its step size over long runs.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Same value on both axes
    pub const fn splat(v: f64) -> Self {
        Point { x: v, y: v }
    }

    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }
}

/// Axis-aligned screen rectangle in floating point pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Span covered on one axis by an object of local `size` at `position`
///
/// The anchor is applied in local space and then scaled, so a negative scale
/// mirrors the object around its anchor point.
fn axis_span(position: f64, anchor: f64, scale: f64, size: f64) -> (f64, f64) {
    let start = position + scale * (-anchor * size);
    let end = position + scale * ((1.0 - anchor) * size);
    (start.min(end), (end - start).abs())
}

fn check_texture_size(alias: &str, size: (u32, u32)) -> Result<(), AssetError> {
    if size.0 == 0 || size.1 == 0 {
        return Err(AssetError::EmptyTexture(alias.to_string()));
    }
    Ok(())
}

/// A plain sprite: one texture, drawn once
#[derive(Debug, Clone)]
pub struct Sprite {
    pub label: String,
    pub texture: String,
    texture_size: (u32, u32),
    pub position: Point,
    pub anchor: Point,
    pub scale: Point,
}

impl Sprite {
    pub fn new(label: &str, texture: &str, texture_size: (u32, u32)) -> Result<Self, AssetError> {
        check_texture_size(texture, texture_size)?;

        Ok(Sprite {
            label: label.to_string(),
            texture: texture.to_string(),
            texture_size,
            position: Point::default(),
            anchor: Point::default(),
            scale: Point::splat(1.0),
        })
    }

    pub fn with_anchor(mut self, anchor: Point) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_scale(mut self, scale: Point) -> Self {
        self.scale = scale;
        self
    }

    /// Displayed width in pixels
    pub fn width(&self) -> f64 {
        self.scale.x.abs() * self.texture_size.0 as f64
    }

    /// Displayed height in pixels
    pub fn height(&self) -> f64 {
        self.scale.y.abs() * self.texture_size.1 as f64
    }

    /// Stretch the sprite to `width` pixels, keeping any mirroring
    pub fn set_width(&mut self, width: f64) {
        let sign = if self.scale.x < 0.0 { -1.0 } else { 1.0 };
        self.scale.x = sign * width / self.texture_size.0 as f64;
    }

    /// Stretch the sprite to `height` pixels, keeping any mirroring
    pub fn set_height(&mut self, height: f64) {
        let sign = if self.scale.y < 0.0 { -1.0 } else { 1.0 };
        self.scale.y = sign * height / self.texture_size.1 as f64;
    }

    pub fn is_flipped_horizontal(&self) -> bool {
        self.scale.x < 0.0
    }

    pub fn is_flipped_vertical(&self) -> bool {
        self.scale.y < 0.0
    }

    /// Screen rectangle the sprite covers
    pub fn bounds(&self) -> Bounds {
        let (x, width) = axis_span(
            self.position.x,
            self.anchor.x,
            self.scale.x,
            self.texture_size.0 as f64,
        );
        let (y, height) = axis_span(
            self.position.y,
            self.anchor.y,
            self.scale.y,
            self.texture_size.1 as f64,
        );
        Bounds { x, y, width, height }
    }
}

/// A repeating texture region
///
/// `width`/`height` are local sizes before `scale` is applied. The tile
/// offset only ever accumulates; it is never wrapped here.
#[derive(Debug, Clone)]
pub struct TilingSprite {
    pub label: String,
    pub texture: String,
    texture_size: (u32, u32),
    pub position: Point,
    pub anchor: Point,
    pub scale: Point,
    pub width: f64,
    pub height: f64,
    pub tile_position: (f64, f64),
}

impl TilingSprite {
    /// New tiling sprite sized to its texture
    pub fn new(label: &str, texture: &str, texture_size: (u32, u32)) -> Result<Self, AssetError> {
        check_texture_size(texture, texture_size)?;

        Ok(TilingSprite {
            label: label.to_string(),
            texture: texture.to_string(),
            texture_size,
            position: Point::default(),
            anchor: Point::default(),
            scale: Point::splat(1.0),
            width: texture_size.0 as f64,
            height: texture_size.1 as f64,
            tile_position: (0.0, 0.0),
        })
    }

    pub fn with_anchor(mut self, anchor: Point) -> Self {
        self.anchor = anchor;
        self
    }

    pub fn with_scale(mut self, scale: Point) -> Self {
        self.scale = scale;
        self
    }

    /// Screen rectangle the tiled region covers
    pub fn bounds(&self) -> Bounds {
        let (x, width) = axis_span(self.position.x, self.anchor.x, self.scale.x, self.width);
        let (y, height) = axis_span(self.position.y, self.anchor.y, self.scale.y, self.height);
        Bounds { x, y, width, height }
    }

    /// Size of one texture repeat on screen
    pub fn tile_size(&self) -> (f64, f64) {
        (
            self.texture_size.0 as f64 * self.scale.x.abs(),
            self.texture_size.1 as f64 * self.scale.y.abs(),
        )
    }

    /// Screen positions of every tile needed to cover the bounds
    ///
    /// Returns (column starts, row starts). The first tile starts at or before
    /// the left/top edge, so the caller only needs to clip.
    pub fn tile_origins(&self) -> (Vec<f64>, Vec<f64>) {
        let bounds = self.bounds();
        let (tile_w, tile_h) = self.tile_size();

        let columns = tile_starts(
            bounds.x,
            bounds.right(),
            tile_w,
            self.tile_position.0 * self.scale.x,
        );
        let rows = tile_starts(
            bounds.y,
            bounds.bottom(),
            tile_h,
            self.tile_position.1 * self.scale.y,
        );
        (columns, rows)
    }
}

/// Tile start positions covering `[start, end)` with tiles of size `tile`
/// shifted by `offset` pixels
///
/// The offset is wrapped here, never in the model.
pub fn tile_starts(start: f64, end: f64, tile: f64, offset: f64) -> Vec<f64> {
    if tile <= 0.0 || end <= start {
        return Vec::new();
    }

    let shift = offset.rem_euclid(tile);
    let mut origin = start + shift;
    if origin > start {
        origin -= tile;
    }

    let mut starts = Vec::new();
    while origin < end {
        starts.push(origin);
        origin += tile;
    }
    starts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sprite_set_size_rewrites_scale() {
        let mut sky = Sprite::new("sky", "sky", (320, 180)).unwrap();
        sky.set_width(800.0);
        sky.set_height(600.0);

        assert_eq!(sky.width(), 800.0);
        assert_eq!(sky.height(), 600.0);
        assert_eq!(sky.scale.x, 2.5);
    }

    #[test]
    fn test_set_width_keeps_mirroring() {
        let mut cloud = Sprite::new("cloud", "cloud_lonely", (40, 20))
            .unwrap()
            .with_scale(Point::new(-3.0, 3.0));
        cloud.set_width(80.0);

        assert_eq!(cloud.scale.x, -2.0);
        assert!(cloud.is_flipped_horizontal());
        assert_eq!(cloud.width(), 80.0);
    }

    #[test]
    fn test_centered_sprite_bounds() {
        let mut cloud = Sprite::new("cloud", "cloud_lonely", (40, 20))
            .unwrap()
            .with_anchor(Point::splat(0.5))
            .with_scale(Point::new(3.0, 3.0));
        cloud.position.set(100.0, 100.0);

        let bounds = cloud.bounds();
        assert_eq!(bounds.x, 40.0);
        assert_eq!(bounds.y, 70.0);
        assert_eq!(bounds.width, 120.0);
        assert_eq!(bounds.height, 60.0);
    }

    #[test]
    fn test_mirrored_sprite_covers_same_area_when_centered() {
        let mut left = Sprite::new("a", "cloud_lonely", (40, 20))
            .unwrap()
            .with_anchor(Point::splat(0.5))
            .with_scale(Point::new(2.0, 2.0));
        let mut right = left.clone().with_scale(Point::new(-2.0, 2.0));
        left.position.set(50.0, 50.0);
        right.position.set(50.0, 50.0);

        assert_eq!(left.bounds(), right.bounds());
    }

    #[test]
    fn test_mirrored_sprite_with_corner_anchor() {
        // Anchor at the left edge mirrors the sprite to the left of its position
        let mut sprite = Sprite::new("a", "t", (10, 10))
            .unwrap()
            .with_scale(Point::new(-1.0, 1.0));
        sprite.position.set(100.0, 0.0);

        let bounds = sprite.bounds();
        assert_eq!(bounds.x, 90.0);
        assert_eq!(bounds.width, 10.0);
    }

    #[test]
    fn test_bottom_anchored_tiling_bounds() {
        let mut mountains = TilingSprite::new("glacial_mountains", "glacial_mountains", (384, 216))
            .unwrap()
            .with_anchor(Point::new(0.0, 1.0))
            .with_scale(Point::new(1.5, 2.0));
        mountains.width = 800.0;
        mountains.position.set(0.0, 590.0);

        let bounds = mountains.bounds();
        assert_eq!(bounds.x, 0.0);
        assert_eq!(bounds.width, 1200.0);
        assert_eq!(bounds.height, 432.0);
        assert_eq!(bounds.bottom(), 590.0);
    }

    #[test]
    fn test_zero_sized_texture_rejected() {
        assert!(TilingSprite::new("bkg", "clouds_background", (0, 10)).is_err());
        assert!(Sprite::new("sky", "sky", (10, 0)).is_err());
    }

    #[test]
    fn test_tile_starts_without_offset() {
        let starts = tile_starts(0.0, 250.0, 100.0, 0.0);
        assert_eq!(starts, vec![0.0, 100.0, 200.0]);
    }

    #[test]
    fn test_tile_starts_positive_offset() {
        let starts = tile_starts(0.0, 200.0, 100.0, 30.0);
        assert_eq!(starts, vec![-70.0, 30.0, 130.0]);
    }

    #[test]
    fn test_tile_starts_negative_offset_wraps() {
        let starts = tile_starts(0.0, 200.0, 100.0, -30.0);
        assert_eq!(starts, vec![-30.0, 70.0, 170.0]);
    }

    #[test]
    fn test_tile_starts_large_offset_same_as_wrapped() {
        let wrapped = tile_starts(0.0, 300.0, 100.0, 25.0);
        let unbounded = tile_starts(0.0, 300.0, 100.0, 1_000_025.0);
        assert_eq!(wrapped, unbounded);
    }

    #[test]
    fn test_tile_starts_degenerate_inputs() {
        assert!(tile_starts(0.0, 100.0, 0.0, 0.0).is_empty());
        assert!(tile_starts(100.0, 100.0, 10.0, 0.0).is_empty());
    }

    #[test]
    fn test_tile_origins_cover_scaled_bounds() {
        let mut bkg = TilingSprite::new("clouds_background", "clouds_background", (100, 50))
            .unwrap()
            .with_anchor(Point::new(0.0, 1.0))
            .with_scale(Point::new(1.0, 1.5));
        bkg.width = 250.0;
        bkg.position.set(0.0, 550.0);
        bkg.tile_position.0 = -0.25;

        let (columns, rows) = bkg.tile_origins();
        assert_eq!(columns.len(), 3);
        assert!(columns[0] <= 0.0);
        assert_eq!(rows, vec![475.0]);
    }
}
