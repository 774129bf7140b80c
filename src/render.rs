//! Stage rendering on top of SDL2
//!
//! SDL2 only knows how to blit textures, so the two display objects are
//! expanded here:
//!
//! - `Sprite`: one `copy_ex` of the whole texture, flipped for negative scale
//! - `TilingSprite`: clip to the sprite's bounds, then blit the texture at every
//!   tile origin (see `TilingSprite::tile_origins`)
//!
//! The stage is drawn in order, so later nodes cover earlier ones.

use crate::assets::TextureBundle;
use crate::scene::{Scene, StageNode};
use crate::sprite::{Sprite, TilingSprite};
use sdl2::pixels::Color;
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture};
use sdl2::video::Window;

/// Integer rectangle covering the float one
///
/// Start is floored and end is ceiled so neighbouring tiles never leave a
/// one-pixel gap between them.
pub fn to_rect(x: f64, y: f64, width: f64, height: f64) -> Rect {
    let left = x.floor();
    let top = y.floor();
    let right = (x + width).ceil();
    let bottom = (y + height).ceil();
    Rect::new(
        left as i32,
        top as i32,
        (right - left).max(0.0) as u32,
        (bottom - top).max(0.0) as u32,
    )
}

fn lookup<'b, 'a>(bundle: &'b TextureBundle<'a>, alias: &str) -> Result<&'b Texture<'a>, String> {
    bundle
        .get(alias)
        .ok_or_else(|| format!("Texture '{}' is not in bundle '{}'", alias, bundle.name))
}

fn draw_sprite(canvas: &mut Canvas<Window>, sprite: &Sprite, bundle: &TextureBundle) -> Result<(), String> {
    let texture = lookup(bundle, &sprite.texture)?;
    let bounds = sprite.bounds();

    canvas
        .copy_ex(
            texture,
            None,
            Some(to_rect(bounds.x, bounds.y, bounds.width, bounds.height)),
            0.0,
            None,
            sprite.is_flipped_horizontal(),
            sprite.is_flipped_vertical(),
        )
        .map_err(|e| format!("Sprite '{}' render error: {}", sprite.label, e))
}

fn draw_tiling_sprite(
    canvas: &mut Canvas<Window>,
    tiling: &TilingSprite,
    bundle: &TextureBundle,
) -> Result<(), String> {
    let texture = lookup(bundle, &tiling.texture)?;
    let bounds = tiling.bounds();
    let (tile_w, tile_h) = tiling.tile_size();
    let (columns, rows) = tiling.tile_origins();

    canvas.set_clip_rect(to_rect(bounds.x, bounds.y, bounds.width, bounds.height));

    let mut result = Ok(());
    'rows: for &y in &rows {
        for &x in &columns {
            let dest = to_rect(x, y, tile_w, tile_h);
            if let Err(e) = canvas.copy_ex(
                texture,
                None,
                Some(dest),
                0.0,
                None,
                tiling.scale.x < 0.0,
                tiling.scale.y < 0.0,
            ) {
                result = Err(format!("Tiling sprite '{}' render error: {}", tiling.label, e));
                break 'rows;
            }
        }
    }

    // Always restore the clip, even after a failed blit
    canvas.set_clip_rect(None);
    result
}

/// Clear to `clear_color` and draw every stage node back to front
pub fn render_scene(
    canvas: &mut Canvas<Window>,
    scene: &Scene,
    bundle: &TextureBundle,
    clear_color: Color,
) -> Result<(), String> {
    canvas.set_draw_color(clear_color);
    canvas.clear();

    for node in scene.stage() {
        match node {
            StageNode::Sprite(sprite) => draw_sprite(canvas, sprite, bundle)?,
            StageNode::Tiling(tiling) => draw_tiling_sprite(canvas, tiling, bundle)?,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    // Blitting needs a live SDL renderer, so only the rectangle math is
    // covered here. Tile placement is tested in sprite.rs.
    use super::*;

    #[test]
    fn test_to_rect_whole_pixels() {
        assert_eq!(to_rect(10.0, 20.0, 30.0, 40.0), Rect::new(10, 20, 30, 40));
    }

    #[test]
    fn test_to_rect_covers_fractional_edges() {
        let rect = to_rect(-0.25, 474.5, 100.0, 75.0);
        assert_eq!(rect.x(), -1);
        assert_eq!(rect.y(), 474);
        assert_eq!(rect.width(), 101);
        assert_eq!(rect.height(), 76);
    }

    #[test]
    fn test_adjacent_tiles_touch() {
        let first = to_rect(-0.25, 0.0, 100.0, 10.0);
        let second = to_rect(99.75, 0.0, 100.0, 10.0);
        assert!(first.x() + first.width() as i32 >= second.x());
    }
}
