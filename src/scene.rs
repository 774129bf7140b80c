//! The background scene: layered sky/mountain/cloud bands plus a few
//! free-floating clouds
//!
//! Everything is built once after the bundle loads, then mutated in place by
//! `layout::resize` and `animation::tick`.

use crate::animation;
use crate::assets::{AssetError, TextureSource};
use crate::layout::{self, Viewport};
use crate::sprite::{Point, Sprite, TilingSprite};

/// Bottom-anchored layers, drawn back to front
#[derive(Debug, Clone)]
pub struct GameBackground {
    pub sky: Sprite,
    pub bkg: TilingSprite,
    pub mountains: TilingSprite,
    pub fore_3: TilingSprite,
    pub fore_2: TilingSprite,
    pub fore_1: TilingSprite,
}

/// Four sprites sharing the `cloud_lonely` texture
#[derive(Debug, Clone)]
pub struct LonelyClouds {
    pub one: Sprite,
    pub two: Sprite,
    pub three: Sprite,
    pub four: Sprite,
}

const BOTTOM_LEFT: Point = Point::new(0.0, 1.0);

fn tiling_layer<S: TextureSource>(
    textures: &S,
    alias: &str,
    scale: Point,
) -> Result<TilingSprite, AssetError> {
    let size = textures.require_size(alias)?;
    Ok(TilingSprite::new(alias, alias, size)?
        .with_anchor(BOTTOM_LEFT)
        .with_scale(scale))
}

impl GameBackground {
    pub fn new<S: TextureSource>(textures: &S) -> Result<Self, AssetError> {
        Ok(GameBackground {
            sky: Sprite::new("sky", "sky", textures.require_size("sky")?)?,
            bkg: tiling_layer(textures, "clouds_background", Point::new(1.0, 1.5))?,
            mountains: tiling_layer(textures, "glacial_mountains", Point::new(1.5, 2.0))?,
            fore_3: tiling_layer(textures, "clouds_fore_3", Point::new(1.0, 2.9))?,
            fore_2: tiling_layer(textures, "clouds_fore_2", Point::new(1.0, 2.0))?,
            fore_1: tiling_layer(textures, "clouds_fore_1", Point::new(1.0, 1.9))?,
        })
    }
}

impl LonelyClouds {
    pub fn new<S: TextureSource>(textures: &S) -> Result<Self, AssetError> {
        let size = textures.require_size("cloud_lonely")?;
        let cloud = |label: &str, scale: Point| -> Result<Sprite, AssetError> {
            Ok(Sprite::new(label, "cloud_lonely", size)?
                .with_anchor(Point::splat(0.5))
                .with_scale(scale))
        };

        Ok(LonelyClouds {
            one: cloud("cloud_lonely_1", Point::splat(3.0))?,
            two: cloud("cloud_lonely_2", Point::new(-3.0, 3.0))?,
            three: cloud("cloud_lonely_3", Point::new(2.0, 2.0))?,
            four: cloud("cloud_lonely_4", Point::new(-2.0, 2.0))?,
        })
    }
}

/// One entry of the draw list
///
/// An enum keeps the stage statically typed; there are only two kinds of
/// display object.
#[derive(Debug, Clone, Copy)]
pub enum StageNode<'s> {
    Sprite(&'s Sprite),
    Tiling(&'s TilingSprite),
}

impl<'s> StageNode<'s> {
    pub fn label(&self) -> &'s str {
        match self {
            StageNode::Sprite(sprite) => &sprite.label,
            StageNode::Tiling(tiling) => &tiling.label,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub background: GameBackground,
    pub clouds: LonelyClouds,
    viewport: Viewport,
    frames: u64,
}

impl Scene {
    /// Build every display object and lay it out for `viewport`
    pub fn new<S: TextureSource>(textures: &S, viewport: Viewport) -> Result<Self, AssetError> {
        let mut scene = Scene {
            background: GameBackground::new(textures)?,
            clouds: LonelyClouds::new(textures)?,
            viewport,
            frames: 0,
        };
        scene.resize(viewport);
        Ok(scene)
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Frames ticked since the scene was built
    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        layout::resize(&mut self.background, &mut self.clouds, viewport);
    }

    pub fn tick(&mut self) {
        animation::tick(&mut self.background, &mut self.clouds);
        self.frames += 1;
    }

    /// Draw order, back to front
    pub fn stage(&self) -> [StageNode<'_>; 10] {
        let bg = &self.background;
        let clouds = &self.clouds;
        [
            StageNode::Sprite(&bg.sky),
            StageNode::Tiling(&bg.bkg),
            StageNode::Tiling(&bg.mountains),
            StageNode::Tiling(&bg.fore_3),
            StageNode::Tiling(&bg.fore_2),
            StageNode::Tiling(&bg.fore_1),
            StageNode::Sprite(&clouds.one),
            StageNode::Sprite(&clouds.two),
            StageNode::Sprite(&clouds.three),
            StageNode::Sprite(&clouds.four),
        ]
    }
}
