use sdl2::event::{DisplayEvent, Event, WindowEvent};
use sdl2::keyboard::Keycode;
use sdl2::messagebox::{MessageBoxFlag, show_simple_message_box};
use sdl2::pixels::Color;
use sdl2::render::Canvas;
use sdl2::video::Window;

mod animation;
mod assets;
mod config;
mod layout;
mod render;
mod scene;
mod screenshot;
mod sprite;
mod ticker;

use assets::{AssetManifest, BACKGROUND_BUNDLE, TextureBundle};
use config::SceneConfig;
use layout::Viewport;
use render::render_scene;
use scene::{Scene, StageNode};
use screenshot::ScreenshotManager;
use ticker::Ticker;

/// Current drawable size of the window, in pixels
fn current_viewport(canvas: &Canvas<Window>) -> Result<Viewport, String> {
    let (width, height) = canvas.output_size()?;
    Ok(Viewport::new(width, height))
}

/// Events after which the whole layout is recomputed
///
/// Every one of them relayouts, even when the size did not change, since a
/// relayout also puts the drifting clouds back in place.
fn triggers_layout(event: &Event) -> bool {
    matches!(
        event,
        Event::Window {
            win_event: WindowEvent::SizeChanged(..) | WindowEvent::Resized(..),
            ..
        } | Event::Display {
            display_event: DisplayEvent::Orientation(_),
            ..
        }
    )
}

/// Relayout the scene if `event` calls for it
///
/// The viewport is only queried when a relayout actually happens.
fn handle_layout_event<F>(scene: &mut Scene, event: &Event, viewport: F) -> Result<bool, String>
where
    F: FnOnce() -> Result<Viewport, String>,
{
    if !triggers_layout(event) {
        return Ok(false);
    }
    scene.resize(viewport()?);
    Ok(true)
}

/// Show a fatal error to the user before giving up
///
/// Without this the window would just stay blank.
fn report_fatal(canvas: &Canvas<Window>, message: &str) {
    eprintln!("ERROR: {}", message);
    if let Err(e) = show_simple_message_box(
        MessageBoxFlag::ERROR,
        "Failed to load background",
        message,
        canvas.window(),
    ) {
        eprintln!("Could not show error dialog: {:?}", e);
    }
}

/// Print every stage node's current geometry (F3)
fn print_scene_state(scene: &Scene) {
    let viewport = scene.viewport();
    println!(
        "Scene state: viewport={}x{}, frames={}",
        viewport.width,
        viewport.height,
        scene.frames()
    );
    for node in scene.stage() {
        let label = node.label();
        match node {
            StageNode::Sprite(sprite) => println!(
                "  {:<18} pos=({:.2}, {:.2}) size={:.1}x{:.1} scale=({}, {})",
                label,
                sprite.position.x,
                sprite.position.y,
                sprite.width(),
                sprite.height(),
                sprite.scale.x,
                sprite.scale.y
            ),
            StageNode::Tiling(tiling) => println!(
                "  {:<18} pos=({:.2}, {:.2}) width={:.1} tile_x={:.2}",
                label, tiling.position.x, tiling.position.y, tiling.width, tiling.tile_position.0
            ),
        }
    }
}

fn main() -> Result<(), String> {
    let (config, config_source) = SceneConfig::load(&SceneConfig::default_locations())
        .map_err(|e| format!("Failed to load scene config: {}", e))?;
    match &config_source {
        Some(path) => println!("✓ Loaded config from {}", path.display()),
        None => println!("No config file found, using defaults"),
    }

    let sdl_context = sdl2::init()?;
    let video_subsystem = sdl_context.video()?;
    let _image_context = sdl2::image::init(sdl2::image::InitFlag::PNG)?;

    let window = video_subsystem
        .window(&config.window_title, config.width, config.height)
        .position_centered()
        .resizable()
        .build()
        .map_err(|e| e.to_string())?;

    let mut canvas = window.into_canvas().build().map_err(|e| e.to_string())?;
    let [r, g, b] = config.background_color;
    let clear_color = Color::RGB(r, g, b);

    // Show the empty surface while textures load
    canvas.set_draw_color(clear_color);
    canvas.clear();
    canvas.present();

    let texture_creator = canvas.texture_creator();
    let mut event_pump = sdl_context.event_pump()?;

    let manifest = match &config.manifest_path {
        Some(path) => AssetManifest::load_from_file(path),
        None => Ok(AssetManifest::default()),
    };

    let loaded = manifest.and_then(|manifest| {
        TextureBundle::load(&texture_creator, &manifest, BACKGROUND_BUNDLE, &config.asset_dir)
    });
    let bundle = match loaded {
        Ok(bundle) => bundle,
        Err(e) => {
            let message = e.to_string();
            report_fatal(&canvas, &message);
            return Err(message);
        }
    };
    println!("✓ Loaded bundle '{}' ({} textures)", bundle.name, bundle.len());

    let viewport = current_viewport(&canvas)?;
    let mut scene = match Scene::new(&bundle, viewport) {
        Ok(scene) => scene,
        Err(e) => {
            let message = e.to_string();
            report_fatal(&canvas, &message);
            return Err(message);
        }
    };
    println!("Viewport: {}x{}", viewport.width, viewport.height);

    let mut screenshots = ScreenshotManager::new(config.screenshot_dir());
    let mut ticker = Ticker::new(config.target_fps);
    let mut capture_requested = false;
    println!("Frame budget: {:?}", ticker.frame_budget());
    println!("Screenshots go to {}", screenshots.directory().display());

    println!("Controls:");
    println!("F3 - Print scene state");
    println!("F12 - Save screenshot");
    println!("ESC - Quit");

    'running: loop {
        for event in event_pump.poll_iter() {
            if handle_layout_event(&mut scene, &event, || current_viewport(&canvas))? {
                continue;
            }

            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Escape),
                    ..
                } => break 'running,
                Event::KeyDown {
                    keycode: Some(Keycode::F3),
                    repeat: false,
                    ..
                } => print_scene_state(&scene),
                Event::KeyDown {
                    keycode: Some(Keycode::F12),
                    repeat: false,
                    ..
                } => capture_requested = true,
                _ => {}
            }
        }

        scene.tick();

        render_scene(&mut canvas, &scene, &bundle, clear_color)?;

        // Read back before present; the back buffer is undefined afterwards
        if capture_requested {
            capture_requested = false;
            match screenshots.capture(&canvas) {
                Ok(path) => println!("✓ Screenshot saved to {}", path.display()),
                Err(e) => eprintln!("Failed to save screenshot: {}", e),
            }
        }

        canvas.present();

        ticker.wait_for_next_frame();
    }

    println!(
        "Exiting after {} frames ({} screenshots taken)",
        scene.frames(),
        screenshots.taken()
    );
    Ok(())
}
