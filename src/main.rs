// What you SEE:
// • A window showing SRC with a small slider HUD in the corner.
// • Move your hand over the controller: a green triangle follows your palm.
// • Pinch to paint; a key tap wipes the strokes, a screen tap toggles the eraser
//   (the marker turns into a square).
// • With two hands in view, rolling thumb/index/pinky of the second hand nudges R/G/B.
// • s saves to DEST, v switches the background to the live camera, ESC quits.

use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;

use hand_painter::camera::{CameraCapture, FrameSource};
use hand_painter::cli::Cli;
use hand_painter::codec::load_image;
use hand_painter::config::PainterConfig;
use hand_painter::replay::ReplayDevice;
use hand_painter::toolkit::{BLUE, GREEN, RED, THICKNESS};
use hand_painter::window::Drawer;
use hand_painter::{
    BrushParams, Canvas, ColorKnob, GestureRouter, MarkerStyle, PointerTracker, RenderLoop, Result,
    Rgb, SharedBrush, TrackingDevice, TrackingListener,
};

/// Exit code for failures detected before the render loop starts.
const STARTUP_FAILURE: u8 = 255;

fn main() -> ExitCode {
    // Usage errors exit with 1; --help/--version print and exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() { ExitCode::from(1) } else { ExitCode::SUCCESS };
        }
    };

    // --verbose enables debug-level output; RUST_LOG still wins.
    let default_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::from(STARTUP_FAILURE)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    /* --- Config + source image ---
       Both are fatal if broken: nothing is shown until they load. */
    let mut config = PainterConfig::load_or_default(cli.config.as_deref())?;
    if let Some(index) = cli.camera_index {
        config.camera.index = index;
    }

    let image = load_image(&cli.source)?;
    let (w, h) = (image.width, image.height);
    log::info!("loaded {} ({}x{})", cli.source.display(), w, h);

    /* --- Shared state between the tracking thread and the render loop --- */
    let marker = MarkerStyle { size: config.marker_size, ..MarkerStyle::default() };
    let canvas = Arc::new(Canvas::with_marker(image, marker));
    let knob = Arc::new(ColorKnob::new(config.tracking.roll_bands()));
    let [r, g, b] = config.brush.rgb.map(|c| c.clamp(0, 255) as u8);
    let brush = Arc::new(SharedBrush::new(BrushParams {
        thickness: config.brush.thickness.max(1) as u32,
        color: Rgb::new(r, g, b),
    }));

    /* --- Window + trackbars ---
       Visual: the window opens showing SRC; the HUD lists the sliders. */
    let mut window = Drawer::new(&config.window_title, w, h)?;
    window.create_trackbar(THICKNESS, config.brush.max_thickness, config.brush.thickness);
    for (name, value) in [RED, GREEN, BLUE].into_iter().zip(config.brush.rgb) {
        window.create_trackbar(name, 255, value);
    }

    /* --- Tracking device ---
       Missing device is not fatal: the mouse and sliders still work. */
    let listener = TrackingListener::new(
        Arc::clone(&canvas),
        Arc::clone(&brush),
        Arc::clone(&knob),
        PointerTracker::new(config.tracking.pinch_threshold),
        GestureRouter::new(config.tracking.reset_gesture, config.tracking.eraser_gesture),
    );
    let interval = Duration::from_millis(config.tracking.replay_interval_ms);
    let mut device = match &cli.replay {
        Some(path) => ReplayDevice::open(path, interval)
            .inspect_err(|e| log::warn!("tracking device unavailable: {e}"))
            .ok(),
        None => {
            log::warn!("no tracking device given (--replay); painting by hand is disabled");
            None
        }
    };
    if let Some(device) = device.as_mut() {
        if let Err(e) = device.start(listener.into_callback()) {
            log::warn!("tracking device failed to start: {e}");
        }
    }

    /* --- Render loop ---
       The only place that touches the window from here on. */
    let camera = config.camera.clone();
    let mut render = RenderLoop::new(window, canvas, knob, brush, cli.destination)
        .with_poll_interval(Duration::from_millis(config.poll_interval_ms))
        .with_jpeg_quality(config.jpeg_quality)
        .with_camera_opener(Box::new(move || -> Result<Box<dyn FrameSource>> {
            let cam = CameraCapture::new(camera.index, camera.width, camera.height)?;
            Ok(Box::new(cam) as Box<dyn FrameSource>)
        }));

    render.run()
}
