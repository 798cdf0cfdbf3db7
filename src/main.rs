use scanfill::color::Color;
use scanfill::display::{
    Display, InputEvent, MouseButtonKind, PixelSurface, PpmSink, RenderTarget, WindowSink,
    DEFAULT_HEIGHT, DEFAULT_WIDTH,
};
use scanfill::input::{MouseListener, PointerSnapshot, PointerState, PointerTracker};
use scanfill::logging::{init_logging, LoggingConfig};
use scanfill::shapes::{Font, Point, Scene};
use scanfill::view::View;
use sdl2::keyboard::Keycode;
use std::fmt;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

const BANNER: &str = "SCANFILL";
const POINTER_RADIUS: i32 = 10;

struct Options {
    width: u32,
    height: u32,
    vsync: bool,
    scene: Option<PathBuf>,
    dump: Option<PathBuf>,
    mouse: Option<PathBuf>,
}

/// Failure classes, each with its own exit status
#[derive(Debug)]
enum AppError {
    Usage(String),
    Scene(String),
    Window(String),
    Output(String),
    Device(String),
}

impl AppError {
    fn exit_code(&self) -> i32 {
        match self {
            AppError::Usage(_) => 2,
            AppError::Scene(_) => 3,
            AppError::Window(_) => 4,
            AppError::Output(_) => 5,
            AppError::Device(_) => 6,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Usage(e) => write!(f, "{}", e),
            AppError::Scene(e) => write!(f, "scene: {}", e),
            AppError::Window(e) => write!(f, "window: {}", e),
            AppError::Output(e) => write!(f, "output: {}", e),
            AppError::Device(e) => write!(f, "device: {}", e),
        }
    }
}

fn print_help() {
    println!("Usage: scanfill [OPTIONS]");
    println!();
    println!("Options:");
    println!(
        "  --width W, -w W           Set window width (default: {})",
        DEFAULT_WIDTH
    );
    println!(
        "  --height H, -h H          Set window height (default: {})",
        DEFAULT_HEIGHT
    );
    println!("  --resolution WxH, -r WxH  Set resolution (e.g., 1024x768)");
    println!("  --no-vsync                Disable VSync for uncapped framerate");
    println!("  --scene PATH              Load sprites from a JSON scene file");
    println!("  --dump PATH               Write the first frame as a PPM image");
    println!("  --mouse PATH              Read raw PS/2 packets (e.g. /dev/input/mice)");
    println!("  --help                    Show this help message");
}

/// Parse command line arguments; `Ok(None)` means help was printed
fn parse_args() -> Result<Option<Options>, AppError> {
    let args: Vec<String> = std::env::args().collect();
    let mut options = Options {
        width: DEFAULT_WIDTH,
        height: DEFAULT_HEIGHT,
        vsync: true,
        scene: None,
        dump: None,
        mouse: None,
    };

    let value = |i: usize| {
        args.get(i + 1)
            .map(String::as_str)
            .ok_or_else(|| AppError::Usage(format!("{} needs a value", args[i])))
    };
    let dimension = |i: usize, s: &str| {
        s.parse::<u32>()
            .ok()
            .filter(|&v| v > 0)
            .ok_or_else(|| AppError::Usage(format!("{}: bad size '{}'", args[i], s)))
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--no-vsync" => options.vsync = false,
            "--width" | "-w" => {
                options.width = dimension(i, value(i)?)?;
                i += 1;
            },
            "--height" | "-h" => {
                options.height = dimension(i, value(i)?)?;
                i += 1;
            },
            "--resolution" | "-r" => {
                // WxH, e.g. 1024x768
                let v = value(i)?;
                let (w, h) = v
                    .split_once('x')
                    .ok_or_else(|| AppError::Usage(format!("{}: expected WxH, got '{}'", args[i], v)))?;
                options.width = dimension(i, w)?;
                options.height = dimension(i, h)?;
                i += 1;
            },
            "--scene" => {
                options.scene = Some(PathBuf::from(value(i)?));
                i += 1;
            },
            "--dump" => {
                options.dump = Some(PathBuf::from(value(i)?));
                i += 1;
            },
            "--mouse" => {
                options.mouse = Some(PathBuf::from(value(i)?));
                i += 1;
            },
            "--help" => {
                print_help();
                return Ok(None);
            },
            other => return Err(AppError::Usage(format!("unknown option '{}'", other))),
        }
        i += 1;
    }

    Ok(Some(options))
}

fn load_scene(path: Option<&Path>) -> Result<Scene, AppError> {
    match path {
        Some(path) if path.exists() => Scene::load(path).map_err(AppError::Scene),
        Some(path) => {
            log::warn!("{} not found, using the built-in scene", path.display());
            Ok(Scene::demo())
        },
        None => Ok(Scene::demo()),
    }
}

fn dump_frame(surface: &PixelSurface, path: &Path) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::Output(format!("{}: {}", path.display(), e)))?;
    let mut sink = PpmSink::new(BufWriter::new(file));
    surface.display(&mut sink).map_err(AppError::Output)?;
    log::info!("Wrote first frame to {}", path.display());
    Ok(())
}

/// Mirror SDL mouse events into the shared pointer state
fn apply_mouse_event(pointer: &PointerState, event: &InputEvent) {
    match *event {
        InputEvent::MouseMove { x, y } => pointer.set_position(Point::new(x, y)),
        InputEvent::MouseDown { x, y, button } | InputEvent::MouseUp { x, y, button } => {
            let down = matches!(event, InputEvent::MouseDown { .. });
            pointer.update(|snap| {
                snap.position = Point::new(x, y);
                match button {
                    MouseButtonKind::Left => snap.left = down,
                    MouseButtonKind::Right => snap.right = down,
                    MouseButtonKind::Middle => {},
                }
            });
        },
        _ => {},
    }
}

fn run() -> Result<(), AppError> {
    init_logging(LoggingConfig::default());
    let Some(options) = parse_args()? else {
        return Ok(());
    };

    let (width, height) = (options.width, options.height);
    let scene = load_scene(options.scene.as_deref())?;
    let font = Font::parse(scanfill::BLOCK_FONT).map_err(AppError::Scene)?;

    let (mut display, texture_creator) =
        Display::open("scanfill", width, height, options.vsync).map_err(AppError::Window)?;
    let mut target =
        RenderTarget::with_size(&texture_creator, width, height).map_err(AppError::Window)?;
    let mut surface = PixelSurface::new(width, height);
    let screen_br = surface.bottom_right();
    let center = Point::new(width as i32 / 2, height as i32 / 2);

    // pointer comes from a raw device when given, SDL events otherwise
    let listener = match &options.mouse {
        Some(path) => {
            let device = File::open(path)
                .map_err(|e| AppError::Device(format!("{}: {}", path.display(), e)))?;
            Some(MouseListener::spawn(device, Point::ORIGIN, screen_br, center))
        },
        None => None,
    };
    let pointer = listener
        .as_ref()
        .map_or_else(|| PointerState::new(center), MouseListener::state);
    let mut tracker = PointerTracker::new();

    // minimap in the top-right quarter showing the whole scene
    let sprites = scene.placed_sprites();
    let map_tl = Point::new(width as i32 * 3 / 4 - 8, 8);
    let map_br = Point::new(width as i32 - 8, 8 + height as i32 / 4);
    let mut minimap = View::new(map_tl, map_br, Color::CYAN);
    for sprite in &sprites {
        minimap.add_source(sprite);
    }
    let (world_tl, world_br) = scene
        .bounds()
        .unwrap_or((Point::ORIGIN, screen_br));
    minimap.set_source_position(
        world_tl - Point::new(10, 10),
        world_br + Point::new(10, 10),
    );

    let banner_scale = 3;
    let banner_origin = Point::new(
        (width as i32 - font.text_width(BANNER, banner_scale)) / 2,
        height as i32 - font.height() * banner_scale - 16,
    );

    log::info!("=== scanfill ===");
    log::info!(
        "Resolution: {}x{}, scene '{}' with {} sprites",
        width,
        height,
        scene.name,
        sprites.len()
    );
    log::info!("Controls: F1 toggles the minimap, Escape quits");

    let mut dump = options.dump;
    'main: loop {
        for event in display.poll_events() {
            match event {
                InputEvent::Quit | InputEvent::KeyDown(Keycode::Escape) => break 'main,
                InputEvent::KeyDown(Keycode::F1) => {
                    for idx in 0..minimap.source_count() {
                        minimap.toggle_visible(idx);
                    }
                },
                // SDL drives the pointer unless a device reader is still running
                _ if !listener.as_ref().is_some_and(MouseListener::is_running) => {
                    apply_mouse_event(&pointer, &event)
                },
                _ => {},
            }
        }

        let snap = pointer.snapshot();
        tracker.update(snap);
        if tracker.is_left_click_pressed() {
            log::info!("Click at {:?}", tracker.position());
        }
        let PointerSnapshot { position, left, right } = snap;

        surface.clear();
        for sprite in &sprites {
            surface.draw_sprite(sprite, 0, 0);
        }
        font.render_text(
            &mut surface,
            BANNER,
            banner_origin,
            Color::WHITE,
            Color::VIOLET,
            Color::BLACK,
            banner_scale,
            Point::ORIGIN,
            screen_br,
        );
        minimap.render(&mut surface);

        surface.draw_dotted_line(
            Point::new(0, position.y),
            Point::new(screen_br.x, position.y),
            Color::GRAY,
            4,
        );
        surface.draw_dotted_line(
            Point::new(position.x, 0),
            Point::new(position.x, screen_br.y),
            Color::GRAY,
            4,
        );
        let pointer_fill = match (left, right) {
            (true, _) => Color::RED,
            (false, true) => Color::GREEN,
            (false, false) => Color::NO_FILL,
        };
        if pointer_fill.is_no_fill() {
            surface.draw_circle(position, POINTER_RADIUS, Color::WHITE);
        } else {
            surface.draw_filled_circle(position, POINTER_RADIUS, Color::WHITE, pointer_fill);
        }

        if let Some(path) = dump.take() {
            dump_frame(&surface, &path)?;
        }

        let mut sink = WindowSink {
            display: &mut display,
            target: &mut target,
        };
        surface.display(&mut sink).map_err(AppError::Window)?;
    }

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        log::error!("{}", e);
        eprintln!("scanfill: {}", e);
        std::process::exit(e.exit_code());
    }
}
