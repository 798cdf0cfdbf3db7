use super::{FrameSink, PixelSurface};
use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use sdl2::pixels::PixelFormatEnum;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

/// SDL window that shows committed surfaces
pub struct Display {
    canvas: Canvas<Window>,
    event_pump: EventPump,
}

/// Streaming RGBA8888 texture the surface bytes are uploaded into
pub struct RenderTarget<'a> {
    texture: Texture<'a>,
}

/// Window events the rasterizer demo reacts to
#[derive(Debug, Clone)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    MouseMove {
        x: i32,
        y: i32,
    },
    MouseDown {
        x: i32,
        y: i32,
        button: MouseButtonKind,
    },
    MouseUp {
        x: i32,
        y: i32,
        button: MouseButtonKind,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButtonKind {
    Left,
    Right,
    Middle,
}

impl Display {
    /// Open a centred window; the texture creator outlives every `RenderTarget`
    pub fn open(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), String> {
        let sdl = sdl2::init()?;
        let window = sdl
            .video()?
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| e.to_string())?;

        let builder = window.into_canvas().accelerated();
        let builder = if vsync { builder.present_vsync() } else { builder };
        let canvas = builder.build().map_err(|e| e.to_string())?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl.event_pump()?;
        log::debug!("SDL window {}x{} (vsync: {})", width, height, vsync);

        Ok((Self { canvas, event_pump }, texture_creator))
    }

    /// Upload the surface into the streaming texture and flip
    pub fn present(
        &mut self,
        target: &mut RenderTarget,
        surface: &PixelSurface,
    ) -> Result<(), String> {
        let query = target.texture.query();
        if (surface.width(), surface.height()) != (query.width, query.height) {
            return Err(format!(
                "surface is {}x{} but render target is {}x{}",
                surface.width(),
                surface.height(),
                query.width,
                query.height
            ));
        }
        target
            .texture
            .update(None, surface.as_bytes(), surface.width() as usize * 4)
            .map_err(|e| e.to_string())?;

        self.canvas.copy(&target.texture, None, None)?;
        self.canvas.present();
        Ok(())
    }

    /// Drain pending SDL events, keeping the ones `InputEvent` covers
    pub fn poll_events(&mut self) -> Vec<InputEvent> {
        self.event_pump.poll_iter().filter_map(map_event).collect()
    }
}

impl<'a> RenderTarget<'a> {
    pub fn with_size(
        texture_creator: &'a TextureCreator<WindowContext>,
        width: u32,
        height: u32,
    ) -> Result<Self, String> {
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::RGBA8888, width, height)
            .map_err(|e| e.to_string())?;
        Ok(Self { texture })
    }
}

/// Commit hook that presents frames in the SDL window
pub struct WindowSink<'d, 't, 'tc> {
    pub display: &'d mut Display,
    pub target: &'t mut RenderTarget<'tc>,
}

impl FrameSink for WindowSink<'_, '_, '_> {
    fn commit(&mut self, surface: &PixelSurface) -> Result<(), String> {
        self.display.present(self.target, surface)
    }
}

fn map_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Quit { .. } => Some(InputEvent::Quit),
        Event::KeyDown {
            keycode: Some(k), ..
        } => Some(InputEvent::KeyDown(k)),
        Event::MouseMotion { x, y, .. } => Some(InputEvent::MouseMove { x, y }),
        Event::MouseButtonDown {
            x, y, mouse_btn, ..
        } => map_button(mouse_btn).map(|button| InputEvent::MouseDown { x, y, button }),
        Event::MouseButtonUp {
            x, y, mouse_btn, ..
        } => map_button(mouse_btn).map(|button| InputEvent::MouseUp { x, y, button }),
        _ => None,
    }
}

fn map_button(btn: MouseButton) -> Option<MouseButtonKind> {
    match btn {
        MouseButton::Left => Some(MouseButtonKind::Left),
        MouseButton::Right => Some(MouseButtonKind::Right),
        MouseButton::Middle => Some(MouseButtonKind::Middle),
        _ => None,
    }
}
