use glfw::{Action, Context as _, Glfw, InitError, Key, Window, WindowEvent};
use std::os::raw::c_void;
use std::sync::mpsc::Receiver;
use std::time::Instant;
use std::{error, fmt};

/// Error that can be risen while opening the window.
#[derive(Debug)]
pub enum SurfaceError {
  /// GLFW could not be initialized.
  InitError(InitError),
  /// The window or its OpenGL context could not be created.
  WindowCreation,
}

impl fmt::Display for SurfaceError {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match *self {
      SurfaceError::InitError(ref e) => write!(f, "initialization error: {}", e),
      SurfaceError::WindowCreation => f.write_str("cannot create the window"),
    }
  }
}

impl error::Error for SurfaceError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      SurfaceError::InitError(e) => Some(e),
      SurfaceError::WindowCreation => None,
    }
  }
}

impl From<InitError> for SurfaceError {
  fn from(e: InitError) -> Self {
    SurfaceError::InitError(e)
  }
}

/// Window with a current OpenGL 3.3 core context.
pub struct Surface {
  glfw: Glfw,
  window: Window,
  events: Receiver<(f64, WindowEvent)>,
  start: Instant,
}

impl Surface {
  pub fn new(title: &str, width: u32, height: u32) -> Result<Self, SurfaceError> {
    let mut glfw = glfw::init(glfw::FAIL_ON_ERRORS)?;

    glfw.window_hint(glfw::WindowHint::OpenGlProfile(
      glfw::OpenGlProfileHint::Core,
    ));
    glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
    glfw.window_hint(glfw::WindowHint::ContextVersionMajor(3));
    glfw.window_hint(glfw::WindowHint::ContextVersionMinor(3));

    let (mut window, events) = glfw
      .create_window(width, height, title, glfw::WindowMode::Windowed)
      .ok_or(SurfaceError::WindowCreation)?;

    window.make_current();
    window.set_key_polling(true);
    window.set_close_polling(true);
    window.set_framebuffer_size_polling(true);

    gl::load_with(|s| window.get_proc_address(s) as *const c_void);

    Ok(Surface {
      glfw,
      window,
      events,
      start: Instant::now(),
    })
  }

  /// Handle pending events; `false` once the window should close.
  pub fn poll(&mut self) -> bool {
    self.glfw.poll_events();

    for (_, event) in glfw::flush_messages(&self.events) {
      match event {
        WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Release, _) => {
          self.window.set_should_close(true)
        }

        WindowEvent::FramebufferSize(width, height) => {
          log::debug!("framebuffer resized to {}×{}", width, height)
        }

        _ => (),
      }
    }

    !self.window.should_close()
  }

  /// Size of the default framebuffer, in pixels.
  pub fn size(&self) -> [u32; 2] {
    let (w, h) = self.window.get_framebuffer_size();
    [w as u32, h as u32]
  }

  /// Seconds since the window was opened.
  pub fn time(&self) -> f32 {
    self.start.elapsed().as_secs_f32()
  }

  /// Clear the default framebuffer and set the viewport to cover it.
  pub fn clear(&self, color: [f32; 4]) {
    let [w, h] = self.size();

    unsafe {
      gl::Viewport(0, 0, w as _, h as _);
      gl::ClearColor(color[0], color[1], color[2], color[3]);
      gl::Clear(gl::COLOR_BUFFER_BIT | gl::DEPTH_BUFFER_BIT);
    }
  }

  pub fn swap(&mut self) {
    self.window.swap_buffers();
  }
}
