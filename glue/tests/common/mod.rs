//! Shared test helpers.

#![allow(dead_code)]

use log::{Level, LevelFilter, Log, Metadata, Record};
use std::cell::RefCell;
use std::sync::Once;

use glue::{Context, ContextOpt};
use glue_headless::Headless;

/// Context over a fresh headless backend, with every check enabled.
pub fn context() -> Context<Headless> {
  let opt = ContextOpt::default()
    .set_check_native_errors(true)
    .set_warn_unbound(true);

  Context::with_opt(Headless::new(), opt)
}

/// Error flags raised by the backend so far.
pub fn raised_errors(ctx: &Context<Headless>) -> Vec<u32> {
  ctx.backend().raised_errors().to_vec()
}

thread_local! {
  static RECORDS: RefCell<Vec<(Level, String)>> = RefCell::new(Vec::new());
}

struct CaptureLogger;

impl Log for CaptureLogger {
  fn enabled(&self, _: &Metadata) -> bool {
    true
  }

  fn log(&self, record: &Record) {
    let line = record.args().to_string();
    RECORDS.with(|records| records.borrow_mut().push((record.level(), line)));
  }

  fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Start capturing the log records of the current thread, forgetting the previous ones.
pub fn capture_logs() {
  INIT.call_once(|| {
    // another logger may only be installed by a test harness; captures are empty then
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(LevelFilter::Trace);
  });

  RECORDS.with(|records| records.borrow_mut().clear());
}

/// Messages logged at `level` on the current thread since the last [`capture_logs`].
pub fn logged(level: Level) -> Vec<String> {
  RECORDS.with(|records| {
    records
      .borrow()
      .iter()
      .filter(|(l, _)| *l == level)
      .map(|(_, line)| line.clone())
      .collect()
  })
}

/// Whether a warning containing `needle` was logged on the current thread.
pub fn warned(needle: &str) -> bool {
  logged(Level::Warn).iter().any(|line| line.contains(needle))
}

pub const VS: &str = "#version 330 core
in vec3 co;
in vec3 color;
uniform mat4 proj;
uniform float t;
out vec3 v_color;

void main() {
  v_color = color;
  gl_Position = proj * vec4(co, 1.);
}";

pub const GS: &str = "#version 330 core
layout (triangles) in;
layout (triangle_strip, max_vertices = 3) out;

void main() {
  for (int i = 0; i < 3; ++i) {
    gl_Position = gl_in[i].gl_Position;
    EmitVertex();
  }

  EndPrimitive();
}";

pub const FS: &str = "#version 330 core
in vec3 v_color;
uniform float t;
uniform sampler2D tex;
out vec4 frag;

void main() {
  frag = vec4(v_color * t, 1.) * texture(tex, vec2(0.));
}";
