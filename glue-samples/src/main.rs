//! Windowed demos of glue over the OpenGL 3.3 backend.
//!
//! Every demo opens a window and renders until it is closed or <escape> is pressed.

mod offscreen;
mod surface;
mod textures;
mod triangle;

use glue::{Context, ContextOpt};
use glue_gl::GL33;
use std::error::Error;
use std::path::PathBuf;
use structopt::StructOpt;

use crate::surface::Surface;

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(long)]
  /// Do not check the native error flag after driver calls.
  no_error_checks: bool,

  #[structopt(long)]
  /// Do not warn about resources mutated while not bound.
  no_bind_warnings: bool,

  #[structopt(short, long, default_value = "960")]
  /// Width of the window.
  width: u32,

  #[structopt(short, long, default_value = "540")]
  /// Height of the window.
  height: u32,

  #[structopt(subcommand)]
  demo: Demo,
}

#[derive(Debug, StructOpt)]
enum Demo {
  /// A colored triangle.
  Triangle,

  /// A quad textured with a PNG image.
  Textures {
    /// PNG image to display.
    image: PathBuf,
  },

  /// A triangle rendered into a texture, displayed on a quad.
  Offscreen,
}

impl Demo {
  fn name(&self) -> &'static str {
    match self {
      Demo::Triangle => "triangle",
      Demo::Textures { .. } => "textures",
      Demo::Offscreen => "offscreen",
    }
  }
}

fn run(cli_opts: CLIOpts) -> Result<(), Box<dyn Error>> {
  let mut surface = Surface::new(cli_opts.demo.name(), cli_opts.width, cli_opts.height)?;
  let gl = GL33::new()?;
  let (major, minor) = gl.version();
  log::info!("OpenGL {}.{}", major, minor);

  let opt = ContextOpt::default()
    .set_check_native_errors(!cli_opts.no_error_checks)
    .set_warn_unbound(!cli_opts.no_bind_warnings);
  let mut ctx = Context::with_opt(gl, opt);

  match cli_opts.demo {
    Demo::Triangle => triangle::run(&mut surface, &mut ctx),
    Demo::Textures { ref image } => textures::run(&mut surface, &mut ctx, image),
    Demo::Offscreen => offscreen::run(&mut surface, &mut ctx),
  }
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  if let Err(e) = run(cli_opts) {
    log::error!("{}", e);
    std::process::exit(1);
  }
}
