mod common;

use std::io::Write;
use std::path::Path;
use std::rc::Rc;

use glue::shader::{Program, ProgramError, Stage, StageError, StageType, UniformValue};

use common::{FS, GS, VS};

#[test]
fn stages_are_created_uncompiled() {
  let mut ctx = common::context();
  let stage = Stage::vertex(&mut ctx, VS);

  assert_eq!(stage.stage_type(), StageType::VertexShader);
  assert_eq!(stage.source(), VS);
  assert!(!stage.is_valid());

  stage.compile().unwrap();

  assert!(stage.is_valid());
  assert_eq!(stage.compile_log(), "");
}

#[test]
fn compilation_failure_carries_the_log() {
  let mut ctx = common::context();
  let stage = Stage::fragment(&mut ctx, "void main() {");

  match stage.compile() {
    Err(StageError::CompilationFailed(StageType::FragmentShader, log)) => {
      assert!(log.contains("unbalanced"));
    }

    r => panic!("unexpected compilation result: {:?}", r),
  }

  assert!(!stage.is_valid());
}

#[test]
fn sources_can_be_replaced() {
  let mut ctx = common::context();
  let mut stage = Stage::vertex(&mut ctx, "nothing here");

  assert!(stage.compile().is_err());

  stage.set_source(VS);
  stage.compile().unwrap();

  assert_eq!(ctx.backend().shader_source_of(stage.handle()), Some(VS));
}

#[test]
fn program_without_geometry_stage() {
  let mut ctx = common::context();
  let program = Program::from_sources(&mut ctx, VS, None, FS).unwrap();

  assert!(program.is_linked());
  assert!(program.geometry_stage().is_none());
  assert_eq!(program.attribute_location("co"), 0);
  assert_eq!(program.attribute_location("color"), 1);
  assert!(common::raised_errors(&ctx).is_empty());
}

#[test]
fn program_with_geometry_stage() {
  let mut ctx = common::context();
  let program = Program::from_sources(&mut ctx, VS, Some(GS), FS).unwrap();

  assert!(program.is_linked());
  assert_eq!(
    program.geometry_stage().map(|stage| stage.stage_type()),
    Some(StageType::GeometryShader)
  );
}

#[test]
fn stages_are_shared_between_programs() {
  let mut ctx = common::context();
  let vs = Rc::new(Stage::vertex(&mut ctx, VS));
  let fs = Rc::new(Stage::fragment(&mut ctx, FS));

  let a = Program::from_stages(&mut ctx, vs.clone(), None, fs.clone()).unwrap();
  let b = Program::from_stages(&mut ctx, vs.clone(), None, fs).unwrap();

  assert!(a.is_linked() && b.is_linked());
  assert_eq!(a.vertex_stage().handle(), b.vertex_stage().handle());
  assert_eq!(Rc::strong_count(&vs), 3);

  drop(a);
  drop(b);

  assert_eq!(Rc::strong_count(&vs), 1);
}

#[test]
#[should_panic(expected = "fragment shader given where a vertex shader is expected")]
fn stage_of_the_wrong_type() {
  let mut ctx = common::context();
  let vs = Rc::new(Stage::vertex(&mut ctx, VS));
  let fs = Rc::new(Stage::fragment(&mut ctx, FS));

  let _ = Program::from_stages(&mut ctx, fs, None, vs);
}

#[test]
fn compilation_errors_abort_program_creation() {
  let mut ctx = common::context();
  let r = Program::from_sources(&mut ctx, VS, None, "out vec4 frag;");

  assert!(matches!(
    r,
    Err(StageError::CompilationFailed(StageType::FragmentShader, _))
  ));
}

#[test]
fn link_failure_is_reported() {
  let mut ctx = common::context();

  // both stages compile, but the uniform types disagree
  let vs = "uniform float t; void main() {}";
  let fs = "uniform vec2 t; void main() {}";

  common::capture_logs();
  let program = Program::from_sources(&mut ctx, vs, None, fs).unwrap();

  assert!(!program.is_linked());
  assert!(program.link_log().contains("uniform t"));
  assert!(common::warned("failed to link"));
}

#[test]
fn uniforms() {
  let mut ctx = common::context();
  let program = Program::from_sources(&mut ctx, VS, None, FS).unwrap();
  let handle = program.handle();

  program.activate();

  assert!(program.is_active());
  assert_eq!(ctx.current_program(), handle);

  program.set_uniform("t", 0.25f32);
  program.set_uniform("tex", 2);
  program.set_uniform(
    "proj",
    [
      [1f32, 0., 0., 0.],
      [0., 1., 0., 0.],
      [0., 0., 1., 0.],
      [0., 0., 0., 1.],
    ],
  );

  let backend = ctx.backend();

  assert_eq!(backend.uniform_value(handle, "t"), Some(UniformValue::Float(0.25)));
  assert_eq!(backend.uniform_value(handle, "tex"), Some(UniformValue::Int(2)));
  assert!(matches!(
    backend.uniform_value(handle, "proj"),
    Some(UniformValue::Mat4(_))
  ));
  assert_eq!(backend.uniform_writes(), 3);
  assert!(backend.raised_errors().is_empty());
}

#[test]
fn missing_uniforms_are_not_written() {
  let mut ctx = common::context();
  let program = Program::from_sources(&mut ctx, VS, None, FS).unwrap();

  program.activate();

  assert_eq!(program.uniform_location("nope"), -1);

  common::capture_logs();
  program.set_uniform("nope", 1.);

  assert_eq!(ctx.backend().uniform_writes(), 0);
  assert!(common::logged(log::Level::Debug)
    .iter()
    .any(|line| line.contains("uniform nope not found")));
  assert!(common::raised_errors(&ctx).is_empty());
}

#[test]
fn uniform_while_not_active() {
  let mut ctx = common::context();
  let program = Program::from_sources(&mut ctx, VS, None, FS).unwrap();

  common::capture_logs();
  program.set_uniform("t", 1.);

  assert!(common::warned("while it is not active"));
}

#[test]
fn frag_data_locations_need_a_relink() {
  let mut ctx = common::context();
  let mut program = Program::from_sources(&mut ctx, VS, None, FS).unwrap();

  program.set_frag_data_location("frag", 1);

  assert_eq!(ctx.backend().frag_data_location(program.handle(), "frag"), None);
  assert!(program.link());
  assert_eq!(
    ctx.backend().frag_data_location(program.handle(), "frag"),
    Some(1)
  );
}

#[test]
fn deactivation() {
  let mut ctx = common::context();
  let program = Program::from_sources(&mut ctx, VS, None, FS).unwrap();

  program.activate();
  program.deactivate();

  assert!(!program.is_active());
  assert_eq!(ctx.current_program(), 0);
}

fn write_source(dir: &Path, name: &str, source: &str) -> std::path::PathBuf {
  let path = dir.join(name);
  let mut file = std::fs::File::create(&path).unwrap();
  file.write_all(source.as_bytes()).unwrap();
  path
}

#[test]
fn programs_from_files() {
  let mut ctx = common::context();
  let dir = std::env::temp_dir().join(format!("glue-shader-files-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();

  let vs = write_source(&dir, "shader.vert", VS);
  let fs = write_source(&dir, "shader.frag", FS);

  let program = Program::from_files(&mut ctx, &vs, None, &fs).unwrap();
  assert!(program.is_linked());

  let missing = dir.join("missing.geom");

  match Program::from_files(&mut ctx, &vs, Some(missing.as_path()), &fs) {
    Err(ProgramError::FileNotFound(path, _)) => assert_eq!(path, missing),
    r => panic!("unexpected result: {:?}", r.map(|p| p.handle())),
  }

  std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn compilation_errors_from_files() {
  let mut ctx = common::context();
  let dir = std::env::temp_dir().join(format!("glue-shader-errors-{}", std::process::id()));
  std::fs::create_dir_all(&dir).unwrap();

  let vs = write_source(&dir, "shader.vert", "void main() {");
  let fs = write_source(&dir, "shader.frag", FS);

  let r = Program::from_files(&mut ctx, &vs, None, &fs);

  assert!(matches!(
    r,
    Err(ProgramError::StageError(StageError::CompilationFailed(
      StageType::VertexShader,
      _
    )))
  ));

  std::fs::remove_dir_all(&dir).unwrap();
}
