use gl::types::*;

use glue::backend::query::Query as QueryBackend;
use glue::backend::NativeHandle;

use crate::gl33::GL33;

unsafe impl QueryBackend for GL33 {
  unsafe fn gen_query(&mut self) -> NativeHandle {
    let mut handle: GLuint = 0;
    gl::GenQueries(1, &mut handle);
    handle
  }

  unsafe fn delete_query(&mut self, handle: NativeHandle) {
    gl::DeleteQueries(1, &handle);
  }

  unsafe fn begin_query(&mut self, target: GLenum, handle: NativeHandle) {
    gl::BeginQuery(target, handle);
  }

  unsafe fn end_query(&mut self, target: GLenum) {
    gl::EndQuery(target);
  }

  // both block until the result is available
  unsafe fn query_result_u32(&mut self, handle: NativeHandle) -> u32 {
    let mut result: GLuint = 0;
    gl::GetQueryObjectuiv(handle, gl::QUERY_RESULT, &mut result);
    result
  }

  unsafe fn query_result_u64(&mut self, handle: NativeHandle) -> u64 {
    let mut result: GLuint64 = 0;
    gl::GetQueryObjectui64v(handle, gl::QUERY_RESULT, &mut result);
    result
  }
}
