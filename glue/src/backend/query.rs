//! Query backend interface.

use gl::types::*;

use crate::backend::NativeHandle;

/// Query backend.
pub unsafe trait Query {
  /// Create a new query object.
  unsafe fn gen_query(&mut self) -> NativeHandle;

  /// Delete a query object.
  unsafe fn delete_query(&mut self, handle: NativeHandle);

  /// Start measuring with the query for `target`.
  unsafe fn begin_query(&mut self, target: GLenum, handle: NativeHandle);

  /// Stop the active query for `target`.
  unsafe fn end_query(&mut self, target: GLenum);

  /// Wait for the result of a query and return it truncated to 32 bits.
  unsafe fn query_result_u32(&mut self, handle: NativeHandle) -> u32;

  /// Wait for the result of a query.
  unsafe fn query_result_u64(&mut self, handle: NativeHandle) -> u64;
}
