use gl::types::*;

use glue::backend::query::Query as QueryBackend;
use glue::backend::NativeHandle;

use crate::Headless;

#[derive(Debug, Default)]
pub(crate) struct QueryObject {
  target: Option<GLenum>,
  result: Option<u64>,
}

#[derive(Debug)]
pub(crate) struct ActiveQuery {
  target: GLenum,
  handle: NativeHandle,
  start_ns: u64,
}

impl Headless {
  fn query_result(&mut self, handle: NativeHandle) -> u64 {
    let active = self
      .active_query
      .as_ref()
      .map_or(false, |active| active.handle == handle);

    match self.queries.get(&handle).and_then(|query| query.result) {
      Some(result) if !active => result,

      _ => {
        self.raise(gl::INVALID_OPERATION);
        0
      }
    }
  }
}

unsafe impl QueryBackend for Headless {
  unsafe fn gen_query(&mut self) -> NativeHandle {
    let handle = self.gen_query_name();
    self.queries.insert(handle, QueryObject::default());
    handle
  }

  unsafe fn delete_query(&mut self, handle: NativeHandle) {
    if self.queries.remove(&handle).is_none() {
      return;
    }

    // deleting an active query ends it
    if self.active_query.as_ref().map_or(false, |active| active.handle == handle) {
      self.active_query = None;
    }
  }

  unsafe fn begin_query(&mut self, target: GLenum, handle: NativeHandle) {
    if target != gl::TIME_ELAPSED {
      self.raise(gl::INVALID_ENUM);
      return;
    }

    if self.active_query.is_some() {
      self.raise(gl::INVALID_OPERATION);
      return;
    }

    match self.queries.get_mut(&handle) {
      // a query keeps the target of its first use
      Some(query) if query.target.map_or(true, |t| t == target) => {
        query.target = Some(target);
        query.result = None;
      }

      _ => {
        self.raise(gl::INVALID_OPERATION);
        return;
      }
    }

    self.active_query = Some(ActiveQuery {
      target,
      handle,
      start_ns: self.clock_ns,
    });
  }

  unsafe fn end_query(&mut self, target: GLenum) {
    if target != gl::TIME_ELAPSED {
      self.raise(gl::INVALID_ENUM);
      return;
    }

    let active = match self.active_query.take() {
      Some(active) if active.target == target => active,

      other => {
        self.active_query = other;
        self.raise(gl::INVALID_OPERATION);
        return;
      }
    };

    let elapsed = self.clock_ns - active.start_ns;

    if let Some(query) = self.queries.get_mut(&active.handle) {
      query.result = Some(elapsed);
    }
  }

  unsafe fn query_result_u32(&mut self, handle: NativeHandle) -> u32 {
    // saturates, as the driver does
    self.query_result(handle).min(u32::MAX as u64) as u32
  }

  unsafe fn query_result_u64(&mut self, handle: NativeHandle) -> u64 {
    self.query_result(handle)
  }
}
