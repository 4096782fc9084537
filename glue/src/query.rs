//! Query objects.
//!
//! A [`Query`] measures something the GPU does between [`Query::begin`] and [`Query::end`]. The
//! measurement is asynchronous; [`Query::retrieve`] and [`Query::retrieve64`] wait for it, which
//! stalls the pipeline until every command issued before [`Query::end`] has completed.
//!
//! Only one query per target can be active at a time.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::backend::{Backend, NativeHandle};
use crate::context::Context;
use crate::native::query_target_to_glenum;
use crate::state::State;

/// What a query measures.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum QueryTarget {
  /// Elapsed GPU time, in nanoseconds.
  TimeElapsed,
}

/// Query object.
pub struct Query<B>
where
  B: Backend,
{
  handle: NativeHandle,
  target: QueryTarget,
  state: Rc<RefCell<State<B>>>,
}

impl<B> Query<B>
where
  B: Backend,
{
  /// Create a new query.
  pub fn new(ctx: &mut Context<B>, target: QueryTarget) -> Self {
    let handle = native!(ctx.state.borrow_mut(), gen_query());

    Query {
      handle,
      target,
      state: ctx.state.clone(),
    }
  }

  /// Native handle.
  pub fn handle(&self) -> NativeHandle {
    self.handle
  }

  /// What the query measures.
  pub fn target(&self) -> QueryTarget {
    self.target
  }

  /// Start measuring.
  pub fn begin(&self) {
    let target = query_target_to_glenum(self.target);
    native!(self.state.borrow_mut(), begin_query(target, self.handle));
  }

  /// Stop measuring.
  pub fn end(&self) {
    let target = query_target_to_glenum(self.target);
    native!(self.state.borrow_mut(), end_query(target));
  }

  /// Wait for the result of the last measurement.
  pub fn retrieve(&self) -> u32 {
    native!(self.state.borrow_mut(), query_result_u32(self.handle))
  }

  /// Wait for the result of the last measurement, with 64 bits of precision.
  pub fn retrieve64(&self) -> u64 {
    native!(self.state.borrow_mut(), query_result_u64(self.handle))
  }
}

impl<B> Drop for Query<B>
where
  B: Backend,
{
  fn drop(&mut self) {
    native!(self.state.borrow_mut(), delete_query(self.handle));
  }
}

impl<B> fmt::Debug for Query<B>
where
  B: Backend,
{
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Query")
      .field("handle", &self.handle)
      .field("target", &self.target)
      .finish()
  }
}
