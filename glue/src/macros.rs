// Issue a backend call on a borrowed state and, when enabled, check the native error flag right
// after it, reporting the call site.
macro_rules! native {
  ($state:expr, $call:ident ( $($arg:expr),* $(,)? )) => {{
    let state = &mut *$state;
    #[allow(unused_unsafe)]
    let r = unsafe { state.backend.$call($($arg),*) };
    state.check_native_error(file!(), line!(), stringify!($call));
    r
  }};
}
