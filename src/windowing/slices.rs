use std::rc::Rc;

use super::WindowState;
use crate::window::Window;

/// Fills the first window, then slides by exactly one element per advance.
///
/// Sources shorter than the window produce nothing. On exhaustion the buffer
/// is released, since no later window can use it.
pub(super) fn advance<T, E>(
    state: &mut WindowState<T>,
    mut pull: impl FnMut() -> Result<Option<T>, E>,
) -> Result<Option<Window<T>>, E> {
    if state.buffer.len() < state.size.get() {
        // first window, or a fill interrupted by a source error
        if !state.fill(pull)? {
            state.buffer.clear();
            return Ok(None);
        }
        return Ok(Some(state.snapshot()));
    }
    match pull()? {
        Some(item) => {
            state.buffer.push_back(Rc::new(item));
            state.buffer.pop_front();
            Ok(Some(state.snapshot()))
        }
        None => {
            state.exhausted = true;
            state.buffer.clear();
            Ok(None)
        }
    }
}
