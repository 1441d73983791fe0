//! Search-as-you-type: a cancellable debounce timer and the live search
//! session built on it.

mod debounce;
mod live;

pub use debounce::Debouncer;
pub use live::{DEFAULT_DEBOUNCE, LiveSearch, SearchState};
