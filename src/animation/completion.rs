//! Deferred completion of a transition.
//!
//! [`TransitionAnimator::run`](super::TransitionAnimator::run) returns a
//! [`Completion`] immediately; the animator keeps the matching
//! [`CompletionSource`] and resolves it from the frame loop once the run
//! reaches `t = 1`. Dropping the source while still pending resolves the
//! completion as [`CompletionState::Cancelled`], so tearing the animator down
//! mid-flight always releases whoever is waiting on it.

use std::cell::{Cell, RefCell};
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll, Waker};

/// Resolution state of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionState {
    /// Still animating.
    Pending,
    /// Reached the target pose.
    Completed,
    /// Torn down before reaching the target.
    Cancelled,
}

#[derive(Debug)]
struct Shared {
    state: Cell<CompletionState>,
    waker: RefCell<Option<Waker>>,
}

/// Consumer handle for a transition's completion.
///
/// Cheap to clone; all clones observe the same resolution. Also usable as a
/// [`Future`] on single-threaded executors (e.g. `wasm-bindgen-futures`).
#[derive(Debug, Clone)]
pub struct Completion {
    shared: Rc<Shared>,
}

/// Producer side, owned by the animator.
#[derive(Debug)]
pub(crate) struct CompletionSource {
    shared: Rc<Shared>,
}

impl Completion {
    /// A linked pending completion and its source.
    pub(crate) fn channel() -> (Self, CompletionSource) {
        let shared = Rc::new(Shared {
            state: Cell::new(CompletionState::Pending),
            waker: RefCell::new(None),
        });
        (
            Self {
                shared: Rc::clone(&shared),
            },
            CompletionSource { shared },
        )
    }

    /// Current resolution state.
    #[must_use]
    pub fn state(&self) -> CompletionState {
        self.shared.state.get()
    }

    /// Whether the transition has finished, either way.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        self.state() != CompletionState::Pending
    }
}

impl Future for Completion {
    type Output = CompletionState;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match self.shared.state.get() {
            CompletionState::Pending => {
                *self.shared.waker.borrow_mut() = Some(cx.waker().clone());
                Poll::Pending
            }
            resolved => Poll::Ready(resolved),
        }
    }
}

impl CompletionSource {
    /// Resolve the completion. Later calls are ignored.
    pub(crate) fn resolve(&self, state: CompletionState) {
        if self.shared.state.get() != CompletionState::Pending {
            return;
        }
        self.shared.state.set(state);
        if let Some(waker) = self.shared.waker.borrow_mut().take() {
            waker.wake();
        }
    }
}

impl Drop for CompletionSource {
    fn drop(&mut self) {
        self.resolve(CompletionState::Cancelled);
    }
}
