//! Single-settlement result cell
//!
//! [`ResultCell`] is the writing end: the first `settle` call delivers a
//! value, later calls do nothing. [`PendingResult`] is the reading end and
//! can be awaited on any executor or polled with [`PendingResult::try_take`]
//! from a synchronous event loop.
//!
//! A settled value of `None` means the request was cancelled.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll};

use tokio::sync::oneshot;

type SettleHook = Box<dyn FnOnce()>;

struct CellState<T> {
    sender: Option<oneshot::Sender<Option<T>>>,
    hooks: Vec<SettleHook>,
}

/// Writing end of a single-settlement result
pub struct ResultCell<T> {
    state: Rc<RefCell<CellState<T>>>,
}

impl<T> Clone for ResultCell<T> {
    fn clone(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }
}

impl<T> fmt::Debug for ResultCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResultCell")
            .field("settled", &self.is_settled())
            .finish()
    }
}

impl<T> ResultCell<T> {
    /// Create a connected cell and pending result
    pub fn channel() -> (ResultCell<T>, PendingResult<T>) {
        let (sender, receiver) = oneshot::channel();
        let cell = ResultCell {
            state: Rc::new(RefCell::new(CellState {
                sender: Some(sender),
                hooks: Vec::new(),
            })),
        };
        let writer = Rc::downgrade(&cell.state);
        (cell, PendingResult::waiting(receiver, writer))
    }

    pub fn is_settled(&self) -> bool {
        self.state.borrow().sender.is_none()
    }

    /// Run `hook` once, when the cell settles
    ///
    /// Hooks run in registration order, before the value is delivered. A
    /// hook registered after settlement runs immediately.
    pub fn on_settled(&self, hook: impl FnOnce() + 'static) {
        if self.is_settled() {
            hook();
            return;
        }
        self.state.borrow_mut().hooks.push(Box::new(hook));
    }

    /// Deliver `value`; returns false if the cell was already settled
    pub fn settle(&self, value: Option<T>) -> bool {
        let (sender, hooks) = {
            let mut state = self.state.borrow_mut();
            let Some(sender) = state.sender.take() else {
                return false;
            };
            (sender, std::mem::take(&mut state.hooks))
        };

        for hook in hooks {
            hook();
        }

        if sender.send(value).is_err() {
            tracing::debug!("result settled after its receiver was dropped");
        }
        true
    }
}

enum PendingState<T> {
    Ready(Option<T>),
    Waiting(oneshot::Receiver<Option<T>>, Weak<RefCell<CellState<T>>>),
    Taken,
}

/// Reading end of a single-settlement result
///
/// Resolves to `Some(value)` on success and `None` on cancellation. If the
/// writing end is dropped without settling, the result is `None`.
pub struct PendingResult<T> {
    state: PendingState<T>,
}

// The value is never pinned in place; only the receiver is polled.
impl<T> Unpin for PendingResult<T> {}

impl<T> fmt::Debug for PendingResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            PendingState::Ready(_) => "ready",
            PendingState::Waiting(..) => "waiting",
            PendingState::Taken => "taken",
        };
        f.debug_struct("PendingResult").field("state", &state).finish()
    }
}

impl<T> PendingResult<T> {
    /// A result that is already settled
    pub fn ready(value: Option<T>) -> Self {
        Self {
            state: PendingState::Ready(value),
        }
    }

    fn waiting(
        receiver: oneshot::Receiver<Option<T>>,
        writer: Weak<RefCell<CellState<T>>>,
    ) -> Self {
        Self {
            state: PendingState::Waiting(receiver, writer),
        }
    }

    /// Take the settled value without blocking
    ///
    /// Returns `None` while still pending, and `Some(outcome)` exactly once
    /// after settlement. After that it returns `None` again.
    pub fn try_take(&mut self) -> Option<Option<T>> {
        match std::mem::replace(&mut self.state, PendingState::Taken) {
            PendingState::Ready(value) => Some(value),
            PendingState::Waiting(mut receiver, writer) => match receiver.try_recv() {
                Ok(value) => Some(value),
                Err(oneshot::error::TryRecvError::Closed) => Some(None),
                Err(oneshot::error::TryRecvError::Empty) => {
                    self.state = PendingState::Waiting(receiver, writer);
                    None
                }
            },
            PendingState::Taken => None,
        }
    }

    /// Whether the value has not been settled yet
    pub fn is_pending(&self) -> bool {
        match &self.state {
            // a dropped writer counts as settled with `None`
            PendingState::Waiting(_, writer) => match writer.upgrade() {
                Some(state) => {
                    let open = state.borrow().sender.is_some();
                    open
                }
                None => false,
            },
            _ => false,
        }
    }
}

impl<T> Future for PendingResult<T> {
    type Output = Option<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        match &mut this.state {
            PendingState::Ready(value) => {
                let value = value.take();
                this.state = PendingState::Taken;
                Poll::Ready(value)
            }
            PendingState::Waiting(receiver, _) => match Pin::new(receiver).poll(cx) {
                Poll::Ready(result) => {
                    this.state = PendingState::Taken;
                    Poll::Ready(result.unwrap_or(None))
                }
                Poll::Pending => Poll::Pending,
            },
            PendingState::Taken => Poll::Ready(None),
        }
    }
}
