use std::sync::{Arc, Mutex, MutexGuard};

use flume::{Receiver, Sender};

use crate::components::comments::{reduce, CommentsAction, CommentsState};

/// Owns the current comments state. Every change goes through `dispatch`,
/// which swaps in the value returned by the reducer; the old value is never
/// mutated, so snapshots handed out earlier stay valid.
#[derive(Clone, Default)]
pub struct Store {
    state: Arc<Mutex<CommentsState>>,
    subscribers: Arc<Mutex<Subscribers>>,
}

#[derive(Default)]
struct Subscribers {
    states: Vec<Sender<CommentsState>>,
    actions: Vec<Sender<CommentsAction>>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("state", &*self.lock_state())
            .finish()
    }
}

impl Store {
    /// A store resuming from an earlier snapshot
    pub fn new(initial: CommentsState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial)),
            subscribers: Arc::default(),
        }
    }

    // The state is only swapped after the reducer returns, so even a
    // poisoned lock holds a complete value.
    fn lock_state(&self) -> MutexGuard<'_, CommentsState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn lock_subscribers(&self) -> MutexGuard<'_, Subscribers> {
        self.subscribers.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn dispatch(&self, action: CommentsAction) {
        log::trace!("post {}: {action:?}", action.post_id());
        let mut state = self.lock_state();
        *state = reduce(&state, &action);
        // still holding the state lock: subscribers receive states in reduce order
        let mut subscribers = self.lock_subscribers();
        subscribers
            .actions
            .retain(|sender| sender.send(action.clone()).is_ok());
        subscribers
            .states
            .retain(|sender| sender.send(state.clone()).is_ok());
    }

    /// Snapshot of the current state
    pub fn state(&self) -> CommentsState {
        self.lock_state().clone()
    }

    pub fn with<T>(&self, action: impl FnOnce(&CommentsState) -> T) -> T {
        action(&self.lock_state())
    }

    /// Receives every state produced by a dispatch from now on.
    /// Dropping the receiver unsubscribes.
    pub fn subscribe(&self) -> Receiver<CommentsState> {
        let (sender, receiver) = flume::unbounded();
        self.lock_subscribers().states.push(sender);
        receiver
    }

    /// Receives every dispatched action from now on, e.g. to pick the error
    /// out of a `FetchFailure`.
    pub fn subscribe_actions(&self) -> Receiver<CommentsAction> {
        let (sender, receiver) = flume::unbounded();
        self.lock_subscribers().actions.push(sender);
        receiver
    }
}
