//! Single-threaded store for the bookmarks screen.
//!
//! Owns the current [`BookmarksState`] and a FIFO queue of actions. Every
//! dispatched action is shown to the middleware chain with the state as it
//! was *before* the action, then reduced, then broadcast to subscribers.
//! Actions the middleware dispatches are queued behind the current one.

use std::collections::VecDeque;

use crate::reducer::bookmarks_reducer;
use crate::types::action::Action;
use crate::types::state::BookmarksState;

/// Hook that observes actions on their way to the reducer and may dispatch
/// follow-ups. Side effects live here, never in the reducer.
pub trait Middleware {
    fn process(&mut self, state: &BookmarksState, action: &Action, dispatcher: &mut Dispatcher);
}

/// Collects follow-up actions produced by middleware.
#[derive(Debug, Default)]
pub struct Dispatcher {
    pending: Vec<Action>,
}

impl Dispatcher {
    pub fn dispatch(&mut self, action: Action) {
        self.pending.push(action);
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    fn drain(&mut self) -> std::vec::Drain<'_, Action> {
        self.pending.drain(..)
    }
}

pub type Subscriber = Box<dyn FnMut(&BookmarksState)>;

/// Handle returned by [`BookmarksStore::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

pub struct BookmarksStore {
    state: BookmarksState,
    middleware: Vec<Box<dyn Middleware>>,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    queue: VecDeque<Action>,
    next_subscription: u64,
}

impl BookmarksStore {
    pub fn new(initial: BookmarksState, middleware: Vec<Box<dyn Middleware>>) -> Self {
        Self {
            state: initial,
            middleware,
            subscribers: Vec::new(),
            queue: VecDeque::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &BookmarksState {
        &self.state
    }

    /// Dispatches `action` and everything the middleware queues in response.
    pub fn dispatch(&mut self, action: Action) {
        self.queue.push_back(action);
        let mut dispatcher = Dispatcher::default();

        while let Some(action) = self.queue.pop_front() {
            tracing::debug!(action = ?action, "dispatching");

            for middleware in self.middleware.iter_mut() {
                middleware.process(&self.state, &action, &mut dispatcher);
            }

            let previous = std::mem::take(&mut self.state);
            self.state = bookmarks_reducer(previous, &action);

            for (_, subscriber) in self.subscribers.iter_mut() {
                subscriber(&self.state);
            }

            self.queue.extend(dispatcher.drain());
        }
    }

    /// Registers a callback invoked with the new state after every action.
    pub fn subscribe(&mut self, subscriber: impl FnMut(&BookmarksState) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns `false` if the subscription was already gone.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(existing, _)| *existing != id);
        self.subscribers.len() != before
    }
}
