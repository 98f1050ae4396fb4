//! # Store
//!
//! Owns the `App` and is the single entry point for state changes. After
//! every dispatch, subscribed observers are handed the new state; the
//! presentation layer subscribes instead of polling for changes.

use log::debug;

use crate::core::action::{Action, Effect, update};
use crate::core::state::App;

pub type SubscriptionId = usize;

type Observer = Box<dyn FnMut(&App)>;

pub struct Store {
    app: App,
    observers: Vec<(SubscriptionId, Observer)>,
    next_subscription: SubscriptionId,
}

impl Store {
    pub fn new(app: App) -> Self {
        Self {
            app,
            observers: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn state(&self) -> &App {
        &self.app
    }

    /// Apply `action`, notify observers, and hand back the effect to perform.
    pub fn dispatch(&mut self, action: Action) -> Effect {
        debug!("Dispatch: {:?}", action);
        let effect = update(&mut self.app, action);
        if effect != Effect::None {
            debug!("Effect: {:?}", effect);
        }
        for (_, observer) in &mut self.observers {
            observer(&self.app);
        }
        effect
    }

    pub fn subscribe(&mut self, observer: impl FnMut(&App) + 'static) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.observers.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.observers.len();
        self.observers.retain(|(sid, _)| *sid != id);
        self.observers.len() != before
    }
}
