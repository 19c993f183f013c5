//! Component-owned fetch lifetime.
//!
//! # Design
//! - One owner per mounted view; each fetch gets a ticket and a fresh abort signal.
//! - Starting a fetch aborts the previous one; unmount aborts and closes the scope.

use std::cell::RefCell;
use std::rc::Rc;

use gloo::console;
use triupact_core::lifecycle::{FetchScope, FetchTicket};
use web_sys::{AbortController, AbortSignal};
use yew::prelude::*;

pub(crate) struct FetchOwner {
    scope: FetchScope,
    controller: RefCell<Option<AbortController>>,
}

impl FetchOwner {
    fn new() -> Self {
        Self {
            scope: FetchScope::new(),
            controller: RefCell::new(None),
        }
    }

    /// Ticket and signal for a new fetch, superseding any in flight.
    pub(crate) fn start(&self) -> Option<(FetchTicket, AbortSignal)> {
        self.abort_in_flight();
        let controller = match AbortController::new() {
            Ok(controller) => controller,
            Err(err) => {
                console::error!("abort controller unavailable", err);
                return None;
            }
        };
        let signal = controller.signal();
        *self.controller.borrow_mut() = Some(controller);
        Some((self.scope.begin(), signal))
    }

    fn close(&self) {
        self.scope.close();
        self.abort_in_flight();
    }

    fn abort_in_flight(&self) {
        if let Some(controller) = self.controller.borrow_mut().take() {
            controller.abort();
        }
    }
}

/// Fetch owner tied to the calling component's lifetime.
#[hook]
pub(crate) fn use_fetch_owner() -> Rc<FetchOwner> {
    let owner = use_memo(|_| FetchOwner::new(), ());
    {
        let owner = Rc::clone(&owner);
        use_effect_with_deps(move |_| move || owner.close(), ());
    }
    owner
}
