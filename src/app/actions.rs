//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host directly. It mutates state and
//! returns a `Vec<Action>`; the plugin shim then performs each action in order
//! (`web_request`, `set_timeout`, `hide_self`).

use crate::api::ApiRequest;
use std::time::Duration;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Sends an HTTP GET through the host.
    ///
    /// The response arrives later as [`Event::ApiResponse`](crate::app::Event::ApiResponse)
    /// carrying the request's context map.
    WebRequest(ApiRequest),

    /// Schedules a host timer that fires [`Event::TimerElapsed`](crate::app::Event::TimerElapsed).
    ScheduleTimer(Duration),
}
