//! Navigation through `window.location`

use crate::client::is_browser;
use todo_http::Navigator;
use tracing::warn;

/// Sends the browser to a route by assigning `window.location.href`
#[derive(Debug, Default, Clone, Copy)]
pub struct WindowNavigator;

impl Navigator for WindowNavigator {
    fn navigate(&self, route: &str) {
        if !is_browser() {
            return;
        }
        if let Some(window) = web_sys::window() {
            if let Err(e) = window.location().set_href(route) {
                warn!("Navigation to {route} failed: {e:?}");
            }
        }
    }
}
