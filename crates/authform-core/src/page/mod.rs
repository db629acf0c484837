//! Page-level capabilities the handlers act through.
//!
//! - `Navigator`: replaces the current page with another location
//! - `Notifier`: shows a blocking message to the user
//!
//! `LocationNavigator` is the stock navigator: it tracks the current page URL
//! and resolves relative targets the way a browser resolves `location.href`.

pub mod location;

pub use location::LocationNavigator;

pub trait Navigator: Send + Sync {
    /// Navigate to `location`, relative to the current page or absolute.
    fn navigate(&self, location: &str);
}

pub trait Notifier: Send + Sync {
    /// Show `message` and return once the user has acknowledged it.
    fn alert(&self, message: &str);
}
