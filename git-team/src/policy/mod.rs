//! Command policies.
//!
//! Each command has a `Dependencies` bundle of injected seams, a `Request`, an
//! event enum and an `apply` function that maps `(Dependencies, Request)` to
//! exactly one terminal event. Policies never print, exit or log; every side
//! effect goes through the injected dependencies.

pub mod add;
pub mod config;
pub mod disable;
pub mod enable;
pub mod list;
pub mod remove;
pub mod status;

pub use add::AddEvent;
pub use config::ConfigEvent;
pub use disable::DisableEvent;
pub use enable::EnableEvent;
pub use list::ListEvent;
pub use remove::RemoveEvent;
pub use status::StatusEvent;

/// Git config key holding the commit message template path.
pub const COMMIT_TEMPLATE_KEY: &str = "commit.template";
/// Git config key holding the hooks directory.
pub const HOOKS_PATH_KEY: &str = "core.hooksPath";

/// Terminal event of any command.
#[derive(Debug)]
pub enum Event {
    Enable(EnableEvent),
    Disable(DisableEvent),
    Status(StatusEvent),
    List(ListEvent),
    Add(AddEvent),
    Remove(RemoveEvent),
    Config(ConfigEvent),
}

macro_rules! impl_from_event {
    ($($variant:ident($event:ty)),* $(,)?) => {
        $(
            impl From<$event> for Event {
                fn from(event: $event) -> Self {
                    Event::$variant(event)
                }
            }
        )*
    };
}

impl_from_event!(
    Enable(EnableEvent),
    Disable(DisableEvent),
    Status(StatusEvent),
    List(ListEvent),
    Add(AddEvent),
    Remove(RemoveEvent),
    Config(ConfigEvent),
);
