//! Event to effect mapping, one function per command.
//!
//! Success prints a summary and exits ok; failure prints one error per reason
//! and exits with an error. A mapper handed another command's event yields
//! no effects.

use anyhow::Error;

use crate::core::render::{render_assignments, render_config, render_state};
use crate::effects::Effect;
use crate::policy::{
    AddEvent, ConfigEvent, DisableEvent, EnableEvent, Event, ListEvent, RemoveEvent, StatusEvent,
};

/// Map any event, routing it to its command's mapper.
pub fn map_event(event: &Event, query_status: &dyn Fn() -> StatusEvent) -> Vec<Effect> {
    match event {
        Event::Enable(_) => map_enable_event(event, query_status),
        Event::Disable(_) => map_disable_event(event),
        Event::Status(_) => map_status_event(event),
        Event::List(_) => map_list_event(event),
        Event::Add(_) => map_add_event(event),
        Event::Remove(_) => map_remove_event(event),
        Event::Config(_) => map_config_event(event),
    }
}

/// Enable reports by printing the fresh status.
pub fn map_enable_event(event: &Event, query_status: &dyn Fn() -> StatusEvent) -> Vec<Effect> {
    match event {
        Event::Enable(EnableEvent::Succeeded | EnableEvent::Aborted) => {
            map_status_event(&Event::Status(query_status()))
        }
        Event::Enable(EnableEvent::Failed(reasons)) => failure(reasons),
        _ => Vec::new(),
    }
}

pub fn map_disable_event(event: &Event) -> Vec<Effect> {
    match event {
        Event::Disable(DisableEvent::Succeeded) => success("git-team disabled".to_string()),
        Event::Disable(DisableEvent::Failed(reason)) => failure(std::slice::from_ref(reason)),
        _ => Vec::new(),
    }
}

pub fn map_status_event(event: &Event) -> Vec<Effect> {
    match event {
        Event::Status(StatusEvent::StateRetrievalSucceeded(state)) => success(render_state(state)),
        Event::Status(StatusEvent::StateRetrievalFailed(reason)) => {
            failure(std::slice::from_ref(reason))
        }
        _ => Vec::new(),
    }
}

pub fn map_list_event(event: &Event) -> Vec<Effect> {
    match event {
        Event::List(ListEvent::RetrievalSucceeded(assignments)) => {
            success(render_assignments(assignments))
        }
        Event::List(ListEvent::RetrievalFailed(reason)) => failure(std::slice::from_ref(reason)),
        _ => Vec::new(),
    }
}

pub fn map_add_event(event: &Event) -> Vec<Effect> {
    match event {
        Event::Add(AddEvent::Succeeded { alias, coauthor }) => {
            success(format!("Alias '{alias}' -> '{coauthor}' has been added."))
        }
        Event::Add(AddEvent::Aborted { alias, existing }) => {
            success(format!("Nothing changed. Alias '{alias}' -> '{existing}' was kept."))
        }
        Event::Add(AddEvent::Failed(reason)) => failure(std::slice::from_ref(reason)),
        _ => Vec::new(),
    }
}

pub fn map_remove_event(event: &Event) -> Vec<Effect> {
    match event {
        Event::Remove(RemoveEvent::Succeeded { alias }) => {
            success(format!("Alias '{alias}' has been removed."))
        }
        Event::Remove(RemoveEvent::Skipped { alias }) => {
            success(format!("No such alias: '{alias}'."))
        }
        Event::Remove(RemoveEvent::Failed(reason)) => failure(std::slice::from_ref(reason)),
        _ => Vec::new(),
    }
}

pub fn map_config_event(event: &Event) -> Vec<Effect> {
    match event {
        Event::Config(ConfigEvent::RetrievalSucceeded(cfg)) => success(render_config(cfg)),
        Event::Config(ConfigEvent::SettingSucceeded(scope)) => success(format!(
            "Configuration updated: 'activation-scope' -> '{scope}'"
        )),
        Event::Config(ConfigEvent::RetrievalFailed(reason) | ConfigEvent::SettingFailed(reason)) => {
            failure(std::slice::from_ref(reason))
        }
        _ => Vec::new(),
    }
}

fn success(message: String) -> Vec<Effect> {
    vec![Effect::PrintMessage(message), Effect::ExitOk]
}

fn failure(reasons: &[Error]) -> Vec<Effect> {
    reasons
        .iter()
        .map(Effect::print_err)
        .chain(std::iter::once(Effect::ExitErr))
        .collect()
}
