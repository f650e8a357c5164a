//! Zabbix JSON-RPC API collaborator.
//!
//! Everything this crate knows about Zabbix lives at the wire boundary:
//! responses are deserialized into the typed entities in [`types`] right
//! after the call, so the rest of the workspace never sees the API's
//! stringly-typed records.
//!
//! The flow is two-step: a [`ZabbixClient`] is an unauthenticated handle to
//! an endpoint, and [`ZabbixClient::login`] turns it into a [`ZabbixSession`]
//! that can fetch and mutate hosts and triggers. The [`MonitoringApi`] trait
//! abstracts the session's three capabilities for callers that want to run
//! against a fake.

mod client;
mod error;
mod types;

pub use client::{MonitoringApi, ZabbixClient, ZabbixSession};
pub use error::{Error, Result};
pub use types::{Host, HostStatus, Trigger, TriggerPriority};
