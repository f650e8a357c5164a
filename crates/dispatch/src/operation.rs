//! The five keyword operations and their pipelines.

use crate::Result;
use api::{Host, HostStatus, MonitoringApi, Trigger, TriggerPriority};
use std::str::FromStr;
use tracing::{info, warn};

/// Operations applicable to the hosts matched by a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Report matched hosts. Never mutates, dry-run or not.
    List,
    /// Set every matched host's status to enabled.
    Enable,
    /// Set every matched host's status to disabled.
    Disable,
    /// Bump matched triggers currently at `high` up to `disaster`.
    Raise,
    /// Drop matched triggers currently at `disaster` down to `high`.
    Lower,
}

impl Operation {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Enable => "enable",
            Self::Disable => "disable",
            Self::Raise => "raise",
            Self::Lower => "lower",
        }
    }
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Operation {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "list" => Ok(Self::List),
            "enable" => Ok(Self::Enable),
            "disable" => Ok(Self::Disable),
            "raise" => Ok(Self::Raise),
            "lower" => Ok(Self::Lower),
            other => Err(format!(
                "unknown operation '{other}' (expected list, enable, disable, raise or lower)"
            )),
        }
    }
}

/// What one invocation did — or, under dry-run, would have done.
#[derive(Debug, Default)]
pub struct Outcome {
    /// Entities selected by the fetch/filter.
    pub matched: usize,
    /// Mutations acknowledged by the server.
    pub updated: usize,
    /// Per-entity mutation failures. Entities after a failed one were
    /// still attempted.
    pub failures: Vec<Failure>,
}

/// One failed mutation within a batch.
#[derive(Debug)]
pub struct Failure {
    pub id: String,
    pub label: String,
    pub error: api::Error,
}

/// A trigger paired with the host it was fetched under.
#[derive(Debug, Clone)]
pub struct MatchedTrigger {
    pub host_id: String,
    pub trigger: Trigger,
}

/// Execute one operation against the hosts matching `keyword`.
///
/// Mutations are best-effort: a failure on one entity is recorded in the
/// outcome and the remainder of the batch still runs. A failed fetch
/// aborts the operation.
pub async fn run(
    api: &impl MonitoringApi,
    keyword: &str,
    operation: Operation,
    dry_run: bool,
) -> Result<Outcome> {
    match operation {
        Operation::List => list(api, keyword).await,
        Operation::Enable => update_hosts(api, keyword, HostStatus::Enabled, dry_run).await,
        Operation::Disable => update_hosts(api, keyword, HostStatus::Disabled, dry_run).await,
        Operation::Raise => {
            update_triggers(
                api,
                keyword,
                TriggerPriority::High,
                TriggerPriority::Disaster,
                dry_run,
            )
            .await
        }
        Operation::Lower => {
            update_triggers(
                api,
                keyword,
                TriggerPriority::Disaster,
                TriggerPriority::High,
                dry_run,
            )
            .await
        }
    }
}

async fn fetch_hosts(api: &impl MonitoringApi, keyword: &str) -> Result<Vec<Host>> {
    info!("gathering hosts from host pattern '{keyword}'");
    Ok(api.list_hosts(keyword).await?)
}

async fn list(api: &impl MonitoringApi, keyword: &str) -> Result<Outcome> {
    let hosts = fetch_hosts(api, keyword).await?;
    info!("found {} hosts", hosts.len());
    for host in &hosts {
        info!("host : {} : {}", host.id, host.name);
    }
    Ok(Outcome {
        matched: hosts.len(),
        ..Outcome::default()
    })
}

async fn update_hosts(
    api: &impl MonitoringApi,
    keyword: &str,
    status: HostStatus,
    dry_run: bool,
) -> Result<Outcome> {
    let (verb, verb_ing) = match status {
        HostStatus::Enabled => ("enable", "enabling"),
        HostStatus::Disabled => ("disable", "disabling"),
    };
    info!("{verb_ing} hosts with keyword '{keyword}' : dryrun ({dry_run})");

    let hosts = fetch_hosts(api, keyword).await?;
    info!("found {} hosts to update", hosts.len());

    let mut outcome = Outcome {
        matched: hosts.len(),
        ..Outcome::default()
    };

    if dry_run {
        for host in &hosts {
            info!("host : {} : {}", host.id, host.name);
        }
        return Ok(outcome);
    }

    for host in hosts {
        match api.set_host_status(&host.id, status).await {
            Ok(()) => {
                info!("{verb} host {} : {}", host.id, host.name);
                outcome.updated += 1;
            }
            Err(error) => {
                warn!("failed to update host {} : {} : {error}", host.id, host.name);
                outcome.failures.push(Failure {
                    id: host.id,
                    label: host.name,
                    error,
                });
            }
        }
    }

    Ok(outcome)
}

async fn update_triggers(
    api: &impl MonitoringApi,
    keyword: &str,
    from: TriggerPriority,
    to: TriggerPriority,
    dry_run: bool,
) -> Result<Outcome> {
    let verb = if to > from { "raising" } else { "lowering" };
    info!("{verb} triggers from {from} to {to} for hosts with keyword '{keyword}' : dryrun ({dry_run})");
    info!("gathering triggers from host pattern '{keyword}' with priority {from}");

    let hosts = fetch_hosts(api, keyword).await?;
    let matches = filter_triggers(hosts, from);
    info!("found {} triggers to update", matches.len());

    let mut outcome = Outcome {
        matched: matches.len(),
        ..Outcome::default()
    };

    if dry_run {
        for matched in &matches {
            let t = &matched.trigger;
            info!("trigger : {} : {} : {}", t.description, t.id, t.priority);
        }
        return Ok(outcome);
    }

    for matched in matches {
        let t = matched.trigger;
        match api.set_trigger_priority(&t.id, to).await {
            Ok(()) => {
                info!("update trigger : {} : {} : {from} : to : {to}", t.description, t.id);
                outcome.updated += 1;
            }
            Err(error) => {
                warn!("failed to update trigger {} : {} : {error}", t.id, t.description);
                outcome.failures.push(Failure {
                    id: t.id,
                    label: t.description,
                    error,
                });
            }
        }
    }

    Ok(outcome)
}

/// Flatten the host → trigger join, keeping triggers at exactly `level`,
/// in fetch order.
fn filter_triggers(hosts: Vec<Host>, level: TriggerPriority) -> Vec<MatchedTrigger> {
    let mut matches = Vec::new();
    for host in hosts {
        for trigger in host.triggers {
            if trigger.priority == level {
                matches.push(MatchedTrigger {
                    host_id: host.id.clone(),
                    trigger,
                });
            }
        }
    }
    matches
}
