//! Entity types at the API boundary.
//!
//! Zabbix serializes numeric attributes as strings on the wire
//! (`"status": "0"`, `"priority": "4"`) while updates take integer codes.
//! The enums here own that translation so callers only ever see typed
//! values.

use serde::de::{Deserializer, Error as _};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// A monitored host, with its triggers joined in by the fetch.
///
/// A transient snapshot: fetched fresh for every invocation and discarded
/// when the operation completes.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Host {
    #[serde(rename = "hostid")]
    pub id: String,

    #[serde(rename = "host")]
    pub name: String,

    pub status: HostStatus,

    /// Triggers owned by this host, in server order. Empty unless the
    /// fetch asked for them.
    #[serde(default)]
    pub triggers: Vec<Trigger>,
}

/// An alert condition attached to a host.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Trigger {
    #[serde(rename = "triggerid")]
    pub id: String,

    pub description: String,

    pub priority: TriggerPriority,
}

/// Monitoring status of a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostStatus {
    Enabled,
    Disabled,
}

impl HostStatus {
    /// Integer code used by the `status` attribute of host objects.
    pub fn code(self) -> u8 {
        match self {
            Self::Enabled => 0,
            Self::Disabled => 1,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Enabled),
            1 => Some(Self::Disabled),
            _ => None,
        }
    }
}

impl std::fmt::Display for HostStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Enabled => write!(f, "enabled"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

impl Serialize for HostStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for HostStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u8>()
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| D::Error::custom(format!("invalid host status '{raw}'")))
    }
}

/// Trigger severity scale, ordered.
///
/// The bulk operations only ever touch [`High`](Self::High) and
/// [`Disaster`](Self::Disaster); the remaining levels exist so host fetches
/// decode whatever severities the server holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TriggerPriority {
    NotClassified,
    Information,
    Warning,
    Average,
    High,
    Disaster,
}

impl TriggerPriority {
    /// Integer code used by the `priority` attribute of trigger objects.
    pub fn code(self) -> u8 {
        match self {
            Self::NotClassified => 0,
            Self::Information => 1,
            Self::Warning => 2,
            Self::Average => 3,
            Self::High => 4,
            Self::Disaster => 5,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::NotClassified),
            1 => Some(Self::Information),
            2 => Some(Self::Warning),
            3 => Some(Self::Average),
            4 => Some(Self::High),
            5 => Some(Self::Disaster),
            _ => None,
        }
    }
}

impl std::fmt::Display for TriggerPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::NotClassified => "not classified",
            Self::Information => "information",
            Self::Warning => "warning",
            Self::Average => "average",
            Self::High => "high",
            Self::Disaster => "disaster",
        };
        write!(f, "{name}")
    }
}

impl Serialize for TriggerPriority {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

impl<'de> Deserialize<'de> for TriggerPriority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse::<u8>()
            .ok()
            .and_then(Self::from_code)
            .ok_or_else(|| D::Error::custom(format!("invalid trigger priority '{raw}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_host_get_payload() {
        let json = r#"[
            {
                "hostid": "10282",
                "host": "stage-webserver-i-b9a71341",
                "status": "0",
                "available": "1",
                "triggers": [
                    {
                        "triggerid": "17288",
                        "description": "Memcached: version command is failed on {HOSTNAME}",
                        "priority": "4",
                        "value": "0"
                    }
                ]
            },
            {
                "hostid": "10164",
                "host": "dev-webserver-i-5fd631a0",
                "status": "1"
            }
        ]"#;

        let hosts: Vec<Host> = serde_json::from_str(json).unwrap();
        assert_eq!(hosts.len(), 2);
        assert_eq!(hosts[0].id, "10282");
        assert_eq!(hosts[0].status, HostStatus::Enabled);
        assert_eq!(hosts[0].triggers.len(), 1);
        assert_eq!(hosts[0].triggers[0].priority, TriggerPriority::High);
        assert_eq!(hosts[1].status, HostStatus::Disabled);
        assert!(hosts[1].triggers.is_empty());
    }

    #[test]
    fn rejects_unknown_status_string() {
        let err = serde_json::from_str::<HostStatus>("\"9\"").unwrap_err();
        assert!(err.to_string().contains("invalid host status"));
    }

    #[test]
    fn priority_codes_round_trip() {
        for code in 0..=5 {
            let priority = TriggerPriority::from_code(code).unwrap();
            assert_eq!(priority.code(), code);
        }
        assert!(TriggerPriority::from_code(6).is_none());
    }

    #[test]
    fn priority_serializes_as_integer_code() {
        let value = serde_json::to_value(TriggerPriority::Disaster).unwrap();
        assert_eq!(value, serde_json::json!(5));
    }

    #[test]
    fn severity_scale_is_ordered() {
        assert!(TriggerPriority::High < TriggerPriority::Disaster);
        assert!(TriggerPriority::Warning < TriggerPriority::High);
    }
}
