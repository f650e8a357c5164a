//! JSON-RPC client and authenticated session.

use crate::{Error, Host, HostStatus, Result, TriggerPriority};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

/// The session capabilities consumed by operation pipelines.
///
/// Kept as a trait so the dispatcher can run against a recording fake in
/// tests; [`ZabbixSession`] is the real implementation.
pub trait MonitoringApi: Send + Sync {
    /// Fetch hosts whose name matches `pattern`, with their triggers joined
    /// in. Substring semantics belong to the server; the pattern is passed
    /// through verbatim (`*` included).
    fn list_hosts(&self, pattern: &str) -> impl Future<Output = Result<Vec<Host>>> + Send;

    /// Set the monitoring status of a single host.
    fn set_host_status(
        &self,
        host_id: &str,
        status: HostStatus,
    ) -> impl Future<Output = Result<()>> + Send;

    /// Set the severity of a single trigger.
    fn set_trigger_priority(
        &self,
        trigger_id: &str,
        priority: TriggerPriority,
    ) -> impl Future<Output = Result<()>> + Send;
}

#[derive(Debug, Serialize)]
struct RpcRequest<'a, P> {
    jsonrpc: &'static str,
    method: &'a str,
    params: P,
    id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    auth: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<RpcErrorBody>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginParams<'a> {
    user: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct HostSearch<'a> {
    host: &'a str,
}

#[derive(Debug, Serialize)]
struct HostGetParams<'a> {
    output: &'static str,
    #[serde(rename = "selectTriggers")]
    select_triggers: &'static str,
    search: HostSearch<'a>,
}

#[derive(Debug, Serialize)]
struct HostUpdateParams<'a> {
    hostid: &'a str,
    status: HostStatus,
}

#[derive(Debug, Serialize)]
struct TriggerUpdateParams<'a> {
    triggerid: &'a str,
    priority: TriggerPriority,
}

#[derive(Debug, Deserialize)]
struct HostUpdateResult {
    #[serde(default)]
    hostids: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct TriggerUpdateResult {
    #[serde(default)]
    triggerids: Vec<String>,
}

async fn call<P, R>(
    http: &reqwest::Client,
    endpoint: &str,
    id: u64,
    method: &str,
    params: P,
    auth: Option<&str>,
) -> Result<R>
where
    P: Serialize,
    R: DeserializeOwned,
{
    tracing::debug!("rpc {method} (id {id})");

    let request = RpcRequest {
        jsonrpc: "2.0",
        method,
        params,
        id,
        auth,
    };

    let response = http
        .post(endpoint)
        .json(&request)
        .header("content-type", "application/json-rpc")
        .send()
        .await
        .map_err(|e| Error::Network(e.to_string()))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(Error::Api(format!("{status}: {body}")));
    }

    let envelope: RpcResponse<R> = response
        .json()
        .await
        .map_err(|e| Error::Api(e.to_string()))?;

    if let Some(err) = envelope.error {
        return Err(Error::Rpc {
            code: err.code,
            message: err.message,
            data: err.data,
        });
    }

    envelope
        .result
        .ok_or_else(|| Error::Api(format!("{method}: response carried neither result nor error")))
}

/// Unauthenticated handle to a Zabbix API endpoint. No I/O happens until
/// the first call.
pub struct ZabbixClient {
    http: reqwest::Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl ZabbixClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Ask the server for its API version. Works without authentication.
    pub async fn api_version(&self) -> Result<String> {
        call(
            &self.http,
            &self.endpoint,
            self.next_id(),
            "apiinfo.version",
            serde_json::json!([]),
            None,
        )
        .await
    }

    /// Authenticate and return a session for host and trigger calls. The
    /// session reuses this client's connection pool for every call.
    pub async fn login(&self, user: &str, password: &str) -> Result<ZabbixSession> {
        let token: String = call(
            &self.http,
            &self.endpoint,
            self.next_id(),
            "user.login",
            LoginParams { user, password },
            None,
        )
        .await?;

        Ok(ZabbixSession {
            http: self.http.clone(),
            endpoint: self.endpoint.clone(),
            token,
            next_id: AtomicU64::new(1),
        })
    }
}

/// Authenticated session, holding the token from `user.login`.
pub struct ZabbixSession {
    http: reqwest::Client,
    endpoint: String,
    token: String,
    next_id: AtomicU64,
}

impl ZabbixSession {
    async fn call<P, R>(&self, method: &str, params: P) -> Result<R>
    where
        P: Serialize,
        R: DeserializeOwned,
    {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        call(
            &self.http,
            &self.endpoint,
            id,
            method,
            params,
            Some(&self.token),
        )
        .await
    }
}

impl MonitoringApi for ZabbixSession {
    async fn list_hosts(&self, pattern: &str) -> Result<Vec<Host>> {
        self.call(
            "host.get",
            HostGetParams {
                output: "extend",
                select_triggers: "extend",
                search: HostSearch { host: pattern },
            },
        )
        .await
    }

    async fn set_host_status(&self, host_id: &str, status: HostStatus) -> Result<()> {
        let updated: HostUpdateResult = self
            .call(
                "host.update",
                HostUpdateParams {
                    hostid: host_id,
                    status,
                },
            )
            .await?;
        tracing::debug!("host.update acknowledged {:?}", updated.hostids);
        Ok(())
    }

    async fn set_trigger_priority(&self, trigger_id: &str, priority: TriggerPriority) -> Result<()> {
        let updated: TriggerUpdateResult = self
            .call(
                "trigger.update",
                TriggerUpdateParams {
                    triggerid: trigger_id,
                    priority,
                },
            )
            .await?;
        tracing::debug!("trigger.update acknowledged {:?}", updated.triggerids);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_omits_auth_before_login() {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method: "apiinfo.version",
            params: serde_json::json!([]),
            id: 1,
            auth: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("auth").is_none());
        assert_eq!(value["method"], "apiinfo.version");
    }

    #[test]
    fn request_carries_session_token() {
        let request = RpcRequest {
            jsonrpc: "2.0",
            method: "host.get",
            params: HostGetParams {
                output: "extend",
                select_triggers: "extend",
                search: HostSearch { host: "webserver" },
            },
            id: 7,
            auth: Some("0424bd59b807674191e7d77572075f33"),
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["auth"], "0424bd59b807674191e7d77572075f33");
        assert_eq!(value["params"]["selectTriggers"], "extend");
        assert_eq!(value["params"]["search"]["host"], "webserver");
    }

    #[test]
    fn update_params_send_integer_codes() {
        let value = serde_json::to_value(HostUpdateParams {
            hostid: "10282",
            status: HostStatus::Disabled,
        })
        .unwrap();
        assert_eq!(value["status"], serde_json::json!(1));

        let value = serde_json::to_value(TriggerUpdateParams {
            triggerid: "17288",
            priority: TriggerPriority::Disaster,
        })
        .unwrap();
        assert_eq!(value["priority"], serde_json::json!(5));
    }

    #[test]
    fn error_envelope_decodes() {
        let body = r#"{
            "jsonrpc": "2.0",
            "error": {
                "code": -32602,
                "message": "Invalid params.",
                "data": "Login name or password is incorrect."
            },
            "id": 1
        }"#;
        let envelope: RpcResponse<String> = serde_json::from_str(body).unwrap();
        assert!(envelope.result.is_none());
        let err = envelope.error.unwrap();
        assert_eq!(err.code, -32602);
        assert_eq!(err.data.as_deref(), Some("Login name or password is incorrect."));
    }

    #[test]
    fn result_envelope_decodes() {
        let body = r#"{"jsonrpc":"2.0","result":"6.0.13","id":2}"#;
        let envelope: RpcResponse<String> = serde_json::from_str(body).unwrap();
        assert_eq!(envelope.result.as_deref(), Some("6.0.13"));
        assert!(envelope.error.is_none());
    }
}
