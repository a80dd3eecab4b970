//! External employee directory (the user service's trainee listing).

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use batchdesk_core::EmployeeId;

use crate::config::DirectoryConfig;

/// One directory entry, kept as the document the directory returned.
///
/// Only `employeeId` is interpreted; every other field passes through.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmployeeRecord(Map<String, Value>);

impl EmployeeRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    /// The record's `employeeId`, widened to `i64`.
    ///
    /// Integral JSON numbers of either width are accepted; fractional ones
    /// are truncated. Anything else yields `None`.
    pub fn employee_id(&self) -> Option<EmployeeId> {
        let raw = self.0.get("employeeId")?;
        let id = raw
            .as_i64()
            .or_else(|| raw.as_f64().map(|f| f as i64))?;
        Some(EmployeeId::new(id))
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

/// Source of every known trainee.
#[async_trait::async_trait]
pub trait EmployeeDirectory: Send + Sync {
    /// Fetch all known employees.
    ///
    /// Never fails: an unreachable or unhappy directory yields an empty list.
    async fn fetch_all_known_employees(&self) -> Vec<EmployeeRecord>;
}

#[async_trait::async_trait]
impl<D> EmployeeDirectory for Arc<D>
where
    D: EmployeeDirectory + ?Sized,
{
    async fn fetch_all_known_employees(&self) -> Vec<EmployeeRecord> {
        (**self).fetch_all_known_employees().await
    }
}

/// HTTP client for the directory's trainee endpoint.
#[derive(Debug, Clone)]
pub struct HttpEmployeeDirectory {
    client: reqwest::Client,
    url: String,
}

impl HttpEmployeeDirectory {
    pub fn new(config: &DirectoryConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            client,
            url: config.trainee_url(),
        })
    }
}

#[async_trait::async_trait]
impl EmployeeDirectory for HttpEmployeeDirectory {
    async fn fetch_all_known_employees(&self) -> Vec<EmployeeRecord> {
        let response = match self.client.get(&self.url).send().await {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "directory request failed; treating as empty");
                return Vec::new();
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(url = %self.url, %status, "directory returned non-success; treating as empty");
            return Vec::new();
        }

        match response.json::<Option<Vec<EmployeeRecord>>>().await {
            Ok(records) => records.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(url = %self.url, error = %e, "directory body not decodable; treating as empty");
                Vec::new()
            }
        }
    }
}

/// Fixed in-process directory for tests/dev.
#[derive(Debug, Default)]
pub struct StaticEmployeeDirectory {
    records: Vec<EmployeeRecord>,
}

impl StaticEmployeeDirectory {
    pub fn new(records: Vec<EmployeeRecord>) -> Self {
        Self { records }
    }

    /// Records carrying only an `employeeId` and a generated `name`.
    pub fn with_ids(ids: impl IntoIterator<Item = i64>) -> Self {
        Self::new(
            ids.into_iter()
                .map(|id| {
                    let mut fields = Map::new();
                    fields.insert("employeeId".to_string(), Value::from(id));
                    fields.insert("name".to_string(), Value::from(format!("trainee-{id}")));
                    EmployeeRecord::new(fields)
                })
                .collect(),
        )
    }
}

#[async_trait::async_trait]
impl EmployeeDirectory for StaticEmployeeDirectory {
    async fn fetch_all_known_employees(&self) -> Vec<EmployeeRecord> {
        self.records.clone()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn record(value: Value) -> EmployeeRecord {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn employee_id_accepts_both_integer_widths() {
        assert_eq!(record(json!({"employeeId": 7})).employee_id(), Some(EmployeeId::new(7)));
        assert_eq!(
            record(json!({"employeeId": 9_000_000_000_i64})).employee_id(),
            Some(EmployeeId::new(9_000_000_000))
        );
        assert_eq!(record(json!({"employeeId": 12.9})).employee_id(), Some(EmployeeId::new(12)));
    }

    #[test]
    fn non_numeric_employee_id_is_ignored() {
        assert_eq!(record(json!({"employeeId": "7"})).employee_id(), None);
        assert_eq!(record(json!({"name": "no id"})).employee_id(), None);
    }

    #[test]
    fn record_round_trips_unknown_fields() {
        let original = json!({"employeeId": 1, "email": "a@example.com"});
        let rec = record(original.clone());
        assert_eq!(serde_json::to_value(&rec).unwrap(), original);
    }

    /// Serve `response` verbatim to every connection; returns the base URL.
    async fn canned_directory(response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                let _ = socket.write_all(response.as_bytes()).await;
                let _ = socket.shutdown().await;
            }
        });
        format!("http://{addr}")
    }

    fn client_for(base_url: String) -> HttpEmployeeDirectory {
        HttpEmployeeDirectory::new(&DirectoryConfig {
            base_url,
            trainee_path: "/user/role/trainee".to_string(),
            timeout: std::time::Duration::from_secs(2),
        })
        .unwrap()
    }

    #[tokio::test]
    async fn server_error_degrades_to_empty() {
        let url = canned_directory(
            "HTTP/1.1 500 Internal Server Error\r\ncontent-type: application/json\r\ncontent-length: 19\r\nconnection: close\r\n\r\n[{\"employeeId\": 1}]",
        )
        .await;
        assert!(client_for(url).fetch_all_known_employees().await.is_empty());
    }

    #[tokio::test]
    async fn null_body_degrades_to_empty() {
        let url = canned_directory(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 4\r\nconnection: close\r\n\r\nnull",
        )
        .await;
        assert!(client_for(url).fetch_all_known_employees().await.is_empty());
    }

    #[tokio::test]
    async fn listing_is_decoded_on_success() {
        let url = canned_directory(
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: 19\r\nconnection: close\r\n\r\n[{\"employeeId\": 1}]",
        )
        .await;
        let records = client_for(url).fetch_all_known_employees().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].employee_id(), Some(EmployeeId::new(1)));
    }

    #[tokio::test]
    async fn unreachable_directory_degrades_to_empty() {
        let directory = HttpEmployeeDirectory::new(&DirectoryConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            trainee_path: "/user/role/trainee".to_string(),
            timeout: std::time::Duration::from_millis(200),
        })
        .unwrap();

        assert!(directory.fetch_all_known_employees().await.is_empty());
    }
}
