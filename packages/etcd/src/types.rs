//! etcd v2 keys API documents.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Body of a successful keys request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeysResponse {
    pub action: String,
    pub node: Node,
    #[serde(rename = "prevNode", default, skip_serializing_if = "Option::is_none")]
    pub prev_node: Option<Node>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Node {
    pub key: String,
    /// Absent for directories.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub dir: bool,
    #[serde(rename = "modifiedIndex", default)]
    pub modified_index: u64,
    #[serde(rename = "createdIndex", default)]
    pub created_index: u64,
}

/// Error document returned with non-success statuses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorDocument {
    #[serde(rename = "errorCode")]
    pub error_code: u64,
    pub message: String,
    #[serde(default)]
    pub cause: String,
    #[serde(default)]
    pub index: u64,
}

impl From<ErrorDocument> for Error {
    fn from(doc: ErrorDocument) -> Self {
        Error::Api {
            error_code: doc.error_code,
            message: doc.message,
            cause: doc.cause,
            index: doc.index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_get_response() {
        let text = r#"{
            "action": "get",
            "node": {"key": "/cfg", "value": "8080", "modifiedIndex": 7, "createdIndex": 7}
        }"#;
        let response: KeysResponse = serde_json::from_str(text).unwrap();
        assert_eq!(response.node.value.as_deref(), Some("8080"));
        assert!(!response.node.dir);
        assert!(response.prev_node.is_none());
    }

    #[test]
    fn decode_directory_node() {
        let text = r#"{"action": "get", "node": {"key": "/app", "dir": true}}"#;
        let response: KeysResponse = serde_json::from_str(text).unwrap();
        assert!(response.node.dir);
        assert_eq!(response.node.value, None);
    }

    #[test]
    fn error_document_becomes_api_error() {
        let text = r#"{"errorCode": 100, "message": "Key not found", "cause": "/cfg", "index": 3}"#;
        let doc: ErrorDocument = serde_json::from_str(text).unwrap();
        let error = Error::from(doc);
        assert!(error.is_key_not_found());
    }
}
