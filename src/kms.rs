//! KMS providers and master key descriptors
//!
//! The master key passed to [`crate::DataKeyOptionsBuilder::set_master_key`] is an
//! untyped document whose shape depends on the KMS provider configured by the key
//! vault. The descriptors here build those documents with the right field names:
//!
//! | Provider | Required | Optional |
//! |----------|----------|----------|
//! | local    | (no master key) | |
//! | aws      | `region`, `key` | `endpoint` |
//! | azure    | `keyVaultEndpoint`, `keyName` | `keyVersion` |
//! | gcp      | `projectId`, `location`, `keyRing`, `keyName` | `keyVersion`, `endpoint` |
//!
//! Endpoints are a host name with an optional port (`foo.com` or `foo.com:443`).
//! Nothing in this module checks values; the KMS integration that consumes the
//! document is responsible for that.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Default GCP KMS endpoint
pub const GCP_DEFAULT_ENDPOINT: &str = "cloudkms.googleapis.com";

/// Key management services a data key can be created with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KmsProvider {
    /// Locally held master key; no master key descriptor applies
    Local,
    /// AWS KMS
    Aws,
    /// Azure Key Vault
    Azure,
    /// Google Cloud KMS
    Gcp,
}

impl KmsProvider {
    /// Returns the provider name as used in KMS provider configuration
    pub fn as_str(&self) -> &'static str {
        match self {
            KmsProvider::Local => "local",
            KmsProvider::Aws => "aws",
            KmsProvider::Azure => "azure",
            KmsProvider::Gcp => "gcp",
        }
    }

    /// Returns true if creating a data key with this provider needs a master key document
    pub fn requires_master_key(&self) -> bool {
        !matches!(self, KmsProvider::Local)
    }
}

impl fmt::Display for KmsProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KmsProvider {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "local" => Ok(KmsProvider::Local),
            "aws" => Ok(KmsProvider::Aws),
            "azure" => Ok(KmsProvider::Azure),
            "gcp" => Ok(KmsProvider::Gcp),
            _ => Err(Error::UnknownKmsProvider(s.to_string())),
        }
    }
}

/// Master key held in AWS KMS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AwsMasterKey {
    /// Region of the customer master key
    pub region: String,
    /// ARN of the customer master key
    pub key: String,
    /// Alternate host to send KMS requests to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl AwsMasterKey {
    /// Creates a descriptor for the given region and key ARN
    pub fn new(region: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            key: key.into(),
            endpoint: None,
        }
    }

    /// Sends KMS requests to `endpoint` instead of the regional default
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Returns the endpoint KMS requests go to, `kms.<region>.amazonaws.com` if unset
    pub fn effective_endpoint(&self) -> String {
        self.endpoint
            .clone()
            .unwrap_or_else(|| format!("kms.{}.amazonaws.com", self.region))
    }
}

impl From<AwsMasterKey> for Value {
    fn from(key: AwsMasterKey) -> Self {
        let mut doc = Map::new();
        doc.insert("region".to_string(), Value::String(key.region));
        doc.insert("key".to_string(), Value::String(key.key));
        if let Some(endpoint) = key.endpoint {
            doc.insert("endpoint".to_string(), Value::String(endpoint));
        }
        Value::Object(doc)
    }
}

/// Master key held in Azure Key Vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzureMasterKey {
    /// Host of the key vault
    pub key_vault_endpoint: String,
    /// Name of the key
    pub key_name: String,
    /// Specific version of the key; the primary version when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_version: Option<String>,
}

impl AzureMasterKey {
    /// Creates a descriptor for a key in the given key vault
    pub fn new(key_vault_endpoint: impl Into<String>, key_name: impl Into<String>) -> Self {
        Self {
            key_vault_endpoint: key_vault_endpoint.into(),
            key_name: key_name.into(),
            key_version: None,
        }
    }

    /// Pins the key version
    pub fn with_key_version(mut self, key_version: impl Into<String>) -> Self {
        self.key_version = Some(key_version.into());
        self
    }
}

impl From<AzureMasterKey> for Value {
    fn from(key: AzureMasterKey) -> Self {
        let mut doc = Map::new();
        doc.insert(
            "keyVaultEndpoint".to_string(),
            Value::String(key.key_vault_endpoint),
        );
        doc.insert("keyName".to_string(), Value::String(key.key_name));
        if let Some(version) = key.key_version {
            doc.insert("keyVersion".to_string(), Value::String(version));
        }
        Value::Object(doc)
    }
}

/// Master key held in Google Cloud KMS
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcpMasterKey {
    /// Project that owns the key ring
    pub project_id: String,
    /// Location of the key ring, e.g. `global`
    pub location: String,
    /// Key ring holding the key
    pub key_ring: String,
    /// Name of the key
    pub key_name: String,
    /// Specific version of the key; the primary version when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_version: Option<String>,
    /// Alternate host to send KMS requests to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
}

impl GcpMasterKey {
    /// Creates a descriptor for a key in the given project, location and key ring
    pub fn new(
        project_id: impl Into<String>,
        location: impl Into<String>,
        key_ring: impl Into<String>,
        key_name: impl Into<String>,
    ) -> Self {
        Self {
            project_id: project_id.into(),
            location: location.into(),
            key_ring: key_ring.into(),
            key_name: key_name.into(),
            key_version: None,
            endpoint: None,
        }
    }

    /// Pins the key version
    pub fn with_key_version(mut self, key_version: impl Into<String>) -> Self {
        self.key_version = Some(key_version.into());
        self
    }

    /// Sends KMS requests to `endpoint` instead of [`GCP_DEFAULT_ENDPOINT`]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Returns the endpoint KMS requests go to
    pub fn effective_endpoint(&self) -> &str {
        self.endpoint.as_deref().unwrap_or(GCP_DEFAULT_ENDPOINT)
    }
}

impl From<GcpMasterKey> for Value {
    fn from(key: GcpMasterKey) -> Self {
        let mut doc = Map::new();
        doc.insert("projectId".to_string(), Value::String(key.project_id));
        doc.insert("location".to_string(), Value::String(key.location));
        doc.insert("keyRing".to_string(), Value::String(key.key_ring));
        doc.insert("keyName".to_string(), Value::String(key.key_name));
        if let Some(version) = key.key_version {
            doc.insert("keyVersion".to_string(), Value::String(version));
        }
        if let Some(endpoint) = key.endpoint {
            doc.insert("endpoint".to_string(), Value::String(endpoint));
        }
        Value::Object(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const AWS_ARN: &str = "arn:aws:kms:us-east-1:123456789012:key/abcd-1234";

    #[test]
    fn test_provider_names() {
        for provider in [
            KmsProvider::Local,
            KmsProvider::Aws,
            KmsProvider::Azure,
            KmsProvider::Gcp,
        ] {
            let parsed: KmsProvider = provider.to_string().parse().expect("known provider");
            assert_eq!(parsed, provider);
        }

        assert_eq!("AWS".parse::<KmsProvider>(), Ok(KmsProvider::Aws));
        assert_eq!(
            "kmip".parse::<KmsProvider>(),
            Err(Error::UnknownKmsProvider("kmip".into()))
        );
    }

    #[test]
    fn test_provider_serde_names() {
        assert_eq!(
            serde_json::to_value(KmsProvider::Azure).expect("serialize"),
            json!("azure")
        );
    }

    #[test]
    fn test_requires_master_key() {
        assert!(!KmsProvider::Local.requires_master_key());
        assert!(KmsProvider::Aws.requires_master_key());
        assert!(KmsProvider::Azure.requires_master_key());
        assert!(KmsProvider::Gcp.requires_master_key());
    }

    #[test]
    fn test_aws_master_key_document() {
        let key = AwsMasterKey::new("us-east-1", AWS_ARN);
        assert_eq!(key.effective_endpoint(), "kms.us-east-1.amazonaws.com");
        assert_eq!(
            Value::from(key.clone()),
            json!({"region": "us-east-1", "key": AWS_ARN})
        );
        assert_eq!(serde_json::to_value(&key).expect("serialize"), Value::from(key));

        let key = AwsMasterKey::new("us-east-1", AWS_ARN).with_endpoint("kms.internal:8443");
        assert_eq!(key.effective_endpoint(), "kms.internal:8443");
        assert_eq!(
            Value::from(key),
            json!({"region": "us-east-1", "key": AWS_ARN, "endpoint": "kms.internal:8443"})
        );
    }

    #[test]
    fn test_azure_master_key_document() {
        let key = AzureMasterKey::new("vault.azure.net", "data-key-wrapper");
        assert_eq!(
            Value::from(key.clone()),
            json!({"keyVaultEndpoint": "vault.azure.net", "keyName": "data-key-wrapper"})
        );

        let key = key.with_key_version("7");
        assert_eq!(serde_json::to_value(&key).expect("serialize"), Value::from(key.clone()));
        assert_eq!(Value::from(key)["keyVersion"], json!("7"));
    }

    #[test]
    fn test_gcp_master_key_document() {
        let key = GcpMasterKey::new("project", "global", "ring", "name");
        assert_eq!(key.effective_endpoint(), GCP_DEFAULT_ENDPOINT);
        assert_eq!(
            Value::from(key.clone()),
            json!({
                "projectId": "project",
                "location": "global",
                "keyRing": "ring",
                "keyName": "name",
            })
        );

        let key = key
            .with_key_version("3")
            .with_endpoint("cloudkms.internal:443");
        assert_eq!(key.effective_endpoint(), "cloudkms.internal:443");
        assert_eq!(serde_json::to_value(&key).expect("serialize"), Value::from(key));
    }

    #[test]
    fn test_descriptor_deserializes_from_document() {
        let key: GcpMasterKey = serde_json::from_value(json!({
            "projectId": "project",
            "location": "global",
            "keyRing": "ring",
            "keyName": "name",
        }))
        .expect("deserialize");

        assert_eq!(key, GcpMasterKey::new("project", "global", "ring", "name"));
    }
}
