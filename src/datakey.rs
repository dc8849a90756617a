//! Options for creating a data key
//!
//! A data key is the key record used to encrypt individual fields. It is created by a
//! key vault operation (see [`crate::DataKeyCreator`]) which takes a
//! [`DataKeyOptionsBuilder`], resolves it into [`DataKeyOptions`] and acts on the result.

use crate::error::Result;
use crate::options::{new_options, Lister, Setter};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{Map, Value};
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Options used to create a new data key
///
/// Every field is `None` until a setter assigns it. An explicitly empty value
/// (`Some(vec![])`) is kept distinct from an unset one so the key vault can decide
/// how to treat each.
#[derive(Clone, Default, PartialEq)]
pub struct DataKeyOptions {
    /// KMS-specific descriptor of the master key that wraps the new data key
    pub master_key: Option<Value>,
    /// Alternate names that can be used to reference the key instead of its id
    pub key_alt_names: Option<Vec<String>>,
    /// Custom key material for the data key; generated randomly when unset
    pub key_material: Option<Vec<u8>>,
}

impl DataKeyOptions {
    /// Returns the options as the document handed to the key vault
    ///
    /// Unset fields are omitted. Key material is encoded as standard base64; the
    /// encoded copy is not zeroized, so callers holding the document own its cleanup.
    pub fn to_document(&self) -> Map<String, Value> {
        let mut doc = Map::new();

        if let Some(master_key) = &self.master_key {
            doc.insert("masterKey".to_string(), master_key.clone());
        }
        if let Some(names) = &self.key_alt_names {
            doc.insert("keyAltNames".to_string(), Value::from(names.clone()));
        }
        if let Some(material) = &self.key_material {
            doc.insert("keyMaterial".to_string(), Value::String(STANDARD.encode(material)));
        }

        doc
    }
}

impl fmt::Debug for DataKeyOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let material = self
            .key_material
            .as_ref()
            .map(|m| format!("<redacted {} bytes>", m.len()));

        f.debug_struct("DataKeyOptions")
            .field("master_key", &self.master_key)
            .field("key_alt_names", &self.key_alt_names)
            .field("key_material", &material)
            .finish()
    }
}

impl Drop for DataKeyOptions {
    fn drop(&mut self) {
        if let Some(material) = self.key_material.as_mut() {
            material.zeroize();
        }
    }
}

/// Creates a new, empty [`DataKeyOptionsBuilder`]
pub fn data_key() -> DataKeyOptionsBuilder {
    DataKeyOptionsBuilder::new()
}

/// Collects the options for a data key creation call
///
/// Setters record deferred assignments and return the builder so calls can be
/// chained. Nothing is validated here; the key vault resolves the recorded setters
/// with [`DataKeyOptionsBuilder::build`] or [`new_options`] when it creates the key.
/// Setting the same option twice keeps the last value.
///
/// # Example
/// ```
/// use fleoptions::{data_key, AwsMasterKey};
///
/// let mut builder = data_key();
/// builder
///     .set_master_key(AwsMasterKey::new(
///         "us-east-1",
///         "arn:aws:kms:us-east-1:123456789012:key/abcd-1234",
///     ))
///     .set_key_alt_names(["billing"]);
///
/// let options = builder.build().unwrap();
/// assert_eq!(options.key_alt_names, Some(vec!["billing".to_string()]));
/// assert!(options.key_material.is_none());
/// ```
#[derive(Default)]
pub struct DataKeyOptionsBuilder {
    setters: Vec<Setter<DataKeyOptions>>,
}

impl DataKeyOptionsBuilder {
    /// Creates a builder with no recorded setters
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the KMS-specific key used to encrypt the new data key
    ///
    /// Not applicable to the local KMS provider. For AWS, Azure and GCP the value is
    /// required and must be a document; [`crate::kms`] has typed descriptors that
    /// convert into the expected shape. The value is stored as given, except that
    /// `Value::Null` leaves the master key unset.
    pub fn set_master_key(&mut self, master_key: impl Into<Value>) -> &mut Self {
        let master_key = match master_key.into() {
            Value::Null => None,
            value => Some(value),
        };
        self.setters.push(Box::new(move |opts: &mut DataKeyOptions| {
            opts.master_key = master_key.clone();
            Ok(())
        }));
        self
    }

    /// Sets alternate names used to reference the key
    ///
    /// Names are kept in the given order. Duplicates are passed through to the key vault.
    pub fn set_key_alt_names<I>(&mut self, key_alt_names: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let key_alt_names: Vec<String> = key_alt_names.into_iter().map(Into::into).collect();
        self.setters.push(Box::new(move |opts: &mut DataKeyOptions| {
            opts.key_alt_names = Some(key_alt_names.clone());
            Ok(())
        }));
        self
    }

    /// Sets custom key material for the data key
    ///
    /// When omitted the key vault generates the material from a cryptographically
    /// secure random source. An empty buffer is recorded as-is; `None` leaves the
    /// material unset.
    pub fn set_key_material(
        &mut self,
        key_material: impl Into<Option<Vec<u8>>>,
    ) -> &mut Self {
        let key_material = key_material.into().map(Zeroizing::new);
        self.setters.push(Box::new(move |opts: &mut DataKeyOptions| {
            if let Some(previous) = opts.key_material.as_mut() {
                previous.zeroize();
            }
            opts.key_material = key_material.as_ref().map(|m| m.to_vec());
            Ok(())
        }));
        self
    }

    /// Number of recorded setters
    pub fn len(&self) -> usize {
        self.setters.len()
    }

    /// Returns true if no setter has been recorded
    pub fn is_empty(&self) -> bool {
        self.setters.is_empty()
    }

    /// Applies the recorded setters to fresh options
    pub fn build(&self) -> Result<DataKeyOptions> {
        new_options::<DataKeyOptions>(&[self])
    }
}

impl Lister<DataKeyOptions> for DataKeyOptionsBuilder {
    fn list(&self) -> &[Setter<DataKeyOptions>] {
        &self.setters
    }
}

impl fmt::Debug for DataKeyOptionsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DataKeyOptionsBuilder")
            .field("setters", &self.setters.len())
            .finish()
    }
}
