//! # Field-Level Encryption Options
//!
//! Configuration for creating data keys in a client-side field-level encryption
//! setup.
//!
//! A data key is the key record that encrypts individual document fields. It is
//! wrapped by a master key held in a KMS provider (local, AWS, Azure or GCP). This
//! crate only collects the options for creating one: the master key descriptor,
//! alternate names and optional custom key material. Creating the key, talking to
//! the KMS and storing the key document belong to an implementation of
//! [`DataKeyCreator`].
//!
//! Options are collected by [`DataKeyOptionsBuilder`], which records each setter call
//! as a deferred mutation. The consumer resolves the builder into [`DataKeyOptions`]
//! when it needs them, applying the mutations in call order and stopping at the
//! first one that fails.
//!
//! ## Basic Usage
//!
//! ```rust
//! use fleoptions::{data_key, AwsMasterKey, KmsProvider};
//!
//! # fn example() -> fleoptions::Result<()> {
//! let provider: KmsProvider = "aws".parse()?;
//!
//! let mut builder = data_key();
//! builder
//!     .set_master_key(AwsMasterKey::new(
//!         "us-east-1",
//!         "arn:aws:kms:us-east-1:123456789012:key/abcd-1234",
//!     ))
//!     .set_key_alt_names(["altname1"]);
//!
//! // The key vault resolves the builder when it creates the key
//! let options = builder.build()?;
//! assert!(provider.requires_master_key());
//! assert_eq!(options.key_alt_names, Some(vec!["altname1".to_string()]));
//! assert!(options.key_material.is_none());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod datakey;
pub mod error;
pub mod kms;
pub mod options;

// Re-export key types
pub use crate::datakey::{data_key, DataKeyOptions, DataKeyOptionsBuilder};
pub use crate::error::{Error, Result};
pub use crate::kms::{AwsMasterKey, AzureMasterKey, GcpMasterKey, KmsProvider};
pub use crate::options::{apply_setters, new_options, Lister, Setter};

use async_trait::async_trait;
use std::fmt;

/// Key vault operation that creates data keys
///
/// Implementations resolve `options` (for example with [`DataKeyOptionsBuilder::build`]),
/// wrap new key material with the master key described by the options and store the
/// resulting key document. A failed resolution must abort the creation.
#[async_trait]
pub trait DataKeyCreator: Send + Sync + fmt::Debug {
    /// Creates a data key with the given KMS provider and returns the id of the new key
    async fn create_data_key(
        &self,
        kms_provider: KmsProvider,
        options: &DataKeyOptionsBuilder,
    ) -> Result<Vec<u8>>;
}
