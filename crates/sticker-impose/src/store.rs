//! Saved design persistence
//!
//! Designs are stored as JSON records behind the [`ConfigStore`] trait. A
//! record that fails to parse is reported as [`LoadError::Corrupt`] and never
//! partially applied.

use crate::options::DesignConfig;
use crate::types::{ImposeError, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use thiserror::Error;

/// Bytes of the record digest kept in a token
const TOKEN_DIGEST_BYTES: usize = 8;

/// Handle returned by a save, used to load the design back
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StoreToken(String);

impl StoreToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Token derived from the serialized record, so equal designs share a token.
    ///
    /// The token is a SHA-256 prefix, stable across builds and toolchains.
    pub fn for_record(json: &str) -> Self {
        let digest = Sha256::digest(json.as_bytes());
        Self(hex::encode(&digest[..TOKEN_DIGEST_BYTES]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("No saved design for token {0}")]
    NotFound(StoreToken),
    #[error("Saved design is corrupt: {0}")]
    Corrupt(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Where saved designs live
pub trait ConfigStore {
    fn save(&mut self, config: &DesignConfig) -> impl Future<Output = Result<StoreToken>> + Send;
    fn load(
        &self,
        token: &StoreToken,
    ) -> impl Future<Output = std::result::Result<DesignConfig, LoadError>> + Send;
}

fn parse_record(json: &str) -> std::result::Result<DesignConfig, LoadError> {
    DesignConfig::from_json(json).map_err(|e| {
        log::warn!("discarding saved design: {}", e);
        LoadError::Corrupt(e.to_string())
    })
}

/// In-process store
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: HashMap<StoreToken, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a raw record under a token, bypassing serialization
    pub fn insert_raw(&mut self, token: StoreToken, json: impl Into<String>) {
        self.records.insert(token, json.into());
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ConfigStore for MemoryStore {
    async fn save(&mut self, config: &DesignConfig) -> Result<StoreToken> {
        let json = config.to_json()?;
        let token = StoreToken::for_record(&json);
        self.records.insert(token.clone(), json);
        Ok(token)
    }

    async fn load(&self, token: &StoreToken) -> std::result::Result<DesignConfig, LoadError> {
        let json = self
            .records
            .get(token)
            .ok_or_else(|| LoadError::NotFound(token.clone()))?;
        parse_record(json)
    }
}

/// Directory of `{token}.json` files
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open a store, creating the directory if needed
    pub async fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        tokio::fs::create_dir_all(&dir).await?;
        Ok(Self { dir })
    }

    fn record_path(&self, token: &StoreToken) -> Result<PathBuf> {
        let name = token.as_str();
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ImposeError::Config(format!("Invalid store token: {}", name)));
        }
        Ok(self.dir.join(format!("{}.json", name)))
    }
}

impl ConfigStore for FileStore {
    async fn save(&mut self, config: &DesignConfig) -> Result<StoreToken> {
        let json = config.to_json()?;
        let token = StoreToken::for_record(&json);
        let path = self.record_path(&token)?;
        tokio::fs::write(&path, json).await?;
        log::info!("saved design to {}", path.display());
        Ok(token)
    }

    async fn load(&self, token: &StoreToken) -> std::result::Result<DesignConfig, LoadError> {
        let path = self
            .record_path(token)
            .map_err(|_| LoadError::NotFound(token.clone()))?;
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(LoadError::NotFound(token.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        parse_record(&json)
    }
}
