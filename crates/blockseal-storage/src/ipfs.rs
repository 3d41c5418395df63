//! IPFS block store over the node's HTTP RPC API (`/api/v0`)
//!
//! - put: `POST /api/v0/block/put?cid-codec=dag-pb&mhtype=sha2-256`, multipart
//!   field `data`, answers `{"Key": "<cid>", "Size": n}`
//! - get: `POST /api/v0/block/get?arg=<cid>`, answers the raw block
//! - health: `POST /api/v0/version`
//!
//! Errors come back as a non-2xx status with `{"Message": ..., "Code": ..., "Type": "error"}`.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use blockseal_core::Address;

use crate::error::{StorageError, StorageResult};
use crate::store::BlockStore;

#[derive(Debug, Deserialize)]
struct BlockPutResponse {
    #[serde(rename = "Key")]
    key: String,
    #[serde(rename = "Size", default)]
    size: u64,
}

#[derive(Debug, Deserialize)]
struct VersionResponse {
    #[serde(rename = "Version")]
    version: String,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(rename = "Message")]
    message: String,
}

pub struct IpfsBlockStore {
    client: Client,
    api_url: String,
}

impl IpfsBlockStore {
    pub fn new(api_url: &str) -> Self {
        Self::with_client(Client::new(), api_url)
    }

    pub fn with_client(client: Client, api_url: &str) -> Self {
        Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self, command: &str) -> String {
        format!("{}/api/v0/{command}", self.api_url)
    }

    /// Read the body of a response, turning non-2xx statuses into errors.
    async fn read_body(response: Response) -> StorageResult<Vec<u8>> {
        let status = response.status();
        let body = response.bytes().await?;
        if !status.is_success() {
            return Err(StorageError::Backend(error_message(status.as_u16(), &body)));
        }
        Ok(body.to_vec())
    }
}

/// Extract the node's error message from a failed response body.
fn error_message(status: u16, body: &[u8]) -> String {
    if let Ok(err) = serde_json::from_slice::<ApiErrorBody>(body) {
        return err.message;
    }
    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        format!("HTTP {status}")
    } else {
        format!("HTTP {status}: {text}")
    }
}

fn parse_put_response(body: &[u8]) -> StorageResult<BlockPutResponse> {
    serde_json::from_slice(body)
        .map_err(|e| StorageError::Backend(format!("unexpected block/put response: {e}")))
}

/// A CID is a single path-free token; anything else is refused before it
/// reaches the query string.
fn validate_cid(address: &Address) -> StorageResult<()> {
    let s = address.as_str();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(StorageError::InvalidAddress(format!("not a CID: {s:?}")));
    }
    Ok(())
}

#[async_trait]
impl BlockStore for IpfsBlockStore {
    async fn put(&self, block: &[u8]) -> StorageResult<Address> {
        let form = Form::new().part("data", Part::bytes(block.to_vec()).file_name("block"));
        let response = self
            .client
            .post(self.endpoint("block/put"))
            .query(&[("cid-codec", "dag-pb"), ("mhtype", "sha2-256")])
            .multipart(form)
            .send()
            .await?;

        let body = Self::read_body(response).await?;
        let put = parse_put_response(&body)?;
        debug!(cid = %put.key, bytes = put.size, "stored block on IPFS");
        Ok(Address::new(put.key))
    }

    async fn get(&self, address: &Address) -> StorageResult<Vec<u8>> {
        validate_cid(address)?;
        let response = self
            .client
            .post(self.endpoint("block/get"))
            .query(&[("arg", address.as_str())])
            .send()
            .await?;

        let block = Self::read_body(response).await?;
        debug!(cid = %address, bytes = block.len(), "fetched block from IPFS");
        Ok(block)
    }

    async fn check_health(&self) -> StorageResult<()> {
        let response = self.client.post(self.endpoint("version")).send().await?;
        let body = Self::read_body(response).await?;
        let version: VersionResponse = serde_json::from_slice(&body)
            .map_err(|e| StorageError::Backend(format!("unexpected version response: {e}")))?;
        debug!(version = %version.version, "IPFS node reachable");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("ipfs ({})", self.api_url)
    }
}
