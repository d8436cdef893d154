use std::fs::{self, File};
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use reqwest::blocking::Client;
use reqwest::{Method, Url};
use tracing::{debug, info};

use crate::shared::config::BucketSettings;
use crate::storage::errors::StorageError;
use crate::storage::list_objects::parse_list_page;
use crate::storage::object_store::{BucketCredentials, ObjectStore};
use crate::storage::sigv4::{
    CanonicalRequest, EMPTY_PAYLOAD_SHA256, SigV4Signer, canonical_query_string, sha256_hex,
    uri_encode,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

/// Path-style S3 client over plain signed HTTP, sized for the two
/// transfer patterns the pipeline needs. Works against MinIO and AWS
/// alike.
pub struct S3ObjectStore {
    bucket: String,
    endpoint: Url,
    client: Client,
    signer: SigV4Signer,
}

impl S3ObjectStore {
    /// Resolves credentials from the environment variables named in
    /// `settings` and builds a client for that bucket.
    pub fn connect(settings: &BucketSettings) -> Result<Self, StorageError> {
        Self::new(BucketCredentials::from_env(settings)?)
    }

    pub fn new(creds: BucketCredentials) -> Result<Self, StorageError> {
        let endpoint = Url::parse(&creds.endpoint).map_err(|e| StorageError::InvalidEndpoint {
            endpoint: creds.endpoint.clone(),
            reason: e.to_string(),
        })?;
        if endpoint.host_str().is_none() {
            return Err(StorageError::InvalidEndpoint {
                endpoint: creds.endpoint.clone(),
                reason: "endpoint has no host".to_string(),
            });
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            bucket: creds.bucket,
            endpoint,
            client,
            signer: SigV4Signer::new(creds.access_key, creds.secret_key),
        })
    }

    /// Lists every key under `prefix`, following continuation tokens
    /// until the listing is complete.
    pub fn list_keys_in_prefix(&self, prefix: &str) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let mut pairs = vec![("list-type", "2"), ("prefix", prefix)];
            if let Some(t) = token.as_deref() {
                pairs.push(("continuation-token", t));
            }
            let url = self.bucket_url(&canonical_query_string(&pairs))?;
            let body = self
                .execute(Method::GET, url, EMPTY_PAYLOAD_SHA256, None)?
                .text()?;
            let page = parse_list_page(&body)?;
            keys.extend(page.keys);
            match page.next_token {
                Some(t) => token = Some(t),
                None => break,
            }
        }
        Ok(keys)
    }

    fn get_object_to_file(&self, key: &str, target: &Path) -> Result<(), StorageError> {
        let url = self.object_url(key)?;
        let mut response = self.execute(Method::GET, url, EMPTY_PAYLOAD_SHA256, None)?;
        let mut file = File::create(target)?;
        let bytes = response.copy_to(&mut file)?;
        debug!(target: "kpidata::storage", key, bytes, path = %target.display(), "downloaded object");
        Ok(())
    }

    fn put_object(&self, key: &str, body: Vec<u8>) -> Result<(), StorageError> {
        let payload_hash = sha256_hex(&body);
        let url = self.object_url(key)?;
        let bytes = body.len();
        self.execute(Method::PUT, url, &payload_hash, Some(body))?;
        debug!(target: "kpidata::storage", key, bytes, "uploaded object");
        Ok(())
    }

    fn execute(
        &self,
        method: Method,
        url: Url,
        payload_hash: &str,
        body: Option<Vec<u8>>,
    ) -> Result<reqwest::blocking::Response, StorageError> {
        let now = Utc::now();
        let headers = vec![
            ("host".to_string(), host_header(&url)),
            ("x-amz-content-sha256".to_string(), payload_hash.to_string()),
            (
                "x-amz-date".to_string(),
                now.format("%Y%m%dT%H%M%SZ").to_string(),
            ),
        ];
        let authorization = self.signer.authorization(
            &CanonicalRequest {
                method: method.as_str(),
                path: url.path(),
                query: url.query().unwrap_or(""),
                headers: &headers,
                payload_hash,
            },
            now,
        );

        let context = format!("{} {}", method, url.path());
        let mut request = self.client.request(method, url);
        // reqwest derives the host header from the URL; re-sending it
        // would be redundant.
        for (name, value) in headers.iter().filter(|(name, _)| name != "host") {
            request = request.header(name.as_str(), value.as_str());
        }
        request = request.header("authorization", authorization);
        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            debug!(target: "kpidata::storage", status = status.as_u16(), %context, body = %snippet, "request rejected");
            return Err(StorageError::UnexpectedStatus {
                status: status.as_u16(),
                context,
            });
        }
        Ok(response)
    }

    /// URL for one object, path-style: `{endpoint}/{bucket}/{key}`.
    /// The path is encoded here so the signed canonical path and the
    /// wire path are the same string.
    pub(crate) fn object_url(&self, key: &str) -> Result<Url, StorageError> {
        self.url_with_path_and_query(
            &format!(
                "/{}/{}",
                uri_encode(&self.bucket, true),
                uri_encode(key, false)
            ),
            None,
        )
    }

    pub(crate) fn bucket_url(&self, query: &str) -> Result<Url, StorageError> {
        self.url_with_path_and_query(
            &format!("/{}", uri_encode(&self.bucket, true)),
            Some(query),
        )
    }

    fn url_with_path_and_query(
        &self,
        path: &str,
        query: Option<&str>,
    ) -> Result<Url, StorageError> {
        let base = self.endpoint.as_str().trim_end_matches('/');
        let full = match query {
            Some(q) if !q.is_empty() => format!("{base}{path}?{q}"),
            _ => format!("{base}{path}"),
        };
        Url::parse(&full).map_err(|e| StorageError::InvalidEndpoint {
            endpoint: full,
            reason: e.to_string(),
        })
    }
}

impl ObjectStore for S3ObjectStore {
    fn download_files_in_prefix_to_dir(
        &self,
        remote_prefix: &str,
        local_dir: &Path,
    ) -> Result<usize, StorageError> {
        fs::create_dir_all(local_dir)?;
        let keys = self.list_keys_in_prefix(remote_prefix)?;
        let mut fetched = 0;
        for key in &keys {
            // Folder markers list under the prefix but hold no data.
            let Some(name) = key.rsplit('/').next().filter(|n| !n.is_empty()) else {
                continue;
            };
            self.get_object_to_file(key, &local_dir.join(name))?;
            fetched += 1;
        }
        info!(
            target: "kpidata::storage",
            prefix = remote_prefix,
            fetched,
            dir = %local_dir.display(),
            "downloaded prefix"
        );
        Ok(fetched)
    }

    fn upload_file_to_s3(
        &self,
        filepath: &Path,
        s3_prefix: &str,
        s3_key: &str,
    ) -> Result<(), StorageError> {
        let body = fs::read(filepath)?;
        self.put_object(&join_key(s3_prefix, s3_key), body)?;
        info!(
            target: "kpidata::storage",
            prefix = s3_prefix,
            key = s3_key,
            file = %filepath.display(),
            "uploaded file"
        );
        Ok(())
    }
}

/// Joins a prefix and key with exactly one `/` between them.
pub(crate) fn join_key(prefix: &str, key: &str) -> String {
    format!(
        "{}/{}",
        prefix.trim_end_matches('/'),
        key.trim_start_matches('/')
    )
}

pub(crate) fn host_header(url: &Url) -> String {
    let host = url.host_str().unwrap_or_default();
    match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    }
}
