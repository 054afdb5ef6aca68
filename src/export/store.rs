use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    sync::Mutex,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use anyhow::Context;

use crate::foundation::error::{SlideError, SlideResult};

/// Object storage the exporter reads source images from and uploads frames to.
pub trait ObjectStore: Send + Sync {
    /// Time-boxed URL for reading `image_ref`.
    fn signed_url(&self, image_ref: &str, ttl: Duration) -> SlideResult<String>;

    /// Store `bytes` under `key` and return the object's URL.
    fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> SlideResult<String>;
}

/// Downloads source images.
pub trait SourceFetcher: Send + Sync {
    /// Fetch `url`, giving up after `timeout`.
    fn fetch(&self, url: &str, timeout: Duration) -> SlideResult<Vec<u8>>;
}

/// An uploaded object.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoredObject {
    /// Object key.
    pub key: String,
    /// Payload.
    pub bytes: Vec<u8>,
    /// MIME type given at upload.
    pub content_type: String,
}

/// Milliseconds since the Unix epoch.
pub fn unix_millis() -> SlideResult<u64> {
    let d = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .context("system clock before unix epoch")?;
    Ok(u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
}

fn expires_at(ttl: Duration) -> SlideResult<u64> {
    let ttl_ms = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX);
    Ok(unix_millis()?.saturating_add(ttl_ms))
}

/// Split `url` into the part before its last `?` and its `expires` value, if any.
pub(crate) fn split_expiry(url: &str) -> SlideResult<(&str, Option<u64>)> {
    let Some((base, query)) = url.rsplit_once('?') else {
        return Ok((url, None));
    };
    let mut expires = None;
    for pair in query.split('&') {
        if let Some(v) = pair.strip_prefix("expires=") {
            let ms = v
                .parse::<u64>()
                .map_err(|_| SlideError::transport(format!("bad expires value in '{url}'")))?;
            expires = Some(ms);
        }
    }
    Ok((base, expires))
}

/// Fail when a signed URL is past its expiry.
pub(crate) fn check_not_expired(url: &str, expires: Option<u64>) -> SlideResult<()> {
    if let Some(at) = expires
        && unix_millis()? > at
    {
        return Err(SlideError::transport(format!("signed url expired: {url}")));
    }
    Ok(())
}

/// Normalize a store-relative object path.
///
/// Uses `/` separators and drops `.` segments. Absolute paths, `..` and the URL delimiters `?`
/// and `#` are rejected.
pub(crate) fn normalize_rel_path(source: &str) -> SlideResult<String> {
    let s = source.replace('\\', "/");
    if s.contains(['?', '#']) {
        return Err(SlideError::validation(format!(
            "object reference '{source}' must not contain '?' or '#'"
        )));
    }
    if s.starts_with('/') {
        return Err(SlideError::validation(format!(
            "object reference '{source}' must be relative"
        )));
    }
    if s.is_empty() {
        return Err(SlideError::validation("object reference must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SlideError::validation(format!(
                "object reference '{source}' must not contain '..'"
            )));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SlideError::validation(format!(
            "object reference '{source}' has no file name"
        )));
    }

    Ok(out.join("/"))
}

/// Directory-backed store. Source images and uploads are plain files under `root`.
#[derive(Clone, Debug)]
pub struct DirStore {
    root: PathBuf,
}

impl DirStore {
    /// Store rooted at `root`; the directory is created on first upload.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Filesystem path of the object at `key`.
    pub fn path_for(&self, key: &str) -> SlideResult<PathBuf> {
        let rel = normalize_rel_path(key)?;
        Ok(self.root.join(rel))
    }

    fn file_url(path: &Path) -> SlideResult<String> {
        let abs = std::path::absolute(path)
            .with_context(|| format!("resolve '{}'", path.display()))?;
        Ok(format!("file://{}", abs.display()))
    }
}

impl ObjectStore for DirStore {
    fn signed_url(&self, image_ref: &str, ttl: Duration) -> SlideResult<String> {
        let path = self.path_for(image_ref)?;
        Ok(format!(
            "{}?expires={}",
            Self::file_url(&path)?,
            expires_at(ttl)?
        ))
    }

    fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> SlideResult<String> {
        let path = self.path_for(key)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SlideError::transport(format!("create '{}': {e}", parent.display()))
            })?;
        }
        std::fs::write(&path, &bytes)
            .map_err(|e| SlideError::transport(format!("write '{}': {e}", path.display())))?;
        tracing::debug!(key, content_type, bytes = bytes.len(), "stored object");
        Self::file_url(&path)
    }
}

/// In-memory store for tests and dry runs. Serves its own `mem://` URLs.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    sources: Mutex<BTreeMap<String, Vec<u8>>>,
    uploads: Mutex<Vec<StoredObject>>,
}

impl InMemoryStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `bytes` readable under `image_ref`, normalized the same way lookups are.
    pub fn insert_source(&self, image_ref: &str, bytes: Vec<u8>) -> SlideResult<()> {
        let key = normalize_rel_path(image_ref)?;
        self.sources
            .lock()
            .map_err(|_| SlideError::transport("in-memory store lock poisoned"))?
            .insert(key, bytes);
        Ok(())
    }

    /// Uploads in completion order.
    pub fn uploads(&self) -> Vec<StoredObject> {
        self.uploads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Upload stored under `key`, if any.
    pub fn upload(&self, key: &str) -> Option<StoredObject> {
        self.uploads
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .iter()
            .find(|o| o.key == key)
            .cloned()
    }
}

impl ObjectStore for InMemoryStore {
    fn signed_url(&self, image_ref: &str, ttl: Duration) -> SlideResult<String> {
        let rel = normalize_rel_path(image_ref)?;
        Ok(format!("mem://{rel}?expires={}", expires_at(ttl)?))
    }

    fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> SlideResult<String> {
        let key = normalize_rel_path(key)?;
        let url = format!("mem://{key}");
        let mut uploads = self
            .uploads
            .lock()
            .map_err(|_| SlideError::transport("in-memory store lock poisoned"))?;
        uploads.retain(|o| o.key != key);
        uploads.push(StoredObject {
            key,
            bytes,
            content_type: content_type.to_owned(),
        });
        Ok(url)
    }
}

impl SourceFetcher for InMemoryStore {
    fn fetch(&self, url: &str, _timeout: Duration) -> SlideResult<Vec<u8>> {
        let (base, expires) = split_expiry(url)?;
        let rel = base
            .strip_prefix("mem://")
            .ok_or_else(|| SlideError::transport(format!("not an in-memory url: {url}")))?;
        check_not_expired(url, expires)?;
        let sources = self
            .sources
            .lock()
            .map_err(|_| SlideError::transport("in-memory store lock poisoned"))?;
        sources
            .get(rel)
            .cloned()
            .ok_or_else(|| SlideError::transport(format!("no object at {base}")))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/export/store.rs"]
mod tests;
