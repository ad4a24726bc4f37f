//! Google Cloud Storage object addressing.
//!
//! Builds and parses `gs://` URIs for objects in the configured bucket and
//! derives their public download URLs. No requests are made from here.

use crate::error::GcsError;

/// Host serving publicly readable objects.
pub const PUBLIC_STORAGE_HOST: &str = "https://storage.googleapis.com";

/// Parsed GCS URI components.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GcsUri {
    /// Bucket name
    pub bucket: String,
    /// Object path within the bucket
    pub object: String,
}

impl GcsUri {
    /// Address `object` inside `bucket`.
    ///
    /// A leading `/` on the object path is dropped so that `"exports/a.pdf"`
    /// and `"/exports/a.pdf"` name the same object.
    ///
    /// # Errors
    /// Returns `GcsError::InvalidUri` if the bucket or object is empty.
    pub fn new(bucket: impl Into<String>, object: impl AsRef<str>) -> Result<Self, GcsError> {
        let bucket = bucket.into();
        let object = object.as_ref().trim_start_matches('/');

        if bucket.trim().is_empty() {
            return Err(GcsError::invalid_uri("Bucket name cannot be empty"));
        }
        if bucket.contains('/') {
            return Err(GcsError::InvalidUri(format!(
                "Bucket name cannot contain '/': {}",
                bucket
            )));
        }
        if object.is_empty() {
            return Err(GcsError::InvalidUri(format!(
                "Object path cannot be empty in bucket {}",
                bucket
            )));
        }

        Ok(Self {
            bucket,
            object: object.to_string(),
        })
    }

    /// Parse a `gs://bucket/path` URI into components.
    ///
    /// # Errors
    /// Returns `GcsError::InvalidUri` if the URI format is invalid.
    pub fn parse(uri: &str) -> Result<Self, GcsError> {
        let rest = uri
            .strip_prefix("gs://")
            .ok_or_else(|| GcsError::InvalidUri(format!("URI must start with 'gs://': {}", uri)))?;

        let (bucket, object) = rest
            .split_once('/')
            .ok_or_else(|| GcsError::InvalidUri(format!("URI must contain bucket and path: {}", uri)))?;

        if bucket.is_empty() {
            return Err(GcsError::invalid_uri("Bucket name cannot be empty"));
        }
        if object.is_empty() {
            return Err(GcsError::InvalidUri(format!("URI must name an object: {}", uri)));
        }

        Ok(Self {
            bucket: bucket.to_string(),
            object: object.to_string(),
        })
    }

    /// Public HTTPS URL for this object.
    ///
    /// Each path segment is percent-encoded; the `/` separators are kept.
    pub fn public_url(&self) -> String {
        let object = self
            .object
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        format!("{}/{}/{}", PUBLIC_STORAGE_HOST, self.bucket, object)
    }
}

impl std::fmt::Display for GcsUri {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "gs://{}/{}", self.bucket, self.object)
    }
}

impl std::str::FromStr for GcsUri {
    type Err = GcsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
