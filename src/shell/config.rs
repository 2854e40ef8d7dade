// Storage configuration for the binary.
//
// Responsibilities
// - Read the storage location and credentials from arguments or the environment.
// - Build the matching `object_store` backend. Credentials stop here and never reach the
//   watermark use cases.
//
// Supported locations
// - memory://            in process, lost on exit
// - s3://bucket/prefix   Amazon S3 or an S3 compatible endpoint
// - file:///abs/path     local filesystem (a plain path works too)

use anyhow::{Context, bail};
use clap::Args;
use object_store::ObjectStore;
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::prefix::PrefixStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Args)]
pub struct StorageArgs {
    /// Where the watermark log lives.
    #[arg(long = "storage-url", env = "WATERMARK_STORAGE_URL", default_value = ".watermarks")]
    pub url: String,

    #[arg(long = "s3-region", env = "AWS_REGION")]
    pub region: Option<String>,

    /// Endpoint for S3 compatible services such as MinIO.
    #[arg(long = "s3-endpoint", env = "AWS_ENDPOINT_URL")]
    pub endpoint: Option<String>,

    #[arg(long = "s3-access-key-id", env = "AWS_ACCESS_KEY_ID", hide_env_values = true)]
    pub access_key_id: Option<String>,

    #[arg(long = "s3-secret-access-key", env = "AWS_SECRET_ACCESS_KEY", hide_env_values = true)]
    pub secret_access_key: Option<String>,

    #[arg(long = "s3-allow-http", env = "WATERMARK_ALLOW_HTTP")]
    pub allow_http: bool,
}

pub fn build_object_store(args: &StorageArgs) -> anyhow::Result<Arc<dyn ObjectStore>> {
    let url = args.url.trim();
    if url == "memory://" {
        return Ok(Arc::new(InMemory::new()));
    }
    if let Some(location) = url.strip_prefix("s3://") {
        return build_s3(args, location);
    }
    build_local(url.strip_prefix("file://").unwrap_or(url))
}

pub fn parse_bucket_and_prefix(location: &str) -> anyhow::Result<(String, String)> {
    let (bucket, prefix) = location.split_once('/').unwrap_or((location, ""));
    if bucket.is_empty() {
        bail!("S3 storage url requires a bucket name: s3://{location}");
    }
    Ok((bucket.to_string(), prefix.trim_matches('/').to_string()))
}

fn build_s3(args: &StorageArgs, location: &str) -> anyhow::Result<Arc<dyn ObjectStore>> {
    let (bucket, prefix) = parse_bucket_and_prefix(location)?;
    let mut builder = AmazonS3Builder::new().with_bucket_name(&bucket);

    builder = builder.with_region(args.region.as_deref().unwrap_or("us-east-1"));
    if let Some(endpoint) = &args.endpoint {
        // Path style requests for custom endpoints like MinIO
        builder = builder
            .with_endpoint(endpoint)
            .with_virtual_hosted_style_request(false);
    }
    if args.allow_http {
        builder = builder.with_allow_http(true);
    }
    if let Some(access_key_id) = &args.access_key_id {
        builder = builder.with_access_key_id(access_key_id);
    }
    if let Some(secret_access_key) = &args.secret_access_key {
        builder = builder.with_secret_access_key(secret_access_key);
    }

    let store = builder
        .build()
        .with_context(|| format!("failed to configure S3 bucket '{bucket}'"))?;
    tracing::info!(bucket = %bucket, prefix = %prefix, "using S3 storage");

    if prefix.is_empty() {
        Ok(Arc::new(store))
    } else {
        Ok(Arc::new(PrefixStore::new(store, prefix.as_str())))
    }
}

fn build_local(path: &str) -> anyhow::Result<Arc<dyn ObjectStore>> {
    if path.trim().is_empty() {
        bail!("local storage requires a non-empty directory");
    }
    let path = PathBuf::from(path);
    std::fs::create_dir_all(&path)
        .with_context(|| format!("failed to create storage directory '{}'", path.display()))?;
    let absolute_path = path
        .canonicalize()
        .with_context(|| format!("failed to resolve '{}'", path.display()))?;
    tracing::info!(path = %absolute_path.display(), "using local storage");
    Ok(Arc::new(LocalFileSystem::new_with_prefix(absolute_path)?))
}
