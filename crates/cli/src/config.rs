use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Args;
use layer1_signer::{HttpSigner, RsaSigner, SigningIdentity, load_private_key};
use reqwest::Url;

use crate::observability::LogFormat;

pub const DEFAULT_BASE_URL: &str = "https://api.sandbox.layer1.com";

/// Options shared by every command.
#[derive(Debug, Clone, Args)]
pub struct GlobalArgs {
    /// Base URL for the API
    #[arg(long, global = true, env = "LAYER1_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Client id the API knows the signing key by
    #[arg(long, global = true, env = "LAYER1_CLIENT_ID")]
    pub client_id: Option<String>,

    /// Path to the RSA private key (PKCS#8 or PKCS#1 PEM)
    #[arg(long, global = true, env = "LAYER1_KEY_FILE")]
    pub key_file: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long = "timeout", global = true, env = "LAYER1_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// Log output format (logs go to stderr)
    #[arg(long, global = true, env = "LAYER1_LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    pub log_format: LogFormat,
}

/// Validated settings for talking to the API.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub client_id: String,
    pub key_file: PathBuf,
    pub timeout: Duration,
}

impl Config {
    pub fn from_args(args: &GlobalArgs) -> Result<Self> {
        let base_url = normalize_base_url(&args.base_url)?;

        let client_id = match args.client_id.as_deref() {
            Some(id) if !id.is_empty() => id.to_owned(),
            _ => bail!("--client-id is required (or set LAYER1_CLIENT_ID)"),
        };

        let key_file = required_key_file(args)?.to_path_buf();

        if args.timeout_secs == 0 {
            bail!("--timeout must be at least 1 second");
        }

        Ok(Self {
            base_url,
            client_id,
            key_file,
            timeout: Duration::from_secs(args.timeout_secs),
        })
    }

    /// Reads the key file and binds it to the client id.
    pub fn load_signer(&self) -> Result<HttpSigner> {
        let material = read_key_file(&self.key_file)?;
        let identity = SigningIdentity::from_pem(&material, &self.client_id)
            .with_context(|| format!("loading signing key from {}", self.key_file.display()))?;
        Ok(HttpSigner::new(identity))
    }
}

pub fn required_key_file(args: &GlobalArgs) -> Result<&Path> {
    match args.key_file.as_deref() {
        Some(path) if !path.as_os_str().is_empty() => Ok(path),
        _ => bail!("--key-file is required (or set LAYER1_KEY_FILE)"),
    }
}

pub fn read_key_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("failed to read private key from {}", path.display()))
}

/// Loads the key on its own, without a client id.
pub fn load_rsa_signer(path: &Path) -> Result<RsaSigner> {
    let material = read_key_file(path)?;
    let (private_key, _) = load_private_key(&material)
        .with_context(|| format!("loading signing key from {}", path.display()))?;
    Ok(RsaSigner::new(private_key))
}

fn normalize_base_url(raw: &str) -> Result<String> {
    let url = Url::parse(raw).with_context(|| format!("invalid base URL {raw:?}"))?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("base URL must use http or https, got {raw:?}");
    }
    if url.query().is_some() || url.fragment().is_some() {
        bail!("base URL must not carry a query or fragment, got {raw:?}");
    }
    Ok(raw.trim_end_matches('/').to_owned())
}
