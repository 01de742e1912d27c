use clap::Parser;
use std::{net::SocketAddr, path::PathBuf};

#[derive(Clone, Debug, Parser)]
pub struct QuillApiConfig {
    #[clap(
        short,
        long,
        env = "QUILL_API_BIND_ADDR",
        default_value = "0.0.0.0:4000"
    )]
    pub bind_addr: SocketAddr,

    #[clap(
        long,
        env = "QUILL_API_PUBLIC_URL",
        default_value = "http://localhost:4000"
    )]
    pub public_url: String,

    #[clap(long, default_value_t = false)]
    pub dump_openapi: bool,

    #[clap(
        long,
        env = "QUILL_API_MONGODB_URI",
        default_value = "mongodb://localhost:27017/quill"
    )]
    pub mongodb_uri: String,

    /// Hex-encoded 32-byte secret used to sign session cookies.
    ///
    /// Provide the secret inline. For security, prefer using
    /// `session_secret_file` instead of embedding the secret directly.
    ///
    /// Mutually exclusive with `session_secret_file`.
    #[clap(long, env = "QUILL_API_SESSION_SECRET")]
    pub session_secret: Option<String>,

    /// Path to a file holding the hex-encoded 32-byte session secret.
    ///
    /// Generate one using:
    /// ```bash
    /// openssl rand -hex 32 > session_secret
    /// ```
    ///
    /// Mutually exclusive with `session_secret`.
    #[clap(long, env = "QUILL_API_SESSION_SECRET_FILE")]
    pub session_secret_file: Option<PathBuf>,
}

impl QuillApiConfig {
    /// Decode the session secret from either inline config or file.
    ///
    /// Checks `session_secret` first (inline hex), then falls back to
    /// reading from `session_secret_file`. Returns an error if neither is
    /// configured, or the value is not exactly 32 hex-encoded bytes.
    pub fn get_session_secret(&self) -> anyhow::Result<[u8; 32]> {
        let encoded = if let Some(ref secret) = self.session_secret {
            secret.clone()
        } else if let Some(ref path) = self.session_secret_file {
            std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("failed to read session secret file: {}", e))?
        } else {
            return Err(anyhow::anyhow!(
                "no session secret configured (set QUILL_API_SESSION_SECRET or QUILL_API_SESSION_SECRET_FILE)"
            ));
        };

        let bytes = hex::decode(encoded.trim())
            .map_err(|e| anyhow::anyhow!("session secret is not valid hex: {}", e))?;

        bytes
            .as_slice()
            .try_into()
            .map_err(|_| anyhow::anyhow!("session secret must be exactly 32 bytes"))
    }

    /// Whether session cookies should carry the `Secure` flag.
    pub fn cookies_secure(&self) -> bool {
        self.public_url.starts_with("https://")
    }
}
