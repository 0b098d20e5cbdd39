//! TLS material loading for the HTTPS listener.
//!
//! Both files are read up front so a bad path or a file that is not PEM
//! fails with a message naming which of the two is at fault.

use std::io;
use std::path::Path;

use axum_server::tls_rustls::RustlsConfig;

use crate::config::schema::TlsPaths;

const PEM_MARKER: &[u8] = b"-----BEGIN ";

/// Build the rustls server config from the configured certificate chain and key.
pub async fn load_tls_config(paths: TlsPaths<'_>) -> io::Result<RustlsConfig> {
    let cert = read_pem(paths.cert, "certificate").await?;
    let key = read_pem(paths.key, "private key").await?;

    RustlsConfig::from_pem(cert, key).await.map_err(|e| {
        io::Error::new(
            e.kind(),
            format!(
                "invalid TLS material ({} / {}): {e}",
                paths.cert.display(),
                paths.key.display()
            ),
        )
    })
}

async fn read_pem(path: &Path, what: &str) -> io::Result<Vec<u8>> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        io::Error::new(e.kind(), format!("TLS {what} {}: {e}", path.display()))
    })?;

    if !contains(&bytes, PEM_MARKER) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("TLS {what} {} is not PEM encoded", path.display()),
        ));
    }
    Ok(bytes)
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|window| window == needle)
}
