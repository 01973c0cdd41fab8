//! FTP reachability.

use std::io;
use std::net::ToSocketAddrs;
use suppaftp::{FtpError, FtpStream};
use tracing::debug;
use url::Url;

use crate::{HttpClientConfig, HttpClientError, Response, Result};

const ANONYMOUS: &str = "anonymous";

/// Log in anonymously and check that the URL's path exists.
///
/// A path ending in `/` (or none at all) must be a directory that can be
/// entered; anything else must be a file whose size the server reports.
pub(crate) fn probe(url: &Url, config: &HttpClientConfig) -> Result<Response> {
    let host = url
        .host_str()
        .ok_or_else(|| HttpClientError::InvalidUrl(url.to_string()))?;
    let port = url.port_or_known_default().unwrap_or(21);
    let addr = (host, port)
        .to_socket_addrs()
        .map_err(|e| HttpClientError::Connection(e.to_string()))?
        .next()
        .ok_or_else(|| HttpClientError::Connection(format!("no address for {host}")))?;

    debug!(%url, %addr, "probing ftp url");

    let connect_timeout = config.connect_timeout.unwrap_or(config.timeout);
    let mut stream =
        FtpStream::connect_timeout(addr, connect_timeout).map_err(|e| classify(e, config))?;
    stream
        .get_ref()
        .set_read_timeout(Some(config.timeout))
        .map_err(|e| HttpClientError::Connection(e.to_string()))?;

    let checked = check_path(&mut stream, url.path());
    let _ = stream.quit();

    checked.map_err(|e| classify(e, config))?;
    Ok(Response::from_ftp(url.clone()))
}

fn check_path(stream: &mut FtpStream, path: &str) -> std::result::Result<(), FtpError> {
    stream.login(ANONYMOUS, ANONYMOUS)?;
    if path.is_empty() || path.ends_with('/') {
        if path.len() > 1 {
            stream.cwd(path)?;
        }
        return Ok(());
    }
    stream.size(path).map(|_| ())
}

fn classify(error: FtpError, config: &HttpClientConfig) -> HttpClientError {
    match error {
        FtpError::ConnectionError(e)
            if matches!(e.kind(), io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock) =>
        {
            HttpClientError::Timeout(config.timeout)
        }
        FtpError::ConnectionError(e) => HttpClientError::Connection(e.to_string()),
        other => HttpClientError::Ftp(other.to_string()),
    }
}
