//! One LDAP simple-bind round trip against a directory server.

use crate::ber::BerCursor;
use crate::error::{BindError, CodecError};
use crate::messages::{BindRequest, BindResponse, UnbindRequest};
use crate::result_code;
use bytes::BytesMut;
use std::io;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{lookup_host, TcpStream};
use tracing::{debug, info};

const BIND_MESSAGE_ID: i32 = 1;
const UNBIND_MESSAGE_ID: i32 = 2;
const LDAP_PROTOCOL_VERSION: i32 = 3;

/// Authenticate `username`/`password` against the directory at `host:port`
/// with a single simple bind.
///
/// Returns `Ok(true)` when the server answers with result code 0,
/// `Ok(false)` for any other result code (credentials rejected — a normal
/// outcome, not an error). Resolution, transport and response-decoding
/// failures surface as [`BindError`]. The connection is closed on every
/// exit path; a courtesy unbind is written before release whenever the
/// server said anything at all.
pub async fn attempt_login(
    host: &str,
    port: u16,
    username: &str,
    password: &str,
) -> Result<bool, BindError> {
    let mut stream = connect(host, port).await?;
    debug!("Connected to {}:{} for bind as {}", host, port, username);

    let request = BindRequest::new(
        BIND_MESSAGE_ID,
        LDAP_PROTOCOL_VERSION,
        username,
        password.as_bytes(),
    );
    stream.write_all(&request.der()).await?;
    stream.flush().await?;

    let mut buffer = BytesMut::with_capacity(512);
    match read_bind_response(&mut stream, &mut buffer).await {
        Ok(response) => {
            // Courtesy unbind before the connection goes away. The primary
            // result is already decoded, but a write failure here still
            // fails the attempt.
            stream.write_all(&UnbindRequest::new(UNBIND_MESSAGE_ID).der()).await?;
            stream.flush().await?;

            let code = match response.result_code() {
                Some(code) => code,
                None => return Err(BindError::IncompleteResponse),
            };
            if code == result_code::SUCCESS {
                info!("Bind accepted for {}", username);
                Ok(true)
            } else {
                info!(
                    "Bind rejected for {}: result {} ({}), diagnostic: {:?}",
                    username,
                    code,
                    result_code::name(code),
                    response.diagnostic_message().unwrap_or("")
                );
                Ok(false)
            }
        }
        Err(err) => {
            // The transport may be mid-frame, so only send the courtesy
            // unbind if the server said anything at all, and don't let its
            // outcome mask the primary failure.
            if !buffer.is_empty() {
                let unbind = UnbindRequest::new(UNBIND_MESSAGE_ID).der();
                if let Err(unbind_err) = stream.write_all(&unbind).await {
                    debug!("Unbind after failed bind parse not delivered: {}", unbind_err);
                }
            }
            Err(err)
        }
    }
}

/// Resolve the host explicitly so "no such host" is reported as a
/// resolution failure rather than a generic connect error, then try each
/// resolved address in order.
async fn connect(host: &str, port: u16) -> Result<TcpStream, BindError> {
    let resolution = |source| BindError::Resolution {
        host: host.to_string(),
        port,
        source,
    };
    let addrs = lookup_host((host, port)).await.map_err(resolution)?;

    let mut last_err = None;
    for addr in addrs {
        match TcpStream::connect(addr).await {
            Ok(stream) => return Ok(stream),
            Err(err) => last_err = Some(err),
        }
    }
    match last_err {
        Some(err) => Err(BindError::Network(err)),
        None => Err(resolution(io::Error::new(
            io::ErrorKind::NotFound,
            "host resolved to no addresses",
        ))),
    }
}

/// Accumulate bytes from the stream until one whole BindResponse decodes.
/// A truncated decode against a still-open stream just means more bytes
/// are coming; truncation at EOF is final.
async fn read_bind_response(
    stream: &mut TcpStream,
    buffer: &mut BytesMut,
) -> Result<BindResponse, BindError> {
    let mut chunk = [0u8; 512];
    loop {
        if !buffer.is_empty() {
            // Schemas are single-use, so each attempt decodes into a fresh one.
            let mut response = BindResponse::new();
            let mut cursor = BerCursor::new(&buffer[..]);
            match response.decode(&mut cursor) {
                Ok(consumed) => {
                    debug!("Bind response decoded ({} bytes)", consumed);
                    return Ok(response);
                }
                Err(CodecError::Truncated) => {}
                Err(err) => return Err(err.into()),
            }
        }
        let read = stream.read(&mut chunk).await?;
        if read == 0 {
            return Err(CodecError::Truncated.into());
        }
        buffer.extend_from_slice(&chunk[..read]);
    }
}
