// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wire protocol for client/daemon communication.
//!
//! Messages are JSON, framed with a 4-byte big-endian length prefix. A
//! connection carries one request; the daemon answers with one response,
//! except for history reads, which stream one `Message` frame per row
//! followed by a terminating `End` frame.

use std::time::Duration;

use chat_core::LogPosition;
use chat_store::MaterializedMessage;
use chrono::{DateTime, Utc};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use thiserror::Error;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};

/// Upper bound on a single framed message
pub const MAX_MESSAGE_SIZE: usize = 1024 * 1024;

/// Default timeout for reading a request or writing a response
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Client requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Request {
    Ping,

    /// Append a chat message to the channel's log
    Publish {
        channel_id: i64,
        user_id: i64,
        content: String,
    },

    /// Stream the most recent page of a channel's history, oldest first
    ReadMostRecent {
        channel_id: i64,
        /// Rows to return; the daemon's configured page size when absent
        page_size: Option<usize>,
    },
}

/// One row of channel history on the wire
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageFrame {
    pub channel_id: i64,
    pub user_id: i64,
    pub offset: LogPosition,
    pub time_posted: DateTime<Utc>,
    pub content: String,
}

impl From<&MaterializedMessage> for MessageFrame {
    fn from(row: &MaterializedMessage) -> Self {
        Self {
            channel_id: row.channel_id.0,
            user_id: row.user_id,
            offset: row.offset,
            time_posted: row.time_posted,
            content: row.content.clone(),
        }
    }
}

/// Daemon responses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Response {
    Pong,

    /// The published event's placement on the log
    Published { partition: u32, offset: LogPosition },

    /// One streamed history row
    Message { message: MessageFrame },

    /// End of a history stream
    End,

    Error { message: String },
}

/// Protocol errors
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Connection closed")]
    ConnectionClosed,

    #[error("Request timeout")]
    Timeout,

    #[error("Message too large: {0} bytes")]
    MessageTooLarge(usize),
}

/// Encode a value as JSON (no length prefix)
pub fn encode<T: Serialize>(value: &T) -> Result<Vec<u8>, ProtocolError> {
    Ok(serde_json::to_vec(value)?)
}

/// Decode a value from JSON bytes
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, ProtocolError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Write a length-prefixed message
pub async fn write_message<W: AsyncWrite + Unpin>(
    writer: &mut W,
    data: &[u8],
) -> Result<(), ProtocolError> {
    if data.len() > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge(data.len()));
    }
    let len = data.len() as u32;
    writer.write_all(&len.to_be_bytes()).await?;
    writer.write_all(data).await?;
    writer.flush().await?;
    Ok(())
}

/// Read a length-prefixed message
pub async fn read_message<R: AsyncRead + Unpin>(reader: &mut R) -> Result<Vec<u8>, ProtocolError> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf).await.map_err(eof_as_closed)?;

    let len = u32::from_be_bytes(len_buf) as usize;
    if len > MAX_MESSAGE_SIZE {
        return Err(ProtocolError::MessageTooLarge(len));
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf).await.map_err(eof_as_closed)?;
    Ok(buf)
}

fn eof_as_closed(e: std::io::Error) -> ProtocolError {
    if e.kind() == std::io::ErrorKind::UnexpectedEof {
        ProtocolError::ConnectionClosed
    } else {
        ProtocolError::Io(e)
    }
}

/// Read and decode a request, bounded by `timeout`
pub async fn read_request<R: AsyncRead + Unpin>(
    reader: &mut R,
    timeout: Duration,
) -> Result<Request, ProtocolError> {
    let bytes = tokio::time::timeout(timeout, read_message(reader))
        .await
        .map_err(|_| ProtocolError::Timeout)??;
    decode(&bytes)
}

/// Encode and write a response, bounded by `timeout`
pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &Response,
    timeout: Duration,
) -> Result<(), ProtocolError> {
    let data = encode(response)?;
    tokio::time::timeout(timeout, write_message(writer, &data))
        .await
        .map_err(|_| ProtocolError::Timeout)?
}

#[cfg(test)]
#[path = "protocol_tests.rs"]
mod tests;
