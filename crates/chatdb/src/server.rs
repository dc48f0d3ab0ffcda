// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! TCP server and connection handling.

use chat_broker::{publish_event, BrokerConnector};
use chat_core::{ChannelId, Event, NewChatMessage};
use chat_store::StoreConnector;
use tokio::net::TcpStream;
use tracing::{debug, error};

use crate::protocol::{self, MessageFrame, Request, Response, DEFAULT_TIMEOUT};
use crate::query;

/// Shared handles the server needs to answer requests
pub struct ServerState<B: BrokerConnector, S: StoreConnector> {
    pub broker: B,
    pub store: S,
    /// Rows per history page when the client does not ask for a count
    pub page_size: usize,
}

/// Server errors
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Protocol error: {0}")]
    Protocol(#[from] protocol::ProtocolError),

    #[error("Request timeout")]
    Timeout,
}

/// Handle a single client connection
pub async fn handle_connection<B, S>(
    state: &ServerState<B, S>,
    stream: TcpStream,
) -> Result<(), ServerError>
where
    B: BrokerConnector,
    S: StoreConnector,
{
    // Split stream for reading/writing
    let (mut reader, mut writer) = stream.into_split();

    // Read request with timeout
    let request = match protocol::read_request(&mut reader, DEFAULT_TIMEOUT).await {
        Ok(req) => req,
        Err(protocol::ProtocolError::Timeout) => {
            error!("Request read timeout");
            return Err(ServerError::Timeout);
        }
        Err(protocol::ProtocolError::ConnectionClosed) => {
            debug!("Client disconnected before sending request");
            return Ok(());
        }
        Err(e) => {
            error!("Failed to read request: {}", e);
            return Err(ServerError::Protocol(e));
        }
    };

    debug!("Received request: {:?}", request);

    match request {
        Request::Ping => {
            protocol::write_response(&mut writer, &Response::Pong, DEFAULT_TIMEOUT).await?;
        }

        Request::Publish {
            channel_id,
            user_id,
            content,
        } => {
            let channel = ChannelId(channel_id);
            let event = Event::NewChatMessage(NewChatMessage {
                channel_id: channel,
                user_id,
                content,
            });
            let response = match publish_event(&state.broker, channel, &event).await {
                Ok((partition, offset)) => Response::Published { partition, offset },
                Err(e) => {
                    error!("Publish failed: {}", e);
                    Response::Error {
                        message: e.to_string(),
                    }
                }
            };
            protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT).await?;
        }

        Request::ReadMostRecent {
            channel_id,
            page_size,
        } => {
            let channel = ChannelId(channel_id);
            let limit = page_size.unwrap_or(state.page_size);
            match query::read_most_recent(&state.store, channel, limit).await {
                Ok(rows) => {
                    // One frame per row, then End; a transport error
                    // aborts the stream rather than sending a ragged tail
                    for row in &rows {
                        let response = Response::Message {
                            message: MessageFrame::from(row),
                        };
                        protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT).await?;
                    }
                    protocol::write_response(&mut writer, &Response::End, DEFAULT_TIMEOUT).await?;
                }
                Err(e) => {
                    error!("History read failed: {}", e);
                    let response = Response::Error {
                        message: e.to_string(),
                    };
                    protocol::write_response(&mut writer, &response, DEFAULT_TIMEOUT).await?;
                }
            }
        }
    }

    Ok(())
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
