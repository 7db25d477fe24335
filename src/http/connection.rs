use std::sync::Arc;
use std::time::Duration;

use bytes::BytesMut;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::{timeout, timeout_at, Instant};

use crate::error::DispatchError;
use crate::http::parser::{parse_with_limits, Limits, ParseError};
use crate::http::request::Request;
use crate::http::response::Response;
use crate::http::writer::ResponseWriter;
use crate::routing::Dispatcher;

/// Per-connection settings.
#[derive(Debug, Clone, Copy)]
pub struct ConnectionOptions {
    pub limits: Limits,
    /// Deadline for the whole request to arrive.
    pub read_timeout: Duration,
    /// Deadline for the whole response to be written.
    pub write_timeout: Duration,
}

impl Default for ConnectionOptions {
    fn default() -> Self {
        Self {
            limits: Limits::default(),
            read_timeout: Duration::from_secs(10),
            write_timeout: Duration::from_secs(10),
        }
    }
}

pub struct Connection {
    stream: TcpStream,
    buffer: BytesMut,
    state: ConnectionState,
    dispatcher: Arc<Dispatcher>,
    options: ConnectionOptions,
}

/// One request, one response, then close.
pub enum ConnectionState {
    Reading,
    Processing(Request),
    Writing(ResponseWriter),
    Closed,
}

enum ReadOutcome {
    Request(Request),
    Malformed(ParseError),
    Eof,
}

impl Connection {
    pub fn new(stream: TcpStream, dispatcher: Arc<Dispatcher>, options: ConnectionOptions) -> Self {
        Self {
            stream,
            buffer: BytesMut::with_capacity(4096),
            state: ConnectionState::Reading,
            dispatcher,
            options,
        }
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        loop {
            // Each arm sets the next state; anything that bails leaves Closed.
            match std::mem::replace(&mut self.state, ConnectionState::Closed) {
                ConnectionState::Reading => match self.read_request().await? {
                    ReadOutcome::Request(req) => {
                        self.state = ConnectionState::Processing(req);
                    }
                    ReadOutcome::Malformed(e) => {
                        let response = DispatchError::from(e).into_response();
                        self.state = ConnectionState::Writing(Self::writer_for(response));
                    }
                    ReadOutcome::Eof => {}
                },

                ConnectionState::Processing(req) => {
                    let response = self.process(req).await;
                    self.state = ConnectionState::Writing(Self::writer_for(response));
                }

                ConnectionState::Writing(mut writer) => {
                    timeout(self.options.write_timeout, writer.write_to_stream(&mut self.stream))
                        .await
                        .map_err(|_| anyhow::anyhow!("timed out writing response"))??;

                    self.stream.shutdown().await?;
                }

                ConnectionState::Closed => {
                    break;
                }
            }
        }

        Ok(())
    }

    async fn read_request(&mut self) -> anyhow::Result<ReadOutcome> {
        let deadline = Instant::now() + self.options.read_timeout;

        loop {
            match parse_with_limits(&self.buffer, &self.options.limits) {
                Ok((request, _consumed)) => return Ok(ReadOutcome::Request(request)),

                Err(ParseError::Incomplete) => {
                    // Need more data
                }

                Err(e) => return Ok(ReadOutcome::Malformed(e)),
            }

            let n = timeout_at(deadline, self.stream.read_buf(&mut self.buffer))
                .await
                .map_err(|_| anyhow::anyhow!("timed out reading request"))??;

            if n == 0 {
                if !self.buffer.is_empty() {
                    tracing::debug!(buffered = self.buffer.len(), "client closed mid-request");
                }
                return Ok(ReadOutcome::Eof);
            }
        }
    }

    async fn process(&self, req: Request) -> Response {
        let method = req.method;
        let path = req.path.clone();
        let dispatcher = self.dispatcher.clone();

        let response = match tokio::task::spawn_blocking(move || dispatcher.handle(&req)).await {
            Ok(response) => response,
            Err(e) => {
                tracing::error!(%method, %path, error = %e, "handler task failed");
                Response::internal_error()
            }
        };

        tracing::info!(%method, %path, status = response.status.as_u16(), "request handled");
        response
    }

    fn writer_for(mut response: Response) -> ResponseWriter {
        response.headers.insert("Connection", "close");
        ResponseWriter::new(&response)
    }
}
