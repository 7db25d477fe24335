use bytes::{BufMut, BytesMut};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::http::response::Response;

const HTTP_VERSION: &str = "HTTP/1.1";

/// Serializes a response into wire format.
///
/// Headers are written in insertion order, except that Content-Length is
/// always derived from the body, whatever the response claims. Redirects
/// go out without body, Content-Length or Content-Type. Pure: the same
/// response always yields the same bytes.
pub fn serialize_response(resp: &Response) -> Vec<u8> {
    let redirect = resp.status.is_redirect();
    let body = if redirect { &[][..] } else { resp.body_bytes() };
    let content_length = body.len().to_string();
    let mut buf = BytesMut::with_capacity(128 + body.len());

    // Status line
    let status_line = format!(
        "{} {} {}\r\n",
        HTTP_VERSION,
        resp.status.as_u16(),
        resp.status.reason_phrase()
    );
    buf.put_slice(status_line.as_bytes());

    // Headers
    let mut length_written = false;
    for (k, v) in resp.headers.iter() {
        if k.eq_ignore_ascii_case("Content-Length") {
            if !redirect && !length_written {
                put_header(&mut buf, k, &content_length);
                length_written = true;
            }
        } else if !(redirect && k.eq_ignore_ascii_case("Content-Type")) {
            put_header(&mut buf, k, v);
        }
    }

    if !body.is_empty() && !length_written {
        put_header(&mut buf, "Content-Length", &content_length);
    }

    // Header/body separator
    buf.put_slice(b"\r\n");

    // Body
    buf.put_slice(body);

    buf.to_vec()
}

fn put_header(buf: &mut BytesMut, name: &str, value: &str) {
    buf.put_slice(name.as_bytes());
    buf.put_slice(b": ");
    buf.put_slice(value.as_bytes());
    buf.put_slice(b"\r\n");
}

pub struct ResponseWriter {
    buffer: Vec<u8>,
    written: usize,
}

impl ResponseWriter {
    pub fn new(response: &Response) -> Self {
        Self {
            buffer: serialize_response(response),
            written: 0,
        }
    }

    pub async fn write_to_stream<W>(&mut self, stream: &mut W) -> anyhow::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        while self.written < self.buffer.len() {
            let n = stream.write(&self.buffer[self.written..]).await?;

            if n == 0 {
                return Err(anyhow::anyhow!("connection closed while writing"));
            }

            self.written += n;
        }

        stream.flush().await?;
        Ok(())
    }
}
