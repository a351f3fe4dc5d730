#![forbid(unsafe_code)]

use crate::{JsonRpcRequest, json_rpc_error};
use serde_json::Value;
use std::io::{BufRead, Read, Write};

/// Upper bound for one request, whichever framing carries it.
pub(crate) const MAX_CONTENT_LENGTH_BYTES: usize = 16 * 1024 * 1024;

pub(crate) enum LineRead {
    Eof,
    Line(String),
    /// The line ran past the limit; its remainder has been skipped.
    Oversized,
}

/// Reads one line of at most `max` bytes without buffering anything beyond that.
pub(crate) fn read_bounded_line<R: BufRead>(
    reader: &mut R,
    max: usize,
) -> std::io::Result<LineRead> {
    let mut buf = Vec::new();
    let limit = u64::try_from(max).unwrap_or(u64::MAX).saturating_add(1);
    if Read::take(&mut *reader, limit).read_until(b'\n', &mut buf)? == 0 {
        return Ok(LineRead::Eof);
    }
    if buf.len() > max && buf.last() != Some(&b'\n') {
        skip_rest_of_line(reader)?;
        return Ok(LineRead::Oversized);
    }
    Ok(LineRead::Line(String::from_utf8_lossy(&buf).into_owned()))
}

fn skip_rest_of_line<R: BufRead>(reader: &mut R) -> std::io::Result<()> {
    loop {
        let available = reader.fill_buf()?;
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|b| *b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let n = available.len();
                reader.consume(n);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TransportMode {
    NewlineJson,
    ContentLength,
}

impl TransportMode {
    /// Decided once from the first non-blank line and kept for the whole session.
    pub(crate) fn detect(line: &str) -> Option<Self> {
        let trimmed = line.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            return Some(Self::NewlineJson);
        }
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("content-length:") || lower.starts_with("content-type:") {
            return Some(Self::ContentLength);
        }
        None
    }

    pub(crate) fn write<W: Write>(
        self,
        writer: &mut W,
        resp: &Value,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Self::NewlineJson => writeln!(writer, "{}", serde_json::to_string(resp)?)?,
            Self::ContentLength => {
                let body = serde_json::to_vec(resp)?;
                write!(writer, "Content-Length: {}\r\n\r\n", body.len())?;
                writer.write_all(&body)?;
            }
        }
        writer.flush()?;
        Ok(())
    }
}

fn parse_content_length_header(line: &str) -> Option<usize> {
    let (key, value) = line.trim().split_once(':')?;
    if !key.trim().eq_ignore_ascii_case("content-length") {
        return None;
    }
    value.trim().parse::<usize>().ok()
}

/// Reads the remaining headers after `first_header` and then the body. `Ok(None)` on EOF.
/// Framing problems surface as `InvalidData`; an oversized body is skipped first so the next
/// frame starts cleanly.
pub(crate) fn read_content_length_frame<R: BufRead>(
    reader: &mut R,
    first_header: String,
) -> std::io::Result<Option<Vec<u8>>> {
    let mut header = first_header;
    let mut content_length = parse_content_length_header(&header);

    while !header.trim_end().is_empty() {
        header = match read_bounded_line(reader, MAX_CONTENT_LENGTH_BYTES)? {
            LineRead::Eof => return Ok(None),
            LineRead::Line(line) => line,
            LineRead::Oversized => {
                return Err(std::io::Error::new(
                    std::io::ErrorKind::InvalidData,
                    "Header line exceeds max allowed size",
                ));
            }
        };
        if content_length.is_none() {
            content_length = parse_content_length_header(&header);
        }
    }

    let Some(len) = content_length else {
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Missing Content-Length header",
        ));
    };
    if len > MAX_CONTENT_LENGTH_BYTES {
        std::io::copy(&mut Read::take(&mut *reader, len as u64), &mut std::io::sink())?;
        return Err(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            "Content-Length exceeds max allowed size",
        ));
    }

    let mut body = vec![0u8; len];
    reader.read_exact(&mut body)?;
    Ok(Some(body))
}

/// Parse errors become JSON-RPC error objects ready to be written back.
pub(crate) fn parse_request(body: &[u8]) -> Result<JsonRpcRequest, Value> {
    let data: Value = serde_json::from_slice(body)
        .map_err(|e| json_rpc_error(None, -32700, &format!("Parse error: {e}")))?;

    let (id, has_method) = match data.as_object() {
        Some(obj) => (obj.get("id").cloned(), obj.contains_key("method")),
        None => return Err(json_rpc_error(None, -32600, "Invalid Request")),
    };
    if !has_method {
        return Err(json_rpc_error(id, -32600, "Invalid Request"));
    }

    serde_json::from_value::<JsonRpcRequest>(data)
        .map_err(|e| json_rpc_error(id, -32600, &format!("Invalid Request: {e}")))
}
