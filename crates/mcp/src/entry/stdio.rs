#![forbid(unsafe_code)]

use super::framing::{
    LineRead, MAX_CONTENT_LENGTH_BYTES, TransportMode, parse_request, read_bounded_line,
    read_content_length_frame,
};
use crate::{McpServer, json_rpc_error};
use std::io::{BufRead, BufReader, Write};

pub(crate) fn run_stdio(server: &mut McpServer) -> Result<(), Box<dyn std::error::Error>> {
    let stdin = std::io::stdin();
    let mut reader = BufReader::new(stdin.lock());
    let mut stdout = std::io::stdout().lock();
    serve(server, &mut reader, &mut stdout)
}

/// Request/response loop until EOF. Framing is auto-detected on the first non-blank line and
/// never switches afterwards, so responses always match what the client speaks.
pub(crate) fn serve<R: BufRead, W: Write>(
    server: &mut McpServer,
    reader: &mut R,
    writer: &mut W,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut mode: Option<TransportMode> = None;

    loop {
        let line = match read_bounded_line(reader, MAX_CONTENT_LENGTH_BYTES)? {
            LineRead::Eof => break,
            LineRead::Line(line) => line,
            LineRead::Oversized => {
                tracing::warn!(max_bytes = MAX_CONTENT_LENGTH_BYTES, "oversized line dropped");
                let error = json_rpc_error(None, -32600, "Request exceeds max allowed size");
                mode.unwrap_or(TransportMode::NewlineJson).write(writer, &error)?;
                continue;
            }
        };
        if line.trim().is_empty() {
            continue;
        }
        let current = match mode {
            Some(current) => current,
            None => match TransportMode::detect(&line) {
                Some(detected) => {
                    tracing::debug!(?detected, "transport framing detected");
                    *mode.insert(detected)
                }
                None => continue,
            },
        };

        let body = match current {
            TransportMode::NewlineJson => line.trim().as_bytes().to_vec(),
            TransportMode::ContentLength => match read_content_length_frame(reader, line) {
                Ok(Some(body)) => body,
                Ok(None) => break,
                Err(err) if err.kind() == std::io::ErrorKind::InvalidData => {
                    tracing::warn!(error = %err, "malformed Content-Length frame");
                    let error = json_rpc_error(None, -32600, &format!("Invalid Request: {err}"));
                    current.write(writer, &error)?;
                    continue;
                }
                Err(err) => return Err(err.into()),
            },
        };

        let response = match parse_request(&body) {
            Ok(request) => server.handle(request),
            Err(error) => Some(error),
        };
        if let Some(response) = response {
            current.write(writer, &response)?;
        }
    }

    Ok(())
}
