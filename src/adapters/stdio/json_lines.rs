//! JSON-lines tool server.
//!
//! Reads one request per line and writes one reply per line, in order.
//! A malformed line gets a validation error reply; the loop only stops at
//! end of input or on an I/O failure.

use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::domain::tools::{ToolResponse, ToolResult};
use crate::ports::ToolExecutor;

use super::messages::{ClientMessage, ServerMessage};

pub struct JsonLinesServer {
    executor: Arc<dyn ToolExecutor>,
}

impl JsonLinesServer {
    pub fn new(executor: Arc<dyn ToolExecutor>) -> Self {
        Self { executor }
    }

    /// Serves until `reader` is exhausted. Returns the number of replies.
    pub async fn serve<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<usize>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        let mut replies = 0;

        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let reply = self.handle_line(line).await;
            let mut out = serde_json::to_string(&reply)?;
            out.push('\n');
            writer.write_all(out.as_bytes()).await?;
            writer.flush().await?;
            replies += 1;
        }

        tracing::debug!(replies, "Input closed");
        Ok(replies)
    }

    pub async fn handle_line(&self, line: &str) -> ServerMessage {
        match serde_json::from_str::<ClientMessage>(line) {
            Ok(ClientMessage::Call(call)) => {
                ServerMessage::Response(self.executor.dispatch(call).await)
            }
            Ok(ClientMessage::ListTools { list_tools: mode }) => ServerMessage::Tools {
                mode,
                tools: self
                    .executor
                    .available_tools(mode, true)
                    .iter()
                    .map(|tool| tool.to_openai_format())
                    .collect(),
            },
            Err(e) => {
                tracing::warn!(error = %e, "Unreadable request line");
                ServerMessage::Response(ToolResponse::error(
                    ToolResult::ValidationError,
                    format!("Richiesta non valida: {}", e),
                ))
            }
        }
    }
}
