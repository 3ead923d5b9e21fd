//! Stdio transport for MCP protocol.
//!
//! Handles newline-delimited JSON-RPC 2.0 over stdin/stdout. Logging must go
//! to stderr; stdout carries protocol frames only.

use tokio::io::{AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

use super::McpServer;
use super::transport::{self, JsonRpcResponse};

/// Handle MCP protocol over stdio until stdin closes.
pub async fn run_stdio(server: &McpServer) -> anyhow::Result<()> {
    let stdin = tokio::io::stdin();
    let mut stdout = tokio::io::stdout();
    let mut reader = BufReader::new(stdin);
    let mut line = String::new();

    tracing::info!("MCP stdio server ready, waiting for requests...");

    loop {
        line.clear();
        let bytes_read = reader.read_line(&mut line).await?;

        if bytes_read == 0 {
            tracing::info!("Stdin closed, shutting down");
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(response) = transport::handle_frame(server, trimmed).await {
            write_response(&mut stdout, &response).await?;
        }
    }

    Ok(())
}

/// Write one response frame followed by a newline.
pub async fn write_response<W>(writer: &mut W, response: &JsonRpcResponse) -> anyhow::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let response_json = serde_json::to_string(response)?;
    writer.write_all(response_json.as_bytes()).await?;
    writer.write_all(b"\n").await?;
    writer.flush().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;

    #[tokio::test]
    async fn test_write_response_is_single_line() {
        let mut buffer: Vec<u8> = Vec::new();
        let response = JsonRpcResponse::success(Some(json!(1)), json!({"ok": true}));
        write_response(&mut buffer, &response).await.unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert!(text.ends_with('\n'));
        assert_eq!(text.matches('\n').count(), 1);

        let parsed: Value = serde_json::from_str(text.trim()).unwrap();
        assert_eq!(parsed["jsonrpc"], "2.0");
        assert_eq!(parsed["result"]["ok"], true);
    }

    #[tokio::test]
    async fn test_write_response_exact_bytes() {
        let mut writer = tokio_test::io::Builder::new()
            .write(br#"{"jsonrpc":"2.0","result":{},"id":7}"#)
            .write(b"\n")
            .build();
        let response = JsonRpcResponse::success(Some(json!(7)), json!({}));
        write_response(&mut writer, &response).await.unwrap();
    }
}
