use crate::domain::{
    gadgets::{CellCoordinate, CellSubscription, DataEvent, DataHandler, DataSource},
    logging::{LogComponent, get_logger},
};
use crate::{log_error, log_warn};
use super::dto::{CellUpdateFrame, SubscribeFrame};
use futures::future::{AbortHandle, Abortable};
use futures::{SinkExt, StreamExt};
use gloo_net::websocket::{Message, futures::WebSocket};
use wasm_bindgen_futures::spawn_local;

/// Streams one analytics cell over a gloo websocket
pub struct AnalyticsCellClient {
    url: String,
    cell: CellCoordinate,
}

impl AnalyticsCellClient {
    pub fn new(url: String, cell: CellCoordinate) -> Self {
        Self { url, cell }
    }

    /// Open the socket and send the subscribe frame
    pub async fn connect(&self) -> Result<WebSocket, String> {
        let mut ws = WebSocket::open(&self.url).map_err(|e| format!("Failed to open WebSocket: {e:?}"))?;

        let frame = serde_json::to_string(&SubscribeFrame::for_cell(&self.cell))
            .map_err(|e| format!("Failed to encode subscribe frame: {e}"))?;
        ws.send(Message::Text(frame))
            .await
            .map_err(|e| format!("Failed to subscribe: {e:?}"))?;

        get_logger().info(
            LogComponent::Infrastructure("CellWS"),
            &format!("✅ Subscribed to {} via {}", self.cell, self.url),
        );
        Ok(ws)
    }

    pub fn parse_message(data: &str) -> Result<DataEvent, String> {
        serde_json::from_str::<CellUpdateFrame>(data)
            .map(CellUpdateFrame::into_event)
            .map_err(|e| format!("Failed to parse cell update: {e}"))
    }

    /// Deliver events until the surrounding task is aborted; reconnects with
    /// exponential backoff capped at 32s.
    pub async fn run_stream(self, mut handler: DataHandler) {
        use gloo_timers::future::sleep;
        use std::time::Duration;

        let mut delay = 1u64;
        loop {
            let mut stream = match self.connect().await {
                Ok(ws) => {
                    delay = 1;
                    ws
                }
                Err(e) => {
                    log_error!(LogComponent::Infrastructure("CellWS"), "❌ Connection error: {}", e);
                    sleep(Duration::from_secs(delay)).await;
                    delay = (delay * 2).min(32);
                    continue;
                }
            };

            while let Some(msg) = stream.next().await {
                match msg {
                    Ok(Message::Text(data)) => match Self::parse_message(&data) {
                        Ok(event) => handler(event),
                        Err(e) => {
                            log_error!(LogComponent::Infrastructure("CellWS"), "❌ {}", e);
                        }
                    },
                    Ok(Message::Bytes(_)) => {}
                    Err(e) => {
                        log_error!(LogComponent::Infrastructure("CellWS"), "❌ WebSocket error: {:?}", e);
                        break;
                    }
                }
            }

            log_warn!(LogComponent::Infrastructure("CellWS"), "🔌 {} reconnecting in {}s", self.cell, delay);
            sleep(Duration::from_secs(delay)).await;
            delay = (delay * 2).min(32);
        }
    }
}

/// `DataSource` backed by one websocket per subscribed cell
#[derive(Debug, Clone)]
pub struct WebSocketCellSource {
    url: String,
}

impl WebSocketCellSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl DataSource for WebSocketCellSource {
    fn subscribe(&self, cell: &CellCoordinate, on_data: DataHandler) -> Box<dyn CellSubscription> {
        let (abort, registration) = AbortHandle::new_pair();
        let client = AnalyticsCellClient::new(self.url.clone(), cell.clone());
        spawn_local(async move {
            let _ = Abortable::new(client.run_stream(on_data), registration).await;
        });
        Box::new(WebSocketCellSubscription { abort, cell: cell.clone() })
    }
}

/// Aborting the stream task drops the socket, which closes it.
pub struct WebSocketCellSubscription {
    abort: AbortHandle,
    cell: CellCoordinate,
}

impl CellSubscription for WebSocketCellSubscription {
    fn kill(&mut self) {
        if self.abort.is_aborted() {
            return;
        }
        self.abort.abort();
        get_logger().debug(LogComponent::Infrastructure("CellWS"), &format!("🛑 {} unsubscribed", self.cell));
    }

    fn is_killed(&self) -> bool {
        self.abort.is_aborted()
    }
}

// AbortHandle does not abort on drop
impl Drop for WebSocketCellSubscription {
    fn drop(&mut self) {
        self.kill();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::gadgets::DataKind;

    #[test]
    fn dropping_subscription_aborts_stream_task() {
        let (abort, _registration) = AbortHandle::new_pair();
        let subscription = WebSocketCellSubscription { abort: abort.clone(), cell: CellCoordinate::new("S", 1, 2) };
        assert!(!subscription.is_killed());

        drop(subscription);
        assert!(abort.is_aborted());
    }

    #[test]
    fn parse_message_rejects_garbage() {
        assert!(AnalyticsCellClient::parse_message("not json").is_err());
    }

    #[test]
    fn parse_message_reads_curve_event() {
        let event = AnalyticsCellClient::parse_message(r#"{"t":"CURVE","v":[[0.5,0.01],[1,0.02]]}"#).unwrap();
        assert_eq!(event.kind, DataKind::Curve);
        assert_eq!(event.value.as_array().map(Vec::len), Some(2));
    }
}
