use crate::events::AppEvent;
use async_channel::Sender;
use euphoria::SOCKET_PATH;
use euphoria::router::InputEvent;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::UnixListener;

pub async fn run_server(tx: Sender<AppEvent>) {
    // Cleanup old socket if it exists
    if std::fs::metadata(SOCKET_PATH).is_ok() {
        let _ = std::fs::remove_file(SOCKET_PATH);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };

    loop {
        match listener.accept().await {
            Ok((mut stream, _)) => {
                let tx = tx.clone();
                tokio::spawn(async move {
                    let reader = BufReader::new(&mut stream);
                    let mut lines = reader.lines();

                    while let Ok(Some(line)) = lines.next_line().await {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match line.parse::<InputEvent>() {
                            Ok(event) => {
                                if tx.send(AppEvent::Input(event)).await.is_err() {
                                    break;
                                }
                            }
                            Err(e) => log::warn!("Ignoring '{}': {}", line.trim(), e),
                        }
                    }
                });
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
