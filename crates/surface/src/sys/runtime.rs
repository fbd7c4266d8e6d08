use crate::config;
use crate::events::AppEvent;
use crate::sys::server;
use async_channel::Sender;
use std::thread::{self, JoinHandle};
use tokio::runtime::{Builder, Runtime};

/// Socket server and config watcher, driven by their own tokio runtime so
/// the GTK main loop stays free.
pub struct BackgroundServices {
    runtime: Runtime,
}

impl BackgroundServices {
    pub fn new() -> std::io::Result<Self> {
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("euphoria-io")
            .enable_all()
            .build()?;
        Ok(Self { runtime })
    }

    /// Runs until both services return, feeding their events to `tx`.
    pub fn start(self, tx: Sender<AppEvent>) -> std::io::Result<JoinHandle<()>> {
        thread::Builder::new()
            .name("euphoria-services".to_string())
            .spawn(move || {
                self.runtime.block_on(async {
                    tokio::join!(
                        server::run_server(tx.clone()),
                        config::run_async_watcher(tx)
                    );
                });
                log::warn!("Background services stopped");
            })
    }
}
