use crate::message::Message;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Destination for outbound control messages.
pub trait MessageSink {
    fn send(&mut self, message: &Message) -> Result<(), SinkError>;
}

/// Writes each message to the log. Surface messages go out at info level,
/// panel records (sent every frame) at debug.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl LogSink {
    pub fn level(message: &Message) -> log::Level {
        match message {
            Message::Record(_) => log::Level::Debug,
            Message::Hex { .. } | Message::Trill { .. } => log::Level::Info,
        }
    }
}

impl MessageSink for LogSink {
    fn send(&mut self, message: &Message) -> Result<(), SinkError> {
        log::log!(Self::level(message), "{}", message);
        Ok(())
    }
}

/// One message per line on any writer.
#[derive(Debug)]
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> MessageSink for WriterSink<W> {
    fn send(&mut self, message: &Message) -> Result<(), SinkError> {
        writeln!(self.writer, "{}", message)?;
        self.writer.flush()?;
        Ok(())
    }
}

/// Keeps every sent message. Clones share the same buffer.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    messages: Arc<Mutex<Vec<Message>>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<Message> {
        self.messages.lock().clone()
    }

    pub fn lines(&self) -> Vec<String> {
        self.messages.lock().iter().map(ToString::to_string).collect()
    }

    pub fn clear(&self) {
        self.messages.lock().clear();
    }
}

impl MessageSink for MemorySink {
    fn send(&mut self, message: &Message) -> Result<(), SinkError> {
        self.messages.lock().push(message.clone());
        Ok(())
    }
}

/// Sends to a sink when one is connected and silently does nothing
/// otherwise. Sink failures are logged and dropped.
#[derive(Default)]
pub struct Transport {
    sink: Option<Box<dyn MessageSink>>,
}

impl Transport {
    pub fn connected(sink: impl MessageSink + 'static) -> Self {
        Self {
            sink: Some(Box::new(sink)),
        }
    }

    pub fn disconnected() -> Self {
        Self { sink: None }
    }

    pub fn is_connected(&self) -> bool {
        self.sink.is_some()
    }

    pub fn send(&mut self, message: &Message) {
        if let Some(sink) = self.sink.as_mut()
            && let Err(e) = sink.send(message)
        {
            log::warn!("Failed to send '{}': {}", message, e);
        }
    }

    pub fn send_all<'a>(&mut self, messages: impl IntoIterator<Item = &'a Message>) {
        if self.is_connected() {
            messages.into_iter().for_each(|m| self.send(m));
        }
    }
}

impl std::fmt::Debug for Transport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transport")
            .field("connected", &self.is_connected())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{BarId, Note};
    use crate::message::ControlRecord;

    #[test]
    fn test_log_sink_keeps_records_out_of_info() {
        assert_eq!(LogSink::level(&Message::hex_on(Note::new(3))), log::Level::Info);
        assert_eq!(
            LogSink::level(&Message::Trill {
                bar: BarId::new(1),
                zone: 0,
                position: 0.5
            }),
            log::Level::Info
        );
        assert_eq!(
            LogSink::level(&ControlRecord::Decay(500).into()),
            log::Level::Debug
        );
        assert!(LogSink.send(&ControlRecord::Key(0).into()).is_ok());
    }

    struct FailingSink;

    impl MessageSink for FailingSink {
        fn send(&mut self, _message: &Message) -> Result<(), SinkError> {
            Err(std::io::Error::other("closed").into())
        }
    }

    #[test]
    fn test_writer_sink_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.send(&Message::hex_on(Note::new(7))).unwrap();
        sink.send(&ControlRecord::Tone(0.5).into()).unwrap();

        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "/euphoria/hex/7 1.00\n{\"tone\":0.5}\n");
    }

    #[test]
    fn test_memory_sink_shares_buffer() {
        let sink = MemorySink::new();
        let mut transport = Transport::connected(sink.clone());
        transport.send(&Message::hex_on(Note::new(1)));
        assert_eq!(sink.lines(), vec!["/euphoria/hex/1 1.00"]);

        sink.clear();
        assert!(sink.messages().is_empty());
    }

    #[test]
    fn test_disconnected_transport_is_noop() {
        let mut transport = Transport::disconnected();
        assert!(!transport.is_connected());
        transport.send(&Message::hex_on(Note::new(1)));
        transport.send_all(&[Message::hex_off(Note::new(1))]);
    }

    #[test]
    fn test_sink_failure_does_not_propagate() {
        let mut transport = Transport::connected(FailingSink);
        transport.send(&Message::hex_on(Note::new(1)));
        assert!(transport.is_connected());
    }
}
