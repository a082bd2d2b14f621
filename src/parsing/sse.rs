/// A named server-sent event as it came off the wire, before classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEvent {
    pub name: String,
    pub data: String,
}

/// Incremental parser for the `text/event-stream` wire format.
///
/// Feed it raw byte chunks as they arrive; it buffers partial lines across
/// chunk boundaries and emits one `RawEvent` per blank-line dispatch. Handles
/// `event:`/`data:` fields, `:` comment lines, multi-line data (joined with
/// `\n`) and both LF and CRLF line endings. `id:` and `retry:` fields are
/// ignored; reconnect timing is the connection manager's decision.
#[derive(Debug, Default)]
pub struct SseParser {
    buffer: Vec<u8>,
    event_name: Option<String>,
    data_lines: Vec<String>,
}

impl SseParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<RawEvent> {
        self.buffer.extend_from_slice(chunk);
        let mut out = Vec::new();
        while let Some(line) = self.take_line() {
            if let Some(event) = self.process_line(&line) {
                out.push(event);
            }
        }
        out
    }

    fn take_line(&mut self) -> Option<String> {
        let pos = self
            .buffer
            .iter()
            .position(|&b| b == b'\n' || b == b'\r')?;
        let terminator_len = if self.buffer[pos] == b'\r' {
            match self.buffer.get(pos + 1) {
                Some(b'\n') => 2,
                // Lone trailing \r: the next chunk may start with \n.
                None => return None,
                Some(_) => 1,
            }
        } else {
            1
        };
        let line = String::from_utf8_lossy(&self.buffer[..pos]).into_owned();
        self.buffer.drain(..pos + terminator_len);
        Some(line)
    }

    fn process_line(&mut self, line: &str) -> Option<RawEvent> {
        if line.is_empty() {
            return self.dispatch();
        }
        if line.starts_with(':') {
            return None;
        }
        let (field, value) = match line.split_once(':') {
            Some((field, value)) => (field, value.strip_prefix(' ').unwrap_or(value)),
            None => (line, ""),
        };
        match field {
            "event" => self.event_name = Some(value.to_string()),
            "data" => self.data_lines.push(value.to_string()),
            _ => {}
        }
        None
    }

    fn dispatch(&mut self) -> Option<RawEvent> {
        let name = self.event_name.take();
        let data_lines = std::mem::take(&mut self.data_lines);
        if name.is_none() && data_lines.is_empty() {
            return None;
        }
        Some(RawEvent {
            name: name.unwrap_or_else(|| String::from("message")),
            data: data_lines.join("\n"),
        })
    }
}
