mod sse;

pub use sse::{RawEvent, SseParser};
