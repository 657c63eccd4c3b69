use std::time::Duration;

use async_trait::async_trait;
use serenity::all::Typing;

/// Somewhere a finished answer can be posted, one message at a time.
#[async_trait]
pub trait MessageSink: Send + Sync {
    async fn send(&self, content: String) -> anyhow::Result<()>;

    /// Starts a typing indicator that lasts until the handle is stopped.
    async fn start_typing(&self) -> Option<Typing> {
        None
    }
}

/// Splits `text` into contiguous slices of at most `max_chars` characters.
///
/// Slices never cut through a character, so every one is valid UTF-8 and the
/// concatenation is exactly `text`.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    let mut count = 0;

    for (index, _) in text.char_indices() {
        if count == max_chars {
            chunks.push(&text[start..index]);
            start = index;
            count = 0;
        }
        count += 1;
    }

    if start < text.len() {
        chunks.push(&text[start..]);
    }

    chunks
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChunkEmitter {
    pub max_chars: usize,
    pub delay: Duration,
}

impl ChunkEmitter {
    pub fn new(max_chars: usize, delay: Duration) -> Self {
        Self { max_chars, delay }
    }

    /// Sends each chunk in order, pausing between sends. Returns how many were sent.
    pub async fn emit<S: MessageSink + ?Sized>(&self, sink: &S, text: &str) -> anyhow::Result<usize> {
        let chunks = chunk_text(text, self.max_chars);
        let total = chunks.len();

        for (i, chunk) in chunks.into_iter().enumerate() {
            if i > 0 {
                tokio::time::sleep(self.delay).await;
            }

            sink.send(chunk.to_string()).await?;
            log::debug!("sent chunk {}/{total} ({} chars)", i + 1, chunk.chars().count());
        }

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use tokio::time::Instant;

    use super::*;
    use crate::chat::testing::RecordingSink;

    fn assert_chunks(text: &str, max_chars: usize) {
        let chunks = chunk_text(text, max_chars);

        assert_eq!(chunks.concat(), text);
        assert!(chunks.iter().all(|c| c.chars().count() <= max_chars));
        assert!(chunks.iter().all(|c| !c.is_empty()));
        // every chunk but the last is full
        if let Some((_, full)) = chunks.split_last() {
            assert!(full.iter().all(|c| c.chars().count() == max_chars));
        }
    }

    #[test]
    fn chunks_reassemble_to_the_original() {
        let long = "FRIDAY online. ".repeat(400);
        let exact = "x".repeat(1999 * 2);
        let multibyte = "héllo wörld 🤖 ".repeat(300);

        for text in ["", "short", long.as_str(), exact.as_str(), multibyte.as_str()] {
            assert_chunks(text, 1999);
        }
        assert_chunks(&multibyte, 7);
    }

    #[test]
    fn chunk_boundaries() {
        assert!(chunk_text("", 1999).is_empty());
        assert_eq!(chunk_text("abc", 1999), vec!["abc"]);
        assert_eq!(chunk_text("abcdef", 3), vec!["abc", "def"]);
        assert_eq!(chunk_text("abcdefg", 3), vec!["abc", "def", "g"]);
        assert_eq!(chunk_text("🤖🤖🤖", 2), vec!["🤖🤖", "🤖"]);
        assert_eq!(chunk_text("abc", 0), vec!["a", "b", "c"]);
    }

    #[tokio::test(start_paused = true)]
    async fn emits_in_order_with_delay_between_messages() {
        let sink = RecordingSink::default();
        let emitter = ChunkEmitter::new(1999, Duration::from_secs(1));
        let text = format!("{}{}{}", "a".repeat(1999), "b".repeat(1999), "c".repeat(10));

        let count = emitter.emit(&sink, &text).await.unwrap();

        let sent = sink.sent.lock().unwrap();
        assert_eq!(count, 3);
        assert_eq!(
            sent.iter().map(|(_, c)| c.as_str()).collect::<String>(),
            text
        );
        assert!(sent[0].1.starts_with('a') && sent[2].1 == "c".repeat(10));
        for pair in sent.windows(2) {
            assert_eq!(pair[1].0 - pair[0].0, Duration::from_secs(1));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn single_chunk_does_not_wait() {
        let sink = RecordingSink::default();
        let emitter = ChunkEmitter::new(1999, Duration::from_secs(1));
        let start = Instant::now();

        emitter.emit(&sink, "pong").await.unwrap();

        assert_eq!(Instant::now(), start);
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn send_failure_stops_emission() {
        let sink = RecordingSink {
            fail_on: Some(1),
            ..Default::default()
        };
        let emitter = ChunkEmitter::new(2, Duration::from_millis(1500));

        let result = emitter.emit(&sink, "aabbcc").await;

        assert!(result.is_err());
        assert_eq!(sink.sent.lock().unwrap().len(), 1);
    }
}
