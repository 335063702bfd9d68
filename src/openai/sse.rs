//! Incremental decoder for the backend's server-sent-event stream.
//!
//! The transport delivers the response body as arbitrarily sized byte chunks
//! with no alignment to protocol records: a chunk may end mid-line or even
//! mid-way through a multi-byte UTF-8 character. [`SseFrameDecoder`] buffers
//! bytes across chunk boundaries and only ever interprets complete
//! newline-terminated lines, so both split cases are handled by the same
//! mechanism (`\n` cannot occur inside a multi-byte UTF-8 sequence).

use super::types::ChatCompletionChunk;

const DATA_PREFIX: &str = "data:";
const DONE_SENTINEL: &str = "[DONE]";

/// One complete logical record decoded from the event stream.
#[derive(Debug)]
pub enum SseFrame {
    /// A parsed delta payload.
    Delta(ChatCompletionChunk),
    /// The terminator sentinel: normal end of the stream.
    Done,
}

/// Stateful line reassembler and frame parser for one streaming call.
///
/// Owned by a single call; never shared. Feed raw body chunks in receipt
/// order and process the returned frames in order. After a `Done` frame the
/// decoder is finished and further feeds yield nothing.
#[derive(Debug, Default)]
pub struct SseFrameDecoder {
    buffer: Vec<u8>,
    finished: bool,
    malformed_frames: u64,
}

impl SseFrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of `data:` lines that failed payload parsing so far.
    ///
    /// Malformed frames are skipped, not fatal; this counter makes the
    /// occurrences observable to callers and tests.
    pub fn malformed_frames(&self) -> u64 {
        self.malformed_frames
    }

    /// True once the terminator sentinel has been seen.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Consumes one transport chunk and returns every frame it completed.
    ///
    /// The trailing segment after the last newline is held back until a later
    /// chunk completes it; it is never interpreted on its own. On upstream
    /// closure the held-back remainder is simply dropped.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<SseFrame> {
        let mut frames = Vec::new();
        if self.finished {
            return frames;
        }

        self.buffer.extend_from_slice(chunk);

        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            // Exclude the newline itself; tolerate CRLF framing.
            let line = &line[..line.len() - 1];
            let line = line.strip_suffix(b"\r").unwrap_or(line);

            if let Some(frame) = self.decode_line(line) {
                let done = matches!(frame, SseFrame::Done);
                frames.push(frame);
                if done {
                    self.finished = true;
                    self.buffer.clear();
                    break;
                }
            }
        }

        frames
    }

    fn decode_line(&mut self, line: &[u8]) -> Option<SseFrame> {
        let text = match std::str::from_utf8(line) {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!("Skipping non-UTF-8 stream line: {}", e);
                self.malformed_frames += 1;
                return None;
            }
        };

        // Comments, keep-alives, and blank separator lines carry no data.
        let payload = text.strip_prefix(DATA_PREFIX)?.trim();

        if payload == DONE_SENTINEL {
            return Some(SseFrame::Done);
        }

        match serde_json::from_str::<ChatCompletionChunk>(payload) {
            Ok(chunk) => Some(SseFrame::Delta(chunk)),
            Err(e) => {
                tracing::warn!("Skipping malformed stream frame: {}", e);
                self.malformed_frames += 1;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BODY: &[u8] = b"data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hel\"},\"finish_reason\":null}]}\n\ndata: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"lo\"},\"finish_reason\":\"stop\"}]}\n\ndata: [DONE]\n\n";

    fn delta_texts(frames: &[SseFrame]) -> Vec<String> {
        frames
            .iter()
            .filter_map(|f| match f {
                SseFrame::Delta(chunk) => Some(
                    chunk.choices[0]
                        .delta
                        .content
                        .clone()
                        .unwrap_or_default(),
                ),
                SseFrame::Done => None,
            })
            .collect()
    }

    #[test]
    fn test_whole_body_in_one_chunk() {
        let mut decoder = SseFrameDecoder::new();
        let frames = decoder.feed(BODY);

        assert_eq!(delta_texts(&frames), vec!["Hel", "lo"]);
        assert!(matches!(frames.last(), Some(SseFrame::Done)));
        assert!(decoder.is_finished());
        assert_eq!(decoder.malformed_frames(), 0);
    }

    #[test]
    fn test_every_segmentation_yields_identical_frames() {
        // Any split point, including mid-line, must not change the output.
        for split in 0..=BODY.len() {
            let mut decoder = SseFrameDecoder::new();
            let mut frames = decoder.feed(&BODY[..split]);
            frames.extend(decoder.feed(&BODY[split..]));

            assert_eq!(delta_texts(&frames), vec!["Hel", "lo"], "split at {split}");
            assert!(matches!(frames.last(), Some(SseFrame::Done)));
        }
    }

    #[test]
    fn test_byte_at_a_time_feeding() {
        let mut decoder = SseFrameDecoder::new();
        let mut frames = Vec::new();
        for byte in BODY {
            frames.extend(decoder.feed(std::slice::from_ref(byte)));
        }
        assert_eq!(delta_texts(&frames), vec!["Hel", "lo"]);
        assert!(matches!(frames.last(), Some(SseFrame::Done)));
    }

    #[test]
    fn test_multibyte_character_split_across_chunks() {
        let body = "data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"héllo\"},\"finish_reason\":null}]}\n".as_bytes();
        // Split inside the two-byte encoding of 'é'.
        let split = body.iter().position(|&b| b == 0xC3).unwrap() + 1;

        let mut decoder = SseFrameDecoder::new();
        let mut frames = decoder.feed(&body[..split]);
        frames.extend(decoder.feed(&body[split..]));

        assert_eq!(delta_texts(&frames), vec!["héllo"]);
        assert_eq!(decoder.malformed_frames(), 0);
    }

    #[test]
    fn test_non_data_lines_are_ignored() {
        let body = b": keep-alive\n\nevent: ping\ndata: [DONE]\n";
        let mut decoder = SseFrameDecoder::new();
        let frames = decoder.feed(body);

        assert_eq!(frames.len(), 1);
        assert!(matches!(frames[0], SseFrame::Done));
        assert_eq!(decoder.malformed_frames(), 0);
    }

    #[test]
    fn test_malformed_line_is_skipped_not_fatal() {
        let body = b"data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"a\"},\"finish_reason\":null}]}\ndata: {not json}\ndata: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"b\"},\"finish_reason\":null}]}\ndata: [DONE]\n";
        let mut decoder = SseFrameDecoder::new();
        let frames = decoder.feed(body);

        assert_eq!(delta_texts(&frames), vec!["a", "b"]);
        assert!(matches!(frames.last(), Some(SseFrame::Done)));
        assert_eq!(decoder.malformed_frames(), 1);
    }

    #[test]
    fn test_incomplete_line_is_never_emitted() {
        let mut decoder = SseFrameDecoder::new();
        let frames = decoder.feed(b"data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"par");
        assert!(frames.is_empty());
        // Closure without the sentinel: the remainder is dropped, no flush.
        assert!(!decoder.is_finished());
    }

    #[test]
    fn test_done_stops_further_decoding() {
        let mut decoder = SseFrameDecoder::new();
        let frames = decoder.feed(b"data: [DONE]\n");
        assert!(matches!(frames[0], SseFrame::Done));

        let after = decoder.feed(
            b"data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"x\"},\"finish_reason\":null}]}\n",
        );
        assert!(after.is_empty());
    }

    #[test]
    fn test_crlf_lines_decode_the_same() {
        let body = b"data: {\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hel\"},\"finish_reason\":null}]}\r\ndata: [DONE]\r\n";
        let mut decoder = SseFrameDecoder::new();
        let frames = decoder.feed(body);

        assert_eq!(delta_texts(&frames), vec!["Hel"]);
        assert!(matches!(frames.last(), Some(SseFrame::Done)));
    }
}
