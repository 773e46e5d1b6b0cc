//! Folding a reply stream into transcript updates.

use futures_util::{Stream, StreamExt};

use edgo_types::llm::{EMPTY_RESPONSE_FALLBACK, StreamItem};

/// How a consumed reply ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyEnd {
    /// At least one fragment arrived and the stream closed cleanly.
    Completed,
    /// The stream closed cleanly without any text.
    Empty,
    /// The stream ended with a `TerminalError`.
    Failed,
}

/// Drain `stream`, calling `commit` with the full text the message should
/// now show.
///
/// After each fragment `commit` receives the concatenation so far. A
/// terminal error replaces everything with its fallback text; an empty
/// stream commits [`EMPTY_RESPONSE_FALLBACK`].
pub async fn consume_reply<S>(stream: S, mut commit: impl FnMut(&str)) -> ReplyEnd
where
    S: Stream<Item = StreamItem>,
{
    let mut stream = std::pin::pin!(stream);
    let mut buffer = String::new();

    while let Some(item) = stream.next().await {
        match item {
            StreamItem::Fragment(text) => {
                buffer.push_str(&text);
                commit(&buffer);
            }
            StreamItem::TerminalError(fallback) => {
                commit(&fallback);
                return ReplyEnd::Failed;
            }
        }
    }

    if buffer.is_empty() {
        commit(EMPTY_RESPONSE_FALLBACK);
        ReplyEnd::Empty
    } else {
        ReplyEnd::Completed
    }
}
