// Event sources for the reactive loop
//
// The loop consumes any `futures::Stream`. These helpers cover the usual
// producers: a tokio channel fed by other tasks, a line-oriented reader,
// and a synthetic first event so a frame is drawn before anything real
// arrives.

use futures::stream::{self, Stream, StreamExt};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio_stream::wrappers::{LinesStream, ReceiverStream};

/// `events` preceded by `seed`, delivered without waiting on the source
pub fn seeded<E, S>(seed: E, events: S) -> impl Stream<Item = E> + Unpin
where
    S: Stream<Item = E> + Unpin,
{
    stream::once(futures::future::ready(seed)).chain(events)
}

/// Events sent on a tokio channel; the stream ends once every sender is dropped
pub fn from_channel<E>(receiver: mpsc::Receiver<E>) -> ReceiverStream<E> {
    ReceiverStream::new(receiver)
}

/// One event per line of `reader`, ending at EOF.
/// A read error also ends the stream.
pub fn from_lines<R>(reader: R) -> impl Stream<Item = String> + Unpin
where
    R: AsyncBufRead + Unpin,
{
    tokio_stream::StreamExt::map_while(LinesStream::new(reader.lines()), |line| match line {
        Ok(line) => Some(line),
        Err(err) => {
            tracing::warn!("Event source failed, ending stream: {}", err);
            None
        }
    })
}
