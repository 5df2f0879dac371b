//! Pull-source primitives.
//!
//! A [`Source`] is a lazy, single-consumer sequence that only does work when
//! its consumer reads from it. Every read carries a [`Signal`]:
//!
//! - [`Signal::Next`] asks for the next item. The source answers with
//!   `Some(Ok(item))`, `Some(Err(err))`, or `None` once it has nothing more
//!   to give.
//! - [`Signal::End`] tells the source the consumer is finished. The source
//!   releases whatever it holds and answers `None`.
//! - [`Signal::Abort`] tells the source the consumer failed. The source hands
//!   the error straight back as `Some(Err(err))`.
//!
//! Only the pieces the gateway composes are provided: [`Take`] to cap a
//! source, [`drain`] to run one to completion, and [`take_one`] which is the
//! two together.

use async_trait::async_trait;

/// What the consumer wants from a [`Source`] on this read.
#[derive(Debug)]
pub enum Signal<E> {
    /// Produce the next item.
    Next,
    /// The consumer is done; no error.
    End,
    /// The consumer is giving up with this error.
    Abort(E),
}

/// A lazy sequence driven by explicit reads.
#[async_trait]
pub trait Source: Send {
    type Item: Send;
    type Error: Send;

    /// Read from the source. `None` means the source produced nothing for
    /// this read and will produce nothing further.
    async fn read(&mut self, signal: Signal<Self::Error>)
    -> Option<Result<Self::Item, Self::Error>>;
}

/// Passes through at most `n` items, then terminates its upstream normally.
///
/// Once the upstream errors, ends, or has been terminated, `Take` never reads
/// it for another item.
pub struct Take<S> {
    source: S,
    remaining: usize,
    ended: bool,
}

impl<S: Source> Take<S> {
    pub fn new(source: S, n: usize) -> Self {
        Self {
            source,
            remaining: n,
            ended: false,
        }
    }
}

#[async_trait]
impl<S: Source> Source for Take<S> {
    type Item = S::Item;
    type Error = S::Error;

    async fn read(&mut self, signal: Signal<S::Error>) -> Option<Result<S::Item, S::Error>> {
        match signal {
            Signal::Next if self.ended => None,
            Signal::Next if self.remaining == 0 => {
                self.ended = true;
                let _ = self.source.read(Signal::End).await;
                None
            }
            Signal::Next => match self.source.read(Signal::Next).await {
                Some(Ok(item)) => {
                    self.remaining -= 1;
                    Some(Ok(item))
                }
                other => {
                    self.ended = true;
                    other
                }
            },
            Signal::End if self.ended => None,
            Signal::End => {
                self.ended = true;
                self.source.read(Signal::End).await
            }
            Signal::Abort(err) if self.ended => Some(Err(err)),
            Signal::Abort(err) => {
                self.ended = true;
                self.source.read(Signal::Abort(err)).await
            }
        }
    }
}

/// Read `source` until it ends, handing every item to `sink`.
///
/// Stops at the first error and returns it; the source is not read again.
pub async fn drain<S, F>(mut source: S, mut sink: F) -> Result<(), S::Error>
where
    S: Source,
    F: FnMut(S::Item),
{
    loop {
        match source.read(Signal::Next).await {
            Some(Ok(item)) => sink(item),
            Some(Err(err)) => return Err(err),
            None => return Ok(()),
        }
    }
}

/// Take exactly one item from `source`, then terminate it.
///
/// On success the source sees two reads: `Next`, then `End`. On error it sees
/// only the `Next`. Returns `Ok(None)` if the source ended without an item.
pub async fn take_one<S: Source>(source: S) -> Result<Option<S::Item>, S::Error> {
    let mut taken = None;
    drain(Take::new(source, 1), |item| taken = Some(item)).await?;
    Ok(taken)
}
