//! One-event-lookahead cursor over an event iterator.

use crate::{BuildError, Event, Result};
use keel_tree::Pos;

/// A cursor that remembers the most recently consumed event.
///
/// `current()` never advances. `next()` advances and returns the new
/// current event. Running off the end of the iterator is a structural
/// fault, reported at the position of the last event seen.
pub struct TokenStream<I>
where
    I: Iterator<Item = Event>,
{
    events: I,
    current: Option<Event>,
    last_pos: Pos,
}

impl<I> TokenStream<I>
where
    I: Iterator<Item = Event>,
{
    pub fn new(events: impl IntoIterator<IntoIter = I>) -> Self {
        Self {
            events: events.into_iter(),
            current: None,
            last_pos: Pos::default(),
        }
    }

    /// Advance to the next event and return it.
    pub fn next(&mut self) -> Result<&Event> {
        match self.events.next() {
            Some(event) => {
                self.last_pos = event.pos.clone();
                Ok(self.current.insert(event))
            }
            None => {
                self.current = None;
                Err(BuildError::UnexpectedEnd {
                    pos: self.last_pos.clone(),
                })
            }
        }
    }

    /// The most recently consumed event.
    pub fn current(&self) -> Result<&Event> {
        self.current.as_ref().ok_or_else(|| BuildError::UnexpectedEnd {
            pos: self.last_pos.clone(),
        })
    }
}
