//! Pull-mode access to a generation run. A `QuadStream` is a one-shot,
//! demand-driven source: each `pull` is one unit of consumer demand and
//! yields at most one quad, and once the end has been signaled the stream
//! stays exhausted. A fresh stream requires a fresh call into the generator.

use oxigraph::model::Quad;

pub struct QuadStream<'a> {
    inner: Box<dyn Iterator<Item = Quad> + 'a>,
    terminated: bool,
}

impl<'a> QuadStream<'a> {
    pub(crate) fn new(inner: Box<dyn Iterator<Item = Quad> + 'a>) -> Self {
        QuadStream {
            inner,
            terminated: false,
        }
    }

    /// Signal one unit of demand. Returns the next quad, or None exactly
    /// when the sequence has ended.
    pub fn pull(&mut self) -> Option<Quad> {
        if self.terminated {
            return None;
        }
        match self.inner.next() {
            Some(quad) => Some(quad),
            None => {
                self.terminated = true;
                None
            }
        }
    }

    /// True once the end of the sequence has been signaled.
    pub fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl Iterator for QuadStream<'_> {
    type Item = Quad;

    fn next(&mut self) -> Option<Quad> {
        self.pull()
    }
}
