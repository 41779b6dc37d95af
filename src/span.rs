//! Scanline spans and the fixed-capacity buffer that collects them

use crate::error::RasterError;
use serde::{Deserialize, Serialize};

/// One covered row: the two edge walker positions at `y`.
///
/// `x1` comes from the walker heading to the first flat-edge endpoint and
/// `x2` from the other one, so `x1 > x2` is normal. Use `left()`/`right()`
/// before filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Span {
    pub x1: i32,
    pub x2: i32,
    pub y: i32,
}

impl Span {
    pub const fn new(x1: i32, x2: i32, y: i32) -> Self {
        Self { x1, x2, y }
    }

    #[inline]
    pub fn left(&self) -> i32 {
        self.x1.min(self.x2)
    }

    #[inline]
    pub fn right(&self) -> i32 {
        self.x1.max(self.x2)
    }

    /// Covered pixels, endpoints inclusive
    #[inline]
    pub fn width(&self) -> u32 {
        self.x1.abs_diff(self.x2) + 1
    }

    /// Same row with `x1 <= x2`
    pub fn normalized(&self) -> Self {
        Self::new(self.left(), self.right(), self.y)
    }
}

/// Pre-sized, append-only span storage.
///
/// Slots are reserved and zero-filled up front; the cursor marks how many are
/// in use. The buffer never grows: a push into a full buffer is rejected and
/// counted instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanBuffer {
    slots: Vec<Span>,
    cursor: usize,
    dropped: usize,
}

impl SpanBuffer {
    /// Reserve `capacity` slots. A zero capacity is valid and rejects every push.
    pub fn allocate(capacity: usize) -> Result<Self, RasterError> {
        let mut slots = Vec::new();
        slots
            .try_reserve_exact(capacity)
            .map_err(|_| RasterError::AllocationFailure { capacity })?;
        slots.resize(capacity, Span::default());

        Ok(Self {
            slots,
            cursor: 0,
            dropped: 0,
        })
    }

    /// Append at the cursor. Leaves the buffer untouched when full.
    pub fn push(&mut self, span: Span) -> Result<(), RasterError> {
        let Some(slot) = self.slots.get_mut(self.cursor) else {
            self.dropped += 1;
            return Err(RasterError::CapacityExceeded {
                capacity: self.slots.len(),
            });
        };
        *slot = span;
        self.cursor += 1;
        Ok(())
    }

    /// Record pushes that were skipped because the buffer is already full
    pub(crate) fn count_rejected(&mut self, count: usize) {
        self.dropped += count;
    }

    /// Free the storage. Safe to call more than once; afterwards the buffer
    /// has no capacity.
    pub fn release(&mut self) {
        self.slots = Vec::new();
        self.cursor = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cursor >= self.slots.len()
    }

    /// Pushes rejected because the buffer was full
    #[inline]
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    /// Filled spans in push order
    pub fn spans(&self) -> &[Span] {
        &self.slots[..self.cursor]
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Span> {
        self.spans().iter()
    }

    pub fn into_spans(mut self) -> Vec<Span> {
        self.slots.truncate(self.cursor);
        self.slots
    }
}

impl<'a> IntoIterator for &'a SpanBuffer {
    type Item = &'a Span;
    type IntoIter = std::slice::Iter<'a, Span>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Collapse spans that share a row into one normalized span per row,
/// sorted by y.
///
/// The rasterizer emits the middle vertex's row twice for a general
/// triangle; consumers that want exactly one span per row run this first.
pub fn merge_rows(spans: &[Span]) -> Vec<Span> {
    let mut sorted: Vec<Span> = spans.iter().map(Span::normalized).collect();
    sorted.sort_by_key(|s| (s.y, s.x1));

    let mut merged: Vec<Span> = Vec::with_capacity(sorted.len());
    for span in sorted {
        match merged.last_mut() {
            Some(last) if last.y == span.y => {
                last.x1 = last.x1.min(span.x1);
                last.x2 = last.x2.max(span.x2);
            },
            _ => merged.push(span),
        }
    }
    merged
}
