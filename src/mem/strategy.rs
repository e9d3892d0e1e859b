use derive_more::IsVariant;

/// How a [`HeaderBuf`](super::HeaderBuf) decides which element slots to destroy when it is
/// dropped.
///
/// The buffer destroys exactly the slots the strategy names, so the strategy must agree with
/// which slots were actually initialized. Regions are bounds-checked against the capacity before
/// anything is destroyed, and under `debug_assertions` an initialization map verifies the
/// agreement slot by slot.
#[derive(Debug, Clone, PartialEq, Eq, IsVariant)]
pub enum DeinitStrategy {
    /// Destroy exactly [`count`](super::HeaderBuf::count) elements starting at a fixed slot
    /// offset. This is the strategy [`push`](super::HeaderBuf::push) grows.
    Count { from_offset: usize },
    /// Destroy the requested minimum capacity's worth of slots from the start, regardless of any
    /// capacity slack.
    MinimumCapacity,
    /// Destroy every slot of the actual capacity, slack included.
    FullCapacity,
    /// Destroy discontiguous regions, resolved in order.
    Chunks(Vec<Chunk>),
}

/// One region of a [`DeinitStrategy::Chunks`] strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub(crate) position: ChunkPosition,
    pub(crate) len: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ChunkPosition {
    FromStart(usize),
    AfterPrior(usize),
}

impl Chunk {
    /// A chunk of `len` slots starting at an absolute slot offset.
    pub fn from_start(offset: usize, len: usize) -> Chunk {
        Chunk {
            position: ChunkPosition::FromStart(offset),
            len,
        }
    }

    /// A chunk of `len` slots starting `gap` slots after the end of the previous chunk (or after
    /// slot zero for the first chunk).
    pub fn after_prior(gap: usize, len: usize) -> Chunk {
        Chunk {
            position: ChunkPosition::AfterPrior(gap),
            len,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Resolves chunks into absolute `(start, len)` regions.
pub(crate) fn resolve_chunks(chunks: &[Chunk]) -> Vec<(usize, usize)> {
    let mut regions = Vec::with_capacity(chunks.len());
    let mut cursor = 0;
    for chunk in chunks {
        let start = match chunk.position {
            ChunkPosition::FromStart(offset) => offset,
            ChunkPosition::AfterPrior(gap) => cursor + gap,
        };
        cursor = start + chunk.len;
        regions.push((start, chunk.len));
    }
    regions
}
