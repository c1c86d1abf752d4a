// Lazy sequence transformation.
//
// `LazySeq` applies a transform to a source iterator only when an item is
// first asked for, and remembers the result. Indexing into the sequence
// pulls just enough of the source to reach that index.

use std::cell::RefCell;
use std::ops::RangeInclusive;

use anyhow::Result;

/// A memoized, lazily transformed sequence.
pub struct LazySeq<I, F, T>
where
    I: Iterator,
    F: FnMut(I::Item) -> T,
{
    source: RefCell<Source<I, F>>,
    cache: RefCell<Vec<T>>,
}

struct Source<I, F> {
    iter: I,
    transform: F,
    exhausted: bool,
}

impl<I, F, T> LazySeq<I, F, T>
where
    I: Iterator,
    F: FnMut(I::Item) -> T,
    T: Clone,
{
    pub fn new<S>(source: S, transform: F) -> Self
    where
        S: IntoIterator<IntoIter = I>,
    {
        Self {
            source: RefCell::new(Source {
                iter: source.into_iter(),
                transform,
                exhausted: false,
            }),
            cache: RefCell::new(Vec::new()),
        }
    }

    /// How many items have been transformed so far.
    pub fn evaluated(&self) -> usize {
        self.cache.borrow().len()
    }

    /// Item at `index`, transforming source items up to it if needed.
    /// `None` once the source runs out before `index`.
    pub fn get(&self, index: usize) -> Option<T> {
        self.fill_to(index);
        self.cache.borrow().get(index).cloned()
    }

    /// Iterate over transformed items, evaluating each on demand.
    pub fn iter(&self) -> LazyIter<'_, I, F, T> {
        LazyIter { seq: self, pos: 0 }
    }

    /// Force the whole sequence and return every transformed item.
    pub fn collect_all(&self) -> Vec<T> {
        self.iter().collect()
    }

    fn fill_to(&self, index: usize) {
        let mut source = self.source.borrow_mut();
        let mut cache = self.cache.borrow_mut();
        while cache.len() <= index && !source.exhausted {
            match source.iter.next() {
                Some(item) => {
                    let value = (source.transform)(item);
                    cache.push(value);
                }
                None => source.exhausted = true,
            }
        }
    }
}

/// Iterator over a `LazySeq`, sharing its cache.
pub struct LazyIter<'a, I, F, T>
where
    I: Iterator,
    F: FnMut(I::Item) -> T,
{
    seq: &'a LazySeq<I, F, T>,
    pos: usize,
}

impl<I, F, T> Iterator for LazyIter<'_, I, F, T>
where
    I: Iterator,
    F: FnMut(I::Item) -> T,
    T: Clone,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let item = self.seq.get(self.pos)?;
        self.pos += 1;
        Some(item)
    }
}

/// Largest base whose square still fits in a `u64`.
pub const MAX_SQUARE_BASE: u64 = u32::MAX as u64;

/// Squares of `1..=count`, computed on demand.
/// Fails when `count` is large enough for a square to overflow.
pub fn squares(count: u64) -> Result<LazySeq<RangeInclusive<u64>, fn(u64) -> u64, u64>> {
    if count > MAX_SQUARE_BASE {
        anyhow::bail!("Count must be at most {MAX_SQUARE_BASE}, got {count}");
    }
    Ok(LazySeq::new(1..=count, square as fn(u64) -> u64))
}

fn square(x: u64) -> u64 {
    x * x
}

/// Split an iterator into lazily produced chunks of `size` items.
/// The last chunk may be shorter.
pub fn chunked<I>(source: I, size: usize) -> Result<Chunked<I::IntoIter>>
where
    I: IntoIterator,
{
    if size == 0 {
        anyhow::bail!("Chunk size must be positive");
    }
    Ok(Chunked {
        iter: source.into_iter(),
        size,
    })
}

pub struct Chunked<I> {
    iter: I,
    size: usize,
}

impl<I: Iterator> Iterator for Chunked<I> {
    type Item = Vec<I::Item>;

    fn next(&mut self) -> Option<Self::Item> {
        let chunk: Vec<I::Item> = self.iter.by_ref().take(self.size).collect();
        if chunk.is_empty() {
            None
        } else {
            Some(chunk)
        }
    }
}
