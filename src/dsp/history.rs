/// Fixed-length sliding window of past samples, newest first. Sized once when
/// the filter is designed, after that `push` never allocates.
#[derive(Debug, Clone)]
pub struct History {
    buffer: Vec<f64>,
    write_head: usize,
}

impl History {
    pub fn new(len: usize) -> Self {
        Self {
            buffer: vec![0.0; len],
            write_head: 0,
        }
    }

    /// shifts the window by one, discarding the oldest sample. A zero-length
    /// window ignores the sample.
    pub fn push(&mut self, x: f64) -> &mut Self {
        let n = self.buffer.len();
        if n == 0 {
            return self;
        }
        self.write_head += 1;
        self.write_head %= n;
        self.buffer[self.write_head] = x;
        self
    }

    /// Sample pushed `delay` pushes ago, `tap(0)` is the newest. Panics if
    /// `delay` is not inside the window, which includes every tap of an empty
    /// window.
    pub fn tap(&self, delay: usize) -> f64 {
        let n = self.buffer.len();
        assert!(delay < n, "tap {delay} outside a window of {n} samples");
        let idx = n + self.write_head - delay;
        self.buffer[idx % n]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn reset(&mut self) {
        self.buffer.fill(0.0);
        self.write_head = 0;
    }

    pub fn iter(&self) -> HistoryIter<'_> {
        self.into_iter()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = f64;

    type IntoIter = HistoryIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        Self::IntoIter {
            history: self,
            delay: 0,
        }
    }
}

/// newest-to-oldest iterator over a [`History`]
pub struct HistoryIter<'a> {
    history: &'a History,
    delay: usize,
}

impl<'a> Iterator for HistoryIter<'a> {
    type Item = f64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.delay >= self.history.len() {
            return None;
        }
        let ret = self.history.tap(self.delay);
        self.delay += 1;
        Some(ret)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.history.len().saturating_sub(self.delay);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for HistoryIter<'_> {}
