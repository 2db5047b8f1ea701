use std::mem::size_of;

/// Hard ceiling on the bytes a network may hold at once.
///
/// Every `f32` buffer the engine owns (layer data, biases, weights and the
/// transient deltas of a backward step) is accounted here. Running past the
/// cap is fatal: the budget models a fixed-memory target, so `allocate`
/// panics instead of returning an error.
///
/// A budget is an explicit value, not global state. Pair each `Network` with
/// one budget for its whole lifetime and pass it to every operation that
/// allocates or releases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryBudget {
    max_alloc: usize,
    cur_alloc: usize,
}

impl MemoryBudget {
    pub fn new(max_alloc: usize) -> MemoryBudget {
        MemoryBudget { max_alloc, cur_alloc: 0 }
    }

    pub fn max_alloc(&self) -> usize {
        self.max_alloc
    }

    pub fn cur_alloc(&self) -> usize {
        self.cur_alloc
    }

    /// Bytes still available before the cap is reached.
    pub fn available(&self) -> usize {
        self.max_alloc - self.cur_alloc
    }

    /// Returns a zeroed buffer of `len` floats and charges its bytes.
    ///
    /// # Panics
    /// Panics if the charge would take `cur_alloc` above `max_alloc`.
    pub fn allocate(&mut self, len: usize) -> Vec<f32> {
        let size = bytes_for(len);
        let next = self.cur_alloc.checked_add(size);
        match next {
            Some(total) if total <= self.max_alloc => {
                self.cur_alloc = total;
                log::trace!("alloc {size} bytes ({}/{})", self.cur_alloc, self.max_alloc);
                vec![0.0; len]
            }
            _ => panic!(
                "memory budget exhausted: requested {size} bytes with {}/{} in use",
                self.cur_alloc, self.max_alloc
            ),
        }
    }

    /// Returns a buffer's bytes to the budget and drops it.
    ///
    /// # Panics
    /// Panics if more bytes are released than are currently charged, which
    /// means a double release or a buffer from a different budget.
    pub fn release(&mut self, buffer: Vec<f32>) {
        let size = bytes_for(buffer.len());
        self.cur_alloc = match self.cur_alloc.checked_sub(size) {
            Some(rest) => rest,
            None => panic!(
                "memory budget underflow: releasing {size} bytes with only {} in use",
                self.cur_alloc
            ),
        };
        log::trace!("free {size} bytes ({}/{})", self.cur_alloc, self.max_alloc);
    }
}

/// Size in bytes of a buffer of `len` floats.
pub fn bytes_for(len: usize) -> usize {
    len * size_of::<f32>()
}
