use managed::ManagedSlice;

/// Error value indicating insufficient capacity.
#[derive(Debug, Clone, Copy, Eq, Ord, PartialEq, PartialOrd)]
pub struct CapacityError<Element>(pub Element);

/// Wraps a ManagedSlice in a vec-like interface.
///
/// The capacity is the length of the underlying slice, whether it is borrowed
/// or owned. An owned buffer never grows past the size it was allocated with.
pub struct ManagedVec<'a, 'b, T: 'a> {
    buf: &'b mut ManagedSlice<'a, T>,
    len: usize,
}

impl<'a, 'b, T> ManagedVec<'a, 'b, T> {
    pub fn new(buf: &'b mut ManagedSlice<'a, T>) -> Self {
        ManagedVec { buf, len: 0 }
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }

    pub fn push(&mut self, value: T) -> Result<(), CapacityError<T>> {
        match self.buf.get_mut(self.len) {
            Some(slot) => {
                *slot = value;
                self.len += 1;
                Ok(())
            }
            None => Err(CapacityError(value)),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[T] {
        &self.buf[..self.len]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrowed_push_until_full() {
        let mut storage = [0u8; 3];
        let mut slice = ManagedSlice::Borrowed(&mut storage[..]);
        let mut buf = ManagedVec::new(&mut slice);

        buf.push(1).unwrap();
        buf.push(2).unwrap();
        buf.push(3).unwrap();
        assert_eq!(buf.push(4), Err(CapacityError(4)));
        assert_eq!(buf.as_slice(), &[1, 2, 3]);

        buf.clear();
        assert!(buf.is_empty());
        buf.push(9).unwrap();
        assert_eq!(buf.as_slice(), &[9]);
    }

    #[test]
    #[cfg(feature = "alloc")]
    fn owned_keeps_its_size() {
        let mut slice: ManagedSlice<'_, u8> = ManagedSlice::Owned(alloc::vec![0; 2]);
        {
            let mut buf = ManagedVec::new(&mut slice);
            buf.push(1).unwrap();
            buf.push(2).unwrap();
            assert_eq!(buf.push(3), Err(CapacityError(3)));
            assert_eq!(buf.len(), 2);
        }

        // a later user sees the same capacity
        let mut buf = ManagedVec::new(&mut slice);
        buf.push(7).unwrap();
        buf.push(8).unwrap();
        assert!(buf.push(9).is_err());
        assert_eq!(buf.as_slice(), &[7, 8]);
    }
}
