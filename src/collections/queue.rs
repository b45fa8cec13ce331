/*
 * Copyright (c) 2018, 2022 Frank Fischer <frank-fischer@shadow-soft.de>
 *
 * This program is free software: you can redistribute it and/or
 * modify it under the terms of the GNU General Public License as
 * published by the Free Software Foundation, either version 3 of the
 * License, or (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful, but
 * WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU
 * General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with this program.  If not, see  <http://www.gnu.org/licenses/>
 */

use std::collections::VecDeque;
use std::fmt;

/// Returned by [`ItemQueue::push`] if the queue has no free slot.
///
/// The rejected item is handed back to the caller.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct QueueFull<I>(pub I);

impl<I> fmt::Display for QueueFull<I> {
    fn fmt(&self, fmt: &mut fmt::Formatter) -> fmt::Result {
        write!(fmt, "queue is full")
    }
}

/// A first-in-first-out queue.
pub trait ItemQueue<I> {
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn len(&self) -> usize;

    fn clear(&mut self);

    /// Append an item at the back of the queue.
    fn push(&mut self, u: I) -> Result<(), QueueFull<I>>;

    /// Remove the item at the front of the queue.
    fn pop(&mut self) -> Option<I>;
}

impl<'a, I, D> ItemQueue<I> for &'a mut D
where
    D: ItemQueue<I>,
{
    fn is_empty(&self) -> bool {
        (**self).is_empty()
    }

    fn len(&self) -> usize {
        (**self).len()
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn push(&mut self, u: I) -> Result<(), QueueFull<I>> {
        (**self).push(u)
    }

    fn pop(&mut self) -> Option<I> {
        (**self).pop()
    }
}

impl<I> ItemQueue<I> for VecDeque<I> {
    fn is_empty(&self) -> bool {
        VecDeque::is_empty(self)
    }

    fn len(&self) -> usize {
        VecDeque::len(self)
    }

    fn clear(&mut self) {
        VecDeque::clear(self)
    }

    fn push(&mut self, u: I) -> Result<(), QueueFull<I>> {
        VecDeque::push_back(self, u);
        Ok(())
    }

    fn pop(&mut self) -> Option<I> {
        VecDeque::pop_front(self)
    }
}

/// A circular queue with a fixed capacity.
///
/// The queue never reallocates. Pushing onto a full queue fails with
/// [`QueueFull`].
pub struct RingQueue<I> {
    items: Vec<Option<I>>,
    front: usize,
    len: usize,
}

impl<I> RingQueue<I> {
    /// Create an empty queue holding at most `capacity` items.
    pub fn with_capacity(capacity: usize) -> Self {
        RingQueue {
            items: (0..capacity).map(|_| None).collect(),
            front: 0,
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.items.len()
    }

    pub fn is_full(&self) -> bool {
        self.len == self.items.len()
    }
}

impl<I> ItemQueue<I> for RingQueue<I> {
    fn len(&self) -> usize {
        self.len
    }

    fn clear(&mut self) {
        for item in self.items.iter_mut() {
            *item = None;
        }
        self.front = 0;
        self.len = 0;
    }

    fn push(&mut self, u: I) -> Result<(), QueueFull<I>> {
        if self.is_full() {
            return Err(QueueFull(u));
        }
        let back = (self.front + self.len) % self.items.len();
        self.items[back] = Some(u);
        self.len += 1;
        Ok(())
    }

    fn pop(&mut self) -> Option<I> {
        if self.len == 0 {
            return None;
        }
        let u = self.items[self.front].take();
        self.front = (self.front + 1) % self.items.len();
        self.len -= 1;
        u
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemQueue, QueueFull, RingQueue};
    use std::collections::VecDeque;

    #[test]
    fn test_ring_fifo() {
        let mut q = RingQueue::with_capacity(3);
        assert!(q.is_empty());
        assert_eq!(q.push(1), Ok(()));
        assert_eq!(q.push(2), Ok(()));
        assert_eq!(q.pop(), Some(1));
        assert_eq!(q.push(3), Ok(()));
        assert_eq!(q.push(4), Ok(()));
        assert!(q.is_full());
        assert_eq!(q.push(5), Err(QueueFull(5)));
        assert_eq!(q.len(), 3);
        assert_eq!(q.pop(), Some(2));
        assert_eq!(q.pop(), Some(3));
        assert_eq!(q.pop(), Some(4));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_ring_clear() {
        let mut q = RingQueue::with_capacity(2);
        q.push('a').unwrap();
        q.push('b').unwrap();
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.pop(), None);
        q.push('c').unwrap();
        assert_eq!(q.pop(), Some('c'));
    }

    #[test]
    fn test_zero_capacity() {
        let mut q = RingQueue::with_capacity(0);
        assert!(q.is_full());
        assert_eq!(q.push(1), Err(QueueFull(1)));
        assert_eq!(q.pop(), None);
    }

    #[test]
    fn test_vecdeque_never_full() {
        let mut q = VecDeque::new();
        for i in 0..10 {
            assert_eq!(ItemQueue::push(&mut q, i), Ok(()));
        }
        assert_eq!(ItemQueue::pop(&mut q), Some(0));
        assert_eq!(ItemQueue::len(&q), 9);
    }
}
