use crate::process::Pcb;
use std::collections::VecDeque;
use std::fmt;

/// Processes waiting for the CPU, in insertion order.
///
/// Position matters: policies break ties in favour of the lower index.
#[derive(Debug, Default, Clone)]
pub struct ReadyQueue {
    queue: VecDeque<Pcb>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        ReadyQueue {
            queue: VecDeque::new(),
        }
    }

    pub fn add_end(&mut self, pcb: Pcb) {
        self.queue.push_back(pcb);
    }

    pub fn head(&self) -> Option<&Pcb> {
        self.queue.front()
    }

    pub fn get(&self, index: usize) -> Option<&Pcb> {
        self.queue.get(index)
    }

    pub fn remove(&mut self, index: usize) -> Option<Pcb> {
        self.queue.remove(index)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Pcb> {
        self.queue.iter()
    }
}

impl fmt::Display for ReadyQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, pcb) in self.queue.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{}", pcb.pid(), pcb.remaining())?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(pids: &[u32]) -> ReadyQueue {
        let mut queue = ReadyQueue::new();
        for &pid in pids {
            queue.add_end(Pcb::new(pid, pid as f64, 1.0, 0));
        }
        queue
    }

    #[test]
    fn keeps_insertion_order() {
        let queue = queue_of(&[4, 1, 7]);
        let pids: Vec<u32> = queue.iter().map(|p| p.pid()).collect();
        assert_eq!(pids, vec![4, 1, 7]);
        assert_eq!(queue.head().map(|p| p.pid()), Some(4));
    }

    #[test]
    fn remove_by_index_closes_gap() {
        let mut queue = queue_of(&[0, 1, 2]);
        let removed = queue.remove(1).unwrap();
        assert_eq!(removed.pid(), 1);
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.get(1).map(|p| p.pid()), Some(2));
        assert!(queue.remove(5).is_none());
    }

    #[test]
    fn display_lists_pid_and_remaining() {
        let queue = queue_of(&[2, 3]);
        assert_eq!(queue.to_string(), "(2:1 3:1)");
        assert_eq!(ReadyQueue::new().to_string(), "()");
    }
}
