//! In-memory block pool.
//!
//! Stands in for the host's block allocator when rendering offline and in
//! tests. All blocks are allocated up front; the pool only moves boxes
//! between its free list, its input ports, and whichever node holds them,
//! so block ownership can be audited after every cycle.

use crate::error::PoolError;
use crate::stream::{AudioBlock, BlockPool};
use crate::AUDIO_BLOCK_SAMPLES;

/// A block owned by a [`MemoryPool`].
///
/// Not `Clone`: the only way to give one back is [`BlockPool::release`].
#[derive(Debug)]
pub struct PooledBlock(Box<AudioBlock>);

impl AsRef<AudioBlock> for PooledBlock {
    fn as_ref(&self) -> &AudioBlock {
        &self.0
    }
}

impl AsMut<AudioBlock> for PooledBlock {
    fn as_mut(&mut self) -> &mut AudioBlock {
        &mut self.0
    }
}

/// A block sent downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    /// Output port.
    pub port: usize,
    /// Copy of the transmitted samples.
    pub samples: AudioBlock,
}

/// Fixed-capacity block pool with numbered input ports.
#[derive(Debug)]
pub struct MemoryPool {
    capacity: usize,
    free: Vec<PooledBlock>,
    ports: Vec<Option<PooledBlock>>,
    transmitted: Vec<Transmission>,
}

impl MemoryPool {
    /// Creates a pool of `capacity` zeroed blocks serving `ports` input ports.
    pub fn new(capacity: usize, ports: usize) -> Self {
        let free = (0..capacity)
            .map(|_| PooledBlock(Box::new([0; AUDIO_BLOCK_SAMPLES])))
            .collect();
        Self {
            capacity,
            free,
            ports: (0..ports).map(|_| None).collect(),
            transmitted: Vec::new(),
        }
    }

    /// Parks a block holding `samples` on an input port.
    ///
    /// Short input is zero-padded; samples past one block are ignored.
    pub fn queue(&mut self, port: usize, samples: &[i16]) -> Result<(), PoolError> {
        let ports = self.ports.len();
        let slot = self
            .ports
            .get_mut(port)
            .ok_or(PoolError::UnknownPort { port, ports })?;
        if slot.is_some() {
            return Err(PoolError::PortBusy { port });
        }
        let mut block = self.free.pop().ok_or(PoolError::Exhausted {
            capacity: self.capacity,
        })?;

        let n = samples.len().min(AUDIO_BLOCK_SAMPLES);
        let data = block.as_mut();
        data[..n].copy_from_slice(&samples[..n]);
        data[n..].fill(0);

        *slot = Some(block);
        Ok(())
    }

    /// Recycles queued blocks nobody received. Returns how many.
    pub fn clear_ports(&mut self) -> usize {
        let mut recycled = 0;
        for slot in &mut self.ports {
            if let Some(block) = slot.take() {
                self.free.push(block);
                recycled += 1;
            }
        }
        recycled
    }

    /// Blocks neither free nor parked on a port.
    pub fn outstanding(&self) -> usize {
        let queued = self.ports.iter().filter(|slot| slot.is_some()).count();
        self.capacity - self.free.len() - queued
    }

    /// Blocks on the free list.
    pub fn available(&self) -> usize {
        self.free.len()
    }

    /// Drains everything transmitted since the last call.
    pub fn take_transmitted(&mut self) -> Vec<Transmission> {
        std::mem::take(&mut self.transmitted)
    }
}

impl BlockPool for MemoryPool {
    type Block = PooledBlock;

    fn receive_read_only(&mut self, port: usize) -> Option<PooledBlock> {
        self.ports.get_mut(port).and_then(Option::take)
    }

    fn allocate(&mut self) -> Option<PooledBlock> {
        self.free.pop()
    }

    fn transmit(&mut self, block: &PooledBlock, port: usize) {
        self.transmitted.push(Transmission {
            port,
            samples: *block.as_ref(),
        });
    }

    fn release(&mut self, block: PooledBlock) {
        self.free.push(block);
    }
}
