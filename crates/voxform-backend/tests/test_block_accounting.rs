//! Every block the processor obtains is released exactly once, on every
//! path through `update`.

use pretty_assertions::assert_eq;
use voxform_backend::pool::PooledBlock;
use voxform_backend::stream::{AUDIO_PORT, BRIGHTNESS_MOD_PORT, VOWEL_MOD_PORT};
use voxform_backend::{
    BlockPool, FormantProcessor, MemoryPool, ProcessorStats, StreamNode, AUDIO_BLOCK_SAMPLES,
};

/// Wraps a [`MemoryPool`] and counts every call the node makes.
struct CountingPool {
    inner: MemoryPool,
    received: usize,
    allocated: usize,
    transmitted: usize,
    released: usize,
}

impl CountingPool {
    fn new(capacity: usize) -> Self {
        Self {
            inner: MemoryPool::new(capacity, FormantProcessor::INPUTS),
            received: 0,
            allocated: 0,
            transmitted: 0,
            released: 0,
        }
    }

    fn queue(&mut self, port: usize) {
        self.inner
            .queue(port, &[1_000; AUDIO_BLOCK_SAMPLES])
            .unwrap();
    }

    fn assert_balanced(&self) {
        assert_eq!(self.received + self.allocated, self.released);
        assert_eq!(self.inner.outstanding(), 0);
    }
}

impl BlockPool for CountingPool {
    type Block = PooledBlock;

    fn receive_read_only(&mut self, port: usize) -> Option<PooledBlock> {
        let block = self.inner.receive_read_only(port);
        self.received += block.is_some() as usize;
        block
    }

    fn allocate(&mut self) -> Option<PooledBlock> {
        let block = self.inner.allocate();
        self.allocated += block.is_some() as usize;
        block
    }

    fn transmit(&mut self, block: &PooledBlock, port: usize) {
        self.transmitted += 1;
        self.inner.transmit(block, port);
    }

    fn release(&mut self, block: PooledBlock) {
        self.released += 1;
        self.inner.release(block);
    }
}

#[test]
fn test_normal_cycle() {
    let mut pool = CountingPool::new(4);
    pool.queue(AUDIO_PORT);
    pool.queue(VOWEL_MOD_PORT);
    pool.queue(BRIGHTNESS_MOD_PORT);

    let mut processor = FormantProcessor::new();
    processor.update(&mut pool);

    assert_eq!(pool.received, 3);
    assert_eq!(pool.allocated, 1);
    assert_eq!(pool.transmitted, 1);
    pool.assert_balanced();
    assert_eq!(
        processor.stats(),
        ProcessorStats {
            processed: 1,
            ..ProcessorStats::default()
        }
    );
}

#[test]
fn test_missing_input() {
    let mut pool = CountingPool::new(4);
    pool.queue(BRIGHTNESS_MOD_PORT);

    let mut processor = FormantProcessor::new();
    processor.update(&mut pool);

    assert_eq!(pool.received, 1);
    assert_eq!(pool.allocated, 0);
    assert_eq!(pool.transmitted, 0);
    pool.assert_balanced();
    assert_eq!(processor.stats().missing_input, 1);
}

#[test]
fn test_nothing_queued() {
    let mut pool = CountingPool::new(1);
    let mut processor = FormantProcessor::new();
    processor.update(&mut pool);

    assert_eq!(pool.transmitted, 0);
    pool.assert_balanced();
    assert_eq!(processor.stats().missing_input, 1);
}

#[test]
fn test_allocation_failure() {
    let mut pool = CountingPool::new(3);
    pool.queue(AUDIO_PORT);
    pool.queue(VOWEL_MOD_PORT);
    pool.queue(BRIGHTNESS_MOD_PORT);

    let mut processor = FormantProcessor::new();
    processor.update(&mut pool);

    assert_eq!(pool.received, 3);
    assert_eq!(pool.allocated, 0);
    assert_eq!(pool.transmitted, 0);
    pool.assert_balanced();
    assert_eq!(processor.stats().allocation_failures, 1);
}

#[test]
fn test_bypass_cycle() {
    let mut pool = CountingPool::new(4);
    pool.queue(AUDIO_PORT);
    pool.queue(VOWEL_MOD_PORT);

    let mut processor = FormantProcessor::new();
    processor.set_bypass(true);
    processor.update(&mut pool);

    assert_eq!(pool.received, 2);
    assert_eq!(pool.allocated, 1);
    assert_eq!(pool.transmitted, 1);
    pool.assert_balanced();
    assert_eq!(processor.stats().bypassed, 1);
}

#[test]
fn test_bypass_allocation_failure() {
    let mut pool = CountingPool::new(1);
    pool.queue(AUDIO_PORT);

    let mut processor = FormantProcessor::new();
    processor.set_mix(0.0);
    processor.update(&mut pool);

    assert_eq!(pool.transmitted, 0);
    pool.assert_balanced();
    assert_eq!(processor.stats().allocation_failures, 1);
}

#[test]
fn test_many_cycles_mixed_paths() {
    let mut pool = CountingPool::new(4);
    let mut processor = FormantProcessor::new();
    let controls = processor.controls();

    for cycle in 0..100 {
        if cycle % 3 != 0 {
            pool.queue(AUDIO_PORT);
        }
        if cycle % 2 == 0 {
            pool.queue(VOWEL_MOD_PORT);
        }
        controls.set_bypass(cycle % 7 == 0);
        processor.update(&mut pool);
        pool.assert_balanced();
    }

    let stats = processor.stats();
    assert_eq!(stats.emitted() + stats.dropped(), 100);
    assert_eq!(stats.emitted() as usize, pool.transmitted);
    assert_eq!(pool.inner.available(), 4);
}
