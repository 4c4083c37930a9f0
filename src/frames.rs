// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The animation: the same region rendered over and over with a
//! growing iteration budget.  Early frames get only a handful of
//! iterations and show a coarse blob; by the last frame the budget
//! has grown geometrically and the filaments are all there.

use crossbeam;
use crossbeam::thread::ScopedJoinHandle;
use std::collections::VecDeque;
use std::ops::Range;
use std::panic;
use std::sync::{Arc, Mutex, PoisonError};

use config::Config;
use errors::Result;
use field::{check_threads, Field, FieldGenerator};

/// The iteration budget of frame `index`: `round(base^(index + 1))`.
/// Frame 0 at the default base of 1.023 gets a single iteration.
pub fn frame_threshold(index: usize, growth_base: f64) -> u32 {
    // Float to int casts saturate, so runaway bases pin at u32::MAX.
    growth_base.powf((index + 1) as f64).round() as u32
}

/// A lazy, ordered sequence of animation frames.  Each call to `next`
/// computes one field; cloning the sequence gives an independent
/// copy that starts from the same frame.
#[derive(Clone, Debug)]
pub struct Frames {
    generator: FieldGenerator,
    growth_base: f64,
    next: usize,
    end: usize,
}

impl Frames {
    /// Validates the configuration and prepares `config.frame_count`
    /// frames.  Nothing is computed yet.
    pub fn new(config: &Config) -> Result<Frames> {
        let generator = FieldGenerator::new(config)?;
        Ok(Frames {
            generator,
            growth_base: config.growth_base,
            next: 0,
            end: config.frame_count,
        })
    }

    /// The threshold the frame at `index` is computed with.
    pub fn threshold_at(&self, index: usize) -> u32 {
        frame_threshold(index, self.growth_base)
    }

    /// Computes the remaining frames on `threads` worker threads.
    /// Workers pull frame indices from a shared queue, so frames
    /// finish in whatever order they finish; the result is put back
    /// in index order before it is returned.  Every frame is held in
    /// memory at once; `in_parallel` streams instead.
    pub fn collect_threaded(self, threads: usize) -> Result<Vec<Field>> {
        check_threads(threads)?;
        info!(
            "Rendering frames {}..{} on {} threads",
            self.next, self.end, threads
        );
        Ok(self.compute_range(self.next..self.end, threads))
    }

    /// The remaining frames as a lazy sequence computed `threads`
    /// frames at a time.  At most one batch is held in memory, and
    /// frames still come out in index order.
    pub fn in_parallel(self, threads: usize) -> Result<ParallelFrames> {
        check_threads(threads)?;
        info!(
            "Streaming frames {}..{} on {} threads",
            self.next, self.end, threads
        );
        Ok(ParallelFrames {
            frames: self,
            threads,
            ready: VecDeque::with_capacity(threads),
        })
    }

    fn compute_range(&self, range: Range<usize>, threads: usize) -> Vec<Field> {
        let indices = Arc::new(Mutex::new(range));
        let generator = &self.generator;
        let growth_base = self.growth_base;

        let outcome = crossbeam::scope(|spawner| {
            let handles: Vec<ScopedJoinHandle<Vec<(usize, Field)>>> = (0..threads)
                .map(|_| {
                    let indices = indices.clone();
                    spawner.spawn(move |_| {
                        let mut frames: Vec<(usize, Field)> = vec![];
                        loop {
                            let index = {
                                indices
                                    .lock()
                                    .unwrap_or_else(PoisonError::into_inner)
                                    .next()
                            };
                            match index {
                                Some(index) => {
                                    let threshold = frame_threshold(index, growth_base);
                                    frames.push((index, generator.compute(threshold)));
                                }
                                None => {
                                    break;
                                }
                            }
                        }
                        frames
                    })
                })
                .collect();

            let mut frames: Vec<(usize, Field)> = vec![];
            for handle in handles {
                match handle.join() {
                    Ok(done) => frames.extend(done),
                    Err(cause) => panic::resume_unwind(cause),
                }
            }
            frames
        });

        let mut frames = match outcome {
            Ok(frames) => frames,
            Err(cause) => panic::resume_unwind(cause),
        };
        frames.sort_by_key(|&(index, _)| index);
        frames.into_iter().map(|(_, field)| field).collect()
    }
}

/// Frames computed in parallel batches, handed out one at a time in
/// index order.  Built by `Frames::in_parallel`.
#[derive(Debug)]
pub struct ParallelFrames {
    frames: Frames,
    threads: usize,
    ready: VecDeque<Field>,
}

impl Iterator for ParallelFrames {
    type Item = Field;

    fn next(&mut self) -> Option<Field> {
        if self.ready.is_empty() && self.frames.next < self.frames.end {
            let start = self.frames.next;
            let stop = self.frames.end.min(start + self.threads);
            debug!("Frames {}..{} of {}", start + 1, stop, self.frames.end);
            let batch = self.frames.compute_range(start..stop, self.threads);
            self.frames.next = stop;
            self.ready.extend(batch);
        }
        self.ready.pop_front()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.ready.len() + self.frames.len();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ParallelFrames {}

impl Iterator for Frames {
    type Item = Field;

    fn next(&mut self) -> Option<Field> {
        if self.next >= self.end {
            return None;
        }
        let threshold = self.threshold_at(self.next);
        debug!("Frame {} of {}", self.next + 1, self.end);
        self.next += 1;
        Some(self.generator.compute(threshold))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.end - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames {}

/// `frame_count` frames of the default region at `density` samples
/// per axis, frame `i` at threshold `round(1.023^(i + 1))`.  The
/// density is checked before anything is computed.
pub fn generate_animation_frames(density: usize, frame_count: usize) -> Result<Frames> {
    Frames::new(
        &Config::default()
            .with_density(density)
            .with_frame_count(frame_count),
    )
}
