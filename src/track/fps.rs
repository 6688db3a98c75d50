use std::time::Instant;

/// Monotonic tick counter, the `getTickCount` / `getTickFrequency` pair.
pub trait TickCounter {
    fn ticks(&self) -> i64;

    /// Ticks per second.
    fn frequency(&self) -> f64;
}

/// Nanosecond ticks from `std::time::Instant`.
pub struct InstantTicks {
    origin: Instant,
}

impl InstantTicks {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for InstantTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickCounter for InstantTicks {
    fn ticks(&self) -> i64 {
        i64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(i64::MAX)
    }

    fn frequency(&self) -> f64 {
        1_000_000_000.0
    }
}

/// Instantaneous rate from a tick delta. Anything that is not a finite,
/// non-negative number (zero delta, backwards clock) reads as 0.
pub fn fps_from_ticks(frequency: f64, elapsed_ticks: i64) -> f64 {
    let fps = frequency / elapsed_ticks as f64;
    if fps.is_finite() && fps >= 0.0 {
        fps
    } else {
        0.0
    }
}

/// Measures one processing step at a time.
pub struct FpsMeter<C> {
    clock: C,
    started: Option<i64>,
}

impl<C: TickCounter> FpsMeter<C> {
    pub fn new(clock: C) -> Self {
        Self {
            clock,
            started: None,
        }
    }

    pub fn start(&mut self) {
        self.started = Some(self.clock.ticks());
    }

    /// FPS since the last `start`. Returns 0 when `start` was never called.
    pub fn stop(&mut self) -> f64 {
        match self.started.take() {
            Some(start) => fps_from_ticks(self.clock.frequency(), self.clock.ticks() - start),
            None => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct SteppedTicks {
        now: Cell<i64>,
        step: i64,
    }

    impl TickCounter for SteppedTicks {
        fn ticks(&self) -> i64 {
            let t = self.now.get();
            self.now.set(t + self.step);
            t
        }

        fn frequency(&self) -> f64 {
            1000.0
        }
    }

    #[test]
    fn zero_delta_is_zero_not_infinite() {
        assert_eq!(fps_from_ticks(1000.0, 0), 0.0);
        assert_eq!(fps_from_ticks(0.0, 0), 0.0);
    }

    #[test]
    fn negative_delta_is_zero() {
        assert_eq!(fps_from_ticks(1000.0, -5), 0.0);
    }

    #[test]
    fn regular_delta() {
        assert_eq!(fps_from_ticks(1000.0, 40), 25.0);
    }

    #[test]
    fn never_nan_or_infinite() {
        for freq in [0.0, 1.0, 1e9, f64::INFINITY, f64::NAN] {
            for delta in [i64::MIN, -1, 0, 1, 1_000, i64::MAX] {
                let fps = fps_from_ticks(freq, delta);
                assert!(fps.is_finite() && fps >= 0.0, "{freq} / {delta} -> {fps}");
            }
        }
    }

    #[test]
    fn meter_uses_clock_delta() {
        let mut meter = FpsMeter::new(SteppedTicks {
            now: Cell::new(0),
            step: 50,
        });
        meter.start();
        assert_eq!(meter.stop(), 20.0);
        assert_eq!(meter.stop(), 0.0);
    }

    #[test]
    fn frozen_clock_reads_zero() {
        let mut meter = FpsMeter::new(SteppedTicks {
            now: Cell::new(7),
            step: 0,
        });
        meter.start();
        assert_eq!(meter.stop(), 0.0);
    }
}
