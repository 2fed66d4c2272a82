//! Thread-safe controller handle.
//!
//! A single mutex guards mode changes, point updates and `process`, so a
//! UI thread and a render thread never observe a half-applied update.

use crate::controller::ContrastController;
use crate::point::{ColorPoint, Mode};
use inverter_core::{Image, PixelFormat, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable handle to one [`ContrastController`].
#[derive(Debug, Clone)]
pub struct SharedController {
    inner: Arc<Mutex<ContrastController>>,
}

impl SharedController {
    /// Wraps a controller.
    pub fn new(controller: ContrastController) -> Self {
        Self {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    // A panic while holding the lock cannot break the point ordering, so
    // the poisoned value is still usable.
    fn lock(&self) -> MutexGuard<'_, ContrastController> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current mode.
    pub fn mode(&self) -> Mode {
        self.lock().mode()
    }

    /// Current point.
    pub fn point(&self) -> ColorPoint {
        self.lock().point()
    }

    /// See [`ContrastController::set_mode`].
    pub fn set_mode(&self, mode: Mode) {
        self.lock().set_mode(mode);
    }

    /// See [`ContrastController::set_black`].
    pub fn set_black(&self, v: f32) -> bool {
        self.lock().set_black(v)
    }

    /// See [`ContrastController::set_white`].
    pub fn set_white(&self, v: f32) -> bool {
        self.lock().set_white(v)
    }

    /// Runs [`ContrastController::process`] under the lock.
    pub fn process<T: PixelFormat>(&self, original: &Image<T>) -> Result<Image<T>> {
        self.lock().process(original)
    }

    /// Runs `f` with exclusive access to the controller.
    pub fn with<R>(&self, f: impl FnOnce(&mut ContrastController) -> R) -> R {
        f(&mut self.lock())
    }
}

impl From<ContrastController> for SharedController {
    fn from(controller: ContrastController) -> Self {
        Self::new(controller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use std::thread;

    #[test]
    fn test_shared_across_threads() {
        let config = PipelineConfig::builder().mode(Mode::Manual).build().unwrap();
        let shared = SharedController::new(ContrastController::new(&config).unwrap());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let ctl = shared.clone();
                thread::spawn(move || {
                    ctl.set_black(0.1 * i as f32);
                    ctl.set_white(1.0 - 0.1 * i as f32);
                    let img: Image<u8> = Image::filled(4, 4, [10, 20, 30, 200]);
                    ctl.process(&img).unwrap()
                })
            })
            .collect();

        for h in handles {
            let out = h.join().unwrap();
            assert!(out.alpha().all(|a| a == 200));
        }
        let p = shared.point();
        assert!(p.black() <= p.white());
    }

    #[test]
    fn test_with_gives_exclusive_access() {
        let shared: SharedController = ContrastController::new(&PipelineConfig::default()).unwrap().into();
        let changed = shared.with(|ctl| {
            ctl.set_mode(Mode::Manual);
            ctl.set_black(0.3)
        });
        assert!(changed);
        assert_eq!(shared.mode(), Mode::Manual);
        assert_eq!(shared.point().black(), 0.3);
    }
}
