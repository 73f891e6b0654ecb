use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use crate::domain::food::entities::FoodRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum ScanOutcome {
    Found(FoodRecord),
    /// The code is not registered. The caller offers to create a record
    /// for it.
    NotFound { barcode: String },
}

/// Pauses the scanner while one lookup is being resolved and presented.
#[derive(Debug, Default, Clone)]
pub struct ScanGate {
    busy: Arc<AtomicBool>,
}

impl ScanGate {
    /// Returns `None` while another permit is alive.
    pub fn try_acquire(&self) -> Option<ScanPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ScanPermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_paused(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Whether `permit` was handed out by this gate or one of its clones.
    pub fn issued(&self, permit: &ScanPermit) -> bool {
        Arc::ptr_eq(&self.busy, &permit.busy)
    }
}

/// Held by the caller from the moment a code is read until its result has
/// been shown. Dropping it resumes scanning.
#[derive(Debug)]
pub struct ScanPermit {
    busy: Arc<AtomicBool>,
}

impl Drop for ScanPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}
