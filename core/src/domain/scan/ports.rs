use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    scan::entities::{ScanOutcome, ScanPermit},
};

pub trait ScanService: Send + Sync {
    /// Claims the scanner. `None` means a previous scan is still being
    /// resolved or presented and the new read must be ignored.
    fn begin_scan(&self) -> Option<ScanPermit>;

    /// Performs exactly one lookup for `barcode`. A missing record is
    /// [`ScanOutcome::NotFound`]; a transient `Err` means the lookup itself
    /// failed and can be retried. Blank codes and permits from another gate
    /// are rejected before any lookup.
    fn resolve_barcode(
        &self,
        permit: &ScanPermit,
        barcode: String,
    ) -> impl Future<Output = Result<ScanOutcome, CoreError>> + Send;
}
