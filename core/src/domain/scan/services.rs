use tracing::{info, instrument, warn};

use crate::domain::{
    authentication::ports::AuthClient,
    common::{entities::app_errors::CoreError, services::Service},
    favorite::ports::FavoriteService,
    food::ports::FoodRepository,
    preference::ports::PreferenceStore,
    profile::ports::ProfileRepository,
    scan::{
        entities::{ScanOutcome, ScanPermit},
        ports::ScanService,
    },
};

impl<F, P, A, PR> ScanService for Service<F, P, A, PR>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
{
    fn begin_scan(&self) -> Option<ScanPermit> {
        let permit = self.scan_gate.try_acquire();
        if permit.is_none() {
            info!("scanner paused, ignoring read");
        }
        permit
    }

    #[instrument(skip(self, permit))]
    async fn resolve_barcode(
        &self,
        permit: &ScanPermit,
        barcode: String,
    ) -> Result<ScanOutcome, CoreError> {
        if !self.scan_gate.issued(permit) {
            return Err(CoreError::Validation(
                "scan permit was issued by another scanner".to_string(),
            ));
        }

        let barcode = barcode.trim();
        if barcode.is_empty() {
            return Err(CoreError::Validation("barcode is required".to_string()));
        }

        let record = self
            .food_repository
            .get_by_barcode(barcode)
            .await
            .inspect_err(|e| warn!(error = %e, "barcode lookup failed"))?;

        match record {
            Some(record) => {
                info!(id = %record.id, "barcode resolved");
                self.refresh_favorites(vec![record.clone()]).await;
                Ok(ScanOutcome::Found(record))
            }
            None => {
                info!("barcode not registered");
                Ok(ScanOutcome::NotFound {
                    barcode: barcode.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::test_utils::{build_service, sample_record};
    use crate::domain::scan::entities::ScanGate;

    #[tokio::test]
    async fn test_registered_code_is_found() {
        let service = build_service();
        let mut record = sample_record("1", "Apple", 52.0);
        record.barcode = Some("7501055300075".to_string());
        service.food_repository.seed(vec![record.clone()]);

        let permit = service.begin_scan().unwrap();
        let outcome = service
            .resolve_barcode(&permit, "7501055300075".to_string())
            .await
            .unwrap();

        assert_eq!(outcome, ScanOutcome::Found(record));
        assert_eq!(service.food_repository.lookup_calls(), 1);
    }

    #[tokio::test]
    async fn test_unregistered_code_is_not_found_not_error() {
        let service = build_service();

        let permit = service.begin_scan().unwrap();
        let outcome = service
            .resolve_barcode(&permit, "0000000000000".to_string())
            .await;

        assert_eq!(
            outcome,
            Ok(ScanOutcome::NotFound {
                barcode: "0000000000000".to_string()
            })
        );
    }

    #[tokio::test]
    async fn test_outage_is_error_not_not_found() {
        let service = build_service();
        service.food_repository.set_unavailable(true);

        let permit = service.begin_scan().unwrap();
        let err = service
            .resolve_barcode(&permit, "0000000000000".to_string())
            .await
            .unwrap_err();

        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_scanner_paused_until_result_presented() {
        let service = build_service();

        let permit = service.begin_scan().unwrap();
        let _ = service
            .resolve_barcode(&permit, "0000000000000".to_string())
            .await;

        // Result resolved but still on screen.
        assert!(service.begin_scan().is_none());

        drop(permit);
        assert!(service.begin_scan().is_some());
        assert_eq!(service.food_repository.lookup_calls(), 1);
    }

    #[tokio::test]
    async fn test_foreign_permit_is_rejected_without_lookup() {
        let service = build_service();
        let foreign = ScanGate::default().try_acquire().unwrap();

        let err = service
            .resolve_barcode(&foreign, "0000000000000".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(service.food_repository.lookup_calls(), 0);
        assert!(service.begin_scan().is_some());
    }

    #[tokio::test]
    async fn test_blank_code_is_rejected_without_lookup() {
        let service = build_service();

        let permit = service.begin_scan().unwrap();
        let err = service
            .resolve_barcode(&permit, "  ".to_string())
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::Validation(_)));
        assert_eq!(service.food_repository.lookup_calls(), 0);
    }
}
