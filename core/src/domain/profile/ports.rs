use std::future::Future;

use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    profile::{entities::Profile, value_objects::UpdateProfileInput},
};

/// Remote `profiles` table. Calls are made on behalf of the signed-in user.
#[cfg_attr(test, mockall::automock)]
pub trait ProfileRepository: Send + Sync {
    fn get_by_user_id(
        &self,
        user_id: Uuid,
        access_token: &str,
    ) -> impl Future<Output = Result<Option<Profile>, CoreError>> + Send;

    fn upsert(
        &self,
        profile: Profile,
        access_token: &str,
    ) -> impl Future<Output = Result<Profile, CoreError>> + Send;
}

pub trait ProfileService: Send + Sync {
    fn get_profile(&self) -> impl Future<Output = Result<Option<Profile>, CoreError>> + Send;

    fn update_profile(
        &self,
        input: UpdateProfileInput,
    ) -> impl Future<Output = Result<Profile, CoreError>> + Send;
}
