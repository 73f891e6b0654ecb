use tracing::info;

use crate::{
    domain::common::{NutriConfig, services::Service},
    infrastructure::{
        authentication::SupabaseAuthClient,
        food::repositories::SupabaseFoodRepository,
        preference::FilePreferenceStore,
        profile::repositories::SupabaseProfileRepository,
        supabase::SupabaseClient,
    },
};

/// The service wired to Supabase and the on-disk preference store.
pub type NutriService = Service<
    SupabaseFoodRepository,
    FilePreferenceStore,
    SupabaseAuthClient,
    SupabaseProfileRepository,
>;

pub async fn create_service(config: NutriConfig) -> Result<NutriService, anyhow::Error> {
    if config.supabase.url.trim().is_empty() {
        anyhow::bail!("Supabase URL is not configured");
    }
    if config.supabase.anon_key.trim().is_empty() {
        anyhow::bail!("Supabase anon key is not configured");
    }

    let client = SupabaseClient::new(&config.supabase)?;

    tokio::fs::create_dir_all(&config.preferences.directory).await?;
    let preference_store = FilePreferenceStore::new(config.preferences.directory.clone());

    info!(
        url = %config.supabase.url,
        preferences = %config.preferences.directory.display(),
        "service configured"
    );

    Ok(Service::new(
        SupabaseFoodRepository::new(client.clone()),
        preference_store,
        SupabaseAuthClient::new(client.clone()),
        SupabaseProfileRepository::new(client),
        config.search,
    ))
}
