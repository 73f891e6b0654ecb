use std::io::Write;

use anyhow::Context;
use nutriscan_core::domain::{
    authentication::{
        entities::SignUpOutcome,
        ports::{AuthClient, AuthService},
        value_objects::{SignInInput, SignUpInput},
    },
    common::{
        entities::{app_errors::CoreError, synced::Persistence},
        services::Service,
    },
    comparison::entities::{ComparisonRejection, ComparisonSet},
    favorite::ports::FavoriteService,
    food::{
        entities::FoodRecordPatch,
        ports::{FoodRepository, FoodService},
        value_objects::{AddFoodInput, SearchOutcome},
    },
    preference::ports::PreferenceStore,
    profile::{
        ports::{ProfileRepository, ProfileService},
        value_objects::UpdateProfileInput,
    },
    scan::{entities::ScanOutcome, ports::ScanService},
    search_history::ports::SearchHistoryService,
};

use crate::{
    args::{AddArgs, Command, FavoritesCommand, HistoryCommand, ProfileCommand, UpdateArgs},
    render,
};

/// Runs one command against `service`, writing its output to `out`.
pub async fn run<F, P, A, PR, W>(
    service: &Service<F, P, A, PR>,
    command: Command,
    out: &mut W,
) -> Result<(), anyhow::Error>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
    W: Write,
{
    match command {
        Command::Scan { barcode } => scan(service, barcode, out).await,
        Command::Search { text } => search(service, text.join(" "), out).await,
        Command::Add(args) => add(service, args, out).await,
        Command::Update(args) => update(service, args, out).await,
        Command::Favorites(command) => favorites(service, command, out).await,
        Command::History(command) => history(service, command, out).await,
        Command::Compare { barcodes } => compare(service, barcodes, out).await,
        Command::Login { email, password } => {
            let session = service.sign_in(SignInInput { email, password }).await?;
            writeln!(out, "{}", render::session_line(&session))?;
            Ok(())
        }
        Command::Signup {
            name,
            email,
            password,
            confirm_password,
        } => {
            let password_confirmation = confirm_password.unwrap_or_else(|| password.clone());
            let outcome = service
                .sign_up(SignUpInput {
                    name,
                    email,
                    password,
                    password_confirmation,
                })
                .await?;
            match outcome {
                SignUpOutcome::SignedIn(session) => {
                    writeln!(out, "{}", render::session_line(&session))?
                }
                SignUpOutcome::ConfirmationRequired => writeln!(
                    out,
                    "Account created. Check your e-mail to confirm it, then log in."
                )?,
            }
            Ok(())
        }
        Command::Logout => {
            let synced = service.sign_out().await;
            writeln!(out, "Signed out.")?;
            warn_unsaved(out, &synced.persistence)
        }
        Command::Whoami => {
            match service.current_session().await {
                Some(session) => writeln!(out, "{}", render::session_line(&session))?,
                None => writeln!(out, "Not signed in.")?,
            }
            Ok(())
        }
        Command::Profile(command) => profile(service, command, out).await,
    }
}

fn warn_unsaved<W: Write>(
    out: &mut W,
    persistence: &Persistence,
) -> Result<(), anyhow::Error> {
    if let Some(warning) = render::persistence_warning(persistence) {
        writeln!(out, "{}", warning)?;
    }
    Ok(())
}

async fn scan<F, P, A, PR, W>(
    service: &Service<F, P, A, PR>,
    barcode: String,
    out: &mut W,
) -> Result<(), anyhow::Error>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
    W: Write,
{
    let Some(permit) = service.begin_scan() else {
        writeln!(out, "Scanner busy, try again once the current result is closed.")?;
        return Ok(());
    };

    match service.resolve_barcode(&permit, barcode).await? {
        ScanOutcome::Found(record) => {
            let favorite = service.is_favorite(&record.id).await;
            writeln!(out, "{}", render::food_detail(&record, favorite))?;
        }
        ScanOutcome::NotFound { barcode } => {
            writeln!(out, "No food registered with barcode {}.", barcode)?;
            writeln!(
                out,
                "Add it with: nutriscan add --barcode {} --name <name> --calories <kcal> --protein <g> --carbs <g> --fat <g>",
                barcode
            )?;
        }
    }
    drop(permit);

    Ok(())
}

async fn search<F, P, A, PR, W>(
    service: &Service<F, P, A, PR>,
    text: String,
    out: &mut W,
) -> Result<(), anyhow::Error>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
    W: Write,
{
    let recorded = service.record_search(text.clone()).await;
    warn_unsaved(out, &recorded.persistence)?;

    let records = match service.search_foods(text).await? {
        SearchOutcome::Results(records) => records,
        SearchOutcome::Superseded => return Ok(()),
    };

    if records.is_empty() {
        writeln!(out, "No foods found.")?;
    }
    for record in &records {
        let favorite = service.is_favorite(&record.id).await;
        writeln!(out, "{}", render::food_line(record, favorite))?;
    }

    Ok(())
}

async fn add<F, P, A, PR, W>(
    service: &Service<F, P, A, PR>,
    args: AddArgs,
    out: &mut W,
) -> Result<(), anyhow::Error>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
    W: Write,
{
    let input = AddFoodInput {
        name: args.name,
        brand: args.brand,
        barcode: args.barcode,
        calories: args.calories,
        protein: args.protein,
        carbohydrates: args.carbohydrates,
        fat: args.fat,
        sugar: args.sugar,
        fiber: args.fiber,
        sodium: args.sodium,
        image_url: args.image_url,
    };

    let record = service.add_food(input).await?;
    writeln!(out, "Food added.")?;
    writeln!(out, "{}", render::food_detail(&record, false))?;

    Ok(())
}

async fn update<F, P, A, PR, W>(
    service: &Service<F, P, A, PR>,
    args: UpdateArgs,
    out: &mut W,
) -> Result<(), anyhow::Error>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
    W: Write,
{
    let patch = FoodRecordPatch {
        barcode: args.barcode,
        name: args.name,
        brand: args.brand,
        calories: args.calories,
        protein: args.protein,
        fat: args.fat,
        carbohydrates: args.carbohydrates,
        sugar: args.sugar,
        fiber: args.fiber,
        sodium: args.sodium,
        image_url: args.image_url,
    };

    let record = service.update_food(args.id, patch).await?;
    let favorite = service.is_favorite(&record.id).await;
    writeln!(out, "Food updated.")?;
    writeln!(out, "{}", render::food_detail(&record, favorite))?;

    Ok(())
}

async fn favorites<F, P, A, PR, W>(
    service: &Service<F, P, A, PR>,
    command: FavoritesCommand,
    out: &mut W,
) -> Result<(), anyhow::Error>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
    W: Write,
{
    match command {
        FavoritesCommand::List => {
            let favorites = service.load_favorites().await;
            if favorites.is_empty() {
                writeln!(out, "No favorites yet.")?;
            }
            for record in favorites.records() {
                writeln!(out, "{}", render::food_line(record, true))?;
            }
        }
        FavoritesCommand::Toggle { barcode } => {
            let record = service
                .find_by_barcode(barcode.clone())
                .await?
                .ok_or(CoreError::NotFound)
                .with_context(|| format!("no food registered with barcode {}", barcode))?;
            let name = record.name.clone();
            let id = record.id.clone();

            let synced = service.toggle_favorite(record).await;
            if synced.value.contains(&id) {
                writeln!(out, "{} added to favorites.", name)?;
            } else {
                writeln!(out, "{} removed from favorites.", name)?;
            }
            warn_unsaved(out, &synced.persistence)?;
        }
    }

    Ok(())
}

async fn history<F, P, A, PR, W>(
    service: &Service<F, P, A, PR>,
    command: HistoryCommand,
    out: &mut W,
) -> Result<(), anyhow::Error>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
    W: Write,
{
    let synced = match command {
        HistoryCommand::List => {
            let terms = service.load_recent_searches().await;
            writeln!(out, "{}", render::numbered(&terms))?;
            return Ok(());
        }
        HistoryCommand::Clear => service.clear_recent_searches().await,
        HistoryCommand::Remove { position } => match position.checked_sub(1) {
            Some(index) => service.remove_recent_search(index).await,
            None => {
                writeln!(out, "Positions start at 1.")?;
                return Ok(());
            }
        },
    };

    writeln!(out, "{}", render::numbered(&synced.value))?;
    warn_unsaved(out, &synced.persistence)
}

async fn compare<F, P, A, PR, W>(
    service: &Service<F, P, A, PR>,
    barcodes: Vec<String>,
    out: &mut W,
) -> Result<(), anyhow::Error>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
    W: Write,
{
    let mut set = ComparisonSet::default();

    for barcode in barcodes {
        let Some(record) = service.find_by_barcode(barcode.clone()).await? else {
            writeln!(out, "Skipping {}: not registered.", barcode)?;
            continue;
        };
        match set.add(record) {
            Ok(()) => {}
            Err(ComparisonRejection::Duplicate) => {
                writeln!(out, "Skipping {}: already in the comparison.", barcode)?
            }
            Err(ComparisonRejection::LimitReached) => {
                writeln!(out, "Skipping {}: {}.", barcode, ComparisonRejection::LimitReached)?
            }
        }
    }

    if set.is_empty() {
        writeln!(out, "Nothing to compare.")?;
        return Ok(());
    }
    writeln!(out, "{}", render::comparison_table(&set))?;

    Ok(())
}

async fn profile<F, P, A, PR, W>(
    service: &Service<F, P, A, PR>,
    command: ProfileCommand,
    out: &mut W,
) -> Result<(), anyhow::Error>
where
    F: FoodRepository,
    P: PreferenceStore,
    A: AuthClient,
    PR: ProfileRepository,
    W: Write,
{
    let input = match command {
        ProfileCommand::Show => {
            match service.get_profile().await? {
                Some(profile) => writeln!(out, "{}", render::profile_detail(&profile))?,
                None => writeln!(out, "No profile yet.")?,
            }
            return Ok(());
        }
        ProfileCommand::SetName { name } => UpdateProfileInput {
            name: Some(name),
            avatar_url: None,
        },
        ProfileCommand::SetAvatar { url } => UpdateProfileInput {
            name: None,
            avatar_url: Some(url),
        },
    };

    let profile = service.update_profile(input).await?;
    writeln!(out, "{}", render::profile_detail(&profile))?;

    Ok(())
}
