mod render;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use log::info;
use serde::Serialize;

use crate::application::commands::*;
use crate::presentation::error::CommandError;
use crate::presentation::state::AppState;
use gymdock_domain::attendance::WeeklyGoal;
use gymdock_domain::clock::parse_date_key;
use gymdock_domain::trend::{DateRange, Granularity};
use gymdock_domain::{DomainError, MemberId};

#[derive(Debug, Parser)]
#[command(name = "gymdock", version, about = "Gym check-in kiosk")]
pub struct Cli {
    /// Path to config.toml (defaults to the user config directory)
    #[arg(long, global = true, env = "GYMDOCK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: KioskCommand,
}

#[derive(Debug, Subcommand)]
pub enum KioskCommand {
    /// Show a member's weekly, monthly and streak stats
    Stats {
        /// Member id; defaults to the member remembered by the kiosk
        #[arg(long)]
        member_id: Option<String>,
    },
    /// Check in by tag code or member id
    Checkin {
        /// Tag code or member id; defaults to the remembered member
        key: Option<String>,
    },
    /// Register a new member and check them in
    Register {
        #[arg(long)]
        code: String,
        #[arg(long)]
        name: String,
    },
    /// Edit a member's name and email
    Update {
        #[arg(long)]
        member_id: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
    },
    /// Family roster and check-in
    #[command(subcommand)]
    Family(FamilyCommand),
    /// Check-in trend over a date range
    Trend(TrendArgs),
    /// Headline counts for the admin dashboard
    Overview,
    /// Poll today's check-ins until interrupted
    Watch,
    /// Inspect or reset the remembered identity
    #[command(subcommand)]
    Session(SessionCommand),
}

#[derive(Debug, Subcommand)]
pub enum FamilyCommand {
    /// Who in the family still has to check in today
    Status {
        #[arg(long)]
        email: Option<String>,
    },
    /// Check in the named family members
    Checkin {
        #[arg(long)]
        email: Option<String>,
        #[arg(required = true)]
        names: Vec<String>,
    },
    /// List every member on the family account
    Roster {
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Debug, Args)]
pub struct TrendArgs {
    /// First day, YYYY-MM-DD
    #[arg(long, requires = "end")]
    pub start: Option<String>,
    /// Last day, YYYY-MM-DD
    #[arg(long, requires = "start")]
    pub end: Option<String>,
    /// Number of days ending today; ignored when a range is given
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub days: Option<u32>,
    #[arg(long, default_value = "day")]
    pub granularity: String,
}

#[derive(Debug, Subcommand)]
pub enum SessionCommand {
    Show,
    Clear,
    /// Set the weekly check-in goal (1-7)
    Goal { value: u32 },
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CommandError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Execute one CLI command against a fully built state.
pub async fn run(state: &AppState, command: KioskCommand, json: bool) -> Result<(), CommandError> {
    match command {
        KioskCommand::Stats { member_id } => stats(state, member_id, json).await,
        KioskCommand::Checkin { key } => {
            let result = state
                .command_handlers
                .check_in_member
                .handle(CheckInMemberCommand { member_key: key })
                .await?;
            if json {
                print_json(&result.receipt)
            } else {
                render::receipt(&result.receipt);
                Ok(())
            }
        }
        KioskCommand::Register { code, name } => {
            let result = state
                .command_handlers
                .register_member
                .handle(RegisterMemberCommand {
                    member_code: code,
                    name,
                })
                .await?;
            if json {
                print_json(&serde_json::json!({
                    "member": result.member,
                    "receipt": result.receipt,
                }))
            } else {
                render::registered(&result.member, &result.receipt);
                Ok(())
            }
        }
        KioskCommand::Update {
            member_id,
            name,
            email,
        } => {
            let result = state
                .command_handlers
                .update_member
                .handle(UpdateMemberCommand {
                    member_id,
                    name,
                    email,
                })
                .await?;
            if json {
                print_json(&serde_json::json!({ "success": result.success }))
            } else {
                println!("Profile updated.");
                Ok(())
            }
        }
        KioskCommand::Family(family) => run_family(state, family, json).await,
        KioskCommand::Trend(args) => trend(state, args, json).await,
        KioskCommand::Overview => {
            let overview = state.queries.admin.get_overview().await?;
            if json {
                print_json(&overview)
            } else {
                render::overview(&overview);
                Ok(())
            }
        }
        KioskCommand::Watch => watch(state, json).await,
        KioskCommand::Session(session) => run_session(state, session, json).await,
    }
}

async fn stats(
    state: &AppState,
    member_id: Option<String>,
    json: bool,
) -> Result<(), CommandError> {
    let session = state.services.session.current().await?;

    let result = match member_id {
        Some(raw) => {
            let id = MemberId::parse(&raw)?;
            state
                .queries
                .member_stats
                .get_member_stats(&id, session.weekly_goal)
                .await
        }
        None => {
            let result = state.queries.member_stats.get_session_stats(&session).await;
            if let Err(e) = &result {
                state.services.session.forget_if_missing(e).await?;
            }
            result
        }
    };
    let dto = result?;

    if json {
        print_json(&dto)
    } else {
        render::stats(&dto);
        Ok(())
    }
}

/// Resolve the family email from the flag or the session. The flag wins.
async fn family_email(
    state: &AppState,
    email: Option<String>,
) -> Result<(String, bool), CommandError> {
    if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
        return Ok((email.trim().to_string(), false));
    }
    let session = state.services.session.current().await?;
    Ok((session.require_email()?.to_string(), true))
}

async fn run_family(
    state: &AppState,
    command: FamilyCommand,
    json: bool,
) -> Result<(), CommandError> {
    match command {
        FamilyCommand::Status { email } => {
            let (email, from_session) = family_email(state, email).await?;
            let roster = match state.queries.family.get_roster(&email).await {
                Ok(roster) => roster,
                Err(e) => {
                    if from_session {
                        state.services.session.forget_if_missing(&e).await?;
                    }
                    return Err(e.into());
                }
            };
            state.services.session.remember_roster(&roster).await?;

            let status = state.services.family_check_in.refresh(&email).await?;
            if json {
                print_json(&status)
            } else {
                render::family_status(&status);
                Ok(())
            }
        }
        FamilyCommand::Checkin { email, names } => {
            let result = state
                .command_handlers
                .family_check_in
                .handle(FamilyCheckInCommand {
                    email,
                    member_names: names,
                })
                .await?;
            if json {
                print_json(&result.outcome)
            } else {
                render::family_outcome(&result.outcome);
                Ok(())
            }
        }
        FamilyCommand::Roster { email } => {
            let (email, _) = family_email(state, email).await?;
            let roster = state.queries.family.get_roster_dto(&email).await?;
            if json {
                print_json(&roster)
            } else {
                render::family_roster(&roster);
                Ok(())
            }
        }
    }
}

fn trend_range(state: &AppState, args: &TrendArgs) -> Result<DateRange, DomainError> {
    match (&args.start, &args.end) {
        (Some(start), Some(end)) => {
            let start = parse_date_key(start).ok_or_else(|| {
                DomainError::InvalidInput(format!("Invalid start date: {}", start))
            })?;
            let end = parse_date_key(end).ok_or_else(|| {
                DomainError::InvalidInput(format!("Invalid end date: {}", end))
            })?;
            DateRange::new(start, end)
        }
        _ => state
            .queries
            .admin
            .default_range(args.days.unwrap_or(state.config.admin.trend_days)),
    }
}

async fn trend(state: &AppState, args: TrendArgs, json: bool) -> Result<(), CommandError> {
    let granularity: Granularity = args.granularity.parse()?;
    let range = trend_range(state, &args)?;

    let Some(dto) = state.services.trend_view.select(range, granularity).await? else {
        return Ok(());
    };

    if json {
        print_json(&dto)
    } else {
        render::trend(&dto);
        Ok(())
    }
}

async fn watch(state: &AppState, json: bool) -> Result<(), CommandError> {
    let poller = &state.services.today_poller;
    let mut updates = poller.subscribe();

    // First frame right away; a failure here is reported, later ones are not
    let first = poller.poll_once().await?;
    render_snapshot(&first, json)?;

    poller.start().await;
    info!(
        "[poll] watching today's check-ins interval_ms={}",
        poller.interval().as_millis()
    );

    loop {
        tokio::select! {
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let snapshot = updates.borrow_and_update().clone();
                if let Some(snapshot) = snapshot {
                    render_snapshot(&snapshot, json)?;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                break;
            }
        }
    }

    poller.stop().await;
    Ok(())
}

fn render_snapshot(
    snapshot: &crate::application::dtos::TodaySnapshotDto,
    json: bool,
) -> Result<(), CommandError> {
    if json {
        println!("{}", serde_json::to_string(snapshot)?);
        Ok(())
    } else {
        render::today(snapshot);
        Ok(())
    }
}

async fn run_session(
    state: &AppState,
    command: SessionCommand,
    json: bool,
) -> Result<(), CommandError> {
    match command {
        SessionCommand::Show => {
            let session = state.services.session.current().await?;
            if json {
                print_json(&session)
            } else {
                render::session(&session);
                Ok(())
            }
        }
        SessionCommand::Clear => {
            state.services.session.clear().await?;
            if !json {
                println!("Session cleared.");
            }
            Ok(())
        }
        SessionCommand::Goal { value } => {
            if !(WeeklyGoal::MIN..=WeeklyGoal::MAX).contains(&value) {
                return Err(CommandError::validation(format!(
                    "Goal must be between {} and {}",
                    WeeklyGoal::MIN,
                    WeeklyGoal::MAX
                )));
            }
            let session = state.services.session.set_goal(WeeklyGoal::new(value)).await?;
            if json {
                print_json(&session)
            } else {
                println!("Weekly goal set to {}.", session.weekly_goal.value());
                Ok(())
            }
        }
    }
}
