use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use crate::application::commands::handlers::*;
use crate::application::queries::{AdminQueries, FamilyQueries, MemberStatsQueries, TrendQueries};
use crate::application::services::{FamilyCheckInService, SessionService, TodayPoller, TrendView};
use crate::application::ResultExt;
use crate::presentation::error::CommandError;
use crate::presentation::state::{AppState, CommandHandlers, Queries, Services};
use gymdock_domain::gateway::{AttendanceReports, FamilyDirectory, MemberDirectory};
use gymdock_domain::session::SessionStore;
use gymdock_domain::{Clock, SystemClock};
use gymdock_infrastructure::config::{KioskConfig, TimeoutConfig};
use gymdock_infrastructure::http::HttpBackend;
use gymdock_infrastructure::persistence::FileSessionStore;

pub async fn build_app_state(config: KioskConfig) -> Result<AppState, CommandError> {
    build_app_state_with_clock(config, Arc::new(SystemClock)).await
}

/// Wire every layer together. Nothing here talks to the backend yet.
pub async fn build_app_state_with_clock(
    config: KioskConfig,
    clock: Arc<dyn Clock>,
) -> Result<AppState, CommandError> {
    let started_at = Instant::now();

    let calendar = config.calendar()?;
    let timeouts = TimeoutConfig::from(&config);

    let backend = Arc::new(HttpBackend::from_config(&config).to_infra_err()?);
    info!(
        "Backend client ready base_url={} ({}ms)",
        backend.base_url(),
        started_at.elapsed().as_millis()
    );

    let members = backend.clone() as Arc<dyn MemberDirectory>;
    let families = backend.clone() as Arc<dyn FamilyDirectory>;
    let reports = backend as Arc<dyn AttendanceReports>;

    let store_path = config.session.store_path();
    info!("Session store path: {}", store_path.display());
    let session_store = Arc::new(FileSessionStore::new(store_path)) as Arc<dyn SessionStore>;

    // Services
    let session = Arc::new(SessionService::new(session_store, config.default_goal()));
    let family_check_in = Arc::new(FamilyCheckInService::new(
        families.clone(),
        clock.clone(),
        calendar,
        config.family.status_failure_policy,
    ));

    // Queries
    let member_stats = Arc::new(MemberStatsQueries::new(
        members.clone(),
        clock.clone(),
        calendar,
    ));
    let family = Arc::new(FamilyQueries::new(families));
    let trend = Arc::new(TrendQueries::new(reports.clone(), calendar));
    let admin = Arc::new(AdminQueries::new(reports, clock.clone(), calendar));

    let trend_view = Arc::new(TrendView::new(trend.clone()));
    let today_poller = Arc::new(TodayPoller::new(admin.clone(), timeouts.poll_interval));

    // Command handlers
    let command_handlers = CommandHandlers {
        register_member: Arc::new(RegisterMemberCommandHandler::new(
            members.clone(),
            session.clone(),
            calendar,
        )),
        check_in_member: Arc::new(CheckInMemberCommandHandler::new(
            members.clone(),
            session.clone(),
            calendar,
        )),
        update_member: Arc::new(UpdateMemberCommandHandler::new(members, session.clone())),
        family_check_in: Arc::new(FamilyCheckInCommandHandler::new(
            family_check_in.clone(),
            session.clone(),
        )),
    };

    info!(
        "App state initialized timezone={} ({}ms)",
        calendar.timezone(),
        started_at.elapsed().as_millis()
    );

    Ok(AppState {
        config,
        calendar,
        clock,
        services: Services {
            session,
            family_check_in,
            trend_view,
            today_poller,
        },
        queries: Queries {
            member_stats,
            family,
            trend,
            admin,
        },
        command_handlers,
    })
}
