use std::sync::Arc;

use crate::application::commands::handlers::*;
use crate::application::queries::{AdminQueries, FamilyQueries, MemberStatsQueries, TrendQueries};
use crate::application::services::{FamilyCheckInService, SessionService, TodayPoller, TrendView};
use crate::presentation::error::CommandError;
use gymdock_domain::{Clock, ZoneCalendar};
use gymdock_infrastructure::config::KioskConfig;

/// Command handlers container
pub struct CommandHandlers {
    pub register_member: Arc<RegisterMemberCommandHandler>,
    pub check_in_member: Arc<CheckInMemberCommandHandler>,
    pub update_member: Arc<UpdateMemberCommandHandler>,
    pub family_check_in: Arc<FamilyCheckInCommandHandler>,
}

pub struct Services {
    pub session: Arc<SessionService>,
    pub family_check_in: Arc<FamilyCheckInService>,
    pub trend_view: Arc<TrendView>,
    pub today_poller: Arc<TodayPoller>,
}

pub struct Queries {
    pub member_stats: Arc<MemberStatsQueries>,
    pub family: Arc<FamilyQueries>,
    pub trend: Arc<TrendQueries>,
    pub admin: Arc<AdminQueries>,
}

pub struct AppState {
    pub config: KioskConfig,
    pub calendar: ZoneCalendar,
    pub clock: Arc<dyn Clock>,
    pub services: Services,
    pub queries: Queries,
    pub command_handlers: CommandHandlers,
}

impl AppState {
    pub async fn new(config: KioskConfig) -> Result<Self, CommandError> {
        crate::presentation::bootstrap::build_app_state(config).await
    }
}
