mod family_check_in_service;
mod request_generation;
mod session_service;
mod today_poller;
mod trend_view;

pub use family_check_in_service::FamilyCheckInService;
pub use request_generation::{GenerationTicket, RequestGeneration};
pub use session_service::SessionService;
pub use today_poller::TodayPoller;
pub use trend_view::{TrendSelection, TrendView};
