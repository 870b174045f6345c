use std::sync::Arc;

use log::info;

use crate::application::dtos::{MemberProfileDto, MemberStatsDto};
use gymdock_domain::attendance::{summarize, WeeklyGoal};
use gymdock_domain::gateway::MemberDirectory;
use gymdock_domain::session::SessionContext;
use gymdock_domain::{Clock, DomainError, MemberId, ZoneCalendar};

pub struct MemberStatsQueries {
    members: Arc<dyn MemberDirectory>,
    clock: Arc<dyn Clock>,
    calendar: ZoneCalendar,
}

impl MemberStatsQueries {
    pub fn new(
        members: Arc<dyn MemberDirectory>,
        clock: Arc<dyn Clock>,
        calendar: ZoneCalendar,
    ) -> Self {
        Self {
            members,
            clock,
            calendar,
        }
    }

    /// Stats for one member, with the weekly goal applied.
    pub async fn get_member_stats(
        &self,
        member_id: &MemberId,
        goal: WeeklyGoal,
    ) -> Result<MemberStatsDto, DomainError> {
        let snapshot = self.members.member_stats(member_id).await?;
        let summary = summarize(&snapshot, goal, self.clock.now(), &self.calendar);

        if let Some(reported) = snapshot.reported_monthly {
            if reported != summary.counts.monthly_count {
                info!(
                    "[stats] monthly count differs from backend member_id={} local={} reported={}",
                    member_id, summary.counts.monthly_count, reported
                );
            }
        }

        let dto = MemberStatsDto {
            member_id: member_id.to_string(),
            name: snapshot.name,
            email: snapshot.email,
            barcode: snapshot.barcode,
            member_since: snapshot
                .member_since
                .map(|instant| self.calendar.date_key(instant)),
            monthly_check_ins: summary.counts.monthly_count,
            weekly_check_ins: summary.counts.weekly_count,
            current_streak: summary.streak.current(),
            highest_streak: summary.streak.highest(),
            weekly_goal: summary.goal.value(),
            goal_percent: summary.goal_percent(),
            bar_fill_percent: summary.goal.bar_fill_percent(summary.counts.weekly_count),
            goal_met: summary.goal.is_met(summary.counts.weekly_count),
        };

        info!(
            "[stats] get_member_stats member_id={} weekly={} monthly={} current={} highest={}",
            dto.member_id,
            dto.weekly_check_ins,
            dto.monthly_check_ins,
            dto.current_streak,
            dto.highest_streak
        );

        Ok(dto)
    }

    /// Stats for whoever the session remembers.
    pub async fn get_session_stats(
        &self,
        session: &SessionContext,
    ) -> Result<MemberStatsDto, DomainError> {
        let member_id = session.require_member_id()?;
        self.get_member_stats(member_id, session.weekly_goal).await
    }

    pub async fn get_profile(&self, member_id: &MemberId) -> Result<MemberProfileDto, DomainError> {
        let profile = self
            .members
            .find_member(member_id)
            .await?
            .ok_or_else(|| DomainError::MemberNotFound(format!("Member {} not found", member_id)))?;

        Ok(MemberProfileDto::from(profile))
    }
}
