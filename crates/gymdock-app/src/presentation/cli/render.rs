// Plain-text output for terminal use; `--json` bypasses all of this

use crate::application::dtos::*;
use gymdock_domain::family::FamilyCheckInState;
use gymdock_domain::gateway::AdminOverview;
use gymdock_domain::session::SessionContext;

const BAR_WIDTH: usize = 20;

fn bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH) / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

pub fn stats(dto: &MemberStatsDto) {
    println!("{}", dto.name.as_deref().unwrap_or("Member"));
    if let Some(since) = &dto.member_since {
        println!("  Member since     {}", since);
    }
    println!("  This week        {}", dto.weekly_check_ins);
    println!("  This month       {}", dto.monthly_check_ins);
    println!("  Current streak   {} days", dto.current_streak);
    println!("  Best streak      {} days", dto.highest_streak);
    println!(
        "  Weekly goal      {} {} {}%{}",
        dto.weekly_goal,
        bar(dto.bar_fill_percent),
        dto.goal_percent,
        if dto.goal_met { "  goal met" } else { "" }
    );
}

pub fn receipt(receipt: &CheckInReceiptDto) {
    println!("{}", receipt.message);
    println!("  {} (check-in {})", receipt.local_time, receipt.checkin_id);
}

pub fn registered(member: &MemberProfileDto, receipt: &CheckInReceiptDto) {
    println!("Registered {} ({})", member.name, member.member_code);
    self::receipt(receipt);
}

pub fn family_status(status: &FamilyStatusDto) {
    let state = match status.state {
        FamilyCheckInState::Unknown => "status unavailable",
        FamilyCheckInState::Partial => "partially checked in",
        FamilyCheckInState::Complete => "everyone checked in",
    };
    println!("{} on {}: {}", status.email, status.period, state);
    for name in &status.active_names {
        let mark = if status.pending.contains(name) { " " } else { "x" };
        println!("  [{}] {}", mark, name);
    }
}

pub fn family_outcome(outcome: &FamilyCheckInOutcomeDto) {
    println!("{}", outcome.message);
    family_status(&outcome.status);
}

pub fn family_roster(roster: &FamilyRosterDto) {
    println!("{} ({} active)", roster.email, roster.active_names.len());
    for member in &roster.members {
        let note = if member.active { "" } else { "  (removed)" };
        println!("  {}{}", member.name, note);
    }
}

pub fn trend(dto: &TrendDto) {
    println!(
        "Check-ins {} to {} by {} (total {})",
        dto.start_date, dto.end_date, dto.granularity, dto.total
    );
    let peak = dto.buckets.iter().map(|b| b.count).max().unwrap_or(0).max(1);
    for bucket in &dto.buckets {
        let width = (bucket.count * BAR_WIDTH as u64 / peak) as usize;
        println!("  {}  {:>5}  {}", bucket.label, bucket.count, "#".repeat(width));
    }
}

pub fn overview(overview: &AdminOverview) {
    println!("Members          {}", overview.total_members);
    println!("Check-ins today  {}", overview.checkins_today);
    println!("Check-ins total  {}", overview.total_checkins);
}

pub fn today(snapshot: &TodaySnapshotDto) {
    println!("-- {} --", snapshot.fetched_at);
    self::overview(&snapshot.overview);
    for row in &snapshot.check_ins {
        println!(
            "  {}  {:<24} {}",
            row.local_time,
            row.name.as_deref().unwrap_or("(deleted member)"),
            row.member_code.as_deref().unwrap_or("")
        );
    }
}

pub fn session(session: &SessionContext) {
    match &session.member_id {
        Some(id) => println!("Member        {}", id),
        None => println!("Member        (none)"),
    }
    println!(
        "Family email  {}",
        session.member_email.as_deref().unwrap_or("(none)")
    );
    if !session.family_members.is_empty() {
        println!("Family        {}", session.family_members.join(", "));
    }
    println!("Weekly goal   {}", session.weekly_goal.value());
}
