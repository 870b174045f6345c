use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use gymdock_domain::gateway::{AttendanceReports, FamilyDirectory, MemberDirectory};
use gymdock_domain::member::{MemberProfileUpdate, NewMember};
use gymdock_domain::trend::{EventDate, Granularity};
use gymdock_domain::{DomainError, MemberId};
use gymdock_infrastructure::config::TimeoutConfig;
use gymdock_infrastructure::http::{HttpBackend, RetryConfig};

const MEMBER_ID: &str = "3f2504e0-4f89-41d3-9a0c-0305e82c3301";

fn backend(server: &MockServer) -> HttpBackend {
    let retry = RetryConfig {
        max_retries: 2,
        initial_backoff_ms: 5,
        max_backoff_ms: 20,
        backoff_multiplier: 2.0,
    };
    HttpBackend::new(&server.uri(), retry, &TimeoutConfig::default()).expect("build backend")
}

fn member_id() -> MemberId {
    MemberId::parse(MEMBER_ID).expect("valid id")
}

#[tokio::test]
async fn member_stats_are_decoded_fail_soft() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/member/{}/stats", MEMBER_ID)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "monthly_check_ins": 4,
            "current_streak": 2,
            "highest_streak": 6,
            "member_since": "2024-01-02T10:00:00",
            "check_in_dates": ["2024-06-12T16:00:00Z", "garbage", "2024-06-13T15:00:00"],
            "name": "Jane Smith",
            "email": "jane@example.com",
            "unexpected": true
        })))
        .expect(1)
        .mount(&server)
        .await;

    let snapshot = backend(&server)
        .member_stats(&member_id())
        .await
        .expect("stats");

    assert_eq!(snapshot.name.as_deref(), Some("Jane Smith"));
    assert_eq!(snapshot.reported_monthly, Some(4));
    assert_eq!(snapshot.reported_highest_streak, Some(6));
    assert_eq!(snapshot.record.check_ins().len(), 2);
    assert!(snapshot.barcode.is_none());
    assert!(snapshot.member_since.is_some());
}

#[tokio::test]
async fn invalid_member_id_never_reaches_the_backend() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let result = backend(&server)
        .member_stats(&MemberId::from_string("MT001"))
        .await;

    assert!(matches!(result, Err(DomainError::InvalidInput(_))));
}

#[tokio::test]
async fn unknown_member_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/member/{}/stats", MEMBER_ID)))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Member not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/member/{}", MEMBER_ID)))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Member not found"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend(&server);
    let stats = backend.member_stats(&member_id()).await;
    assert!(matches!(stats, Err(DomainError::MemberNotFound(ref m)) if m == "Member not found"));

    let found = backend.find_member(&member_id()).await.expect("lookup");
    assert!(found.is_none());
}

#[tokio::test]
async fn reads_retry_transient_server_errors() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/checkins/stats"))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/admin/checkins/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_members": 40,
            "checkins_today": 7,
            "total_checkins": 1234
        })))
        .expect(1)
        .mount(&server)
        .await;

    let overview = backend(&server).overview().await.expect("overview");

    assert_eq!(overview.total_members, 40);
    assert_eq!(overview.checkins_today, 7);
    assert_eq!(overview.total_checkins, 1234);
}

#[tokio::test]
async fn reads_give_up_after_max_retries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/checkins/today"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(3)
        .mount(&server)
        .await;

    let result = backend(&server).todays_check_ins().await;

    let error = result.expect_err("should fail");
    assert!(error.is_recoverable());
}

#[tokio::test]
async fn check_in_is_sent_once_even_on_server_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/checkin"))
        .and(body_json(json!({"member_id": "MT001"})))
        .respond_with(ResponseTemplate::new(502))
        .expect(1)
        .mount(&server)
        .await;

    let result = backend(&server).check_in("MT001").await;

    assert!(matches!(result, Err(DomainError::CheckInFailed(_))));
}

#[tokio::test]
async fn check_in_returns_receipt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/checkin"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "9b2f0c47-8f3a-4c51-9e0a-1b2c3d4e5f60",
            "member_id": MEMBER_ID,
            "timestamp": "2024-06-13T15:00:00.123456",
            "member": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let receipt = backend(&server).check_in(MEMBER_ID).await.expect("receipt");

    assert_eq!(receipt.member_id.as_str(), MEMBER_ID);
    assert_eq!(receipt.timestamp.to_rfc3339(), "2024-06-13T15:00:00.123456+00:00");
}

#[tokio::test]
async fn duplicate_registration_is_a_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/member"))
        .and(body_json(json!({"member_id": "MT001", "name": "John Doe", "active": true})))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({"detail": "Member ID already exists"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let member = NewMember::new("MT001", "John Doe").expect("valid member");
    let result = backend(&server).register_member(&member).await;

    assert!(
        matches!(result, Err(DomainError::Validation(ref m)) if m == "Member ID already exists")
    );
}

#[tokio::test]
async fn update_member_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path(format!("/member/{}", MEMBER_ID)))
        .and(body_json(json!({"name": "Jane Doe", "email": "jane@example.com"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let update = MemberProfileUpdate::new("Jane Doe", "jane@example.com").expect("valid update");
    backend(&server)
        .update_member(&member_id(), &update)
        .await
        .expect("update");
}

#[tokio::test]
async fn family_roster_and_status_round_trip() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/family/members/family@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": "a", "name": "Alice", "email": "family@example.com", "is_deleted": false},
            {"id": "b", "name": "Bob", "email": "family@example.com", "is_deleted": true, "deleted_at": "2024-05-01T00:00:00"},
            {"id": "c", "name": "Cara", "email": "family@example.com", "is_deleted": false}
        ])))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/family/checkin-status/family@example.com"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"not_checked_in": ["Cara"]})))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/family/checkin"))
        .and(body_json(json!({"email": "family@example.com", "member_names": ["Cara"]})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Checked in 1 member(s)"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let backend = backend(&server);
    let roster = backend.roster("family@example.com").await.expect("roster");
    assert_eq!(roster.active_names(), vec!["Alice".to_string(), "Cara".to_string()]);

    let pending = backend
        .pending_check_ins("family@example.com")
        .await
        .expect("status");
    assert_eq!(pending, vec!["Cara".to_string()]);

    let message = backend
        .check_in_family("family@example.com", &pending)
        .await
        .expect("family check-in");
    assert_eq!(message, "Checked in 1 member(s)");
}

#[tokio::test]
async fn missing_family_maps_to_family_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/family/members/nobody@example.com"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"detail": "No family"})))
        .mount(&server)
        .await;

    let result = backend(&server).roster("nobody@example.com").await;
    assert!(matches!(result, Err(DomainError::FamilyNotFound(_))));
}

#[tokio::test]
async fn range_query_carries_dates_and_granularity() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/admin/checkins/range"))
        .and(query_param("start_date", "2024-01-01"))
        .and(query_param("end_date", "2024-02-29"))
        .and(query_param("group_by", "month"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"date": "2024-01-05", "count": 3},
            {"date": "2024-02-01T09:00:00", "count": 1},
            {"date": "2024-02", "count": 2},
            {"date": "", "count": 8}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let events = backend(&server)
        .check_in_range(
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
            Granularity::Month,
        )
        .await
        .expect("range");

    assert_eq!(events.len(), 3);
    assert_eq!(
        events[0].date,
        EventDate::Day(NaiveDate::from_ymd_opt(2024, 1, 5).unwrap())
    );
    assert!(matches!(events[1].date, EventDate::Instant(_)));
    assert_eq!(
        events[2].date,
        EventDate::Day(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap())
    );
}
