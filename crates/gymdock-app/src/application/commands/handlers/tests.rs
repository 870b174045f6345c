use std::sync::Arc;

use crate::application::commands::command_handler::CommandHandler;
use crate::application::commands::handlers::*;
use crate::application::commands::*;
use crate::application::services::{FamilyCheckInService, SessionService};
use crate::application::test_support::*;
use gymdock_domain::attendance::WeeklyGoal;
use gymdock_domain::family::{FamilyCheckInState, StatusFailurePolicy};
use gymdock_domain::session::SessionContext;
use gymdock_domain::{DomainError, MemberId};

fn session_service(store: Arc<InMemorySessionStore>) -> Arc<SessionService> {
    Arc::new(SessionService::new(store, WeeklyGoal::default()))
}

fn alice_session() -> SessionContext {
    SessionContext::for_member(MemberId::parse(ALICE_ID).unwrap())
}

#[tokio::test]
async fn test_register_member_checks_in_and_remembers() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(InMemorySessionStore::new());
    let handler = RegisterMemberCommandHandler::new(
        backend.clone(),
        session_service(store.clone()),
        calendar(),
    );

    let result = handler
        .handle(RegisterMemberCommand {
            member_code: " TAG-NEW ".to_string(),
            name: "Noa Park".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(result.member.member_code, "TAG-NEW");
    assert_eq!(result.receipt.message, "Check-in successful! Welcome!");
    assert_eq!(result.receipt.member_id, result.member.id);
    assert_eq!(result.receipt.local_time, "2024-03-13 10:00:00");
    assert_eq!(backend.check_in_keys().await, vec!["TAG-NEW".to_string()]);

    let saved = store.stored().await.unwrap();
    assert_eq!(saved.member_id.unwrap().as_str(), result.member.id);
}

#[tokio::test]
async fn test_register_duplicate_code_fails() {
    let backend = Arc::new(FakeBackend::new());
    backend.add_member(ALICE_ID, "TAG-ALICE", "Alice Martin").await;
    let store = Arc::new(InMemorySessionStore::new());
    let handler = RegisterMemberCommandHandler::new(
        backend.clone(),
        session_service(store.clone()),
        calendar(),
    );

    let result = handler
        .handle(RegisterMemberCommand {
            member_code: "TAG-ALICE".to_string(),
            name: "Someone Else".to_string(),
        })
        .await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(backend.check_in_keys().await.is_empty());
    assert!(store.stored().await.is_none());
}

#[tokio::test]
async fn test_register_with_empty_name_fails() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(InMemorySessionStore::new());
    let handler = RegisterMemberCommandHandler::new(backend, session_service(store), calendar());

    let result = handler
        .handle(RegisterMemberCommand {
            member_code: "TAG-1".to_string(),
            name: "   ".to_string(),
        })
        .await;

    assert!(result.is_err());
}

#[tokio::test]
async fn test_check_in_with_explicit_code() {
    let backend = Arc::new(FakeBackend::new());
    backend.add_member(ALICE_ID, "TAG-ALICE", "Alice Martin").await;
    let store = Arc::new(InMemorySessionStore::new());
    let handler =
        CheckInMemberCommandHandler::new(backend.clone(), session_service(store), calendar());

    let result = handler
        .handle(CheckInMemberCommand {
            member_key: Some("TAG-ALICE".to_string()),
        })
        .await
        .unwrap();

    assert_eq!(result.receipt.member_id, ALICE_ID);
    assert_eq!(result.receipt.message, "Check-in successful! Welcome back.");
}

#[tokio::test]
async fn test_check_in_falls_back_to_session() {
    let backend = Arc::new(FakeBackend::new());
    backend.add_member(ALICE_ID, "TAG-ALICE", "Alice Martin").await;
    let store = Arc::new(InMemorySessionStore::with(alice_session()));
    let handler =
        CheckInMemberCommandHandler::new(backend.clone(), session_service(store), calendar());

    handler.handle(CheckInMemberCommand::default()).await.unwrap();

    assert_eq!(backend.check_in_keys().await, vec![ALICE_ID.to_string()]);
}

#[tokio::test]
async fn test_check_in_without_session_fails() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(InMemorySessionStore::new());
    let handler = CheckInMemberCommandHandler::new(backend, session_service(store), calendar());

    let result = handler
        .handle(CheckInMemberCommand {
            member_key: Some("   ".to_string()),
        })
        .await;

    assert!(matches!(result, Err(DomainError::MissingSession(_))));
}

#[tokio::test]
async fn test_check_in_for_deleted_session_member_clears_session() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(InMemorySessionStore::with(alice_session()));
    let handler =
        CheckInMemberCommandHandler::new(backend, session_service(store.clone()), calendar());

    let result = handler.handle(CheckInMemberCommand::default()).await;

    assert!(matches!(result, Err(DomainError::MemberNotFound(_))));
    assert!(store.stored().await.unwrap().member_id.is_none());
}

#[tokio::test]
async fn test_unknown_explicit_key_keeps_session() {
    let backend = Arc::new(FakeBackend::new());
    let store = Arc::new(InMemorySessionStore::with(alice_session()));
    let handler =
        CheckInMemberCommandHandler::new(backend, session_service(store.clone()), calendar());

    let result = handler
        .handle(CheckInMemberCommand {
            member_key: Some("TAG-UNKNOWN".to_string()),
        })
        .await;

    assert!(result.is_err());
    assert!(store.stored().await.unwrap().member_id.is_some());
}

#[tokio::test]
async fn test_update_member_syncs_session_email() {
    let backend = Arc::new(FakeBackend::new());
    backend.add_member(ALICE_ID, "TAG-ALICE", "Alice Martin").await;
    let store = Arc::new(InMemorySessionStore::with(alice_session()));
    let handler = UpdateMemberCommandHandler::new(backend.clone(), session_service(store.clone()));

    let result = handler
        .handle(UpdateMemberCommand {
            member_id: ALICE_ID.to_string(),
            name: "Alice M. Martin".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await
        .unwrap();

    assert!(result.success);
    assert_eq!(
        backend.member_email(ALICE_ID).await.as_deref(),
        Some("alice@example.com")
    );
    assert_eq!(
        store.stored().await.unwrap().member_email.as_deref(),
        Some("alice@example.com")
    );
}

#[tokio::test]
async fn test_update_member_rejects_bad_input() {
    let backend = Arc::new(FakeBackend::new());
    backend.add_member(ALICE_ID, "TAG-ALICE", "Alice Martin").await;
    let store = Arc::new(InMemorySessionStore::new());
    let handler = UpdateMemberCommandHandler::new(backend.clone(), session_service(store));

    let bad_id = handler
        .handle(UpdateMemberCommand {
            member_id: "12345".to_string(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
        })
        .await;
    assert!(matches!(bad_id, Err(DomainError::InvalidInput(_))));

    let bad_email = handler
        .handle(UpdateMemberCommand {
            member_id: ALICE_ID.to_string(),
            name: "Alice".to_string(),
            email: "not-an-email".to_string(),
        })
        .await;
    assert!(bad_email.is_err());
    assert!(backend.member_email(ALICE_ID).await.is_none());
}

#[tokio::test]
async fn test_family_check_in_uses_session_email() {
    let backend = Arc::new(FakeBackend::new());
    backend
        .add_family(roster("smith@example.com", &["Dana", "Eli"]), &["Dana", "Eli"])
        .await;
    let mut session = alice_session();
    session.member_email = Some("smith@example.com".to_string());
    let store = Arc::new(InMemorySessionStore::with(session));
    let service = Arc::new(FamilyCheckInService::new(
        backend.clone(),
        clock(),
        calendar(),
        StatusFailurePolicy::default(),
    ));
    let handler = FamilyCheckInCommandHandler::new(service, session_service(store));

    let result = handler
        .handle(FamilyCheckInCommand {
            email: None,
            member_names: vec!["Dana".to_string(), "Eli".to_string()],
        })
        .await
        .unwrap();

    assert_eq!(result.outcome.status.state, FamilyCheckInState::Complete);
    assert_eq!(backend.family_submissions().await.len(), 1);
}

#[tokio::test]
async fn test_family_check_in_for_missing_family_clears_session() {
    let backend = Arc::new(FakeBackend::new());
    let mut session = alice_session();
    session.member_email = Some("gone@example.com".to_string());
    let store = Arc::new(InMemorySessionStore::with(session));
    let service = Arc::new(FamilyCheckInService::new(
        backend,
        clock(),
        calendar(),
        StatusFailurePolicy::default(),
    ));
    let handler = FamilyCheckInCommandHandler::new(service, session_service(store.clone()));

    let result = handler
        .handle(FamilyCheckInCommand {
            email: None,
            member_names: vec!["Dana".to_string()],
        })
        .await;

    assert!(matches!(result, Err(DomainError::FamilyNotFound(_))));
    assert!(store.stored().await.unwrap().member_email.is_none());
}
