mod common;

use common::Fixture;
use kinship::application_port::*;
use kinship::domain_model::*;

#[tokio::test]
async fn send_creates_pending_row_and_publishes() {
    let fx = Fixture::new();

    let command = FriendRequestCommand::new(fx.alice, fx.bob, "Bob").unwrap();
    let request = fx.requestor.send_friend_request(command).await.unwrap();

    assert_eq!(request.status(), FriendshipStatus::Pending);
    assert_eq!(request.member_id(), fx.alice);
    assert_eq!(request.friend_member_id(), fx.bob);
    assert_eq!(request.created_at(), request.updated_at());
    assert_eq!(fx.rows().await.len(), 1);

    assert_eq!(
        fx.events.events(),
        vec![FriendshipEvent::FriendRequestSent(FriendRequestSent {
            friendship_id: request.id(),
            from_member_id: fx.alice,
            to_member_id: fx.bob,
            to_display_name: "Bob".to_string(),
        })]
    );
}

#[tokio::test]
async fn repeated_send_is_idempotent() {
    let fx = Fixture::new();

    let first = fx.send(fx.alice, fx.bob).await;
    let second = fx.send(fx.alice, fx.bob).await;

    assert_eq!(first.id(), second.id());
    assert_eq!(second.status(), FriendshipStatus::Pending);
    assert_eq!(fx.rows().await.len(), 1);
    assert_eq!(fx.events.len(), 1);
}

#[tokio::test]
async fn send_to_existing_friend_changes_nothing() {
    let fx = Fixture::new();
    fx.befriend(fx.alice, fx.bob).await;
    let published = fx.events.len();

    let again = fx.send(fx.alice, fx.bob).await;

    assert_eq!(again.status(), FriendshipStatus::Accepted);
    assert_eq!(fx.events.len(), published);
}

#[tokio::test]
async fn self_request_is_refused_before_persistence() {
    let fx = Fixture::new();

    let err = FriendRequestCommand::new(fx.alice, fx.alice, "Alice").unwrap_err();

    assert_eq!(err, SelfFriendshipError(fx.alice));
    assert!(fx.rows().await.is_empty());
    assert!(fx.events.is_empty());
}

#[tokio::test]
async fn revival_after_rejection_keeps_identity() {
    let fx = Fixture::new();
    let original = fx.send(fx.alice, fx.bob).await;
    fx.respond(&original, false).await;

    let revived = fx.send(fx.alice, fx.bob).await;

    assert_eq!(revived.id(), original.id());
    assert_eq!(revived.created_at(), original.created_at());
    assert_eq!(revived.status(), FriendshipStatus::Pending);
    assert!(revived.updated_at() >= original.updated_at());
    assert_eq!(fx.rows().await.len(), 1);
    assert!(matches!(
        fx.events.events().last(),
        Some(FriendshipEvent::FriendRequestSent(e)) if e.friendship_id == original.id()
    ));
}

#[tokio::test]
async fn revival_after_unfriend_reuses_row() {
    let fx = Fixture::new();
    let original = fx.befriend(fx.alice, fx.bob).await;
    fx.terminator.unfriend(fx.alice, fx.bob).await.unwrap();

    let revived = fx.send(fx.alice, fx.bob).await;

    assert_eq!(revived.id(), original.id());
    assert_eq!(revived.status(), FriendshipStatus::Pending);
    // the reverse row stays unfriended until bob answers
    assert_eq!(
        fx.row(fx.bob, fx.alice).await.unwrap().status(),
        FriendshipStatus::Unfriended
    );
}

#[tokio::test]
async fn reverse_direction_is_an_independent_row() {
    let fx = Fixture::new();

    let forward = fx.send(fx.alice, fx.bob).await;
    let reverse = fx.send(fx.bob, fx.alice).await;

    assert_ne!(forward.id(), reverse.id());
    assert_eq!(reverse.status(), FriendshipStatus::Pending);
    assert_eq!(fx.rows().await.len(), 2);
    assert_eq!(fx.events.len(), 2);
}

#[tokio::test]
async fn inactive_or_unknown_members_cannot_send() {
    let fx = Fixture::new();
    fx.members.set_status(fx.bob, MemberStatus::Withdrawn);
    let stranger = MemberId::from_handle("stranger");

    let err = fx
        .requestor
        .send_friend_request(FriendRequestCommand::new(fx.alice, fx.bob, "Bob").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err.cause(),
        FriendshipError::Member(MemberError::Inactive(id)) if *id == fx.bob
    ));
    assert_eq!(err.to_string(), "failed to send friend request");

    let err = fx
        .requestor
        .send_friend_request(FriendRequestCommand::new(stranger, fx.alice, "Alice").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(
        err.cause(),
        FriendshipError::Member(MemberError::NotFound(id)) if *id == stranger
    ));

    assert!(fx.rows().await.is_empty());
    assert!(fx.events.is_empty());
}

#[tokio::test]
async fn concurrent_sends_leave_one_row() {
    let fx = Fixture::new();

    let sends = (0..8).map(|_| {
        let requestor = fx.requestor.clone();
        let command = FriendRequestCommand::new(fx.alice, fx.bob, "Bob").unwrap();
        tokio::spawn(async move { requestor.send_friend_request(command).await })
    });
    let results = futures_util::future::join_all(sends).await;

    let ids: Vec<FriendshipId> = results
        .into_iter()
        .map(|r| r.unwrap().unwrap().id())
        .collect();
    assert!(ids.iter().all(|id| *id == ids[0]));
    assert_eq!(fx.rows().await.len(), 1);
    assert_eq!(fx.events.len(), 1);
}
