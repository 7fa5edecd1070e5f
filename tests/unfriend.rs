mod common;

use common::Fixture;
use kinship::application_port::*;
use kinship::domain_model::*;
use std::time::Duration;

fn terminated(member_id: MemberId, friend_member_id: MemberId) -> FriendshipEvent {
    FriendshipEvent::FriendshipTerminated(FriendshipTerminated {
        member_id,
        friend_member_id,
    })
}

#[tokio::test]
async fn unfriend_dissolves_both_directions() {
    let fx = Fixture::new();
    fx.befriend(fx.alice, fx.bob).await;

    fx.terminator.unfriend(fx.bob, fx.alice).await.unwrap();

    for (a, b) in [(fx.alice, fx.bob), (fx.bob, fx.alice)] {
        assert_eq!(
            fx.row(a, b).await.unwrap().status(),
            FriendshipStatus::Unfriended
        );
        assert!(!fx.reader.are_friends(a, b).await.unwrap());
    }
    assert_eq!(fx.events.events().last(), Some(&terminated(fx.bob, fx.alice)));
}

#[tokio::test]
async fn unfriend_is_idempotent_and_always_announced() {
    let fx = Fixture::new();
    fx.befriend(fx.alice, fx.bob).await;
    let before = fx.events.len();

    fx.terminator.unfriend(fx.alice, fx.bob).await.unwrap();
    let after_first = fx.rows().await;
    assert_eq!(after_first.len(), 2);
    assert!(
        after_first
            .iter()
            .all(|f| f.status() == FriendshipStatus::Unfriended)
    );

    tokio::time::sleep(Duration::from_millis(3)).await;
    fx.terminator.unfriend(fx.alice, fx.bob).await.unwrap();

    // same rows, same updated_at
    assert_eq!(fx.rows().await, after_first);

    let events = fx.events.events();
    assert_eq!(events.len(), before + 2);
    assert_eq!(events[before], terminated(fx.alice, fx.bob));
    assert_eq!(events[before + 1], terminated(fx.alice, fx.bob));
}

#[tokio::test]
async fn unfriend_without_friendship_succeeds() {
    let fx = Fixture::new();

    fx.terminator.unfriend(fx.alice, fx.carol).await.unwrap();

    assert!(fx.rows().await.is_empty());
    assert_eq!(fx.events.events(), vec![terminated(fx.alice, fx.carol)]);
}

#[tokio::test]
async fn unfriend_leaves_pending_and_rejected_rows_alone() {
    let fx = Fixture::new();
    fx.send(fx.alice, fx.bob).await;
    let rejected = fx.send(fx.bob, fx.alice).await;
    fx.respond(&rejected, false).await;

    fx.terminator.unfriend(fx.alice, fx.bob).await.unwrap();

    assert_eq!(
        fx.row(fx.alice, fx.bob).await.unwrap().status(),
        FriendshipStatus::Pending
    );
    assert_eq!(
        fx.row(fx.bob, fx.alice).await.unwrap().status(),
        FriendshipStatus::Rejected
    );
}

#[tokio::test]
async fn unfriend_rejects_self_and_inactive_actor() {
    let fx = Fixture::new();
    fx.befriend(fx.alice, fx.bob).await;
    let before = fx.events.len();

    let err = fx.terminator.unfriend(fx.alice, fx.alice).await.unwrap_err();
    assert!(matches!(err.cause(), FriendshipError::SelfFriendship(_)));

    fx.members.set_status(fx.alice, MemberStatus::Withdrawn);
    let err = fx.terminator.unfriend(fx.alice, fx.bob).await.unwrap_err();
    assert!(matches!(
        err.cause(),
        FriendshipError::Member(MemberError::Inactive(_))
    ));

    assert!(fx.reader.are_friends(fx.alice, fx.bob).await.unwrap());
    assert_eq!(fx.events.len(), before);
}
