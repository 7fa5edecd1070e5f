mod common;

use common::Fixture;
use kinship::application_port::*;
use kinship::domain_model::*;
use std::time::Duration;

async fn tick() {
    tokio::time::sleep(Duration::from_millis(2)).await;
}

#[tokio::test]
async fn counts_only_accepted_rows_as_friends() {
    let fx = Fixture::new();
    let eve = fx.member("eve", "Eve");
    let frank = fx.member("frank", "Frank");
    let gina = fx.member("gina", "Gina");

    fx.befriend(fx.alice, fx.bob).await;
    fx.befriend(fx.carol, fx.alice).await;
    fx.befriend(fx.alice, fx.dave).await;
    fx.send(eve, fx.alice).await;
    fx.send(frank, fx.alice).await;
    let rejected = fx.send(fx.alice, gina).await;
    fx.respond(&rejected, false).await;

    assert_eq!(fx.reader.count_friends_by_member_id(fx.alice).await.unwrap(), 3);
    assert_eq!(fx.reader.count_pending_requests(fx.alice).await.unwrap(), 2);
    assert_eq!(fx.reader.count_pending_requests_sent(fx.alice).await.unwrap(), 0);
    assert_eq!(fx.reader.count_pending_requests_sent(eve).await.unwrap(), 1);

    let friends = fx
        .reader
        .find_friends_by_member_id(fx.alice, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(friends.total, 3);
    let mut ids: Vec<MemberId> = friends.items.iter().map(|f| f.friend_member_id).collect();
    ids.sort();
    let mut expected = vec![fx.bob, fx.carol, fx.dave];
    expected.sort();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn pair_lookups_respect_direction_and_status() {
    let fx = Fixture::new();
    let request = fx.send(fx.alice, fx.bob).await;

    assert!(fx.reader.find_active_friendship(fx.alice, fx.bob).await.unwrap().is_none());
    assert_eq!(
        fx.reader.find_by_members(fx.alice, fx.bob).await.unwrap(),
        Some(request.clone())
    );
    assert_eq!(
        fx.reader.sented_friend_request(fx.alice, fx.bob).await.unwrap(),
        Some(request.clone())
    );
    assert!(fx.reader.find_by_members(fx.bob, fx.alice).await.unwrap().is_none());
    assert_eq!(
        fx.reader
            .find_pending_friendship_received(fx.bob, fx.alice)
            .await
            .unwrap()
            .map(|f| f.id()),
        Some(request.id())
    );
    assert!(
        fx.reader
            .find_pending_friendship_received(fx.alice, fx.bob)
            .await
            .unwrap()
            .is_none()
    );

    fx.respond(&request, true).await;

    let active = fx
        .reader
        .find_active_friendship(fx.bob, fx.alice)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.status(), FriendshipStatus::Accepted);
    assert!(
        fx.reader
            .find_pending_friendship_received(fx.bob, fx.alice)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn self_pair_is_never_found() {
    let fx = Fixture::new();

    assert!(fx.reader.find_by_members(fx.alice, fx.alice).await.unwrap().is_none());
    assert!(!fx.reader.are_friends(fx.alice, fx.alice).await.unwrap());
}

#[tokio::test]
async fn lookup_by_id_reports_absence() {
    let fx = Fixture::new();
    let request = fx.send(fx.alice, fx.bob).await;

    assert_eq!(
        fx.reader.find_friendship_by_id(request.id()).await.unwrap(),
        request
    );

    let missing = FriendshipId::new();
    let err = fx.reader.find_friendship_by_id(missing).await.unwrap_err();
    assert!(matches!(err, FriendshipQueryError::NotFound(id) if id == missing));
}

#[tokio::test]
async fn recent_friends_are_newest_first() {
    let fx = Fixture::new();
    fx.befriend(fx.alice, fx.bob).await;
    tick().await;
    fx.befriend(fx.alice, fx.carol).await;
    tick().await;
    fx.befriend(fx.dave, fx.alice).await;

    let recent = fx.reader.find_recent_friends(fx.alice, 2).await.unwrap();

    let ids: Vec<MemberId> = recent.iter().map(|f| f.friend_member_id).collect();
    assert_eq!(ids, vec![fx.dave, fx.carol]);
    assert_eq!(recent[0].display_name.as_deref(), Some("Dave"));
}

#[tokio::test]
async fn friend_listing_pages_in_requested_order() {
    let fx = Fixture::new();
    let names = [
        ("f1", "One"),
        ("f2", "Two"),
        ("f3", "Three"),
        ("f4", "Four"),
        ("f5", "Five"),
    ];
    for (handle, name) in names {
        let friend = fx.member(handle, name);
        fx.befriend(fx.alice, friend).await;
        tick().await;
    }

    let second = fx
        .reader
        .find_friends_by_member_id(fx.alice, PageRequest::new(1, 2, SortDirection::Asc))
        .await
        .unwrap();
    let names: Vec<&str> = second
        .items
        .iter()
        .filter_map(|f| f.display_name.as_deref())
        .collect();
    assert_eq!(names, vec!["Three", "Four"]);
    assert_eq!(second.total, 5);
    assert_eq!(second.total_pages(), 3);
    assert!(second.has_next());

    let last = fx
        .reader
        .find_friends_by_member_id(fx.alice, PageRequest::new(2, 2, SortDirection::Asc))
        .await
        .unwrap();
    assert_eq!(last.items.len(), 1);
    assert!(!last.has_next());
}

#[tokio::test]
async fn search_matches_display_names_case_insensitively() {
    let fx = Fixture::new();
    let caroline = fx.member("caroline", "Caroline");
    fx.befriend(fx.alice, fx.bob).await;
    fx.befriend(fx.alice, fx.carol).await;
    fx.befriend(fx.alice, caroline).await;
    fx.send(fx.alice, fx.dave).await;

    let hits = fx
        .reader
        .search_friends(fx.alice, "  CAROL ", PageRequest::default())
        .await
        .unwrap();

    assert_eq!(hits.total, 2);
    let mut ids: Vec<MemberId> = hits.items.iter().map(|f| f.friend_member_id).collect();
    ids.sort();
    let mut expected = vec![fx.carol, caroline];
    expected.sort();
    assert_eq!(ids, expected);

    let none = fx
        .reader
        .search_friends(fx.alice, "dave", PageRequest::default())
        .await
        .unwrap();
    assert_eq!(none.total, 0);
}

#[tokio::test]
async fn listing_survives_a_vanished_member_record() {
    let fx = Fixture::new();
    fx.befriend(fx.alice, fx.bob).await;
    fx.befriend(fx.alice, fx.carol).await;
    fx.members.set_status(fx.carol, MemberStatus::Inactive);
    fx.members.remove(fx.bob);

    let friends = fx
        .reader
        .find_friends_by_member_id(fx.alice, PageRequest::default())
        .await
        .unwrap();

    assert_eq!(friends.total, 2);
    let bob = friends.items.iter().find(|f| f.friend_member_id == fx.bob).unwrap();
    assert_eq!(bob.display_name, None);
    let carol = friends.items.iter().find(|f| f.friend_member_id == fx.carol).unwrap();
    assert_eq!(carol.display_name.as_deref(), Some("Carol"));

    let hits = fx
        .reader
        .search_friends(fx.alice, "bob", PageRequest::default())
        .await
        .unwrap();
    assert!(hits.items.is_empty());
}

#[tokio::test]
async fn pending_listings_follow_direction() {
    let fx = Fixture::new();
    fx.send(fx.bob, fx.alice).await;
    tick().await;
    fx.send(fx.carol, fx.alice).await;
    fx.send(fx.alice, fx.dave).await;

    let received = fx
        .reader
        .find_pending_requests_received(fx.alice, PageRequest::default())
        .await
        .unwrap();
    let senders: Vec<MemberId> = received.items.iter().map(|f| f.member_id()).collect();
    assert_eq!(senders, vec![fx.carol, fx.bob]);

    let sent = fx
        .reader
        .find_pending_requests_sent(fx.alice, PageRequest::default())
        .await
        .unwrap();
    assert_eq!(sent.total, 1);
    assert_eq!(sent.items[0].friend_member_id(), fx.dave);
}
