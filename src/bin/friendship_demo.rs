//! Walks one friendship through its whole lifecycle against the in-memory
//! backend and prints every published event.

use kinship::application_port::*;
use kinship::domain_model::*;
use kinship::logger::*;
use kinship::server::*;
use kinship::settings::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    logger.reload_from_config(&LogConfig {
        filter: "kinship=debug".to_string(),
    })?;

    let settings = Settings {
        store: Store {
            backend: "memory".to_string(),
            dsn: None,
            max_connections: 1,
            ensure_schema: false,
        },
        events: Events {
            backend: "memory".to_string(),
        },
        log: Log {
            filter: "kinship=debug".to_string(),
        },
    };
    let server = Server::try_new(&settings).await?;

    let registry = server
        .member_registry
        .clone()
        .ok_or_else(|| anyhow::anyhow!("memory store exposes a member registry"))?;
    let alice = registry.register(MemberId::from_handle("alice"), "Alice");
    let bob = registry.register(MemberId::from_handle("bob"), "Bob");

    let request = server
        .friend_requestor
        .send_friend_request(FriendRequestCommand::new(alice, bob, "Bob")?)
        .await?;
    println!("request {} is {}", request.id(), request.status());

    let pending = server
        .friendship_reader
        .find_pending_requests_received(bob, PageRequest::default())
        .await?;
    println!("bob has {} pending request(s)", pending.total);

    server
        .friend_responder
        .respond_to_friend_request(request.id(), bob, true)
        .await?;
    println!(
        "alice and bob are friends: {} / {}",
        server.friendship_reader.are_friends(alice, bob).await?,
        server.friendship_reader.are_friends(bob, alice).await?,
    );

    let friends = server
        .friendship_reader
        .find_friends_by_member_id(alice, PageRequest::default())
        .await?;
    for friend in &friends.items {
        println!(
            "alice's friend {} ({}) since {}",
            friend.friend_member_id,
            friend.display_name.as_deref().unwrap_or("unknown"),
            friend.since
        );
    }

    server.friendship_terminator.unfriend(alice, bob).await?;
    println!(
        "after unfriend alice has {} friend(s)",
        server
            .friendship_reader
            .count_friends_by_member_id(alice)
            .await?
    );

    if let Some(recorder) = &server.recorded_events {
        for event in recorder.events() {
            println!("{}: {}", event.event_type(), serde_json::to_string(&event)?);
        }
    }

    server.shutdown().await;
    Ok(())
}
