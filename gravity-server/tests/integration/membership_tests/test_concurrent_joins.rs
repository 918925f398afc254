use std::collections::HashSet;

use crate::integration::{init_tracing, start_server};
use crate::utils::TestClient;

const CLIENTS: usize = 16;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_joins_see_everyone_once() {
    init_tracing();

    let addr = start_server().await;

    let tasks: Vec<_> = (0..CLIENTS)
        .map(|_| {
            tokio::spawn(async move {
                let mut client = TestClient::connect(addr).await.expect("connects");
                let id = client.join("r").await.expect("joins");

                // Everyone else shows up exactly once, either in the
                // existing-peers snapshot or as a later peer-join.
                let mut seen = Vec::new();
                while seen.len() < CLIENTS - 1 {
                    let frame = client.recv_json().await.expect("frame");
                    match frame["type"].as_str() {
                        Some("existing-peers") => {
                            for peer in frame["peers"].as_array().expect("peers array") {
                                seen.push(peer["id"].as_str().expect("peer id").to_owned());
                            }
                        }
                        Some("peer-join") => {
                            seen.push(frame["id"].as_str().expect("peer id").to_owned());
                        }
                        other => panic!("unexpected {:?} while joining", other),
                    }
                }

                (client, id, seen)
            })
        })
        .collect();

    let mut joined = Vec::with_capacity(CLIENTS);
    for task in tasks {
        joined.push(task.await.expect("client task panicked"));
    }

    let all: HashSet<String> = joined.iter().map(|(_, id, _)| id.clone()).collect();
    assert_eq!(all.len(), CLIENTS, "identities are unique");

    for (_, id, seen) in &joined {
        let mut seen = seen.clone();
        seen.sort();
        let mut expected: Vec<String> = all.iter().filter(|other| *other != id).cloned().collect();
        expected.sort();
        assert_eq!(seen, expected, "{} saw the wrong set of peers", id);
    }

    for (client, _, _) in joined {
        client.close().await.unwrap();
    }
}
