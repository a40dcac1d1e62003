//! Shared test fixtures: a scriptable in-process transport and upstream
//! payloads.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use dexcache::{
    FetchCache, ResourceKey, StoreLabel, Transport, TransportError, UpstreamResponse,
};
use dexcache_moka::MokaStore;
use serde_json::{Value, json};
use tokio::sync::Semaphore;
use tracing_subscriber::EnvFilter;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// In-process transport counting calls.
///
/// Replies come from the script first; once it is empty every call
/// answers `200` with `{"id": <call number>, "name": <identifier>}`, a
/// valid body for name-only models such as natures.
#[derive(Default)]
pub struct MockTransport {
    calls: AtomicUsize,
    delay: Option<Duration>,
    gate: Option<Arc<Semaphore>>,
    script: Mutex<VecDeque<Result<UpstreamResponse, TransportError>>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Every call sleeps `delay` before answering.
    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay: Some(delay),
            ..Self::default()
        })
    }

    /// Every call waits for a permit from the returned semaphore.
    pub fn gated() -> (Arc<Self>, Arc<Semaphore>) {
        let gate = Arc::new(Semaphore::new(0));
        let transport = Arc::new(Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::default()
        });
        (transport, gate)
    }

    /// Queues a reply for the next call.
    pub fn push(&self, reply: Result<UpstreamResponse, TransportError>) {
        self.script.lock().unwrap().push_back(reply);
    }

    /// Queues a reply with the given status and JSON body.
    pub fn push_json(&self, status: u16, body: Value) {
        self.push(Ok(UpstreamResponse::new(status, body.to_string())));
    }

    /// Number of calls so far, including ones still waiting on the gate.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, key: &ResourceKey) -> Result<UpstreamResponse, TransportError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(gate) = &self.gate {
            gate.acquire().await.expect("gate closed").forget();
        }
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(reply) = self.script.lock().unwrap().pop_front() {
            return reply;
        }
        let body = json!({ "id": call, "name": key.identifier() });
        Ok(UpstreamResponse::new(200, body.to_string()))
    }

    fn label(&self) -> StoreLabel {
        StoreLabel::new_static("mock")
    }
}

pub type MockCache = FetchCache<MokaStore, Arc<MockTransport>>;

pub fn cache_with(transport: Arc<MockTransport>, ttl: Duration) -> MockCache {
    init_tracing();
    FetchCache::builder()
        .store(MokaStore::builder().ttl(ttl).build())
        .transport(transport)
        .request_timeout(Duration::from_secs(5))
        .build()
}

/// Waits until `condition` holds, sleeping a millisecond between checks.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    for _ in 0..5_000 {
        if condition() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(1)).await;
    }
    panic!("condition never became true");
}

fn link(kind: &str, id: u32, name: &str) -> Value {
    json!({ "name": name, "url": format!("https://pokeapi.co/api/v2/{kind}/{id}/") })
}

pub fn pikachu() -> Value {
    json!({
        "id": 25,
        "name": "pikachu",
        "base_experience": 112,
        "height": 4,
        "weight": 60,
        "order": 35,
        "is_default": true,
        "species": link("pokemon-species", 25, "pikachu"),
        "abilities": [
            { "is_hidden": false, "slot": 1, "ability": link("ability", 9, "static") },
            { "is_hidden": true, "slot": 3, "ability": link("ability", 31, "lightning-rod") }
        ],
        "types": [
            { "slot": 1, "type": link("type", 13, "electric") }
        ],
        "stats": [
            { "base_stat": 35, "effort": 0, "stat": link("stat", 1, "hp") },
            { "base_stat": 90, "effort": 2, "stat": link("stat", 6, "speed") }
        ],
        "sprites": {
            "front_default": "https://raw.githubusercontent.com/PokeAPI/sprites/master/sprites/pokemon/25.png",
            "other": {}
        },
        "cries": { "latest": "https://example.invalid/25.ogg" }
    })
}

pub fn pikachu_species() -> Value {
    json!({
        "id": 25,
        "name": "pikachu",
        "order": 35,
        "gender_rate": 4,
        "capture_rate": 190,
        "base_happiness": 50,
        "is_baby": false,
        "is_legendary": false,
        "is_mythical": false,
        "hatch_counter": 10,
        "growth_rate": link("growth-rate", 2, "medium"),
        "generation": link("generation", 1, "generation-i"),
        "evolves_from_species": link("pokemon-species", 172, "pichu"),
        "evolution_chain": { "url": "https://pokeapi.co/api/v2/evolution-chain/10/" },
        "genera": [
            { "genus": "Mouse Pokémon", "language": link("language", 9, "en") }
        ]
    })
}

pub fn thunderbolt() -> Value {
    json!({
        "id": 85,
        "name": "thunderbolt",
        "accuracy": 100,
        "power": 90,
        "pp": 15,
        "priority": 0,
        "type": link("type", 13, "electric"),
        "damage_class": link("move-damage-class", 3, "special"),
        "generation": link("generation", 1, "generation-i")
    })
}

pub fn static_ability() -> Value {
    json!({
        "id": 9,
        "name": "static",
        "is_main_series": true,
        "generation": link("generation", 3, "generation-iii"),
        "effect_entries": [
            {
                "effect": "Whenever a move makes contact with this Pokémon, the move's user has a 30% chance of being paralyzed.",
                "short_effect": "Has a 30% chance of paralyzing attacking Pokémon on contact.",
                "language": link("language", 9, "en")
            }
        ]
    })
}
