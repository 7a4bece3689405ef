//! Gameplay through a `GameSession`, with and without persistence attached.
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use mine_core::{Cell, Direction, GameConfig, PersistRequest, Position, UniformGenerator};
use mine_runtime::{
    DocumentStore, GameSession, InMemoryDocumentStore, PersistOutcome, PersistenceGateway,
    PlayerProfile, SessionIdentity, SkipReason, StoreError,
};
use serde_json::Value;

const UID: &str = "miner-1";

fn offline_session(cell: Cell) -> GameSession {
    let mut session =
        GameSession::new(GameConfig::default(), Box::new(UniformGenerator(cell))).unwrap();
    session.new_game();
    session
}

fn online_session(cell: Cell, identity: SessionIdentity) -> (GameSession, Arc<InMemoryDocumentStore>) {
    let store = Arc::new(InMemoryDocumentStore::new());
    let gateway = PersistenceGateway::new(store.clone(), Arc::new(identity));
    let mut session = GameSession::new(GameConfig::default(), Box::new(UniformGenerator(cell)))
        .unwrap()
        .with_gateway(gateway);
    session.new_game();
    (session, store)
}

#[test]
fn new_session_waits_at_the_menu() {
    let mut session =
        GameSession::new(GameConfig::default(), Box::new(UniformGenerator(Cell::COAL))).unwrap();
    assert!(!session.state().is_playing());
    assert!(!session.move_player(1, 0));

    session.new_game();
    assert!(session.state().is_playing());
    assert!(session.move_player(1, 0));
}

#[test]
fn invalid_configuration_is_rejected() {
    let config = GameConfig {
        cols: 0,
        ..GameConfig::default()
    };
    assert!(GameSession::new(config, Box::new(UniformGenerator(Cell::Wall))).is_err());
}

#[test]
fn three_coal_steps_then_sell() {
    let mut session = offline_session(Cell::COAL);
    for _ in 0..3 {
        assert!(session.move_player(1, 0));
    }
    let state = session.state();
    assert_eq!(state.inventory.coal, 3);
    assert_eq!(state.economy.energy, 97);
    assert_eq!(state.economy.coins, 0);
    assert_eq!(session.inventory_value(), 6);

    assert_eq!(session.sell_all_ores(), 6);
    assert_eq!(session.state().economy.coins, 6);
    assert_eq!(session.state().inventory.coal, 0);
    assert_eq!(session.sell_all_ores(), 0);
    assert_eq!(session.state().economy.coins, 6);
}

#[test]
fn pickaxe_upgrade_spends_exactly_the_quote() {
    let mut session = offline_session(Cell::Wall);
    session.state_mut().economy.coins = 50;
    assert_eq!(session.pickaxe_upgrade_cost(), 50);

    assert!(session.upgrade_pickaxe());
    assert_eq!(session.state().economy.coins, 0);
    assert_eq!(session.state().economy.pickaxe_level, 2);
    assert_eq!(session.pickaxe_upgrade_cost(), 80);

    assert!(!session.upgrade_pickaxe());
    assert_eq!(session.state().economy.pickaxe_level, 2);
}

#[test]
fn energy_upgrade_refills_and_raises_capacity() {
    let mut session = offline_session(Cell::Wall);
    assert!(!session.increase_max_energy());

    session.state_mut().economy.coins = 75;
    session.state_mut().economy.energy = 10;
    assert_eq!(session.energy_upgrade_cost(), 60);
    assert!(session.increase_max_energy());
    let economy = session.state().economy;
    assert_eq!(economy.coins, 15);
    assert_eq!(economy.max_energy, 120);
    assert_eq!(economy.energy, 30);
}

#[test]
fn descending_near_the_bottom_expands_the_mine() {
    let mut session = offline_session(Cell::Wall);
    session.state_mut().player = Position::new(4, 9);
    assert_eq!(session.state().grid.rows(), 15);

    assert!(session.move_direction(Direction::Down));
    assert_eq!(session.state().player, Position::new(4, 10));
    assert_eq!(session.state().grid.rows(), 25);
    assert!(session.state().grid.iter_rows().all(|row| row.len() == 10));
}

#[test]
fn rejected_moves_change_nothing() {
    let mut session = offline_session(Cell::COAL);
    let before = session.state().clone();

    assert!(!session.move_player(0, -1), "off the top edge");
    assert!(!session.move_player(1, 1), "diagonal");
    assert!(!session.move_player(2, 0), "two cells");
    assert_eq!(session.state(), &before);

    assert!(session.toggle_menu());
    let paused = session.state().clone();
    assert!(!session.move_player(1, 0));
    assert_eq!(session.state(), &paused);

    session.resume_game();
    session.state_mut().economy.energy = 0;
    assert!(session.state().is_game_over());
    let exhausted = session.state().clone();
    assert!(!session.move_player(1, 0));
    assert_eq!(session.state(), &exhausted);
}

#[test]
fn rare_ores_are_counted_once_and_survive_selling() {
    let mut session = offline_session(Cell::DIAMOND);
    assert!(session.move_player(1, 0));
    assert!(session.move_player(1, 0));
    assert!(session.move_player(-1, 0), "walks back over an emptied cell");
    assert_eq!(session.state().progress.total_rare_ores_collected, 2);

    assert_eq!(session.sell_all_ores(), 80);
    assert_eq!(session.state().progress.total_rare_ores_collected, 2);
    assert_eq!(session.state().inventory.diamond, 0);
}

#[test]
fn max_depth_remembers_the_deepest_row() {
    let mut session = offline_session(Cell::Wall);
    for _ in 0..4 {
        assert!(session.move_direction(Direction::Down));
    }
    for _ in 0..3 {
        assert!(session.move_direction(Direction::Up));
    }
    assert_eq!(session.state().player.y, 1);
    assert_eq!(session.state().progress.max_depth_reached, 4);
}

#[test]
fn checkpoints_without_async_runtime_do_not_block_play() {
    let (mut session, store) = online_session(Cell::COAL, SessionIdentity::signed_in(UID));
    assert!(session.move_player(1, 0));
    assert_eq!(session.pending_checkpoints(), 0);
    assert!(store.is_empty("gameState"));
}

#[tokio::test]
async fn first_step_from_full_energy_saves() {
    let (mut session, store) = online_session(Cell::COAL, SessionIdentity::signed_in(UID));

    assert!(session.move_player(1, 0));
    let reports = session.flush().await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].request, PersistRequest::SaveGame);
    assert!(reports[0].is_written());

    let saved = store.get("gameState", UID).await.unwrap().unwrap();
    assert_eq!(saved["energy"], 99);
    assert_eq!(saved["playerX"], 5);
    assert_eq!(saved["coal"], 1);

    for _ in 0..9 {
        assert!(session.move_player(0, 1));
    }
    assert!(session.flush().await.is_empty(), "99..=91 do not checkpoint");
    assert!(session.move_player(0, 1));
    assert_eq!(session.flush().await.len(), 1, "spending from 90 does");
}

#[tokio::test]
async fn selling_publishes_standings_before_saving() {
    let (mut session, store) = online_session(Cell::DIAMOND, SessionIdentity::signed_in(UID));
    let gateway = session.gateway().unwrap().clone();
    assert!(gateway
        .seed_profile(&PlayerProfile::new("Dig Dug", "pick"))
        .await
        .unwrap());

    assert!(session.move_player(1, 0));
    assert!(session.move_player(1, 0));
    session.flush().await;

    assert_eq!(session.sell_all_ores(), 80);
    let reports = session.flush().await;
    let order: Vec<PersistRequest> = reports.iter().map(|report| report.request).collect();
    assert_eq!(
        order,
        vec![PersistRequest::UpdateLeaderboard, PersistRequest::SaveGame]
    );
    assert!(reports.iter().all(|report| report.is_written()));

    let entry = store.get("leaderboard", UID).await.unwrap().unwrap();
    assert_eq!(entry["coins"], 80);
    assert_eq!(entry["rareOres"], 2);
    assert_eq!(entry["displayName"], "Dig Dug");
    let saved = store.get("gameState", UID).await.unwrap().unwrap();
    assert_eq!(saved["diamond"], 0);
    assert_eq!(saved["totalRareOresCollected"], 2);
}

#[tokio::test]
async fn selling_without_profile_still_saves() {
    let (mut session, store) = online_session(Cell::COAL, SessionIdentity::signed_in(UID));
    session.sell_all_ores();
    let reports = session.flush().await;
    assert!(matches!(
        reports[0].outcome,
        Ok(PersistOutcome::Skipped(SkipReason::NoProfile))
    ));
    assert!(reports[1].is_written());
    assert!(store.is_empty("leaderboard"));
}

#[tokio::test]
async fn anonymous_players_persist_nothing() {
    let (mut session, store) = online_session(Cell::COAL, SessionIdentity::anonymous());
    assert!(session.move_player(1, 0));
    session.sell_all_ores();
    let reports = session.flush().await;
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|report| matches!(
        report.outcome,
        Ok(PersistOutcome::Skipped(SkipReason::Unauthenticated))
    )));
    assert!(store.is_empty("gameState"));
    assert!(store.is_empty("leaderboard"));
}

#[tokio::test]
async fn unreachable_store_never_interrupts_play() {
    let (mut session, store) = online_session(Cell::COAL, SessionIdentity::signed_in(UID));
    store.set_available(false);

    assert!(session.move_player(1, 0));
    assert!(session.move_player(1, 0));
    let reports = session.flush().await;
    assert_eq!(reports.len(), 1);
    match &reports[0].outcome {
        Err(err) => assert!(err.is_unavailable()),
        other => panic!("expected unavailable store, got {other:?}"),
    }
    assert_eq!(session.state().economy.energy, 98);
    assert_eq!(session.state().inventory.coal, 2);
}

#[tokio::test]
async fn opening_the_menu_saves_closing_does_not() {
    let (mut session, store) = online_session(Cell::COAL, SessionIdentity::signed_in(UID));

    assert!(session.toggle_menu());
    assert!(session.state().is_paused());
    assert_eq!(session.flush().await.len(), 1);
    assert!(!store.is_empty("gameState"));

    assert!(!session.toggle_menu());
    assert!(!session.state().is_paused());
    assert!(session.flush().await.is_empty());
}

#[tokio::test]
async fn detached_session_skips_direct_persistence_calls() {
    let session = offline_session(Cell::COAL);
    assert_eq!(
        session.save().await.unwrap(),
        PersistOutcome::Skipped(SkipReason::Detached)
    );
    assert!(session.top_leaderboard(10).await.unwrap().is_empty());
}

/// In-memory store whose first `gameState` write stalls before landing.
struct StallingStore {
    inner: InMemoryDocumentStore,
    stalled: AtomicBool,
    delay: Duration,
}

#[async_trait]
impl DocumentStore for StallingStore {
    async fn put(&self, collection: &str, key: &str, document: Value) -> Result<(), StoreError> {
        if collection == "gameState" && !self.stalled.swap(true, Ordering::SeqCst) {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.put(collection, key, document).await
    }

    async fn get(&self, collection: &str, key: &str) -> Result<Option<Value>, StoreError> {
        self.inner.get(collection, key).await
    }

    async fn top_n(
        &self,
        collection: &str,
        sort_field: &str,
        n: usize,
    ) -> Result<Vec<Value>, StoreError> {
        self.inner.top_n(collection, sort_field, n).await
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn slow_save_never_overwrites_a_later_one() {
    let store = Arc::new(StallingStore {
        inner: InMemoryDocumentStore::new(),
        stalled: AtomicBool::new(false),
        delay: Duration::from_millis(200),
    });
    let gateway = PersistenceGateway::new(store.clone(), Arc::new(SessionIdentity::signed_in(UID)));
    let mut session = GameSession::new(
        GameConfig::default(),
        Box::new(UniformGenerator(Cell::DIAMOND)),
    )
    .unwrap()
    .with_gateway(gateway);
    session.new_game();

    // Spending from 100 saves with no coins; the sale right after saves 40.
    assert!(session.move_player(1, 0));
    assert_eq!(session.sell_all_ores(), 40);
    assert_eq!(session.pending_checkpoints(), 2);

    let reports = session.flush().await;
    let order: Vec<PersistRequest> = reports.iter().map(|report| report.request).collect();
    assert_eq!(
        order,
        vec![
            PersistRequest::SaveGame,
            PersistRequest::UpdateLeaderboard,
            PersistRequest::SaveGame
        ]
    );
    assert_eq!(session.pending_checkpoints(), 0);

    let saved = store.get("gameState", UID).await.unwrap().unwrap();
    assert_eq!(saved["coins"], 40);
    assert_eq!(saved["diamond"], 0);
    assert_eq!(session.state().economy.coins, 40);
}

#[tokio::test]
async fn move_save_is_taken_before_the_mine_grows() {
    let (mut session, store) = online_session(Cell::Wall, SessionIdentity::signed_in(UID));
    session.state_mut().player = Position::new(4, 9);

    assert!(session.move_direction(Direction::Down));
    assert_eq!(session.state().grid.rows(), 25);
    assert_eq!(session.flush().await.len(), 1);

    let saved = store.get("gameState", UID).await.unwrap().unwrap();
    assert_eq!(saved["rows"], 15);
    assert_eq!(saved["mine"].as_array().unwrap().len(), 15);
    assert_eq!(saved["playerY"], 10);
    assert_eq!(saved["energy"], 99);
}
