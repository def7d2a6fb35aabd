use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{TimeZone, Utc};
use progression_core::{
    CharacterError, EngineError, EquipOutcome, EquipSlot, EquipTag, EquipmentBoard, ErrorKind,
    ExternalId, ExternalIdentity, GameError, GameOutcome, ItemDefinition, ItemHandle, ItemType,
    LinkedIdentity, MAX_SKILL, ProgressionConfig, Skill, SlotRow, SlotRowId, StatBonuses,
};
use progression_runtime::{
    CharacterEvent, ChangeSet, Clock, Event, InMemoryStateRepo, MaintenanceEvent, Runtime,
    RuntimeConfig, RuntimeError, RuntimeHandle, StateRepository, Topic,
};

const SWORD: ItemHandle = ItemHandle(1);
const AXE: ItemHandle = ItemHandle(2);
const VEST: ItemHandle = ItemHandle(3);
const POTION: ItemHandle = ItemHandle(4);

const ALICE: ExternalId = ExternalId(1001);
const BOB: ExternalId = ExternalId(1002);

fn catalog() -> Vec<ItemDefinition> {
    vec![
        ItemDefinition::new(SWORD, "Steel Sword", ItemType::Weapon)
            .with_tag(EquipTag::Weapon)
            .with_bonuses(StatBonuses::NONE.attack(5).crit_chance(1.0))
            .with_value(40),
        ItemDefinition::new(AXE, "Battle Axe", ItemType::Weapon)
            .with_tag(EquipTag::Weapon)
            .with_bonuses(StatBonuses::NONE.attack(8).strength(1))
            .with_value(60),
        ItemDefinition::new(VEST, "Leather Vest", ItemType::Armor)
            .with_tag(EquipTag::Torso)
            .with_bonuses(StatBonuses::NONE.defense(3).health(20))
            .with_value(25),
        ItemDefinition::new(POTION, "Health Potion", ItemType::Consumable)
            .stacking(10)
            .with_value(5),
    ]
}

/// Clock advancing one second per reading.
fn ticking_clock() -> Clock {
    let tick = Arc::new(AtomicI64::new(1_700_000_000));
    Arc::new(move || {
        let secs = tick.fetch_add(1, Ordering::SeqCst);
        Utc.timestamp_opt(secs, 0).unwrap()
    })
}

fn runtime_with(progression: ProgressionConfig, repo: Arc<InMemoryStateRepo>) -> RuntimeHandle {
    Runtime::builder()
        .config(RuntimeConfig {
            progression,
            ..RuntimeConfig::default()
        })
        .items(catalog())
        .repository(repo)
        .clock(ticking_clock())
        .build()
        .expect("runtime should build")
        .handle()
}

fn runtime() -> RuntimeHandle {
    runtime_with(ProgressionConfig::default(), Arc::new(InMemoryStateRepo::new()))
}

async fn hero(handle: &RuntimeHandle, external: ExternalId, name: &str) {
    handle
        .register_player(ExternalIdentity::new(external).with_username(name))
        .await
        .unwrap();
    handle
        .create_character(external, name, 10, 5, 5)
        .await
        .unwrap();
}

#[tokio::test]
async fn equipping_a_weapon_updates_attack_crit_and_heals() {
    // 8 + 5 + 5 = 18 point budget
    let config = ProgressionConfig::default().with_creation_bonus(3);
    let handle = runtime_with(config, Arc::new(InMemoryStateRepo::new()));
    handle
        .register_player(ExternalIdentity::new(ALICE))
        .await
        .unwrap();

    let created = handle
        .create_character(ALICE, "Aria", 8, 5, 5)
        .await
        .unwrap();
    assert_eq!(created.derived().max_attack, 24);
    assert!((created.derived().crit_chance - 9.5).abs() < 1e-9);

    handle.add_item(ALICE, SWORD, 1).await.unwrap();
    let outcome = handle.equip(ALICE, EquipSlot::Weapon, SWORD).await.unwrap();
    assert_eq!(outcome, EquipOutcome::Equipped { replaced: None });

    let view = handle.character_view(ALICE).unwrap();
    assert_eq!(view.stats.max_attack, 29);
    assert_eq!(view.stats.crit_chance, 10.5);
    // full heal on recompute
    assert_eq!(view.character.current_health(), view.stats.max_health);
    assert!(view.inventory.is_empty());
    assert_eq!(view.equipment.len(), 1);
    assert_eq!(view.equipment[0].item, SWORD);
}

#[tokio::test]
async fn swap_and_unequip_keep_inventory_balanced() {
    let handle = runtime();
    hero(&handle, ALICE, "Aria").await;
    handle.add_item(ALICE, SWORD, 1).await.unwrap();
    handle.add_item(ALICE, AXE, 1).await.unwrap();

    handle.equip(ALICE, EquipSlot::Weapon, SWORD).await.unwrap();
    let outcome = handle.equip(ALICE, EquipSlot::Weapon, AXE).await.unwrap();
    assert_eq!(outcome, EquipOutcome::Equipped { replaced: Some(SWORD) });

    let names: Vec<_> = handle
        .inventory(ALICE)
        .unwrap()
        .into_iter()
        .map(|line| (line.item, line.quantity))
        .collect();
    assert_eq!(names, vec![(SWORD, 1)]);

    // effective strength 11 from the axe
    let view = handle.character_view(ALICE).unwrap();
    assert_eq!(view.stats.max_attack, 15 + 6 * 3 + 8);

    assert_eq!(handle.unequip(ALICE, EquipSlot::Weapon).await.unwrap(), Some(AXE));
    assert_eq!(handle.unequip(ALICE, EquipSlot::Weapon).await.unwrap(), None);
    assert_eq!(handle.inventory(ALICE).unwrap().len(), 2);
    assert!(handle.character_view(ALICE).unwrap().equipment.is_empty());
}

#[tokio::test]
async fn equip_failures_change_nothing() {
    let handle = runtime();
    hero(&handle, ALICE, "Aria").await;
    handle.add_item(ALICE, VEST, 1).await.unwrap();
    let before = handle.character_view(ALICE).unwrap();

    let err = handle.equip(ALICE, EquipSlot::Weapon, VEST).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);

    let err = handle.equip(ALICE, EquipSlot::Weapon, SWORD).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientResource);

    let err = handle
        .equip(ALICE, EquipSlot::Weapon, ItemHandle(77))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);

    assert_eq!(handle.character_view(ALICE).unwrap(), before);
}

#[tokio::test]
async fn experience_levels_and_skill_points() {
    let handle = runtime();
    hero(&handle, ALICE, "Aria").await;

    let gain = handle.grant_experience(ALICE, 250).await.unwrap();
    assert_eq!(gain.levels_gained, 2);
    assert_eq!(gain.level, 3);

    let character = handle.character(ALICE).unwrap();
    assert_eq!(character.level(), 3);
    assert_eq!(character.experience(), 250);
    assert_eq!(character.free_skill_points(), 2);

    let character = handle
        .allocate_skill(ALICE, Skill::Vitality, 2)
        .await
        .unwrap();
    assert_eq!(character.skills().vitality, 7);
    assert_eq!(character.derived().max_health, 130);
    assert_eq!(character.free_skill_points(), 0);

    let err = handle
        .allocate_skill(ALICE, Skill::Strength, 1)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientResource);
    let err = handle
        .allocate_skill(ALICE, Skill::Strength, 0)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
}

#[tokio::test]
async fn game_record_and_win_rate() {
    let handle = runtime();
    handle
        .register_player(ExternalIdentity::new(ALICE))
        .await
        .unwrap();
    assert_eq!(handle.profile(ALICE).unwrap().win_rate(), 0.0);

    handle
        .record_game_result(ALICE, GameOutcome::Win)
        .await
        .unwrap();
    handle
        .record_game_result(ALICE, GameOutcome::Loss)
        .await
        .unwrap();
    let record = handle
        .record_game_result(ALICE, GameOutcome::Win)
        .await
        .unwrap();

    assert_eq!(record.total_games, 3);
    assert_eq!(record.wins, 2);
    assert_eq!(record.losses, 1);
    assert_eq!(handle.profile(ALICE).unwrap().win_rate(), 66.7);
}

#[tokio::test]
async fn second_character_conflicts_and_keeps_the_first() {
    let handle = runtime();
    hero(&handle, ALICE, "Aria").await;
    let first = handle.character(ALICE).unwrap();

    let err = handle
        .create_character(ALICE, "Other", 10, 5, 5)
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        RuntimeError::Engine(EngineError::Character(CharacterError::AlreadyHasCharacter))
    ));
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(handle.character(ALICE).unwrap(), first);
}

#[tokio::test]
async fn names_are_unique_ignoring_case() {
    let handle = runtime();
    hero(&handle, ALICE, "Aria").await;
    handle
        .register_player(ExternalIdentity::new(BOB))
        .await
        .unwrap();

    let err = handle
        .create_character(BOB, "  aRIA ", 10, 5, 5)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Conflict);
    assert_eq!(err.error_code(), "CHARACTER_DUPLICATE_NAME");

    let err = handle
        .create_character(BOB, "Bram", 4, 8, 8)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert!(matches!(
        handle.character(BOB),
        Err(RuntimeError::CharacterNotFound(BOB))
    ));
}

#[tokio::test]
async fn unknown_players_and_items_are_not_found() {
    let handle = runtime();
    let err = handle.character_view(ALICE).unwrap_err();
    assert!(matches!(err, RuntimeError::PlayerNotFound(ALICE)));

    handle
        .register_player(ExternalIdentity::new(ALICE))
        .await
        .unwrap();
    let err = handle.equip(ALICE, EquipSlot::Weapon, SWORD).await.unwrap_err();
    assert!(matches!(err, RuntimeError::CharacterNotFound(ALICE)));

    let err = handle.add_item(ALICE, ItemHandle(99), 1).await.unwrap_err();
    assert!(matches!(err, RuntimeError::ItemNotFound(ItemHandle(99))));
}

#[tokio::test]
async fn registration_is_get_or_create() {
    let handle = runtime();
    let first = handle
        .register_player(ExternalIdentity::new(ALICE).with_username("aria"))
        .await
        .unwrap();
    assert!(first.created);
    assert_eq!(first.profile.gold(), 100);

    let again = handle
        .register_player(ExternalIdentity::new(ALICE).with_names("Aria", "Vell"))
        .await
        .unwrap();
    assert!(!again.created);
    assert_eq!(again.player.id, first.player.id);
    assert_eq!(again.player.username.as_deref(), Some("aria"));
    assert_eq!(again.player.first_name.as_deref(), Some("Aria"));
    assert!(again.profile.last_login > first.profile.last_login);
}

#[tokio::test]
async fn gold_cannot_go_negative() {
    let handle = runtime();
    handle
        .register_player(ExternalIdentity::new(ALICE))
        .await
        .unwrap();

    assert_eq!(handle.adjust_gold(ALICE, 50).await.unwrap(), 150);
    let err = handle.adjust_gold(ALICE, -200).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientResource);
    assert_eq!(handle.profile(ALICE).unwrap().gold(), 150);
}

#[tokio::test]
async fn inventory_lists_newest_first_with_values() {
    let handle = runtime();
    handle
        .register_player(ExternalIdentity::new(ALICE))
        .await
        .unwrap();

    handle.add_item(ALICE, POTION, 3).await.unwrap();
    handle.add_item(ALICE, VEST, 1).await.unwrap();
    assert_eq!(handle.add_item(ALICE, POTION, 2).await.unwrap(), 5);

    let lines = handle.inventory(ALICE).unwrap();
    assert_eq!(lines[0].item, VEST);
    assert_eq!(lines[1].item, POTION);
    assert_eq!(lines[1].quantity, 5);
    assert_eq!(lines[1].total_value, 25);
    assert_eq!(lines[1].name(), "Health Potion");

    assert_eq!(handle.remove_item(ALICE, POTION, 5).await.unwrap(), 0);
    let err = handle.remove_item(ALICE, POTION, 1).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientResource);
    assert_eq!(handle.inventory(ALICE).unwrap().len(), 1);
}

#[tokio::test]
async fn linked_identity_round_trip() {
    let handle = runtime();
    handle
        .register_player(ExternalIdentity::new(ALICE))
        .await
        .unwrap();

    let player = handle
        .link_identity(
            ALICE,
            LinkedIdentity {
                username: "aria_plays".into(),
                account_id: "4242".into(),
                access_token: "secret".into(),
                refresh_token: None,
                connected: true,
            },
        )
        .await
        .unwrap();
    assert!(player.is_linked());
    assert!(!format!("{:?}", player.linked).contains("secret"));

    let player = handle.unlink_identity(ALICE).await.unwrap();
    assert!(!player.is_linked());
    assert!(handle.player(ALICE).unwrap().linked.is_none());
}

#[tokio::test]
async fn duplicate_rows_read_earliest_and_repair_is_idempotent() {
    let repo = Arc::new(InMemoryStateRepo::new());
    let handle = runtime_with(ProgressionConfig::default(), repo.clone());
    hero(&handle, ALICE, "Aria").await;
    let character = handle.character(ALICE).unwrap();
    let at = |secs| Utc.timestamp_opt(secs, 0).unwrap();

    // legacy data: three rows for one slot
    repo.commit(ChangeSet::new().board(EquipmentBoard::from_rows(
        character.id,
        [
            SlotRow { id: SlotRowId(1), slot: EquipSlot::Weapon, item: SWORD, equipped_at: at(1) },
            SlotRow { id: SlotRowId(2), slot: EquipSlot::Weapon, item: AXE, equipped_at: at(2) },
            SlotRow { id: SlotRowId(3), slot: EquipSlot::Weapon, item: AXE, equipped_at: at(3) },
        ],
    )))
    .unwrap();

    let view = handle.character_view(ALICE).unwrap();
    assert_eq!(view.equipment.len(), 1);
    assert_eq!(view.equipment[0].item, SWORD);
    // reads do not repair
    assert_eq!(repo.board(character.id).unwrap().rows().len(), 3);

    let mut maintenance = handle.subscribe(Topic::Maintenance);
    let report = handle.repair_equipment().await.unwrap();
    assert_eq!(report.characters_scanned, 1);
    assert_eq!(report.characters_repaired, 1);
    assert_eq!(report.rows_removed, 2);
    assert_eq!(
        maintenance.recv().await.unwrap(),
        Event::Maintenance(MaintenanceEvent::EquipmentRepaired {
            character: character.id,
            rows_removed: 2,
        })
    );

    let board = repo.board(character.id).unwrap();
    assert_eq!(board.rows().len(), 1);
    assert_eq!(board.item_in(EquipSlot::Weapon), Some(SWORD));

    assert!(handle.repair_equipment().await.unwrap().is_clean());
}

#[tokio::test]
async fn equip_publishes_after_commit() {
    let handle = runtime();
    hero(&handle, ALICE, "Aria").await;
    handle.add_item(ALICE, VEST, 1).await.unwrap();
    let mut events = handle.subscribe(Topic::Character);

    handle.equip(ALICE, EquipSlot::Torso, VEST).await.unwrap();

    assert_eq!(
        events.recv().await.unwrap(),
        Event::Character(CharacterEvent::Equipped {
            player: ALICE,
            slot: EquipSlot::Torso,
            item: VEST,
            replaced: None,
        })
    );
    match events.recv().await.unwrap() {
        Event::Character(CharacterEvent::StatsRecomputed { stats, .. }) => {
            assert_eq!(stats.max_health, 120);
            assert_eq!(stats.defense, 8);
        }
        other => panic!("unexpected event {other:?}"),
    }

    // failed equip publishes nothing
    handle
        .equip(ALICE, EquipSlot::Torso, SWORD)
        .await
        .unwrap_err();
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn equipment_and_skill_changes_reach_the_store() {
    let repo = Arc::new(InMemoryStateRepo::new());
    let handle = runtime_with(ProgressionConfig::default(), repo.clone());
    hero(&handle, ALICE, "Aria").await;
    let player = handle.player(ALICE).unwrap().id;
    let character = handle.character(ALICE).unwrap().id;
    handle.add_item(ALICE, VEST, 1).await.unwrap();

    handle.equip(ALICE, EquipSlot::Torso, VEST).await.unwrap();
    assert!(repo.inventory(player).unwrap().is_empty());
    assert_eq!(repo.board(character).unwrap().item_in(EquipSlot::Torso), Some(VEST));
    let stored = repo.character_of(player).unwrap().unwrap();
    assert_eq!(stored.derived().max_health, 120);
    assert_eq!(stored.current_health(), 120);

    // the only vest is on the board now
    let err = handle.equip(ALICE, EquipSlot::Torso, VEST).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InsufficientResource);

    assert_eq!(handle.unequip(ALICE, EquipSlot::Torso).await.unwrap(), Some(VEST));
    assert_eq!(repo.inventory(player).unwrap().quantity(VEST), 1);
    assert!(repo.board(character).unwrap().rows().is_empty());
    assert_eq!(repo.character_of(player).unwrap().unwrap().derived().max_health, 100);

    handle.grant_experience(ALICE, 100).await.unwrap();
    handle.allocate_skill(ALICE, Skill::Vitality, 1).await.unwrap();
    let stored = repo.character_of(player).unwrap().unwrap();
    assert_eq!(stored.skills().vitality, 6);
    assert_eq!(stored.free_skill_points(), 0);
    assert_eq!(stored.derived().max_health, 115);
}

#[tokio::test]
async fn zero_experience_publishes_nothing() {
    let handle = runtime();
    hero(&handle, ALICE, "Aria").await;
    let mut events = handle.subscribe(Topic::Progression);

    let gain = handle.grant_experience(ALICE, 0).await.unwrap();
    assert_eq!(gain.levels_gained, 0);
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn skills_stop_at_the_cap() {
    let handle = runtime();
    hero(&handle, ALICE, "Aria").await;
    handle.grant_experience(ALICE, 80_000_000_000).await.unwrap();
    let before = handle.character(ALICE).unwrap();

    let err = handle
        .allocate_skill(ALICE, Skill::Strength, 800_000_000)
        .await
        .unwrap_err();
    assert_eq!(err.error_code(), "SKILL_OVERFLOW");
    assert_eq!(err.kind(), ErrorKind::InvalidInput);
    assert_eq!(handle.character(ALICE).unwrap(), before);

    let room = (MAX_SKILL - before.skills().strength) as u32;
    let character = handle.allocate_skill(ALICE, Skill::Strength, room).await.unwrap();
    assert_eq!(character.skills().strength, MAX_SKILL);
    assert_eq!(character.derived().max_attack, 15 + (MAX_SKILL - 5) * 3);
}
