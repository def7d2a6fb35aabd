use std::sync::Arc;

use progression_content::ContentFactory;
use progression_core::{EquipSlot, ExternalId, ExternalIdentity, GameOutcome, ItemHandle};
use progression_runtime::{FileStateRepository, Runtime, RuntimeConfig, RuntimeHandle};

const PLAYER: ExternalId = ExternalId(31337);
const WOODEN_SWORD: ItemHandle = ItemHandle(1);
const LEATHER_JACKET: ItemHandle = ItemHandle(3);

fn open(dir: &std::path::Path) -> RuntimeHandle {
    Runtime::builder()
        .config(RuntimeConfig {
            data_dir: Some(dir.to_path_buf()),
            ..RuntimeConfig::default()
        })
        .content(&ContentFactory::new(dir))
        .expect("shipped content should load")
        .build()
        .expect("runtime should build")
        .handle()
}

#[tokio::test]
async fn progress_survives_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let handle = open(dir.path());
        handle
            .register_player(ExternalIdentity::new(PLAYER).with_username("persist"))
            .await
            .unwrap();
        handle
            .create_character(PLAYER, "Keeper", 5, 5, 10)
            .await
            .unwrap();
        handle.add_item(PLAYER, WOODEN_SWORD, 1).await.unwrap();
        handle.add_item(PLAYER, LEATHER_JACKET, 2).await.unwrap();
        handle
            .equip(PLAYER, EquipSlot::Weapon, WOODEN_SWORD)
            .await
            .unwrap();
        handle.grant_experience(PLAYER, 120).await.unwrap();
        handle
            .record_game_result(PLAYER, GameOutcome::Win)
            .await
            .unwrap();
    }

    let handle = open(dir.path());
    let view = handle.character_view(PLAYER).unwrap();
    assert_eq!(view.character.name, "Keeper");
    assert_eq!(view.character.level(), 2);
    assert_eq!(view.equipment[0].item, WOODEN_SWORD);
    assert_eq!(view.inventory.len(), 1);
    assert_eq!(view.inventory[0].quantity, 2);
    assert_eq!(view.stats.max_health, 175);

    let profile = handle.profile(PLAYER).unwrap();
    assert_eq!(profile.record.wins, 1);
    assert_eq!(profile.win_rate(), 100.0);

    // ids keep counting after a restart
    handle
        .register_player(ExternalIdentity::new(ExternalId(2)))
        .await
        .unwrap();
    assert_ne!(
        handle.player(ExternalId(2)).unwrap().id,
        handle.player(PLAYER).unwrap().id
    );
}

#[tokio::test]
async fn explicit_repository_wins_over_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    let repo = Arc::new(FileStateRepository::open(dir.path()).unwrap());

    let handle = Runtime::builder()
        .content(&ContentFactory::new(dir.path()))
        .unwrap()
        .repository(repo.clone())
        .build()
        .unwrap()
        .handle();
    handle
        .register_player(ExternalIdentity::new(PLAYER))
        .await
        .unwrap();

    assert!(repo.path().exists());
}
