//! Tests for the headless host world.

use glam::Vec3;

use freeroam_core::enums::*;
use freeroam_core::error::WorldError;
use freeroam_core::events::HudMessage;
use freeroam_core::types::BlipStyle;
use freeroam_core::world::{ActorWorld, EntityFactory, Hud, PlayerState};

use crate::world::{SimConfig, SimWorld};

// ---- Creation ----

#[tokio::test]
async fn test_creation_waits_for_latency() {
    let mut world = SimWorld::new(SimConfig {
        creation_latency_frames: 4,
        ..Default::default()
    });

    let actor = world
        .create_actor(ActorModel::TargetCivilian, Vec3::new(1.0, 2.0, 3.0))
        .await
        .unwrap();

    assert_eq!(world.frame(), 4, "creation should span the latency frames");
    assert!(world.actor_exists(actor));
    assert_eq!(world.position(actor).unwrap(), Vec3::new(1.0, 2.0, 3.0));
}

#[tokio::test]
async fn test_stalled_creation_times_out() {
    let mut world = SimWorld::new(SimConfig {
        creation_timeout_frames: 10,
        ..Default::default()
    });
    world.stall_creations(true);

    let err = world
        .create_actor(ActorModel::GuardAgent, Vec3::ZERO)
        .await
        .unwrap_err();

    assert_eq!(
        err,
        WorldError::CreationTimedOut {
            model: ActorModel::GuardAgent,
            frames: 10
        }
    );
    assert!(world.actors_with_model(ActorModel::GuardAgent).is_empty());
}

#[tokio::test]
async fn test_injected_creation_failure() {
    let mut world = SimWorld::default();
    world.fail_creation_after(2);

    assert!(world.create_actor(ActorModel::GuardAgent, Vec3::ZERO).await.is_ok());
    assert!(world.create_actor(ActorModel::GuardAgent, Vec3::ZERO).await.is_ok());
    let err = world
        .create_actor(ActorModel::GuardAgent, Vec3::ZERO)
        .await
        .unwrap_err();
    assert!(matches!(err, WorldError::CreationFailed { .. }));

    // Failure is one-shot.
    assert!(world.create_actor(ActorModel::GuardAgent, Vec3::ZERO).await.is_ok());
}

/// Start a creation and drop it after the world has run one frame for it.
async fn abandon_creation(world: &mut SimWorld) {
    tokio::select! {
        biased;
        _ = tokio::task::yield_now() => {}
        _ = world.create_actor(ActorModel::GuardAgent, Vec3::ZERO) => {
            panic!("creation should still be waiting")
        }
    }
}

#[tokio::test]
async fn test_abandoned_creation_never_materializes() {
    let mut world = SimWorld::new(SimConfig {
        creation_latency_frames: 4,
        ..Default::default()
    });

    abandon_creation(&mut world).await;
    assert_eq!(world.frame(), 1);

    for _ in 0..10 {
        world.advance_frame();
    }
    assert!(world.actors_with_model(ActorModel::GuardAgent).is_empty());
    assert_eq!(world.pending_creations(), 0);
}

#[tokio::test]
async fn test_abandoned_creation_removed_after_materializing() {
    let mut world = SimWorld::new(SimConfig {
        creation_latency_frames: 1,
        ..Default::default()
    });

    abandon_creation(&mut world).await;
    // Spawned on the frame the waiter went away, but never handed out.
    assert_eq!(world.actors_with_model(ActorModel::GuardAgent).len(), 1);

    world.advance_frame();
    assert!(world.actors_with_model(ActorModel::GuardAgent).is_empty());
    assert_eq!(world.pending_creations(), 0);
}

// ---- Actors ----

#[test]
fn test_deleted_actor_is_unknown() {
    let mut world = SimWorld::default();
    let actor = world.spawn_actor(ActorModel::TargetCivilian, Vec3::ZERO);

    world.delete_actor(actor);

    assert!(!world.actor_exists(actor));
    assert_eq!(world.is_dead(actor), Err(WorldError::UnknownActor(actor)));
}

#[test]
fn test_kill_records_killer() {
    let mut world = SimWorld::default();
    let victim = world.spawn_actor(ActorModel::TargetCivilian, Vec3::ZERO);
    let player = world.player_actor();

    assert!(!world.is_dead(victim).unwrap());
    world.kill_actor(victim, Some(player));
    assert!(world.is_dead(victim).unwrap());
    assert_eq!(world.killer_of(victim), Some(player));
}

#[test]
fn test_offset_position_follows_heading() {
    let mut world = SimWorld::default();
    let actor = world.spawn_actor(ActorModel::TargetCivilian, Vec3::new(10.0, 10.0, 0.0));

    let ahead = world.offset_position(actor, Vec3::new(0.0, 2.0, 0.0)).unwrap();
    assert!((ahead - Vec3::new(10.0, 12.0, 0.0)).length() < 1e-5);

    world.set_heading(actor, std::f32::consts::FRAC_PI_2);
    let turned = world.offset_position(actor, Vec3::new(0.0, 2.0, 0.0)).unwrap();
    assert!(
        (turned - Vec3::new(8.0, 10.0, 0.0)).length() < 1e-5,
        "quarter turn should swing +y to -x, got {turned}"
    );
}

#[test]
fn test_weapon_and_armor() {
    let mut world = SimWorld::default();
    let guard = world.spawn_actor(ActorModel::GuardAgent, Vec3::ZERO);

    world.set_armor(guard, 300).unwrap();
    world
        .give_weapon(guard, WeaponKind::CarbineRifle, u32::MAX, true)
        .unwrap();

    assert_eq!(world.armor(guard), Some(300));
    let loadout = world.loadout(guard).unwrap();
    assert_eq!(loadout.equipped, Some(WeaponKind::CarbineRifle));
    assert_eq!(loadout.weapons, vec![(WeaponKind::CarbineRifle, u32::MAX)]);
}

#[test]
fn test_relationship_groups_are_named_once() {
    let mut world = SimWorld::default();
    let a = world.add_relationship_group("_ASSASSIN_TARGETS");
    let b = world.add_relationship_group("_ASSASSIN_TARGETS");
    assert_eq!(a, b);
    assert_eq!(world.group_count(), 3);

    let cops = world.faction_group(Faction::Police);
    world.set_relationship(a, cops, Relationship::Respect, true);
    assert_eq!(world.relationship(a, cops), Relationship::Respect);
    assert_eq!(world.relationship(cops, a), Relationship::Respect);
    assert_eq!(world.group_name(cops), Some("COP"));
}

#[test]
fn test_squad_membership() {
    let mut world = SimWorld::default();
    let leader = world.spawn_actor(ActorModel::TargetCivilian, Vec3::ZERO);
    let follower = world.spawn_actor(ActorModel::GuardAgent, Vec3::ZERO);

    let squad = world.create_squad();
    world.add_to_squad(squad, leader, true).unwrap();
    world.add_to_squad(squad, follower, false).unwrap();
    world.configure_squad(squad, FormationType::Default, 1.0);

    let view = world.squad(squad).unwrap();
    assert_eq!(view.leader, Some(leader));
    assert_eq!(view.followers, vec![follower]);
    assert_eq!(world.membership(follower).unwrap().squad, Some(squad));
}

#[test]
fn test_released_actor_is_reaped_after_linger() {
    let mut world = SimWorld::new(SimConfig {
        release_after_frames: 3,
        ..Default::default()
    });
    let actor = world.spawn_actor(ActorModel::GuardAgent, Vec3::ZERO);
    world.mark_no_longer_needed(actor);
    assert!(world.is_no_longer_needed(actor));

    world.advance_frame();
    world.advance_frame();
    assert!(world.actor_exists(actor), "released actor lingers for a while");

    world.advance_frame();
    assert!(!world.actor_exists(actor));
}

#[test]
fn test_blips_attach_and_remove() {
    let mut world = SimWorld::default();
    let actor = world.spawn_actor(ActorModel::TargetCivilian, Vec3::ZERO);
    let blip = world
        .attach_blip(actor, BlipStyle::enemy("Target", 0.8))
        .unwrap();
    assert_eq!(world.blip_count(), 1);
    assert_eq!(world.blip_on(actor).unwrap().color, BlipColor::Red);

    world.remove_blip(blip);
    assert_eq!(world.blip_count(), 0);
}

// ---- Player & HUD ----

#[test]
fn test_player_death_and_wanted_level() {
    let mut world = SimWorld::default();
    assert!(!world.is_player_dead());
    world.set_wanted_level(9);
    assert_eq!(world.wanted_level(), 5, "wanted level is capped at five stars");

    world.kill_player();
    assert!(world.is_player_dead());
}

#[test]
fn test_hud_log_records_calls() {
    let mut world = SimWorld::default();
    world.flash_minimap();
    world.display_help(HudMessage::AssassinationInfo);
    world.show_notification(HudMessage::TargetKilled);
    world.show_notification(HudMessage::TargetKilled);

    assert_eq!(world.minimap_flashes(), 1);
    assert_eq!(world.count_hud(HudMessage::TargetKilled), 2);
    assert_eq!(world.count_hud(HudMessage::AssassinationInfo), 1);
    assert_eq!(world.hud_log().len(), 4);
}
