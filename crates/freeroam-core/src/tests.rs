#[cfg(test)]
mod tests {
    use std::time::Duration;

    use glam::Vec3;

    use crate::commands::MissionCommand;
    use crate::config::MissionConfig;
    use crate::constants::*;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::{HudMessage, MissionSignal};
    use crate::state::{MissionSnapshot, SlotView};
    use crate::types::{ActorId, BlipStyle};
    use crate::world::SignalBus;

    /// Signals are tagged unions so a host bus can route them by name.
    #[test]
    fn test_mission_signal_tagged_json() {
        let json = serde_json::to_string(&MissionSignal::MissionStop { success: true }).unwrap();
        assert_eq!(json, r#"{"type":"MissionStop","success":true}"#);

        let back: MissionSignal = serde_json::from_str(r#"{"type":"MoneyAdd","amount":5000}"#).unwrap();
        assert_eq!(back, MissionSignal::MoneyAdd { amount: 5000 });
    }

    #[test]
    fn test_mission_command_serde() {
        let commands = vec![
            MissionCommand::Start,
            MissionCommand::Cancel,
            MissionCommand::Stop { success: false },
        ];
        for cmd in commands {
            let json = serde_json::to_string(&cmd).unwrap();
            let back: MissionCommand = serde_json::from_str(&json).unwrap();
            assert_eq!(cmd, back);
        }
    }

    #[test]
    fn test_snapshot_serde() {
        let snapshot = MissionSnapshot {
            phase: MissionPhase::Stopped(MissionOutcome::Failure),
            slots: vec![SlotView {
                index: 2,
                status: SlotStatus::Ready,
                target: Some(ActorId(7)),
                guard_count: 3,
            }],
            living_targets: 1,
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: MissionSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn test_vec_signal_bus_buffers_in_order() {
        let mut bus: Vec<MissionSignal> = Vec::new();
        bus.emit(MissionSignal::MoneyAdd { amount: 1 });
        bus.emit(MissionSignal::XpAdd { amount: 2 });
        assert_eq!(
            bus,
            vec![
                MissionSignal::MoneyAdd { amount: 1 },
                MissionSignal::XpAdd { amount: 2 },
            ]
        );
    }

    #[test]
    fn test_enemy_blip_style() {
        let style = BlipStyle::enemy(TARGET_BLIP_NAME, TARGET_BLIP_SCALE);
        assert_eq!(style.sprite, BlipSprite::Enemy);
        assert_eq!(style.color, BlipColor::Red);
        assert!((style.scale - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_outcome_from_success() {
        assert_eq!(MissionOutcome::from_success(true), MissionOutcome::Success);
        assert_eq!(MissionOutcome::from_success(false), MissionOutcome::Failure);
        assert!(!MissionOutcome::Failure.is_success());
    }

    // ---- Config ----

    #[test]
    fn test_default_config_matches_constants() {
        let config = MissionConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.target_spawns, TARGET_SPAWNS);
        assert_eq!(config.money_reward, 5000);
        assert_eq!(config.xp_reward, 30);
        assert_eq!(config.wanted_floor, 3);
        assert_eq!(config.start_subtitle_duration(), Duration::from_secs(15));
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config = MissionConfig::from_json_str(r#"{ "seed": 7, "guard_count_max": 2 }"#).unwrap();
        assert_eq!(config.seed, 7);
        assert_eq!(config.guard_count_max, 2);
        assert_eq!(config.guard_count_min, GUARD_COUNT_MIN);
        assert_eq!(config.target_spawns[0], Vec3::new(-829.0, -1219.0, 6.0));
    }

    #[test]
    fn test_config_parse_error_reports_path() {
        let err = MissionConfig::from_json_str(r#"{ "guard_armor": "lots" }"#).unwrap_err();
        match err {
            ConfigError::Parse { path, .. } => assert_eq!(path, "guard_armor"),
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_config_rejects_inverted_guard_range() {
        let err =
            MissionConfig::from_json_str(r#"{ "guard_count_min": 3, "guard_count_max": 1 }"#)
                .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_config_rejects_oversized_squads() {
        let config = MissionConfig {
            guard_count_max: 9,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

        let at_limit = MissionConfig {
            guard_count_min: 3,
            guard_count_max: 3,
            ..Default::default()
        };
        assert!(at_limit.validate().is_ok());
    }

    #[test]
    fn test_config_rejects_zero_guards() {
        let config = MissionConfig {
            guard_count_min: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_rejects_negative_spread() {
        let config = MissionConfig {
            guard_spread: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_missing_file() {
        let err = MissionConfig::from_path(std::path::Path::new("/nonexistent/mission.json"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_hud_message_is_plain_data() {
        let json = serde_json::to_string(&HudMessage::TargetKilled).unwrap();
        assert_eq!(json, r#""TargetKilled""#);
    }
}
