#[cfg(test)]
mod tests {
    use crate::commands::OperatorCommand;
    use crate::enums::*;
    use crate::error::HeliosError;
    use crate::state::DashboardSnapshot;
    use crate::types::{NotificationPreferences, PreferencesPatch, SimTime};

    #[test]
    fn test_command_uses_type_tag() {
        let cmd = OperatorCommand::RunSimulation {
            scenario: IncidentScenarioId::PartialMigration,
        };
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json["type"], "RunSimulation");
        assert_eq!(json["scenario"], "SIM-002");

        let parsed: OperatorCommand =
            serde_json::from_str(r#"{"type":"SelectStrategy","strategy":"RotateCredentials"}"#)
                .unwrap();
        assert_eq!(
            parsed,
            OperatorCommand::SelectStrategy {
                strategy: StrategyId::RotateCredentials
            }
        );
    }

    #[test]
    fn test_unit_command_parses() {
        let parsed: OperatorCommand = serde_json::from_str(r#"{"type":"TogglePause"}"#).unwrap();
        assert_eq!(parsed, OperatorCommand::TogglePause);
    }

    #[test]
    fn test_preferences_use_camel_case_keys() {
        let json = serde_json::to_value(NotificationPreferences::default()).unwrap();
        assert_eq!(json["soundEnabled"], true);
        assert_eq!(json["pollingInterval"], 30);
        assert_eq!(json["critical"], true);
        assert!(json.get("sound_enabled").is_none());
    }

    #[test]
    fn test_preferences_patch_merges_only_present_fields() {
        let patch: PreferencesPatch =
            serde_json::from_str(r#"{"info":false,"pollingInterval":10}"#).unwrap();
        let mut prefs = NotificationPreferences::default();
        prefs.apply(&patch);

        assert!(!prefs.info);
        assert_eq!(prefs.polling_interval, 10);
        assert!(prefs.critical);
        assert!(prefs.warning);
        assert!(prefs.success);
        assert!(prefs.sound_enabled);
    }

    #[test]
    fn test_preferences_allow_by_kind() {
        let prefs = NotificationPreferences {
            warning: false,
            ..Default::default()
        };
        assert!(prefs.allows(NotificationKind::Critical));
        assert!(!prefs.allows(NotificationKind::Warning));
    }

    #[test]
    fn test_notification_kind_is_lowercase() {
        let json = serde_json::to_string(&NotificationKind::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }

    #[test]
    fn test_incident_scenario_codes() {
        for id in IncidentScenarioId::ALL {
            assert_eq!(IncidentScenarioId::parse(id.code()), Some(id));
            let json = serde_json::to_string(&id).unwrap();
            assert_eq!(json, format!("\"{}\"", id.code()));
        }
        assert_eq!(
            IncidentScenarioId::parse(" sim-003 "),
            Some(IncidentScenarioId::MonitorAndWait)
        );
        assert_eq!(IncidentScenarioId::parse("SIM-999"), None);
    }

    #[test]
    fn test_strategy_keys_are_unique() {
        let mut keys: Vec<_> = StrategyId::ALL.iter().map(|s| s.key()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), StrategyId::ALL.len());
        assert_eq!(StrategyId::parse("FAILOVER"), Some(StrategyId::FailoverToSecondaryRegion));
    }

    #[test]
    fn test_role_names() {
        assert_eq!(UserRole::RccHead.display_name(), "Resilient Command Centre Head");
        assert_eq!(UserRole::default(), UserRole::Analyst);
        let json = serde_json::to_string(&UserRole::IrcLeader).unwrap();
        assert_eq!(json, "\"irc_leader\"");
    }

    #[test]
    fn test_sim_time_advance() {
        let mut t = SimTime::default();
        t.advance(1_500);
        t.advance(500);
        assert_eq!(t.now_ms, 2_000);
        assert!((t.elapsed_secs() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_error_display() {
        let err = HeliosError::Forbidden {
            role: UserRole::Analyst,
        };
        assert_eq!(
            err.to_string(),
            "Integrated Operations Analyst is not allowed to command incidents"
        );
        assert_eq!(
            HeliosError::PlayerBusy.to_string(),
            "a scenario is already running"
        );
    }

    #[test]
    fn test_default_snapshot_serializes() {
        let snap = DashboardSnapshot::default();
        let json = serde_json::to_string(&snap).unwrap();
        let back: DashboardSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.time, snap.time);
        assert_eq!(back.player.phase, PlayerPhase::Idle);
    }
}
