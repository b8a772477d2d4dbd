//! Operator role, verification and IRC leader mode.

use helios_core::enums::UserRole;
use helios_core::state::RoleView;
use helios_core::{HeliosError, HeliosResult};

pub const DEFAULT_LEADER_NAME: &str = "Commander";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleState {
    role: UserRole,
    verified: bool,
    /// Set while in IRC leader mode, empty otherwise.
    leader_name: Option<String>,
}

impl RoleState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn role(&self) -> UserRole {
        self.role
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn irc_leader_mode(&self) -> bool {
        self.leader_name.is_some()
    }

    /// Switch role. The new role starts unverified; leaving `irc_leader` ends leader mode.
    pub fn switch(&mut self, role: UserRole) {
        self.role = role;
        self.verified = false;
        self.leader_name = match role {
            UserRole::IrcLeader => Some(
                self.leader_name
                    .take()
                    .unwrap_or_else(|| DEFAULT_LEADER_NAME.to_string()),
            ),
            _ => None,
        };
        tracing::info!(role = role.display_name(), "role switched");
    }

    pub fn verify(&mut self) {
        self.verified = true;
    }

    /// Successful IRC authentication: leader role, verified, leader mode on.
    pub fn authenticate_irc_leader(&mut self, name: Option<String>) {
        let name = name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LEADER_NAME.to_string());
        self.role = UserRole::IrcLeader;
        self.verified = true;
        tracing::info!(leader = %name, "IRC leader authenticated");
        self.leader_name = Some(name);
    }

    pub fn can_command_incidents(&self) -> bool {
        self.irc_leader_mode() || self.role == UserRole::RccHead
    }

    /// Gate for incident commands.
    pub fn require_incident_authority(&self) -> HeliosResult<()> {
        if self.can_command_incidents() {
            Ok(())
        } else {
            Err(HeliosError::Forbidden { role: self.role })
        }
    }

    pub fn view(&self) -> RoleView {
        RoleView {
            role: self.role,
            role_name: self.role.display_name().to_string(),
            verified: self.verified,
            irc_leader_mode: self.irc_leader_mode(),
            leader_name: self.leader_name.clone().unwrap_or_default(),
            can_command_incidents: self.can_command_incidents(),
        }
    }
}
