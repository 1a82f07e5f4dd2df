pub use super::log_event::Entity as LogEvent;
pub use super::reaction_role::Entity as ReactionRole;
pub use super::sub_role::Entity as SubRole;
pub use super::welcome_gate::Entity as WelcomeGate;
