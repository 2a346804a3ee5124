use core::fmt;
use std::fmt::Display;

pub mod state;

/// Identifier of a candidate server, usually its address.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct ServerId(String);

impl ServerId {
    pub fn new<S: Into<String>>(id: S) -> ServerId {
        ServerId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ServerId {
    fn from(id: &str) -> Self {
        ServerId::new(id)
    }
}

impl From<String> for ServerId {
    fn from(id: String) -> Self {
        ServerId(id)
    }
}

impl Display for ServerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Primary-backup assignment in effect. Committed views are never mutated: a view change
/// replaces the whole value with a view of a greater number.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Default, Display)]
#[display(fmt = "View {} (primary: {:?}, backup: {:?})", view_number, primary, backup)]
pub struct View {
    /// Sequence number of the view. Zero is the bootstrap view with no roles assigned.
    pub view_number: u64,

    /// Server acting as primary. Empty until the first view is committed.
    pub primary: Option<ServerId>,

    /// Server acting as backup.
    pub backup: Option<ServerId>,
}

/// Role of a server in a particular view.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Role {
    Primary,
    Backup,
    Idle,
}

impl View {
    /// The bootstrap view: number 0, no primary, no backup.
    pub fn initial() -> View {
        View::default()
    }

    pub fn role_of(&self, server_id: &ServerId) -> Role {
        if self.primary.as_ref() == Some(server_id) {
            Role::Primary
        } else if self.backup.as_ref() == Some(server_id) {
            Role::Backup
        } else {
            Role::Idle
        }
    }

    /// Returns true for the primary or the backup of this view.
    pub fn holds_role(&self, server_id: &ServerId) -> bool {
        self.role_of(server_id) != Role::Idle
    }
}

/// Next view proposed by the transition engine, awaiting the primary acknowledgment.
/// Names the complete target view: an empty slot means the role is vacant in the next view.
#[derive(Clone, Debug, Eq, PartialEq, Display)]
#[display(fmt = "Pending view {} (primary: {:?}, backup: {:?})", view_number, primary, backup)]
pub struct PendingAssignment {
    pub view_number: u64,
    pub primary: Option<ServerId>,
    pub backup: Option<ServerId>,
}

impl PendingAssignment {
    pub fn role_of(&self, server_id: &ServerId) -> Role {
        if self.primary.as_ref() == Some(server_id) {
            Role::Primary
        } else if self.backup.as_ref() == Some(server_id) {
            Role::Backup
        } else {
            Role::Idle
        }
    }

    /// Servers named by the proposal.
    pub fn servers(&self) -> impl Iterator<Item = &ServerId> {
        self.primary.iter().chain(self.backup.iter())
    }

    fn into_view(self) -> View {
        View {
            view_number: self.view_number,
            primary: self.primary,
            backup: self.backup,
        }
    }
}
