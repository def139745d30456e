// file: src/models/member.rs
// description: member record models shared by the pipeline and the stores
// reference: internal data structures

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MemberRole {
    Regular,
    Leadership,
    Ro,
    Green,
    Gold,
}

impl MemberRole {
    pub const ALL: [MemberRole; 5] = [
        MemberRole::Regular,
        MemberRole::Leadership,
        MemberRole::Ro,
        MemberRole::Green,
        MemberRole::Gold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Regular => "regular",
            MemberRole::Leadership => "leadership",
            MemberRole::Ro => "ro",
            MemberRole::Green => "green",
            MemberRole::Gold => "gold",
        }
    }

    /// Comma separated list used in defect messages.
    pub fn allowed_values() -> String {
        Self::ALL
            .iter()
            .map(MemberRole::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl FromStr for MemberRole {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|role| role.as_str() == value)
            .ok_or_else(|| format!("unknown member role: {}", value))
    }
}

impl fmt::Display for MemberRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Lifecycle status shared by members and chapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Active,
    Inactive,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "active",
            Status::Inactive => "inactive",
        }
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "active" => Ok(Status::Active),
            "inactive" => Ok(Status::Inactive),
            other => Err(format!("unknown status: {}", other)),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// A member ready to be committed to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub name: String,
    pub email: String,
    pub business_name: String,
    pub phone: String,
    pub chapter_name: String,
    pub member_role: MemberRole,
    pub membership_end_date: String,
    pub status: Status,
}

/// A member as persisted by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(flatten)]
    pub fields: NewMember,
    #[serde(default)]
    pub join_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_role_parsing_is_exact() {
        assert_eq!("gold".parse::<MemberRole>(), Ok(MemberRole::Gold));
        assert_eq!("ro".parse::<MemberRole>(), Ok(MemberRole::Ro));
        assert!("Gold".parse::<MemberRole>().is_err());
        assert!(" regular".parse::<MemberRole>().is_err());
    }

    #[test]
    fn test_allowed_roles_listing() {
        assert_eq!(
            MemberRole::allowed_values(),
            "regular, leadership, ro, green, gold"
        );
    }

    #[test]
    fn test_status_serde_lowercase() {
        let json = serde_json::to_string(&Status::Inactive).unwrap();
        assert_eq!(json, "\"inactive\"");
        assert!("Active".parse::<Status>().is_err());
    }

    #[test]
    fn test_display_honours_width() {
        assert_eq!(format!("{:<9}|", Status::Active), "active   |");
        assert_eq!(format!("{:>6}", MemberRole::Ro), "    ro");
        assert_eq!(Status::Inactive.to_string(), "inactive");
    }
}
