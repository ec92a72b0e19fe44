//! Dashboard View-Model
//!
//! The merged statistics object rendered by the admin dashboard, the pure
//! merge functions that build it, and the configured fallback values
//! substituted when an upstream fetch fails.

use serde::{Deserialize, Serialize};

/// Aggregate counts for registered user accounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub active: u64,
    #[serde(default)]
    pub admins: u64,
}

/// Aggregate counts for an application pipeline (vehicles, licenses, land).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicationStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub approved: u64,
    #[serde(default)]
    pub rejected: u64,
}

/// The four resource groups shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Users,
    Vehicles,
    Licenses,
    Land,
}

impl Resource {
    /// All groups, in display order.
    pub const ALL: [Resource; 4] = [
        Resource::Users,
        Resource::Vehicles,
        Resource::Licenses,
        Resource::Land,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Resource::Users => "users",
            Resource::Vehicles => "vehicles",
            Resource::Licenses => "licenses",
            Resource::Land => "land",
        }
    }
}

/// The merged dashboard view-model.
///
/// Holds one settled value per resource group. Rebuilt from scratch on every
/// refresh; there is no persistence between page views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub users: UserStats,
    pub vehicles: ApplicationStats,
    pub licenses: ApplicationStats,
    pub land: ApplicationStats,
}

/// A single group's settled value, ready to fold into the view-model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupUpdate {
    Users(UserStats),
    Vehicles(ApplicationStats),
    Licenses(ApplicationStats),
    Land(ApplicationStats),
}

impl DashboardStats {
    /// Pure merge: fold one settled group into the view-model.
    #[must_use]
    pub fn apply(mut self, update: GroupUpdate) -> Self {
        match update {
            GroupUpdate::Users(users) => self.users = users,
            GroupUpdate::Vehicles(vehicles) => self.vehicles = vehicles,
            GroupUpdate::Licenses(licenses) => self.licenses = licenses,
            GroupUpdate::Land(land) => self.land = land,
        }
        self
    }
}

/// Fixed per-resource values substituted when a fetch fails.
///
/// Externalized as configuration so deployments and test suites can override
/// them; the defaults match the placeholder values the dashboard has always
/// shown while an upstream service is down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackStats {
    #[serde(default = "default_users")]
    pub users: UserStats,
    #[serde(default = "default_vehicles")]
    pub vehicles: ApplicationStats,
    #[serde(default = "default_licenses")]
    pub licenses: ApplicationStats,
    #[serde(default = "default_land")]
    pub land: ApplicationStats,
}

fn default_users() -> UserStats {
    UserStats {
        total: 245,
        active: 198,
        admins: 8,
    }
}

fn default_vehicles() -> ApplicationStats {
    ApplicationStats {
        total: 156,
        pending: 23,
        approved: 112,
        rejected: 21,
    }
}

fn default_licenses() -> ApplicationStats {
    ApplicationStats {
        total: 342,
        pending: 45,
        approved: 287,
        rejected: 10,
    }
}

fn default_land() -> ApplicationStats {
    ApplicationStats {
        total: 45,
        pending: 12,
        approved: 28,
        rejected: 5,
    }
}

impl Default for FallbackStats {
    fn default() -> Self {
        Self {
            users: default_users(),
            vehicles: default_vehicles(),
            licenses: default_licenses(),
            land: default_land(),
        }
    }
}

impl FallbackStats {
    /// The known-good display served when aggregation itself fails.
    pub fn complete(&self) -> DashboardStats {
        DashboardStats {
            users: self.users,
            vehicles: self.vehicles,
            licenses: self.licenses,
            land: self.land,
        }
    }

    /// Fallback value for one group.
    pub fn update_for(&self, resource: Resource) -> GroupUpdate {
        match resource {
            Resource::Users => GroupUpdate::Users(self.users),
            Resource::Vehicles => GroupUpdate::Vehicles(self.vehicles),
            Resource::Licenses => GroupUpdate::Licenses(self.licenses),
            Resource::Land => GroupUpdate::Land(self.land),
        }
    }
}
