/// Primary key of every table (`SERIAL` in Postgres).
pub type Id = i32;

/// The closed set of tables exposed by the service.
///
/// Table and path names are compile-time constants; nothing in the crate
/// builds an `Entity` from request input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Entity {
    Houses,
    News,
    Contracts,
    Protocols,
    Documents,
    Reports,
}

impl Entity {
    pub const ALL: [Entity; 6] = [
        Entity::Houses,
        Entity::News,
        Entity::Contracts,
        Entity::Protocols,
        Entity::Documents,
        Entity::Reports,
    ];

    pub fn table(self) -> &'static str {
        match self {
            Entity::Houses => "houses",
            Entity::News => "news",
            Entity::Contracts => "contracts",
            Entity::Protocols => "protocols",
            Entity::Documents => "documents",
            Entity::Reports => "reports",
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Entity::Houses => "/houses",
            Entity::News => "/news",
            Entity::Contracts => "/contracts",
            Entity::Protocols => "/protocols",
            Entity::Documents => "/documents",
            Entity::Reports => "/reports",
        }
    }

    /// Human readable summary, used in the API description.
    pub fn summary(self) -> &'static str {
        match self {
            Entity::Houses => "List houses, newest first",
            Entity::News => "List news items, newest first",
            Entity::Contracts => "List management contracts",
            Entity::Protocols => "List meeting protocols",
            Entity::Documents => "List house documents",
            Entity::Reports => "List report entries",
        }
    }

    /// Whether the listing is contractually sorted by date, descending.
    pub fn newest_first(self) -> bool {
        matches!(self, Entity::Houses | Entity::News)
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}
