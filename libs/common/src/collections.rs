//! Named collections of the road safety document store

/// A named grouping of documents of one resource kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Collection {
    /// Collection name, also used as the backing table name
    pub name: &'static str,
    /// Top-level document fields whose values must be unique in the collection
    pub unique_keys: &'static [&'static str],
}

/// Registered users; usernames and emails are unique
pub const USERS: Collection = Collection {
    name: "users",
    unique_keys: &["username", "email"],
};

/// Pothole reports
pub const POTHOLES: Collection = Collection {
    name: "potholes",
    unique_keys: &[],
};

/// Traffic-light issue reports
pub const TRAFFIC_LIGHTS: Collection = Collection {
    name: "traffic_lights",
    unique_keys: &[],
};

/// Every collection known to the application
pub const ALL: [Collection; 3] = [USERS, POTHOLES, TRAFFIC_LIGHTS];

impl Collection {
    /// Name of the unique index backing `key`
    pub fn unique_index_name(&self, key: &str) -> String {
        format!("{}_{}_key", self.name, key)
    }

    /// Resolve a unique index name back to the key it guards
    pub fn key_for_index(&self, index: &str) -> Option<&'static str> {
        self.unique_keys
            .iter()
            .copied()
            .find(|key| self.unique_index_name(key) == index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unique_index_names_round_trip() {
        assert_eq!(USERS.unique_index_name("email"), "users_email_key");
        assert_eq!(USERS.key_for_index("users_username_key"), Some("username"));
        assert_eq!(USERS.key_for_index("users_fullname_key"), None);
        assert_eq!(POTHOLES.key_for_index("potholes_id_key"), None);
    }

    #[test]
    fn test_collection_names_are_table_safe() {
        for collection in ALL {
            assert!(
                collection
                    .name
                    .chars()
                    .all(|c| c.is_ascii_lowercase() || c == '_')
            );
        }
    }
}
