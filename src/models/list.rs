use serde::{Deserialize, Serialize};

/// A to-do list. Lists carry no data of their own beyond their identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct List {
    pub id: i64,
}

impl List {
    /// Stable location of the list page, used as the redirect target after a POST
    pub fn location(&self) -> String {
        list_location(self.id)
    }
}

pub fn list_location(list_id: i64) -> String {
    format!("/lists/{}/", list_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_is_built_from_the_id() {
        let list = List { id: 42 };
        assert_eq!(list.location(), "/lists/42/");
        assert_eq!(list_location(1), "/lists/1/");
    }
}
