use serde::Serialize;

/// A parent or member contact read from the roster
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contact {
    first_name: String,
    last_name: String,
    email: String,
    display_name: String,
}

impl Contact {
    /// Create a contact; the display name is "{first} {last}"
    pub fn new(first_name: &str, last_name: &str, email: &str) -> Self {
        let first_name = first_name.trim().to_string();
        let last_name = last_name.trim().to_string();
        let display_name = format!("{} {}", first_name, last_name);

        Self {
            first_name,
            last_name,
            email: email.trim().to_string(),
            display_name,
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
