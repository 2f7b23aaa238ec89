use crm_types::domain::client::Client;
use crm_types::domain::entity::EntityId;

/// How `find_clients` selects clients.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClientQuery {
    /// Case-insensitive substring of the client name.
    ByNameSubstring(String),
    /// Case-insensitive match on the part of the email after `@`. A leading
    /// `@` in the query is ignored.
    ByEmailDomain(String),
    ById(EntityId),
}

impl ClientQuery {
    pub fn matches(&self, client: &Client) -> bool {
        match self {
            ClientQuery::ByNameSubstring(text) => client
                .name
                .to_lowercase()
                .contains(&text.to_lowercase()),
            ClientQuery::ByEmailDomain(domain) => client
                .email_domain()
                .eq_ignore_ascii_case(domain.trim_start_matches('@')),
            ClientQuery::ById(id) => client.id == *id,
        }
    }
}
