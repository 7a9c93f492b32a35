//! Domain-focused tests for client values.

use crate::client::domain::{Client, ClientDomainError};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

#[fixture]
fn clock() -> DefaultClock {
    DefaultClock
}

#[rstest]
fn new_client_trims_name(clock: DefaultClock) {
    let client = Client::new("  Acme Ltd  ", None, None, None, &clock).expect("valid client");
    assert_eq!(client.name(), "Acme Ltd");
}

#[rstest]
fn new_client_rejects_blank_name(clock: DefaultClock) {
    let result = Client::new("   ", None, None, None, &clock);
    assert_eq!(result, Err(ClientDomainError::EmptyName));
}

#[rstest]
fn rename_rejects_blank_name(clock: DefaultClock) {
    let mut client = Client::new("Acme", None, None, None, &clock).expect("valid client");
    assert_eq!(client.rename(""), Err(ClientDomainError::EmptyName));
    assert_eq!(client.name(), "Acme");
}

#[rstest]
#[case("acme", true)]
#[case("ACME", true)]
#[case("widgets", true)]
#[case("gadgets", false)]
fn matches_query_searches_name_and_company(
    #[case] query: &str,
    #[case] expected: bool,
    clock: DefaultClock,
) {
    let client = Client::new("Acme Ltd", Some("Widgets Inc".to_owned()), None, None, &clock)
        .expect("valid client");
    assert_eq!(client.matches_query(query), expected);
}
