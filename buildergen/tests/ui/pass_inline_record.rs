use buildergen::record_builder;

#[record_builder(inline)]
pub struct Account {
    id: u64,
    email: String,
    active: bool,
}

fn main() {
    let account = AccountBuilder::new()
        .set_id(7)
        .set_email("a@example.com".to_string())
        .set_active(true)
        .build();
    assert_eq!(account.id, 7);
    assert_eq!(account.email, "a@example.com");
    assert!(account.active);
}
