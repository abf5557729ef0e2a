/// Skip a test unless a live Vault is configured.
#[macro_export]
macro_rules! skip_without_vault {
    () => {
        if std::env::var("VAULT_HANDLER_TEST_VAULT_ADDR").is_err() {
            eprintln!("SKIPPED: VAULT_HANDLER_TEST_VAULT_ADDR not set");
            return;
        }
        if std::env::var("VAULT_HANDLER_TEST_VAULT_TOKEN").is_err() {
            eprintln!("SKIPPED: VAULT_HANDLER_TEST_VAULT_TOKEN not set");
            return;
        }
    };
}
