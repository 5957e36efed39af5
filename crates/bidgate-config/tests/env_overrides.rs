use figment::Jail;
use bidgate_config::BidgateConfig;

#[test]
fn env_vars_fill_nested_sections() {
    Jail::expect_with(|jail| {
        jail.set_env("BIDGATE_RECORD_STORE__BASE_URL", "https://store.test/api/1.1");
        jail.set_env("BIDGATE_RECORD_STORE__API_TOKEN", "rs_token");
        jail.set_env("BIDGATE_BILLING__TRIAL_DAYS", "30");
        jail.set_env("BIDGATE_SERVER__PORT", "8088");

        let config = BidgateConfig::load(None).expect("config loads");
        assert_eq!(config.record_store.base_url, "https://store.test/api/1.1");
        assert_eq!(config.record_store.api_token, "rs_token");
        assert_eq!(config.billing.trial_days, 30);
        assert_eq!(config.server.port, 8088);
        assert!(config.validate().is_ok());
        Ok(())
    });
}

#[test]
fn env_beats_local_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "bidgate.toml",
            r#"
            [billing]
            secret_key = "sk_from_file"
            price_id = "price_file"
            "#,
        )?;
        jail.set_env("BIDGATE_BILLING__SECRET_KEY", "sk_from_env");

        let config = BidgateConfig::load(None).expect("config loads");
        assert_eq!(config.billing.secret_key, "sk_from_env");
        assert_eq!(config.billing.price_id, "price_file");
        Ok(())
    });
}

#[test]
fn malformed_value_is_an_error() {
    Jail::expect_with(|jail| {
        jail.set_env("BIDGATE_SERVER__PORT", "not-a-port");
        assert!(BidgateConfig::load(None).is_err());
        Ok(())
    });
}
