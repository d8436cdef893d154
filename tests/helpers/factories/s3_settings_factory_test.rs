use crate::test_helpers::factories::{S3SettingsFactory, bucket_with_env_prefix};

#[test]
fn s3_settings_factory_creates_expected_defaults() {
    let settings = S3SettingsFactory::new().create();

    assert_eq!(settings.prefix, "corporate_data_extraction_projects");
    assert_eq!(settings.main_bucket.s3_endpoint, "LANDING_AWS_ENDPOINT");
    assert_eq!(settings.main_bucket.s3_bucket_name, "LANDING_AWS_BUCKET_NAME");
    assert_eq!(settings.interim_bucket.s3_access_key, "INTERIM_AWS_ACCESS_KEY");
}

#[test]
fn s3_settings_factory_chain() {
    let settings = S3SettingsFactory::new()
        .with_prefix("projects")
        .with_main_bucket(bucket_with_env_prefix("CUSTOM"))
        .with_interim_bucket(bucket_with_env_prefix("SCRATCH"))
        .create();

    assert_eq!(settings.prefix, "projects");
    assert_eq!(settings.main_bucket.s3_secret_key, "CUSTOM_AWS_SECRET_KEY");
    assert_eq!(settings.interim_bucket.s3_endpoint, "SCRATCH_AWS_ENDPOINT");
}
