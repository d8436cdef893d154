use crate::test_helpers::factories::MainSettingsFactory;

#[test]
fn main_settings_factory_creates_expected_defaults() {
    let settings = MainSettingsFactory::new().create();

    assert!(!settings.general.s3_usage);
    assert_eq!(settings.train_relevance.output_model_name, "relevance_roberta");
    assert_eq!(settings.train_kpi.output_model_name, "kpi_roberta");
    assert_eq!(settings.logging.log_dir, "logs");
}

#[test]
fn main_settings_factory_chain() {
    let settings = MainSettingsFactory::new()
        .with_s3_usage(true)
        .with_relevance_model("rel_2")
        .with_kpi_model("kpi_2")
        .create();

    assert!(settings.general.s3_usage);
    assert_eq!(settings.train_relevance.output_model_name, "rel_2");
    assert_eq!(settings.train_kpi.output_model_name, "kpi_2");
}
