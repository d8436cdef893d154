use crate::shared::config::{
    GeneralSettings, LoggingSettings, MainSettings, TrainModelSettings,
};

pub struct MainSettingsFactory {
    s3_usage: bool,
    relevance_model: String,
    kpi_model: String,
}

impl MainSettingsFactory {
    pub fn new() -> Self {
        Self {
            s3_usage: false,
            relevance_model: "relevance_roberta".to_string(),
            kpi_model: "kpi_roberta".to_string(),
        }
    }

    pub fn with_s3_usage(mut self, s3_usage: bool) -> Self {
        self.s3_usage = s3_usage;
        self
    }

    pub fn with_relevance_model(mut self, name: &str) -> Self {
        self.relevance_model = name.to_string();
        self
    }

    pub fn with_kpi_model(mut self, name: &str) -> Self {
        self.kpi_model = name.to_string();
        self
    }

    pub fn create(self) -> MainSettings {
        MainSettings {
            general: GeneralSettings {
                s3_usage: self.s3_usage,
            },
            logging: LoggingSettings::default(),
            train_relevance: TrainModelSettings {
                output_model_name: self.relevance_model,
            },
            train_kpi: TrainModelSettings {
                output_model_name: self.kpi_model,
            },
        }
    }
}
