use serde::Deserialize;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// One decoded benchmark-run document as written by the llvm-libc
/// micro-benchmark harness. Fields the harness adds beyond these are
/// ignored; missing fields default (the harness has grown fields over time).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "PascalCase", default)]
pub struct Study {
    pub study_name: String,
    pub configuration: StudyConfig,
    pub measurements: Vec<f64>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "PascalCase", default)]
pub struct StudyConfig {
    pub function: String,
    pub is_sweep_mode: bool,
    pub num_trials: i64,
    pub size_distribution_name: String,
}

/// Trailing component of a qualified function identifier.
/// "libc::memmove" and "LIBC.memcpy" both reduce to their last segment;
/// an unqualified name passes through unchanged.
pub fn short_name(function: &str) -> &str {
    match function.rfind(|c| c == '.' || c == ':') {
        Some(pos) => &function[pos + 1..],
        None => function,
    }
}

// Distribution label for non-sweep studies: the distribution name minus the
// short function name prefix (harness convention: "memmove uniform 384 to 4096"),
// with whitespace runs collapsed to single underscores.
fn distribution_label(name: &str, short: &str) -> String {
    let stripped = name.strip_prefix(short).unwrap_or(name);
    stripped.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Per-measurement type label. Non-sweep studies carry one fixed
/// distribution label; sweep studies label each group of `num_trials`
/// consecutive measurements with an increasing decimal size index.
#[derive(Debug)]
pub enum TypeLabeler {
    Fixed(String),
    Sweep { num_trials: usize, size: u64 },
}

impl TypeLabeler {
    pub fn new(cfg: &StudyConfig) -> Result<TypeLabeler> {
        if cfg.is_sweep_mode {
            if cfg.num_trials <= 0 {
                Err(format!(
                    "sweep mode requires a positive NumTrials, got {}",
                    cfg.num_trials
                ))?;
            }
            Ok(TypeLabeler::Sweep { num_trials: cfg.num_trials as usize, size: 0 })
        } else {
            Ok(TypeLabeler::Fixed(distribution_label(
                &cfg.size_distribution_name,
                short_name(&cfg.function),
            )))
        }
    }

    /// Label for measurement index `idx`. Must be called in measurement
    /// order, from 0, since the sweep counter advances at group boundaries.
    pub fn label(&mut self, idx: usize) -> String {
        match self {
            TypeLabeler::Fixed(label) => label.clone(),
            TypeLabeler::Sweep { num_trials, size } => {
                if idx % *num_trials == 0 {
                    *size += 1;
                }
                size.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sweep_cfg(num_trials: i64) -> StudyConfig {
        StudyConfig {
            function: "libc::memcpy".to_string(),
            is_sweep_mode: true,
            num_trials,
            size_distribution_name: String::new(),
        }
    }

    #[test]
    fn short_name_strips_last_segment() {
        assert_eq!(short_name("libc::memmove"), "memmove");
        assert_eq!(short_name("LIBC.memcpy"), "memcpy");
        assert_eq!(short_name("a.b.c"), "c");
        assert_eq!(short_name("memset"), "memset");
        assert_eq!(short_name(""), "");
    }

    #[test]
    fn distribution_label_strips_prefix_and_spaces() {
        assert_eq!(distribution_label("memmove uniform", "memmove"), "uniform");
        assert_eq!(
            distribution_label("memmove uniform 384 to 4096 bytes", "memmove"),
            "uniform_384_to_4096_bytes"
        );
        // no prefix match: name kept whole
        assert_eq!(distribution_label("google A", "memmove"), "google_A");
        // runs of whitespace collapse to one underscore
        assert_eq!(distribution_label("memmove  uniform   mix", "memmove"), "uniform_mix");
        assert_eq!(distribution_label("   ", "memmove"), "");
        assert_eq!(distribution_label("", ""), "");
    }

    #[test]
    fn fixed_label_constant_across_study() {
        let cfg = StudyConfig {
            function: "libc::memmove".to_string(),
            is_sweep_mode: false,
            num_trials: 0,
            size_distribution_name: "memmove uniform".to_string(),
        };
        let mut labeler = TypeLabeler::new(&cfg).unwrap();
        for i in 0..5 {
            assert_eq!(labeler.label(i), "uniform");
        }
    }

    #[test]
    fn sweep_labels_advance_per_trial_group() {
        let mut labeler = TypeLabeler::new(&sweep_cfg(2)).unwrap();
        let labels: Vec<String> = (0..5).map(|i| labeler.label(i)).collect();
        assert_eq!(labels, vec!["1", "1", "2", "2", "3"]);
    }

    #[test]
    fn sweep_single_trial_counts_every_measurement() {
        let mut labeler = TypeLabeler::new(&sweep_cfg(1)).unwrap();
        let labels: Vec<String> = (0..4).map(|i| labeler.label(i)).collect();
        assert_eq!(labels, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn sweep_rejects_non_positive_num_trials() {
        assert!(TypeLabeler::new(&sweep_cfg(0)).is_err());
        assert!(TypeLabeler::new(&sweep_cfg(-3)).is_err());
    }

    #[test]
    fn non_sweep_ignores_num_trials() {
        let cfg = StudyConfig {
            function: "memset".to_string(),
            is_sweep_mode: false,
            num_trials: 0,
            size_distribution_name: "memset uniform".to_string(),
        };
        assert!(TypeLabeler::new(&cfg).is_ok());
    }

    #[test]
    fn study_decodes_harness_json() {
        let doc = r#"{
            "StudyName": "baseline",
            "Runtime": 12.5,
            "Configuration": {
                "Function": "libc::memmove",
                "IsSweepMode": false,
                "NumTrials": 10,
                "SizeDistributionName": "memmove uniform 384 to 4096",
                "NumSamples": 50
            },
            "Measurements": [3.91e-9, 3.885e-9]
        }"#;
        let study: Study = serde_json::from_str(doc).unwrap();
        assert_eq!(study.study_name, "baseline");
        assert_eq!(study.configuration.function, "libc::memmove");
        assert_eq!(study.configuration.num_trials, 10);
        assert_eq!(study.measurements.len(), 2);
    }

    #[test]
    fn study_defaults_missing_fields() {
        let study: Study = serde_json::from_str(r#"{"StudyName": "x"}"#).unwrap();
        assert_eq!(study.study_name, "x");
        assert!(study.measurements.is_empty());
        assert!(!study.configuration.is_sweep_mode);
    }
}
