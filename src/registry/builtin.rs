//! Built-in components.
//!
//! Only descriptors live here: names, documentation and constructor
//! schemas. The numerics behind them are out of scope.

use super::catalog::Catalog;
use crate::models::{ComponentKind, ComponentSpec, KgexError, ParamSpec, Result};
use std::path::Path;
use tracing::info;

/// Environment variable naming a JSON file of extra model schemas.
pub const MODEL_SCHEMAS_ENV: &str = "KGEX_MODEL_SCHEMAS";

/// Parameters of the shared base-model constructor.
pub const BASE_MODEL_PARAMETERS: [&str; 6] = [
    "triples_factory",
    "criterion",
    "predict_with_sigmoid",
    "preferred_device",
    "random_seed",
    "regularizer",
];

/// Base constructor parameters every model exposes as flags.
fn base_flags() -> Vec<ParamSpec> {
    vec![
        ParamSpec::new("preferred_device", "Optional[str]").default_none(),
        ParamSpec::new("random_seed", "Optional[int]").default_none(),
    ]
}

fn model(name: &str, doc: &str, parameters: Vec<ParamSpec>) -> ComponentSpec {
    let mut all = parameters;
    all.extend(base_flags());
    ComponentSpec::class(name, doc).with_parameters(all)
}

fn embedding_dim(default: i64) -> ParamSpec {
    ParamSpec::new("embedding_dim", "int").default(default)
}

fn models() -> Vec<ComponentSpec> {
    vec![
        model(
            "ComplEx",
            "An implementation of ComplEx [trouillon2016]_.\n\nEmbeds entities and relations in complex space.",
            vec![
                embedding_dim(200),
                ParamSpec::new("neg_label", "int").default(-1),
                ParamSpec::new("regularization_factor", "float").default(0.01),
            ],
        ),
        model(
            "ConvKB",
            "An implementation of ConvKB from [nguyen2018]_.",
            vec![
                embedding_dim(200),
                ParamSpec::new("hidden_dropout_rate", "float").default(0.0),
                ParamSpec::new("num_filters", "int").default(400),
            ],
        )
        .with_uses(["regularization_weight"]),
        model(
            "DistMult",
            "An implementation of DistMult from [yang2014]_.",
            vec![embedding_dim(50)],
        )
        .with_uses(["regularization_weight"]),
        model(
            "ERMLP",
            "An implementation of ERMLP from [dong2014]_.",
            vec![embedding_dim(50), ParamSpec::new("hidden_dim", "Optional[int]").default_none()],
        ),
        model(
            "HolE",
            "An implementation of HolE [nickel2016]_.",
            vec![embedding_dim(200)],
        ),
        model(
            "KG2E",
            "An implementation of KG2E from [he2015]_.",
            vec![
                embedding_dim(50),
                ParamSpec::new("dist_similarity", "Optional[str]").default_none(),
                ParamSpec::new("c_min", "float").default(0.05),
                ParamSpec::new("c_max", "float").default(5.0),
            ],
        ),
        model(
            "RESCAL",
            "An implementation of RESCAL from [nickel2011]_.",
            vec![embedding_dim(50)],
        )
        .with_uses(["regularization_weight"]),
        model(
            "RotatE",
            "An implementation of RotatE from [sun2019]_.",
            vec![embedding_dim(200)],
        ),
        model(
            "StructuredEmbedding",
            "An implementation of Structured Embedding (SE) from [bordes2011]_.",
            vec![embedding_dim(50), ParamSpec::new("scoring_fct_norm", "int").default(1)],
        ),
        model(
            "TransD",
            "An implementation of TransD from [ji2015]_.",
            vec![
                embedding_dim(50),
                ParamSpec::new("relation_dim", "int").default(30),
                ParamSpec::new("scoring_fct_norm", "int").default(1),
            ],
        ),
        model(
            "TransE",
            "An implementation of TransE [bordes2013]_.\n\nScores a triple by the distance between head + relation and tail.",
            vec![embedding_dim(50), ParamSpec::new("scoring_fct_norm", "int").default(1)],
        ),
        model(
            "TransH",
            "An implementation of TransH [wang2014]_.",
            vec![
                embedding_dim(50),
                ParamSpec::new("scoring_fct_norm", "int").default(2),
                ParamSpec::new("regularization_weight", "float").default(0.05),
            ],
        ),
        model(
            "TransR",
            "An implementation of TransR from [lin2015]_.",
            vec![
                embedding_dim(50),
                ParamSpec::new("relation_dim", "int").default(30),
                ParamSpec::new("scoring_fct_norm", "int").default(1),
            ],
        ),
        model(
            "UnstructuredModel",
            "An implementation of Unstructured Model (UM) from [bordes2014]_.",
            vec![embedding_dim(50), ParamSpec::new("scoring_fct_norm", "int").default(1)],
        ),
    ]
}

fn datasets() -> Vec<ComponentSpec> {
    [
        ("fb15k", "FB15k", "The FB15k data set."),
        ("fb15k237", "FB15k237", "The FB15k-237 data set."),
        ("kinships", "Kinships", "The Kinships data set."),
        ("nations", "Nations", "The Nations data set."),
        ("umls", "UMLS", "The UMLS data set."),
        ("wn18", "WN18", "The WN18 data set."),
        ("wn18rr", "WN18RR", "The WN18-RR data set."),
    ]
    .into_iter()
    .map(|(name, reference, doc)| ComponentSpec::class(name, doc).with_reference(reference))
    .collect()
}

fn samplers() -> Vec<ComponentSpec> {
    vec![
        ComponentSpec::class("basic", "A basic negative sampler.")
            .with_reference("BasicNegativeSampler"),
        ComponentSpec::class(
            "bernoulli",
            "An implementation of the bernoulli negative sampling approach proposed by [wang2014]_.",
        )
        .with_reference("BernoulliNegativeSampler"),
    ]
}

fn training_loops() -> Vec<ComponentSpec> {
    vec![
        ComponentSpec::class("cwa", "A training loop that uses the closed world assumption.")
            .with_reference("CWATrainingLoop"),
        ComponentSpec::class("owa", "A training loop that uses the open world assumption.")
            .with_reference("OWATrainingLoop"),
    ]
}

fn evaluators() -> Vec<ComponentSpec> {
    vec![
        ComponentSpec::class("rankbased", "A rank-based evaluator for KGE models.")
            .with_reference("RankBasedEvaluator"),
        ComponentSpec::class("sklearn", "An evaluator that uses a Scikit-learn metric.")
            .with_reference("SklearnEvaluator"),
    ]
}

/// Metrics are registered as instances, documented only by their type.
fn metrics() -> Vec<ComponentSpec> {
    const RANK_BASED: &str = "A metric computed from the ranks of the true triples.";
    const SKLEARN: &str = "A metric computed by Scikit-learn from scores and labels.";
    vec![
        ComponentSpec::instance("adjusted_mean_rank", RANK_BASED),
        ComponentSpec::instance("average_precision_score", SKLEARN),
        ComponentSpec::instance("hits_at_k", RANK_BASED),
        ComponentSpec::instance("mean_rank", RANK_BASED),
        ComponentSpec::instance("mean_reciprocal_rank", RANK_BASED),
        ComponentSpec::instance("roc_auc_score", SKLEARN),
    ]
}

/// Read model schemas from a JSON array of component entries.
///
/// ```json
/// [{"name": "MyModel", "doc": "My model [doe2020]_.",
///   "parameters": [{"name": "embedding_dim", "annotation": "int", "default": 50}]}]
/// ```
pub fn load_model_schemas(path: &Path) -> Result<Vec<ComponentSpec>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| KgexError::io(format!("reading model schemas from {}", path.display()), e))?;
    let specs: Vec<ComponentSpec> = serde_json::from_str(&content)?;
    info!(path = %path.display(), models = specs.len(), "Loaded model schemas");
    Ok(specs)
}

/// Build the catalog of built-in components.
pub fn builtin_catalog() -> Result<Catalog> {
    catalog_with_models(Vec::new())
}

/// Build the built-in catalog with `extra` models registered alongside.
///
/// Extra models go through the same registration pass, so a name clash
/// or missing documentation fails the same way a built-in would.
pub fn catalog_with_models(extra: Vec<ComponentSpec>) -> Result<Catalog> {
    let mut builder = Catalog::builder().base_parameters(BASE_MODEL_PARAMETERS);
    builder
        .register_all(ComponentKind::Model, models())?
        .register_all(ComponentKind::Model, extra)?
        .register_all(ComponentKind::Dataset, datasets())?
        .register_all(ComponentKind::Sampler, samplers())?
        .register_all(ComponentKind::TrainingLoop, training_loops())?
        .register_all(ComponentKind::Evaluator, evaluators())?
        .register_all(ComponentKind::Metric, metrics())?;
    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ParamValue;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_catalog_builds() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.models().len(), 14);
        assert_eq!(catalog.registry(ComponentKind::Dataset).len(), 7);
        assert_eq!(catalog.registry(ComponentKind::Sampler).len(), 2);
        assert_eq!(catalog.registry(ComponentKind::TrainingLoop).len(), 2);
        assert_eq!(catalog.registry(ComponentKind::Evaluator).len(), 2);
        assert_eq!(catalog.registry(ComponentKind::Metric).len(), 6);
    }

    #[test]
    fn test_builtin_usage_hides_base_parameters() {
        let catalog = builtin_catalog().unwrap();
        let usage = catalog.hyperparameter_usage();
        let names: Vec<_> = usage.iter().map(|(n, _)| n.as_str()).collect();

        assert!(names.contains(&"embedding_dim"));
        assert!(!names.contains(&"preferred_device"));
        assert!(!names.contains(&"random_seed"));

        let regularization = usage
            .iter()
            .find(|(n, _)| n == "regularization_weight")
            .map(|(_, users)| users.iter().map(String::as_str).collect::<Vec<_>>())
            .unwrap();
        assert_eq!(regularization, vec!["ConvKB", "DistMult", "RESCAL", "TransH"]);
    }

    #[test]
    fn test_extra_models_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "MyModel", "doc": "My model [doe2020]_.",
                "parameters": [
                    {{"name": "embedding_dim", "annotation": "int", "default": 50}},
                    {{"name": "seed", "annotation": "Optional[int]", "default": null}}
                ]}}]"#
        )
        .unwrap();

        let specs = load_model_schemas(file.path()).unwrap();
        assert_eq!(specs[0].parameters[1].default, Some(ParamValue::Null));

        let catalog = catalog_with_models(specs).unwrap();
        let model = catalog.models().get("MyModel").unwrap();
        assert_eq!(model.reference, "MyModel");
        assert_eq!(model.parameters.len(), 2);

        let usage = catalog.hyperparameter_usage();
        let users = &usage.iter().find(|(n, _)| n == "embedding_dim").unwrap().1;
        assert!(users.contains("MyModel"));
    }

    #[test]
    fn test_extra_model_clashing_with_builtin_fails() {
        let extra = vec![ComponentSpec::class("TransE", "Another TransE [doe2020]_.")];
        let err = catalog_with_models(extra).unwrap_err();
        assert!(matches!(err, KgexError::DuplicateComponent { .. }));
    }

    #[test]
    fn test_malformed_schema_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(matches!(
            load_model_schemas(file.path()),
            Err(KgexError::Serialization(_))
        ));
    }

    #[test]
    fn test_metrics_use_type_documentation() {
        let catalog = builtin_catalog().unwrap();
        let hits = catalog.registry(ComponentKind::Metric).get("hits_at_k").unwrap();
        assert_eq!(hits.reference, "hits_at_k");
        assert!(hits.documentation.starts_with("A metric computed from the ranks"));
    }
}
