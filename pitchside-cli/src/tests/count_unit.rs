//! Focused unit tests covering `count` configuration and execution.

use super::helpers::{Workspace, capture_logs, logged, write_utf8};
use super::*;
use crate::count::{CountArgs, CountConfig, config_from_layers_for_test, execute_count};
use crate::input::InputConfig;
use camino::Utf8PathBuf;
use rstest::rstest;

#[rstest]
fn converting_count_without_input_errors() {
    let err = CountConfig::try_from(CountArgs::default()).expect_err("missing input should error");
    match err {
        CliError::MissingArgument { field, env } => {
            assert_eq!(field, ARG_INPUT);
            assert_eq!(env, ENV_COUNT_INPUT);
        }
        other => panic!("expected MissingArgument, found {other:?}"),
    }
}

#[rstest]
fn count_config_applies_defaults() {
    let args = CountArgs {
        input: Some(Utf8PathBuf::from("facilities.csv")),
        ..CountArgs::default()
    };
    let config = CountConfig::try_from(args).expect("config should build");
    assert_eq!(config, CountConfig {
        source: InputConfig {
            input: Utf8PathBuf::from("facilities.csv"),
            sports: Vec::new(),
            has_headers: true,
        },
        output: Utf8PathBuf::from(DEFAULT_COUNTS_OUTPUT),
    });
}

#[rstest]
fn execute_count_writes_table_and_summary() {
    let workspace = Workspace::with_sample_table();
    let config = CountConfig {
        source: InputConfig {
            input: workspace.table(),
            sports: Vec::new(),
            has_headers: true,
        },
        output: workspace.root().join("out/sport_counts.csv"),
    };
    let mut stdout = Vec::new();
    execute_count(&config, &mut stdout).expect("count should succeed");

    assert_eq!(
        workspace.read("out/sport_counts.csv"),
        "sport,count\ncricket,2\nfield_hockey,1\nrugby_union,1\n"
    );
    let summary = String::from_utf8(stdout).expect("utf-8 summary");
    assert_eq!(
        summary,
        format!("Wrote {}: 4 classified, 1 failed\n", config.output)
    );
}

#[rstest]
fn execute_count_filters_by_sport() {
    let workspace = Workspace::with_sample_table();
    let config = CountConfig {
        source: InputConfig {
            input: workspace.table(),
            sports: vec!["Cricket".to_owned()],
            has_headers: true,
        },
        output: workspace.root().join("cricket.csv"),
    };
    let mut stdout = Vec::new();
    execute_count(&config, &mut stdout).expect("count should succeed");
    assert_eq!(
        workspace.read("cricket.csv"),
        "sport,count\ncricket,2\nrugby_union,1\n"
    );
}

#[rstest]
fn missing_input_is_reported_before_loading() {
    let workspace = Workspace::new();
    let config = CountConfig {
        source: InputConfig {
            input: workspace.table(),
            sports: Vec::new(),
            has_headers: true,
        },
        output: workspace.root().join("sport_counts.csv"),
    };
    let err = execute_count(&config, &mut std::io::sink()).expect_err("missing table");
    match err {
        CliError::MissingSourceFile { field, path } => {
            assert_eq!(field, ARG_INPUT);
            assert_eq!(path, workspace.table());
        }
        other => panic!("expected MissingSourceFile, found {other:?}"),
    }
}

#[rstest]
fn directory_input_is_rejected() {
    let workspace = Workspace::new();
    let config = CountConfig {
        source: InputConfig {
            input: workspace.root().to_path_buf(),
            sports: Vec::new(),
            has_headers: true,
        },
        output: workspace.root().join("sport_counts.csv"),
    };
    let err = execute_count(&config, &mut std::io::sink()).expect_err("directory input");
    assert!(matches!(err, CliError::SourcePathNotFile { .. }));
}

#[rstest]
fn headerless_tables_keep_their_first_row() {
    let workspace = Workspace::new();
    write_utf8(&workspace.table(), b"\"POINT (1 2)\",bowls\n");
    let config = CountConfig {
        source: InputConfig {
            input: workspace.table(),
            sports: Vec::new(),
            has_headers: false,
        },
        output: workspace.root().join("sport_counts.csv"),
    };
    execute_count(&config, &mut std::io::sink()).expect("count should succeed");
    assert_eq!(workspace.read("sport_counts.csv"), "sport,count\nbowls,1\n");
}

#[rstest]
fn merge_layers_maps_configuration_errors() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_cli(json!({ "has_headers": "sometimes" }));

    let err = config_from_layers_for_test(composer.layers())
        .expect_err("invalid config layer should map to CliError::Configuration");
    match err {
        CliError::Configuration(_) => {}
        other => panic!("expected CliError::Configuration, found {other:?}"),
    }
}

#[rstest]
fn merge_layers_honours_precedence() {
    use ortho_config::MergeComposer;
    use serde_json::json;

    let mut composer = MergeComposer::new();
    composer.push_file(
        json!({
            "input": "from-file.csv",
            "output": "from-file-counts.csv",
            "has_headers": false,
        }),
        None,
    );
    composer.push_environment(json!({ "input": "from-env.csv" }));
    composer.push_cli(json!({
        "sports": ["cricket", "rugby_union"],
        "has_headers": true,
    }));

    let config = config_from_layers_for_test(composer.layers()).expect("merged config");
    assert_eq!(config.source.input, Utf8PathBuf::from("from-env.csv"));
    assert_eq!(config.output, Utf8PathBuf::from("from-file-counts.csv"));
    assert_eq!(config.source.sports, ["cricket", "rugby_union"]);
    assert!(config.source.has_headers);
}

#[rstest]
fn execute_count_logs_input_and_output() {
    capture_logs();
    let workspace = Workspace::with_sample_table();
    let config = CountConfig {
        source: InputConfig {
            input: workspace.table(),
            sports: Vec::new(),
            has_headers: true,
        },
        output: workspace.root().join("logged_counts.csv"),
    };
    execute_count(&config, &mut std::io::sink()).expect("count should succeed");

    assert!(logged(&format!(
        "writing counts for {} to {}",
        config.source.input, config.output
    )));
}
