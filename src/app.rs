use std::io::Write;

use clap::error::ErrorKind;
use clap::Parser;
use log::error;

use crate::api::ApiClient;
use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::config::{self, ConfigFile};
use crate::flow::{Flow, StatusPanel};
use crate::output::{self, OutputFormat};
use crate::record::{FeatureForm, Prediction, PredictionRecord};
use crate::theme::{self, Palette};

#[derive(Clone, Debug)]
enum Operation {
    Predict(FeatureForm),
    ListRecords,
    ClearRecords,
    ToggleTheme,
}

#[derive(Clone, Debug)]
struct RunConfig {
    operation: Operation,
    base_url: String,
    timeout: usize,
    output: Option<String>,
    output_format: Option<String>,
    no_color: bool,
    assume_yes: bool,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let operation = if args.predict {
        Operation::Predict(FeatureForm {
            username: args.username.unwrap_or_default(),
            mean_radius: args.mean_radius.unwrap_or_default(),
            mean_perimeter: args.mean_perimeter.unwrap_or_default(),
            mean_area: args.mean_area.unwrap_or_default(),
            mean_concavity: args.mean_concavity.unwrap_or_default(),
            mean_concave_points: args.mean_concave_points.unwrap_or_default(),
            worst_radius: args.worst_radius.unwrap_or_default(),
            worst_perimeter: args.worst_perimeter.unwrap_or_default(),
            worst_area: args.worst_area.unwrap_or_default(),
            worst_concavity: args.worst_concavity.unwrap_or_default(),
            worst_concave_points: args.worst_concave_points.unwrap_or_default(),
        })
    } else if args.list_records {
        Operation::ListRecords
    } else if args.clear_records {
        Operation::ClearRecords
    } else {
        Operation::ToggleTheme
    };

    let base_url = args
        .base_url
        .or(cfg.base_url)
        .unwrap_or_else(|| "http://127.0.0.1:5000".to_string());
    reqwest::Url::parse(&base_url).map_err(|_| format!("invalid base URL: {base_url}"))?;

    let timeout = args.timeout.or(cfg.timeout).unwrap_or(10);
    let no_color = args.no_color || cfg.no_color.unwrap_or(false);
    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = args.output_format.or(cfg.output_format);

    Ok(RunConfig {
        operation,
        base_url,
        timeout,
        output,
        output_format,
        no_color,
        assume_yes: args.assume_yes,
    })
}

fn confirm(prompt: &str) -> Result<bool, String> {
    print!("{prompt} [y/N] ");
    std::io::stdout()
        .flush()
        .map_err(|e| format!("failed to flush stdout: {e}"))?;
    let mut answer = String::new();
    std::io::stdin()
        .read_line(&mut answer)
        .map_err(|e| format!("failed to read confirmation: {e}"))?;
    let answer = answer.trim().to_ascii_lowercase();
    Ok(answer == "y" || answer == "yes")
}

fn write_records(
    panel: &StatusPanel,
    records: &[PredictionRecord],
    run: &RunConfig,
) -> Result<(), String> {
    let format = run
        .output_format
        .as_deref()
        .and_then(OutputFormat::parse)
        .or_else(|| {
            run.output
                .as_deref()
                .and_then(output::infer_format_from_path)
        })
        .unwrap_or(OutputFormat::Text);

    let rendered = match format {
        OutputFormat::Text => output::render_table_text(records).into_bytes(),
        OutputFormat::Json => output::render_json(records),
        OutputFormat::Html => output::report::render_html(records, panel.palette.theme),
    };

    match run.output.as_deref() {
        Some(path) => std::fs::write(path, &rendered)
            .map_err(|e| format!("failed to write output file '{path}': {e}")),
        None => {
            print!("{}", String::from_utf8_lossy(&rendered));
            Ok(())
        }
    }
}

async fn predict_flow(
    api: &ApiClient,
    panel: &StatusPanel,
    form: FeatureForm,
) -> Result<(), String> {
    let mut flow: Flow<Prediction> = Flow::new();
    let token = flow.start();
    let spinner = panel.spinner("Processing...");
    let outcome = api.submit(form).await;
    spinner.finish_and_clear();

    match outcome {
        Ok(prediction) => {
            flow.resolve(token, Ok(prediction));
            panel.print_prediction(prediction);
        }
        Err((e, _form)) => {
            error!("prediction failed: {e}");
            flow.resolve(token, Err(e.to_string()));
            panel.print_error(&format!("Error: {e}"));
        }
    }
    Ok(())
}

async fn list_records_flow(
    api: &ApiClient,
    panel: &StatusPanel,
    records: &mut Flow<Vec<PredictionRecord>>,
    run: &RunConfig,
) -> Result<(), String> {
    let token = records.start();
    let spinner = panel.spinner("Loading records...");
    let outcome = api.list_records().await;
    spinner.finish_and_clear();

    match outcome {
        Ok(list) => {
            let count = list.len();
            records.resolve(token, Ok(list));
            let loaded: &[PredictionRecord] =
                records.loaded().map(Vec::as_slice).unwrap_or(&[]);
            write_records(panel, loaded, run)?;
            if count == 0 {
                panel.print_info("No records found.");
            } else {
                panel.print_success("Records loaded.");
            }
        }
        Err(e) => {
            error!("failed to load records: {e}");
            let message = e.to_string();
            records.resolve(token, Err(message.clone()));
            print!("{}", output::render_error_table(&message));
            panel.print_error(&format!("Error loading records: {message}"));
        }
    }
    Ok(())
}

async fn clear_records_flow(
    api: &ApiClient,
    panel: &StatusPanel,
    run: &RunConfig,
) -> Result<(), String> {
    if !run.assume_yes
        && !confirm("Are you sure you want to clear all records? This action cannot be undone.")?
    {
        panel.print_info("Aborted.");
        return Ok(());
    }

    let mut clear: Flow<String> = Flow::new();
    let token = clear.start();
    let spinner = panel.spinner("Clearing database...");
    let outcome = api.clear_records().await;
    spinner.finish_and_clear();

    match outcome {
        Ok(message) => {
            panel.print_success(&message);
            clear.resolve(token, Ok(message));
            // refresh under a fresh generation so a stale listing cannot
            // land on the cleared view
            let mut records = Flow::new();
            list_records_flow(api, panel, &mut records, run).await
        }
        Err(e) => {
            error!("failed to clear records: {e}");
            clear.resolve(token, Err(e.to_string()));
            panel.print_error(&format!("Error: {e}"));
            Ok(())
        }
    }
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }

    let theme_store = config::default_theme_path()
        .ok_or_else(|| "could not resolve home directory".to_string())?;

    if let Operation::ToggleTheme = run.operation {
        let next = theme::toggle(&theme_store)?;
        println!(
            "visual mode: {} (meta color {})",
            next.as_str(),
            next.meta_color()
        );
        return Ok(());
    }

    let panel = StatusPanel::new(Palette::for_theme(theme::load(&theme_store)));
    let api = ApiClient::new(&run.base_url, run.timeout).map_err(|e| e.to_string())?;

    match &run.operation {
        Operation::Predict(form) => predict_flow(&api, &panel, form.clone()).await,
        Operation::ListRecords => {
            let mut records = Flow::new();
            list_records_flow(&api, &panel, &mut records, &run).await
        }
        Operation::ClearRecords => clear_records_flow(&api, &panel, &run).await,
        Operation::ToggleTheme => Ok(()),
    }
}

pub fn run_cli() -> Result<(), String> {
    let args = match CliArgs::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
                print!("{e}");
                return Ok(());
            }
            _ => return Err(e.to_string()),
        },
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp_millis()
        .format_module_path(false)
        .init();

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => {
                config::ensure_default_config_file(&path)?;
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;
    rt.block_on(run_async(run))
}

#[cfg(test)]
mod cli_tests {
    use super::*;
    use clap::Parser;

    fn predict_args() -> Vec<&'static str> {
        vec![
            "oncoview",
            "--predict",
            "--username",
            "ada",
            "--mean-radius",
            "17.99",
            "--mean-perimeter",
            "122.8",
            "--mean-area",
            "1001",
            "--mean-concavity",
            "0.3001",
            "--mean-concave-points",
            "0.1471",
            "--worst-radius",
            "25.38",
            "--worst-perimeter",
            "184.6",
            "--worst-area",
            "2019",
            "--worst-concavity",
            "0.7119",
            "--worst-concave-points",
            "0.2654",
        ]
    }

    #[test]
    fn base_url_falls_back_to_default() {
        let args = CliArgs::parse_from(["oncoview", "--list-records"]);
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        assert_eq!(run.base_url, "http://127.0.0.1:5000");
        assert!(matches!(run.operation, Operation::ListRecords));
    }

    #[test]
    fn cli_overrides_config_values() {
        let args = CliArgs::parse_from([
            "oncoview",
            "--list-records",
            "-u",
            "http://api.local:9000",
            "-T",
            "30",
        ]);
        let cfg = ConfigFile {
            base_url: Some("http://cfg.local".to_string()),
            timeout: Some(5),
            ..Default::default()
        };
        let run = build_run_config(args, cfg).unwrap();
        assert_eq!(run.base_url, "http://api.local:9000");
        assert_eq!(run.timeout, 30);
    }

    #[test]
    fn config_fills_in_when_flags_are_absent() {
        let args = CliArgs::parse_from(["oncoview", "--list-records"]);
        let cfg = ConfigFile {
            base_url: Some("http://cfg.local:5000".to_string()),
            output_format: Some("json".to_string()),
            ..Default::default()
        };
        let run = build_run_config(args, cfg).unwrap();
        assert_eq!(run.base_url, "http://cfg.local:5000");
        assert_eq!(run.output_format.as_deref(), Some("json"));
    }

    #[test]
    fn predict_collects_the_form_verbatim() {
        let args = CliArgs::parse_from(predict_args());
        let run = build_run_config(args, ConfigFile::default()).unwrap();
        match run.operation {
            Operation::Predict(form) => {
                assert_eq!(form.username, "ada");
                assert_eq!(form.mean_radius, "17.99");
                assert_eq!(form.worst_concave_points, "0.2654");
            }
            other => panic!("expected predict operation, got {other:?}"),
        }
    }

    #[test]
    fn predict_without_features_is_rejected() {
        let args = CliArgs::parse_from(["oncoview", "--predict", "--username", "ada"]);
        let err = build_run_config(args, ConfigFile::default()).unwrap_err();
        assert!(err.contains("--mean-radius"));
        assert!(!err.contains("--username,"));
    }

    #[test]
    fn conflicting_operations_are_rejected() {
        let args = CliArgs::parse_from(["oncoview", "--predict", "--list-records"]);
        assert!(build_run_config(args, ConfigFile::default()).is_err());
    }

    #[test]
    fn missing_operation_is_rejected() {
        let args = CliArgs::parse_from(["oncoview"]);
        assert!(build_run_config(args, ConfigFile::default()).is_err());
    }

    #[test]
    fn invalid_base_url_is_rejected() {
        let args = CliArgs::parse_from(["oncoview", "--list-records", "-u", "not a url"]);
        assert!(build_run_config(args, ConfigFile::default()).is_err());
    }
}
