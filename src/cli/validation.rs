use crate::cli::args::CliArgs;

fn missing_predict_flags(args: &CliArgs) -> Vec<&'static str> {
    let required: [(&'static str, bool); 11] = [
        ("--username", args.username.is_none()),
        ("--mean-radius", args.mean_radius.is_none()),
        ("--mean-perimeter", args.mean_perimeter.is_none()),
        ("--mean-area", args.mean_area.is_none()),
        ("--mean-concavity", args.mean_concavity.is_none()),
        ("--mean-concave-points", args.mean_concave_points.is_none()),
        ("--worst-radius", args.worst_radius.is_none()),
        ("--worst-perimeter", args.worst_perimeter.is_none()),
        ("--worst-area", args.worst_area.is_none()),
        ("--worst-concavity", args.worst_concavity.is_none()),
        ("--worst-concave-points", args.worst_concave_points.is_none()),
    ];
    required
        .into_iter()
        .filter(|(_, missing)| *missing)
        .map(|(flag, _)| flag)
        .collect()
}

pub fn validate(args: &CliArgs) -> Result<(), String> {
    let selected = [
        args.predict,
        args.list_records,
        args.clear_records,
        args.toggle_theme,
    ]
    .iter()
    .filter(|flag| **flag)
    .count();
    if selected == 0 {
        return Err(
            "choose an operation: --predict, --list-records, --clear-records or --toggle-theme"
                .to_string(),
        );
    }
    if selected > 1 {
        return Err("choose exactly one operation".to_string());
    }

    if args.predict {
        let missing = missing_predict_flags(args);
        if !missing.is_empty() {
            return Err(format!("--predict requires {}", missing.join(", ")));
        }
    }

    if let Some(raw) = args.output_format.as_deref() {
        if crate::output::OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "invalid --output-format '{raw}', expected text, json or html"
            ));
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid --timeout, expected positive integer".to_string());
        }
    }
    Ok(())
}
