use anyhow::Context;
use colored::Colorize;
use serde_json::{json, Value};

use tieba_app::auth::check_registration;
use tieba_app::{AppConfig, Page, Route};
use tieba_gate::{FieldError, FormField, FormValidator};
use tieba_store::{FileBackend, PreferenceStore};

use crate::cli::*;
use crate::demo;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading configuration from {}", path.display()))?,
        None => AppConfig::default(),
    };
    let format = cli.format;

    match cli.command {
        Command::Search(args) => cmd_search(args, format),
        Command::Route(args) => cmd_route(args, format),
        Command::Validate(args) => cmd_validate(args, &config, format),
        Command::Prefs(args) => cmd_prefs(args, &config, format),
        Command::Demo(args) => demo::run(config, args.speed),
        Command::Config(args) => cmd_config(args, &config),
    }
}

fn cmd_search(args: SearchArgs, format: OutputFormat) -> anyhow::Result<()> {
    let query = args.query.join(" ");
    let Some(route) = Route::search(&query) else {
        println!("{} Nothing to search for.", "!".yellow().bold());
        return Ok(());
    };
    match format {
        OutputFormat::Json => println!("{}", json!({ "query": query.trim(), "url": route.to_url() })),
        OutputFormat::Text => println!("{} {}", "→".cyan(), route.to_url().bold()),
    }
    Ok(())
}

fn cmd_route(args: RouteArgs, format: OutputFormat) -> anyhow::Result<()> {
    let route = Route::parse(&args.url)?;
    let page = Page::for_route(&route);
    match format {
        OutputFormat::Json => {
            let mut out = json!({ "page": page.name(), "url": route.to_url() });
            if let Page::Search { query: Some(query) } = &page {
                out["query"] = Value::String(query.clone());
            }
            println!("{out}");
        }
        OutputFormat::Text => {
            println!("Page: {}", page.name().bold());
            if let Page::Search { query: Some(query) } = &page {
                println!("Query: {}", query.yellow());
            }
            println!("Canonical URL: {}", route.to_url().cyan());
        }
    }
    Ok(())
}

fn parse_fields(args: &ValidateArgs) -> anyhow::Result<Vec<FormField>> {
    args.fields
        .iter()
        .map(|raw| {
            let (name, value) = raw
                .split_once('=')
                .with_context(|| format!("expected name=value, got `{raw}`"))?;
            let required = args.required.is_empty() || args.required.iter().any(|r| r == name);
            Ok(if required {
                FormField::required(name, value)
            } else {
                FormField::optional(name, value)
            })
        })
        .collect()
}

fn cmd_validate(args: ValidateArgs, config: &AppConfig, format: OutputFormat) -> anyhow::Result<()> {
    let fields = parse_fields(&args)?;
    let validator = FormValidator::with_default_rules(config.validator.clone());

    let errors: Vec<FieldError> = if args.register {
        check_registration(&validator, &fields).errors
    } else {
        fields
            .iter()
            .filter_map(|f| validator.validate_field(f).err())
            .collect()
    };

    match format {
        OutputFormat::Json => {
            let results: Vec<Value> = fields
                .iter()
                .map(|f| {
                    let error = errors.iter().find(|e| e.field == f.name);
                    json!({
                        "field": f.name,
                        "ok": error.is_none(),
                        "kind": error.map(|e| e.kind.to_string()),
                        "message": error.map(|e| e.message.clone()),
                    })
                })
                .collect();
            println!("{}", Value::Array(results));
        }
        OutputFormat::Text => {
            for field in &fields {
                match errors.iter().find(|e| e.field == field.name) {
                    Some(error) => println!(
                        "  {} {}: {}",
                        "✗".red().bold(),
                        field.name.bold(),
                        error.message.red()
                    ),
                    None => println!("  {} {}", "✓".green(), field.name),
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        anyhow::bail!("{} field(s) failed validation", errors.len())
    }
}

fn cmd_prefs(args: PrefsArgs, config: &AppConfig, format: OutputFormat) -> anyhow::Result<()> {
    let backend = FileBackend::open(&config.preferences_path).with_context(|| {
        format!(
            "opening preferences at {}",
            config.preferences_path.display()
        )
    })?;
    let prefs = PreferenceStore::new(backend);

    match args.action {
        PrefsAction::Get { key } => match (prefs.get::<Value>(&key), format) {
            (Some(value), OutputFormat::Json) => println!("{value}"),
            (Some(value), OutputFormat::Text) => println!("{} = {}", key.bold(), value),
            (None, _) => println!("{} = {}", key.bold(), "(not set)".dimmed()),
        },
        PrefsAction::Set { key, value } => {
            let parsed = serde_json::from_str::<Value>(&value).unwrap_or(Value::String(value));
            prefs.set(&key, &parsed);
            println!("{} Set {} = {}", "✓".green(), key.bold(), parsed);
        }
        PrefsAction::Remove { key } => {
            prefs.remove(&key);
            println!("{} Removed {}", "✓".green(), key.bold());
        }
        PrefsAction::List => {
            let keys = prefs.keys();
            if keys.is_empty() {
                println!("No preferences stored.");
            }
            for key in keys {
                let value = prefs.get::<Value>(&key).unwrap_or(Value::Null);
                println!("{} = {}", key.bold(), value);
            }
        }
    }
    Ok(())
}

fn cmd_config(args: ConfigArgs, config: &AppConfig) -> anyhow::Result<()> {
    let rendered = config.to_toml_string()?;
    print!("{rendered}");
    if let Some(path) = args.file {
        std::fs::write(&path, &rendered)
            .with_context(|| format!("writing configuration to {}", path.display()))?;
        println!("{} Wrote {}", "✓".green(), path.display().to_string().bold());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validate_args(fields: &[&str], required: &[&str]) -> ValidateArgs {
        ValidateArgs {
            fields: fields.iter().map(|s| s.to_string()).collect(),
            register: false,
            required: required.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn fields_default_to_required() {
        let fields = parse_fields(&validate_args(&["email=a@b.com", "bio="], &[])).unwrap();
        assert!(fields.iter().all(|f| f.required));
        assert_eq!(fields[1].value, "");
    }

    #[test]
    fn explicit_required_list_marks_the_rest_optional() {
        let fields =
            parse_fields(&validate_args(&["email=a@b.com", "bio=hi"], &["email"])).unwrap();
        assert!(fields[0].required);
        assert!(!fields[1].required);
    }

    #[test]
    fn value_may_contain_equals() {
        let fields = parse_fields(&validate_args(&["password=a=b=c"], &[])).unwrap();
        assert_eq!(fields[0].value, "a=b=c");
    }

    #[test]
    fn demo_rejects_speed_out_of_range() {
        use clap::Parser;

        for speed in ["1e-30", "0", "5000"] {
            let cli = Cli::try_parse_from(["tieba", "demo", "--speed", speed]).unwrap();
            let err = run_command(cli).unwrap_err();
            assert!(err.to_string().contains("speed must be between"), "{speed}: {err}");
        }
    }

    #[test]
    fn malformed_field_is_an_error() {
        assert!(parse_fields(&validate_args(&["email"], &[])).is_err());
    }
}
