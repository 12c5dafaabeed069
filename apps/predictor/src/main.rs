use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use client_core::{
    load_settings, ElementId, FormEncoding, HttpTransport, PageModel, PredictionController,
    Region, ResponseShape, SubmitEvent, SubmitOutcome,
};
use shared::domain::{Environment, ModelId, NumericField};
use tracing::info;

#[derive(Parser, Debug)]
#[command(about = "Submit pathloss predictions to a prediction service")]
struct Cli {
    /// Settings file; defaults to ./predictor.toml when present.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    server_url: Option<String>,
    /// Request body encoding: multipart or urlencoded.
    #[arg(long)]
    encoding: Option<FormEncoding>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Single pathloss figure.
    Predict(FormArgs),
    /// Pathloss with free-space and additional loss.
    Breakdown(FormArgs),
    /// Parameter sweep with summary statistics.
    Simulate(FormArgs),
    /// List the available propagation models.
    Models,
}

#[derive(Args, Debug)]
struct FormArgs {
    /// MHz. Sweeps accept comma separated values.
    #[arg(long, allow_hyphen_values = true)]
    frequency: String,
    /// km.
    #[arg(long, allow_hyphen_values = true)]
    distance: String,
    /// m.
    #[arg(long, allow_hyphen_values = true)]
    tx_height: String,
    /// m.
    #[arg(long, allow_hyphen_values = true)]
    rx_height: String,
    #[arg(long)]
    model: Option<ModelId>,
    #[arg(long, default_value_t = Environment::Urban.to_string())]
    environment: String,
    /// Pick the model through its card instead of the dropdown.
    #[arg(long)]
    card: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    let (shape, form) = match cli.command {
        Command::Predict(form) => (ResponseShape::Scalar, form),
        Command::Breakdown(form) => (ResponseShape::ScalarWithBreakdown, form),
        Command::Simulate(form) => (ResponseShape::Batch, form),
        Command::Models => {
            for model in ModelId::ALL {
                println!("{:<14}{}", model.as_str(), model.description());
            }
            return Ok(ExitCode::SUCCESS);
        }
    };

    let mut settings = load_settings(cli.config.as_deref()).context("failed to load settings")?;
    if let Some(server_url) = cli.server_url {
        settings.server_url = server_url;
    }
    if let Some(encoding) = cli.encoding {
        settings.encoding = Some(encoding);
    }

    let endpoint = settings.endpoint(shape)?;
    let encoding = settings.encoding_for(shape);
    info!(%endpoint, %encoding, %shape, "prediction endpoint configured");

    let controller = PredictionController::new(
        HttpTransport::new(endpoint, encoding),
        shape,
        PageModel::new(&ModelId::ALL),
        settings.controller_options(),
    );

    for (field, value) in [
        (NumericField::Frequency, &form.frequency),
        (NumericField::Distance, &form.distance),
        (NumericField::TxHeight, &form.tx_height),
        (NumericField::RxHeight, &form.rx_height),
    ] {
        controller.input_numeric(field, value).await;
    }
    match (form.model, form.card) {
        (Some(model), true) => controller.select_model(model).await,
        (model, _) => controller.change_dropdown(model).await,
    }
    controller.set_environment(&form.environment).await;

    let outcome = controller.submit(&mut SubmitEvent::new()).await;
    controller.with_sink(|page| print_page(page, shape)).await;

    Ok(match outcome {
        SubmitOutcome::Succeeded(_) => ExitCode::SUCCESS,
        SubmitOutcome::Failed(_) | SubmitOutcome::Ignored => ExitCode::FAILURE,
    })
}

fn print_page(page: &PageModel, shape: ResponseShape) {
    if page.is_visible(Region::Error) {
        eprintln!("error: {}", page.text(ElementId::ErrorMessage).unwrap_or_default());
        return;
    }
    if !page.is_visible(Region::Results) {
        return;
    }

    let line = |label: &str, element: ElementId| {
        if let Some(text) = page.text(element) {
            println!("{label:<18}{text}");
        }
    };

    match shape {
        ResponseShape::Scalar | ResponseShape::ScalarWithBreakdown => {
            line("Pathloss", ElementId::PathlossValue);
            if shape == ResponseShape::ScalarWithBreakdown {
                line("Free-space loss", ElementId::FsplValue);
                line("Additional loss", ElementId::AdditionalLossValue);
            }
            line("Model", ElementId::UsedModel);
            line("Environment", ElementId::UsedEnvironment);
            println!("Parameters");
            for item in page.list(ElementId::ParametersList) {
                println!("  {item}");
            }
        }
        ResponseShape::Batch => {
            line("Model", ElementId::UsedModel);
            line("Environment", ElementId::UsedEnvironment);
            line("Calculations", ElementId::TotalCalculations);
            line("Min pathloss", ElementId::MinPathloss);
            line("Max pathloss", ElementId::MaxPathloss);
            line("Avg pathloss", ElementId::AvgPathloss);
            line("Range", ElementId::PathlossRange);
            println!();
            println!("freq_mhz\tdist_km\ttx_m\trx_m\tpathloss_db\tfspl_db\tadditional_db");
            for row in page.table_rows() {
                println!("{}", row.join("\t"));
            }
        }
    }
}
