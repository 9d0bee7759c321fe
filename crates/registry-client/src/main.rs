//! `registry` command: list, inspect and edit records from a terminal.

use std::ffi::OsString;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use ortho_config::OrthoConfig;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use registry_client::{
    ClientSettings, GeoCatalogue, ListView, Notice, RecordForm, RecordsClient, SortColumn,
};

/// `registry` command arguments.
#[derive(Debug, Parser)]
#[command(name = "registry", about = "Manage records held by the registry", version)]
struct Cli {
    /// Records collection URL; overrides `REGISTRY_CLIENT_BASE_URL`.
    #[arg(long = "base-url", value_name = "url", global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print records sorted and filtered like the list page.
    List {
        /// Column to sort by; repeat to toggle descending.
        #[arg(long, value_name = "column", value_parser = parse_column)]
        sort: Vec<SortColumn>,
        /// Case-insensitive substring filter; repeat for several columns.
        #[arg(long = "filter", value_name = "column=text", value_parser = parse_filter)]
        filters: Vec<(SortColumn, String)>,
    },
    /// Print one record.
    Show { id: u64 },
    /// Create a record.
    Create(FormArgs),
    /// Update a record; omitted fields keep their stored values.
    Update {
        id: u64,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Delete a record after confirmation.
    Delete {
        id: u64,
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Args)]
struct FormArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    phone: Option<String>,
    #[arg(long)]
    email: Option<String>,
    /// Defaults to `--email`.
    #[arg(long = "email-confirm")]
    email_confirm: Option<String>,
    /// Country code, e.g. `US`.
    #[arg(long)]
    country: Option<String>,
    /// State or province code, e.g. `CA`.
    #[arg(long)]
    state: Option<String>,
    /// `license` or `mutual`.
    #[arg(long = "agreement")]
    agreement_type: Option<String>,
    #[arg(long = "accept-license")]
    accept_license: Option<bool>,
    #[arg(long = "send-news-email")]
    send_news_email: Option<bool>,
}

impl FormArgs {
    fn apply(self, form: &mut RecordForm, geo: &GeoCatalogue) {
        if let Some(name) = self.name {
            form.name = name;
        }
        if let Some(phone) = self.phone {
            form.phone = phone;
        }
        if let Some(email) = self.email {
            form.email_confirm.clone_from(&email);
            form.email = email;
        }
        if let Some(confirm) = self.email_confirm {
            form.email_confirm = confirm;
        }
        if let Some(country) = self.country {
            form.select_country(&country, geo);
        }
        if let Some(state) = self.state {
            form.state = state;
        }
        if let Some(agreement) = self.agreement_type {
            form.agreement_type = agreement;
        }
        if let Some(accept) = self.accept_license {
            form.accept_license = accept;
        }
        if let Some(send) = self.send_news_email {
            form.send_news_email = send;
        }
    }
}

fn parse_column(raw: &str) -> Result<SortColumn, String> {
    SortColumn::from_key(raw).ok_or_else(|| {
        let known = SortColumn::ALL.map(SortColumn::key).join(", ");
        format!("unknown column {raw:?}; expected one of {known}")
    })
}

fn parse_filter(raw: &str) -> Result<(SortColumn, String), String> {
    let (column, text) = raw
        .split_once('=')
        .ok_or_else(|| format!("filter {raw:?} must look like column=text"))?;
    Ok((parse_column(column.trim())?, text.to_owned()))
}

fn main() -> ExitCode {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .compact()
        .with_writer(io::stderr)
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let cli = Cli::parse();
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(error) => return report(&format!("create Tokio runtime: {error}")),
    };
    match runtime.block_on(run(cli)) {
        Ok(code) => code,
        Err(error) => report(&error.to_string()),
    }
}

fn report(message: &str) -> ExitCode {
    let mut stderr = io::stderr().lock();
    if writeln!(stderr, "registry: {message}").is_err() {
        warn!(message, "failed to write error");
    }
    ExitCode::FAILURE
}

async fn run(cli: Cli) -> io::Result<ExitCode> {
    // Only file and environment layers here; flags belong to clap.
    let mut settings = ClientSettings::load_from_iter([OsString::from("registry")])
        .map_err(|e| io::Error::other(format!("failed to load settings: {e}")))?;
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }
    let mut client = RecordsClient::from_settings(&settings)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
    let geo = GeoCatalogue::bundled().map_err(io::Error::other)?;
    let mut out = io::stdout().lock();

    match cli.command {
        Command::List { sort, filters } => {
            let mut view = ListView::new();
            for column in sort {
                view.select_sort(column);
            }
            for (column, text) in &filters {
                view.set_filter(*column, text);
            }
            let records = match client.refresh().await {
                Ok(records) => records,
                Err(error) => return write_notice(&mut out, Notice::failure(), &error),
            };
            write_table(&mut out, &view.visible(records))?;
        }
        Command::Show { id } => match client.fetch(id).await {
            Ok(record) => {
                let json = serde_json::to_string_pretty(&record).map_err(io::Error::other)?;
                writeln!(out, "{json}")?;
            }
            Err(error) => return write_notice(&mut out, Notice::failure(), &error),
        },
        Command::Create(args) => {
            let mut form = RecordForm::create();
            args.apply(&mut form, &geo);
            return submit(&mut out, &mut client, &form, &geo).await;
        }
        Command::Update { id, form: args } => {
            let record = match client.fetch(id).await {
                Ok(record) => record,
                Err(error) => return write_notice(&mut out, Notice::failure(), &error),
            };
            let mut form = RecordForm::from_record(&record, &geo);
            args.apply(&mut form, &geo);
            return submit(&mut out, &mut client, &form, &geo).await;
        }
        Command::Delete { id, yes } => {
            let mut view = ListView::new();
            let prompt = view.request_delete(id);
            if !yes && !confirm(&mut out, prompt)? {
                view.cancel_delete();
                return Ok(ExitCode::SUCCESS);
            }
            if let Err(error) = view.confirm_delete(&mut client).await {
                return write_notice(&mut out, Notice::failure(), &error);
            }
            writeln!(out, "Record {id} deleted.")?;
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn submit(
    out: &mut impl Write,
    client: &mut RecordsClient,
    form: &RecordForm,
    geo: &GeoCatalogue,
) -> io::Result<ExitCode> {
    let outcome = client.submit(form, geo).await;
    let notice = Notice::for_submission(form.mode, outcome.as_ref());
    match outcome {
        Ok(_) => {
            writeln!(out, "{}: {}", notice.title, notice.message)?;
            if let Some(id) = notice.record_id {
                writeln!(out, "Record id: {id}")?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(registry_client::SubmitError::Invalid(errors)) => {
            writeln!(out, "{}: {}", notice.title, notice.message)?;
            for (field, message) in errors.iter() {
                writeln!(out, "  {field}: {message}")?;
            }
            Ok(ExitCode::FAILURE)
        }
        Err(registry_client::SubmitError::Request(error)) => write_notice(out, notice, &error),
    }
}

fn write_notice(
    out: &mut impl Write,
    notice: Notice,
    error: &registry_client::ClientError,
) -> io::Result<ExitCode> {
    writeln!(out, "{}: {}", notice.title, notice.message)?;
    warn!(%error, "request failed");
    Ok(ExitCode::FAILURE)
}

fn write_table(out: &mut impl Write, rows: &[&registry_client::Record]) -> io::Result<()> {
    let headings = SortColumn::ALL.map(SortColumn::label);
    writeln!(out, "Id\t{}", headings.join("\t"))?;
    if let Some(message) = ListView::empty_message(rows) {
        writeln!(out, "{message}")?;
        return Ok(());
    }
    for record in rows {
        let cells = SortColumn::ALL.map(|column| column.value(record));
        writeln!(out, "{}\t{}", record.id, cells.join("\t"))?;
    }
    Ok(())
}

fn confirm(out: &mut impl Write, prompt: Notice) -> io::Result<bool> {
    write!(out, "{}: {} [y/N] ", prompt.title, prompt.message)?;
    out.flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}
