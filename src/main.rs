use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

use invoice_layout::config::{
    config_dir, load_config, load_customer, load_order, resolve_output_dir, Config,
    CONFIG_TEMPLATE, CUSTOMER_TEMPLATE, ORDER_TEMPLATE,
};
use invoice_layout::error::{InvoiceError, Result};
use invoice_layout::invoice::{default_output_path, generate_invoice, InvoiceFormatter};
use invoice_layout::logging;
use invoice_layout::pdf::{DocumentRenderer, TextRenderer, TypstRenderer};
use invoice_layout::{Customer, Order};

#[derive(Parser)]
#[command(name = "invoice-layout")]
#[command(version, about = "Render order invoices to PDF or text", long_about = None)]
struct Cli {
    /// Path to config directory (default: XDG config dir for invoice-layout)
    #[arg(short = 'C', long, global = true)]
    config_dir: Option<PathBuf>,

    /// Log debug output to stderr (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize config directory with template files
    Init,

    /// Render an invoice for an order
    Generate {
        #[command(flatten)]
        input: RecordArgs,

        /// Custom output file path (default: output_dir/INVOICE-<id>.<ext>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Pdf)]
        format: OutputFormat,

        /// Open generated file with system default viewer
        #[arg(long)]
        open: bool,
    },

    /// Print the invoice as text
    Preview {
        #[command(flatten)]
        input: RecordArgs,

        /// Page width in columns
        #[arg(short, long, default_value_t = 80)]
        width: usize,
    },

    /// Print the invoice draw instructions as JSON
    Layout {
        #[command(flatten)]
        input: RecordArgs,
    },

    /// Show configuration and renderer status
    Status,
}

#[derive(clap::Args)]
struct RecordArgs {
    /// Order record (.json or .toml)
    #[arg(long)]
    order: PathBuf,

    /// Customer record (.json or .toml)
    #[arg(long)]
    customer: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Pdf,
    Text,
}

impl OutputFormat {
    fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Text => "txt",
        }
    }
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // Determine config directory
    let cfg_dir = match cli.config_dir {
        Some(p) => p,
        None => config_dir()?,
    };

    match cli.command {
        Commands::Init => cmd_init(&cfg_dir),
        Commands::Generate {
            input,
            output,
            format,
            open,
        } => cmd_generate(&cfg_dir, &input, output, format, open),
        Commands::Preview { input, width } => cmd_preview(&cfg_dir, &input, width),
        Commands::Layout { input } => cmd_layout(&cfg_dir, &input),
        Commands::Status => cmd_status(&cfg_dir),
    }
}

/// Initialize config directory with template files
fn cmd_init(cfg_dir: &Path) -> Result<()> {
    use std::fs;

    if cfg_dir.exists() {
        return Err(InvoiceError::AlreadyInitialized(cfg_dir.to_path_buf()));
    }

    fs::create_dir_all(cfg_dir)?;
    fs::create_dir_all(cfg_dir.join("output"))?;

    fs::write(cfg_dir.join("config.toml"), CONFIG_TEMPLATE)?;
    fs::write(cfg_dir.join("order.toml"), ORDER_TEMPLATE)?;
    fs::write(cfg_dir.join("customer.toml"), CUSTOMER_TEMPLATE)?;

    println!("Initialized invoice-layout config at: {}", cfg_dir.display());
    println!();
    println!("Next steps:");
    println!(
        "  1. Edit your company header:  $EDITOR {}/config.toml",
        cfg_dir.display()
    );
    println!(
        "  2. Try the sample order:      invoice-layout preview --order {0}/order.toml --customer {0}/customer.toml",
        cfg_dir.display()
    );

    Ok(())
}

/// Load config plus the order and customer records
fn load_inputs(cfg_dir: &Path, input: &RecordArgs) -> Result<(Config, Order, Customer)> {
    if !cfg_dir.exists() {
        return Err(InvoiceError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;
    let order = load_order(&input.order)?;
    let customer = load_customer(&input.customer)?;
    Ok((config, order, customer))
}

fn formatter_for(config: &Config) -> Result<InvoiceFormatter> {
    InvoiceFormatter::new(config.company.clone(), config.invoice.clone())
}

/// Render an invoice to a file
fn cmd_generate(
    cfg_dir: &Path,
    input: &RecordArgs,
    output: Option<PathBuf>,
    format: OutputFormat,
    open: bool,
) -> Result<()> {
    let (config, order, customer) = load_inputs(cfg_dir, input)?;
    let formatter = formatter_for(&config)?;

    let output_path = match output {
        Some(path) => path,
        None => {
            let output_dir = resolve_output_dir(&config.pdf.output_dir, cfg_dir);
            default_output_path(&output_dir, &order, format.extension())
        }
    };

    let renderer: Box<dyn DocumentRenderer> = match format {
        OutputFormat::Pdf => Box::new(TypstRenderer::new(&config.pdf)),
        OutputFormat::Text => Box::new(TextRenderer::default()),
    };

    let path = generate_invoice(
        &formatter,
        &order,
        &customer,
        &output_path,
        renderer.as_ref(),
    )?;

    // Print summary
    println!("Generated invoice {}", order.id);
    println!("  Customer: {}", customer.name);
    if let Some(total) = order.total.valid() {
        println!("  Total:    {}", total.format_with(formatter.currency_symbol()));
    }
    println!("  Status:   {}", order.status);
    println!("  Saved:    {}", path.display());

    if open {
        open_path(&path)?;
    }

    Ok(())
}

/// Print the text rendering to stdout
fn cmd_preview(cfg_dir: &Path, input: &RecordArgs, width: usize) -> Result<()> {
    let (config, order, customer) = load_inputs(cfg_dir, input)?;
    let instructions = formatter_for(&config)?.format(&order, &customer)?;

    print!("{}", TextRenderer::new(width).render_to_string(&instructions));
    Ok(())
}

/// Print the draw instructions as JSON
fn cmd_layout(cfg_dir: &Path, input: &RecordArgs) -> Result<()> {
    let (config, order, customer) = load_inputs(cfg_dir, input)?;
    let instructions = formatter_for(&config)?.format(&order, &customer)?;

    let json = serde_json::to_string_pretty(&instructions)
        .map_err(|e| InvoiceError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
    println!("{json}");
    Ok(())
}

/// Show configuration status
fn cmd_status(cfg_dir: &Path) -> Result<()> {
    if !cfg_dir.exists() {
        return Err(InvoiceError::ConfigNotFound(cfg_dir.to_path_buf()));
    }

    let config = load_config(cfg_dir)?;
    let typst = TypstRenderer::new(&config.pdf);

    println!("Invoice Layout Status");
    println!("{}", "-".repeat(50));
    println!("Config directory: {}", cfg_dir.display());
    println!("Company:          {}", config.company.name);
    println!(
        "Currency:         {} {}",
        config.invoice.currency_symbol,
        config.invoice.currency_code.as_deref().unwrap_or("")
    );
    println!(
        "Output directory: {}",
        resolve_output_dir(&config.pdf.output_dir, cfg_dir).display()
    );
    println!(
        "Typst:            {}",
        if typst.is_available() {
            "available"
        } else {
            "not found (use --format text)"
        }
    );

    Ok(())
}

fn open_path(path: &Path) -> Result<()> {
    // Open with system default viewer
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(path).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(path).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()?;
    }
    Ok(())
}
