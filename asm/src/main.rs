use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::process::exit;

use agcasm::{output, Compiler, Config, Error};
use color_print::{cformat, cprintln};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {author}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(author, version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input files
    #[clap(required = true)]
    input: Vec<PathBuf>,

    /// Directory the run directories are created in
    #[clap(short, long, default_value = ".")]
    out_dir: PathBuf,

    /// Ram size in words, signature word included
    #[clap(short, long)]
    ram: Option<usize>,

    /// YAML config file
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Dump the assembled image
    #[clap(short, long)]
    dump: bool,

    /// More log output (-v, -vv, -vvv)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    use clap::Parser;

    let args: Args = Args::parse();
    let level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if let Err(err) = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Failed to configure logger: {}", err);
    }

    println!("AGC State Machine Compiler");

    let config = match load_config(&args) {
        Ok(config) => config,
        Err(err) => {
            cprintln!("<red,bold>error</>: {}", err);
            exit(1);
        }
    };

    for input in &args.input {
        if let Err(err) = run(input, &args, &config) {
            let lines = std::fs::read_to_string(input)
                .map(|text| text.lines().map(str::to_string).collect::<Vec<_>>())
                .unwrap_or_default();
            err.print_diag(&input.display().to_string(), &lines);
            exit(1);
        }
    }
}

fn load_config(args: &Args) -> Result<Config, Error> {
    let mut config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    if let Some(ram) = args.ram {
        config.ram = ram;
    }
    config.validate()
}

fn run(input: &Path, args: &Args, config: &Config) -> Result<(), Error> {
    let name = input.display().to_string();

    println!("1. Parse Lines");
    println!("  < {}", name);
    let file = File::open(input).map_err(|err| Error::FileOpen(name.clone(), err))?;
    let mut compiler = Compiler::new(config.ram);
    compiler.parse_reader(BufReader::new(file))?;

    println!("2. Resolve, Check & Assemble");
    let image = compiler.finish()?;

    let dir = output::run_dir(&args.out_dir, config, &name);
    println!("3. Write Outputs");
    println!("  > {}", dir.display());
    output::write_all(&dir, &image, input, config)?;

    if args.dump {
        println!("+-----+----------+--------------------------+---------------------------------");
        println!("{}", image.cformat());
        println!("+-----+----------+--------------------------+---------------------------------");
    }

    println!("{}", cformat!("Signature is <green,bold>0x{:x}</>", image.signature()));
    println!("Addr Ram Max is {}", image.used());
    println!("Number of state is {}", image.states().len());
    cprintln!("<green,bold>Successfully generate !!</>");
    println!("===========END===========");
    Ok(())
}
