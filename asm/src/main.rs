use std::path::Path;
use std::process::ExitCode;

use color_print::cprintln;
use sxasm::listing::print_dump;
use sxasm::{Assembler, Error};

const HELP_TEMPLATE: &str = "\
{before-help}{bin} {version}
  {about}

{usage-heading}
{tab}{usage}

{all-args}{after-help}";

#[derive(Debug, clap::Parser)]
#[clap(version, about, help_template = HELP_TEMPLATE)]
struct Args {
    /// Input file
    #[clap(default_value = "main.asm")]
    input: String,

    /// Object file [default: <input>.o]
    #[clap(short, long)]
    output: Option<String>,

    /// Listing file [default: <input>.lst]
    #[clap(short, long)]
    listing: Option<String>,

    /// Log file [default: <input>.log]
    #[clap(long)]
    log: Option<String>,

    /// Dump assembly listing
    #[clap(short, long)]
    dump: bool,
}

impl Args {
    fn path_or(&self, path: &Option<String>, ext: &str) -> String {
        path.clone().unwrap_or_else(|| {
            Path::new(&self.input)
                .with_extension(ext)
                .to_string_lossy()
                .into_owned()
        })
    }
}

fn main() -> ExitCode {
    use clap::Parser;

    let args = Args::parse();
    println!("SX Assembler");

    match run(&args) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            cprintln!("<red,bold>error</>: {}", err);
            ExitCode::FAILURE
        }
    }
}

/// Returns whether output was generated.
fn run(args: &Args) -> Result<bool, Error> {
    let log_path = args.path_or(&args.log, "log");
    let lst_path = args.path_or(&args.listing, "lst");
    let obj_path = args.path_or(&args.output, "o");

    println!("1. Read Source");
    println!("  < {}", args.input);
    let source = std::fs::read_to_string(&args.input)
        .map_err(|e| Error::FileOpen(args.input.clone(), e))?;

    println!("2. Pass 1");
    let mut asm = Assembler::new();
    asm.pass1(source.lines());
    println!(
        "  - {} lines, {} labels, {} instructions",
        asm.source.len(),
        asm.symbols.len(),
        asm.records.iter().filter(|r| r.mnemonic.is_some()).count()
    );
    asm.msgs.dump(&args.input, &asm.source);
    write(&log_path, asm.msgs.log().as_bytes())?;
    println!("  > {}", log_path);

    if asm.msgs.has_error() {
        cprintln!(
            "<red,bold>Aborted</>: {} error(s), no output generated",
            asm.msgs.errors().len()
        );
        return Ok(false);
    }

    println!("3. Pass 2");
    let listing = asm.pass2()?;
    for entry in listing.truncated() {
        cprintln!(
            "<yellow,bold>warn</>: {}:{}: operand truncated to 24 bits: {}",
            args.input,
            entry.line,
            entry.statement
        );
    }

    println!("4. Write Output");
    write(&lst_path, listing.text().as_bytes())?;
    println!("  > {}", lst_path);
    write(&obj_path, &listing.object())?;
    println!("  > {} ({} words)", obj_path, listing.words().len());

    if args.dump {
        print_dump(&asm, &listing);
    }
    Ok(true)
}

fn write(path: &str, contents: &[u8]) -> Result<(), Error> {
    std::fs::write(path, contents).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound | std::io::ErrorKind::PermissionDenied => {
            Error::FileCreate(path.to_string(), e)
        }
        _ => Error::FileWrite(path.to_string(), e),
    })
}
