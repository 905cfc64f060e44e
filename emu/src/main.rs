mod error;
mod hooks;

use std::process::ExitCode;

use arch::model::State;
use clap::Parser;
use color_print::cprintln;

use error::Error;
use hooks::{dump::Dump, trace::registers, trace::Trace, Hook};

#[derive(Parser, Debug)]
#[clap(name = "SX Emulator", version, about = "Emulator for the SX accumulator machine")]
struct Args {
    /// Stop after this many instructions
    #[arg(short = 't', long)]
    tmax: Option<u64>,

    /// Print every instruction and the registers after it
    #[arg(short = 'a', long)]
    trace: bool,

    /// YAML file describing memory dumps
    #[arg(short, long)]
    dump_cfg: Option<String>,

    #[arg(default_value = "main.o")]
    input_file: String,
}

fn main() -> ExitCode {
    let args = Args::parse();
    println!("SX Emulator");

    println!("+-----------------------------------------------+");
    println!("| {:<45} |", args.input_file);
    println!("+-----------------------------------------------+");

    match run(&args) {
        Ok(state) => {
            println!("=================================================");
            println!("{}", registers(&state));
            println!("Total instructions executed: {}", state.executed());
            ExitCode::SUCCESS
        }
        Err(err) => {
            cprintln!("<red,bold>error</>: {}", err);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<State, Error> {
    // ------------------------------------------------------------------------
    // Initialize state machine model
    let mut state = {
        let bytes = std::fs::read(&args.input_file)
            .map_err(|e| Error::FileOpen(args.input_file.clone(), e))?;
        let mut cpu = State::new();
        cpu.load_bytes(&bytes);
        println!(" * Program: {} words", cpu.program_len());
        cpu
    };

    // ------------------------------------------------------------------------
    // Initialize hooks
    println!("[INIT]");
    let mut hooks: Vec<Box<dyn Hook>> = vec![
        Box::new(Trace::arg(args.trace)),
        Box::new(Dump::arg(args.dump_cfg.clone())?),
    ];
    state = hooks.iter_mut().fold(state, |state, hook| hook.init(state));

    // ------------------------------------------------------------------------
    // Main loop
    println!("[RUN]");
    for time in 0..args.tmax.unwrap_or(u64::MAX) {
        let exec = match state.exec() {
            Ok(exec) => exec,
            Err(fault) => {
                println!("{}", registers(&state));
                return Err(fault.into());
            }
        };
        state = hooks
            .iter_mut()
            .fold(state, |state, hook| hook.exec(time, exec, state));
        if state.is_halted() {
            break;
        }
    }

    // Exit
    state = hooks.iter_mut().fold(state, |state, hook| hook.fini(state));
    Ok(state)
}
