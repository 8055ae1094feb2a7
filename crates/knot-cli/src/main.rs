use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::{env, fs};

use knot::{Environment, ErrorKind, ReplProgress, ReplSession, StdPrint, parse_program, release, run_program};

fn main() -> ExitCode {
    let args: Vec<String> = env::args().collect();
    let prog = args.first().map_or("knot", String::as_str);

    match &args[1..] {
        [] => run_interactive(),
        [file] => run_file(file, false),
        [file, flag] if flag.as_str() == "-v" => run_file(file, true),
        _ => {
            eprintln!("Usage: {prog} [file] [-v]");
            exit_code_for(ErrorKind::InvalidArgs)
        }
    }
}

fn exit_code_for(kind: ErrorKind) -> ExitCode {
    ExitCode::from(u8::try_from(kind.exit_code()).unwrap_or(255))
}

fn run_file(path: &str, verbose: bool) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(err) => {
            eprintln!("error: cannot read {path}: {err}");
            return exit_code_for(ErrorKind::FileAccessFailure);
        }
    };

    let program = match parse_program(&source) {
        Ok(program) => program,
        Err(kind) => {
            eprintln!("error: {kind}");
            return exit_code_for(kind);
        }
    };

    let mut env = Environment::new();
    let mut out = StdPrint;
    let outcome = run_program(&program, &mut env, &mut out, verbose);
    release(program);

    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(kind) => {
            eprintln!("error: {kind}");
            exit_code_for(kind)
        }
    }
}

fn run_interactive() -> ExitCode {
    let mut session = ReplSession::new();
    let mut out = StdPrint;
    let mut buffer = String::new();
    let stdin = io::stdin();

    loop {
        print!("{}", if buffer.is_empty() { "> " } else { "... " });
        let _ = io::stdout().flush();

        let mut line = String::new();
        let bytes_read = match stdin.lock().read_line(&mut line) {
            Ok(n) => n,
            Err(_) => break,
        };
        if bytes_read == 0 {
            break;
        }
        buffer.push_str(&line);

        if ReplSession::needs_more_input(&buffer) {
            continue;
        }
        let chunk = std::mem::take(&mut buffer);
        match session.eval_chunk(&chunk, &mut out) {
            Ok(ReplProgress::Continue) => {}
            Ok(ReplProgress::Quit) => break,
            Err(kind) => eprintln!("error: {kind}"),
        }
    }

    ExitCode::SUCCESS
}
