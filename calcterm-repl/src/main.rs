use calcterm::Submission;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{
    fs::File,
    io::{self, BufReader, IsTerminal, Read},
};

/// Prints the result of one submission: the simplified expression's grid, followed by the
/// numeric value when one exists.
fn print_submission(submission: &Submission) {
    for row in &submission.output.grid {
        println!("  {row}");
    }
    if let Some(number) = &submission.number {
        println!("  = {}", number.one_line);
    }
}

/// Parses and simplifies the given line, printing the result or the error report.
fn submit_line(input: &str) {
    let input = input.trim();
    if input.is_empty() {
        return;
    }
    match calcterm::submit(input) {
        Ok(submission) => print_submission(&submission),
        Err(err) => {
            let _ = err.report_to_stderr("input", input);
        }
    }
}

fn submit_all(source: &str) {
    for line in source.lines() {
        submit_line(line);
    }
}

fn repl() -> rustyline::Result<()> {
    let mut editor = DefaultEditor::new()?;
    loop {
        match editor.readline("> ") {
            Ok(line) => {
                let _ = editor.add_history_entry(line.as_str());
                submit_line(&line);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err),
        }
    }
    Ok(())
}

fn main() {
    let mut args = std::env::args();
    args.next();

    if let Some(filename) = args.next() {
        // run expressions from a file, one per line
        let mut file = BufReader::new(File::open(filename).unwrap());
        let mut input = String::new();
        file.read_to_string(&mut input).unwrap();
        submit_all(&input);
    } else if !io::stdin().is_terminal() {
        // read expressions from piped stdin
        let mut input = String::new();
        io::stdin().read_to_string(&mut input).unwrap();
        submit_all(&input);
    } else {
        // interactive mode
        repl().unwrap();
    }
}
