mod cli;
mod emit;
mod merge;
mod study;

use std::io::BufWriter;
use std::process::Command;
use std::thread;

use cli::get_cli;
use emit::{emit_benchset, fd_path, inherited_pipe};
use merge::merge_files;

// External comparison tool, resolved through PATH:
//   go install golang.org/x/perf/cmd/benchstat@latest
const BENCHSTAT: &str = "benchstat";

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {}", &err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = get_cli();

    // Full merge pass up front: every file must parse before any pipe is
    // opened, so a bad input never leaks descriptors or partial output.
    let sets = merge_files(&cfg.files)?;

    let mut cmd = Command::new(BENCHSTAT);
    cmd.args(&cfg.flags);

    // Read ends stay open in the parent until the child has inherited them.
    let mut read_ends = Vec::with_capacity(sets.len());
    let mut emitters = Vec::with_capacity(sets.len());
    for set in sets {
        let (read, write) = inherited_pipe()?;
        cmd.arg(format!("{}={}", set.name, fd_path(&read)));
        read_ends.push(read);
        let h = thread::Builder::new()
            .name(format!("emit_{}", set.name))
            .spawn(move || {
                let mut sink = BufWriter::new(write);
                if let Err(err) = emit_benchset(&set, &mut sink) {
                    // benchstat may exit before draining every stream; a
                    // broken pipe on this best-effort feed is not a failure
                    if err.kind() != std::io::ErrorKind::BrokenPipe {
                        eprintln!("warning: emitting {}: {}", set.name, err);
                    }
                }
            })?;
        emitters.push(h);
    }

    let mut child = cmd
        .spawn()
        .map_err(|err| format!("unable to run {}: {}", BENCHSTAT, err))?;
    // The child holds its own copies now; dropping ours guarantees emitters
    // see EPIPE instead of blocking if the child dies early.
    drop(read_ends);
    let status = child.wait()?;
    for h in emitters {
        let _ = h.join();
    }
    if !status.success() {
        Err(format!("{} failed: {}", BENCHSTAT, status))?;
    }
    Ok(())
}
