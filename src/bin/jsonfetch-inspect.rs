//! Purpose: Provide a `jsonfetch-inspect` alias that runs `jsonfetch --inspect`.
//! Role: Convenience wrapper; resolves a sibling `jsonfetch` first, else uses PATH.
//! Invariants: Prepends `--inspect`, forwards remaining args verbatim, and propagates
//! the child exit status.
//! Invariants: Emits only a plain stderr message on exec failure.
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;
use std::process::Command;

fn main() {
    let args: Vec<OsString> = env::args_os().skip(1).collect();
    let target = resolve_jsonfetch_binary();

    let status = Command::new(&target).arg("--inspect").args(args).status();

    match status {
        Ok(status) => std::process::exit(status.code().unwrap_or(1)),
        Err(err) => {
            eprintln!(
                "jsonfetch-inspect: failed to execute {}: {err}",
                target.display()
            );
            std::process::exit(1);
        }
    }
}

fn resolve_jsonfetch_binary() -> PathBuf {
    let name = format!("jsonfetch{}", env::consts::EXE_SUFFIX);
    if let Ok(exe) = env::current_exe() {
        if let Some(parent) = exe.parent() {
            let candidate = parent.join(&name);
            if candidate.exists() {
                return candidate;
            }
        }
    }
    PathBuf::from(name)
}
