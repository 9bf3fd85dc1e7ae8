// Command-line front end. The binary in main.rs is a thin wrapper so the
// pieces here can be driven from integration tests.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod output;

/// Process exit code when the run was interrupted.
pub const EXIT_INTERRUPTED: i32 = 130;

/// Exit code for an argument parse failure. Help and version output exit
/// cleanly; usage errors (unknown flags, out-of-range numbers) exit 1 like
/// any other failure.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() {
        1
    } else {
        0
    }
}

/// Map a failed run to its exit code: 130 if anything in the chain was an
/// interruption, 1 otherwise.
pub fn exit_code(err: &anyhow::Error) -> i32 {
    let interrupted = err.chain().any(|cause| {
        cause
            .downcast_ref::<std::io::Error>()
            .is_some_and(|e| e.kind() == std::io::ErrorKind::Interrupted)
    });
    if interrupted {
        EXIT_INTERRUPTED
    } else {
        1
    }
}
