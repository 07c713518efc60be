use std::process::ExitCode;

fn main() -> ExitCode {
    reflectdoc::cli::run()
}
