use std::process::ExitCode;

fn main() -> ExitCode {
    vlsm::run()
}
