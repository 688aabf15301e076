use std::process::ExitCode;

fn main() -> ExitCode {
    paas_deployer::run()
}
